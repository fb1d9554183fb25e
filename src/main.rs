use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use topout::fetch::Dataset;
use topout::scoring::ScoringConfig;
use topout::standings::Filters;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
enum OutputFormat {
    /// Aligned table with a header row
    #[default]
    Table,
    /// Tab-separated values, no header
    Tsv,
    /// JSON array of results
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ranked leaderboard (default if no subcommand)
    List {
        /// Only show climbers of this gender (case-insensitive)
        #[arg(short, long)]
        gender: Option<String>,

        /// Only show climbers in this category (case-insensitive)
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List the divisions present in the current results
    Divisions,
    /// Interactive leaderboard
    Tui {
        /// Start filtered to this gender
        #[arg(short, long)]
        gender: Option<String>,

        /// Start filtered to this category
        #[arg(short = 'C', long)]
        category: Option<String>,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "topout")]
#[command(about = "Climbing competition leaderboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/topout/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Results feed URL (overrides config)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Use generated mock data instead of the live feed
    #[arg(long, global = true)]
    mock: bool,

    /// Fail instead of falling back to mock data when the feed is unavailable
    #[arg(long, global = true, conflicts_with = "mock")]
    no_fallback: bool,

    /// Number of best climbs counted per climber (overrides config)
    #[arg(long, global = true)]
    top_climbs: Option<usize>,

    /// Bonus added to onsight sends (overrides config)
    #[arg(long, global = true)]
    onsight_bonus: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: bool) {
    // RUST_LOG wins; otherwise warn, or debug for this crate with -v
    let default = if verbose { "topout=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(|| topout::stderr_buffer::BufferedStderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(filter)
        .init();
}

fn exit_with_errors(heading: &str, errors: &[String]) -> ! {
    eprintln!("{}", heading);
    for error in errors {
        eprintln!("  - {}", error);
    }
    std::process::exit(EXIT_CONFIG);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::List {
        gender: None,
        category: None,
        format: OutputFormat::Table,
    });
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = command {
        if let Err(e) = topout::config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let mut config = match topout::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // CLI overrides take precedence over the file
    if let Some(url) = cli.url {
        config.feed.url = url;
    }
    config.scoring = Some(
        config
            .effective_scoring()
            .with_overrides(cli.onsight_bonus, cli.top_climbs),
    );

    if let Err(errors) = topout::config::validate_config(&config) {
        exit_with_errors("Config errors:", &errors);
    }
    let scoring = config.effective_scoring();

    // validate_config already checked the timeout parses
    let timeout = match config.feed.timeout_duration() {
        Ok(t) => t,
        Err(e) => exit_with_errors("Config errors:", &[format!("feed.timeout: {}", e)]),
    };

    let client = match topout::feed::create_client(&config.feed.url, timeout) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {:#}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    if let Commands::Tui { gender, category } = command {
        let theme = topout::tui::resolve_theme(config.theme);
        let app = topout::tui::App::new_loading(
            scoring,
            Filters::new(gender.as_deref(), category.as_deref()),
            config.mock_toggle,
            config.auto_refresh_interval,
            topout::tui::ThemeColors::for_theme(theme),
        );
        if let Err(e) = topout::tui::run_tui(app, client, cli.mock).await {
            eprintln!("TUI error: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let start_time = Instant::now();
    let dataset = load(&client, cli.mock, cli.no_fallback).await;
    tracing::debug!(
        source = dataset.source.label(),
        fetched_at = %dataset.fetched_at,
        elapsed = ?start_time.elapsed(),
        "dataset ready"
    );
    if !dataset.is_live() {
        if let Some(notice) = &dataset.notice {
            eprintln!("{}", notice);
        }
    }

    match command {
        Commands::List {
            gender,
            category,
            format,
        } => {
            let filters = Filters::new(gender.as_deref(), category.as_deref());
            let use_colors = topout::output::should_use_colors();
            match render_list(&dataset, &filters, &scoring, format, use_colors) {
                Ok(output) if output.is_empty() => {}
                Ok(output) => println!("{}", output),
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_FAILURE);
                }
            }
        }
        Commands::Divisions => {
            println!("{}", topout::output::format_divisions(&dataset.divisions));
        }
        Commands::Tui { .. } | Commands::Init => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Render the ranked leaderboard in the requested format.
/// TSV output for an empty result set is the empty string.
fn render_list(
    dataset: &Dataset,
    filters: &Filters,
    scoring: &ScoringConfig,
    format: OutputFormat,
    use_colors: bool,
) -> anyhow::Result<String> {
    let results = topout::standings::compute_results(&dataset.climbers, filters, scoring);

    match format {
        OutputFormat::Table => {
            let mut out = format!(
                "{}\n\n{}",
                filters.heading(),
                topout::output::format_results_table(&results, &filters.empty_message(), use_colors)
            );
            if !dataset.divisions.is_empty() {
                out.push_str("\n\n");
                out.push_str(&topout::output::format_divisions_line(&dataset.divisions));
            }
            Ok(out)
        }
        OutputFormat::Tsv => Ok(topout::output::format_tsv(&results)),
        OutputFormat::Json => topout::output::format_json(&results),
    }
}

/// Load the dataset for one-shot commands according to the data flags
async fn load(client: &topout::feed::FeedClient, mock: bool, no_fallback: bool) -> Dataset {
    if mock {
        return topout::fetch::mock_dataset();
    }
    if !no_fallback {
        return topout::fetch::load_dataset(client).await;
    }
    match topout::fetch::fetch_dataset(client).await {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Live data unavailable ({}): {}", e.summary(), e);
            std::process::exit(EXIT_NETWORK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_list() {
        let cli = Cli::try_parse_from(["topout"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.mock);
    }

    #[test]
    fn test_list_flags() {
        let cli = Cli::try_parse_from([
            "topout", "list", "-g", "female", "-C", "advanced", "--format", "json", "--top-climbs", "3",
        ])
        .unwrap();
        assert_eq!(cli.top_climbs, Some(3));
        match cli.command {
            Some(Commands::List {
                gender,
                category,
                format,
            }) => {
                assert_eq!(gender.as_deref(), Some("female"));
                assert_eq!(category.as_deref(), Some("advanced"));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_mock_conflicts_with_no_fallback() {
        assert!(Cli::try_parse_from(["topout", "--mock", "--no-fallback"]).is_err());
    }

    #[test]
    fn test_render_list_json_parses() {
        let dataset = topout::fetch::mock_dataset();
        let out = render_list(
            &dataset,
            &Filters::none(),
            &ScoringConfig::default(),
            OutputFormat::Json,
            false,
        )
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(10));
    }

    #[test]
    fn test_render_list_table_has_heading_and_divisions() {
        let dataset = topout::fetch::mock_dataset();
        let out = render_list(
            &dataset,
            &Filters::none(),
            &ScoringConfig::default(),
            OutputFormat::Table,
            false,
        )
        .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], Filters::none().heading());
        assert!(lines[2].contains("Scored Climbs"));
        assert!(lines.last().unwrap().starts_with("Available divisions:"));
    }

    #[test]
    fn test_render_list_tsv_empty_when_filtered_out() {
        let dataset = topout::fetch::mock_dataset();
        let out = render_list(
            &dataset,
            &Filters::new(Some("nobody"), None),
            &ScoringConfig::default(),
            OutputFormat::Tsv,
            false,
        )
        .unwrap();
        assert!(out.is_empty());
    }
}
