use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{ensure_parent_dir, get_config_path, Config, FeedConfig, ThemeConfig};
use crate::scoring::{ScoringConfig, DEFAULT_ONSIGHT_BONUS, DEFAULT_TOP_CLIMBS};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Keep asking until `parse` accepts the answer
fn prompt_until<T>(
    message: &str,
    default: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<T> {
    loop {
        let input = prompt_with_default(message, default)?;
        match parse(&input) {
            Ok(value) => return Ok(value),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    }
}

fn parse_feed_url(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.starts_with("http://") || s.starts_with("https://") {
        Ok(s.to_string())
    } else {
        Err("must start with http:// or https://".to_string())
    }
}

fn parse_timeout(s: &str) -> Result<String, String> {
    match humantime::parse_duration(s.trim()) {
        Ok(d) if d.is_zero() => Err("must be greater than zero".to_string()),
        Ok(_) => Ok(s.trim().to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_top_climbs(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err("must be a whole number".to_string()),
    }
}

fn parse_onsight_bonus(s: &str) -> Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Ok(_) => Err("must be a non-negative number".to_string()),
        Err(_) => Err("must be a number".to_string()),
    }
}

fn parse_theme(s: &str) -> Result<ThemeConfig, String> {
    match s.trim().to_lowercase().as_str() {
        "auto" => Ok(ThemeConfig::Auto),
        "dark" => Ok(ThemeConfig::Dark),
        "light" => Ok(ThemeConfig::Light),
        other => Err(format!("unknown theme '{}', expected auto, dark or light", other)),
    }
}

/// Serialize and write a config file atomically, creating parent directories
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("topout Configuration Wizard");
    println!("===========================");
    println!();

    // 1. Feed
    println!("Results are pulled from a JSON feed of climber score records.");
    let url = prompt_until("Results feed URL", crate::feed::DEFAULT_FEED_URL, parse_feed_url)?;
    let timeout = prompt_until(
        "Request timeout (e.g. 15s, 1m)",
        crate::config::DEFAULT_FEED_TIMEOUT,
        parse_timeout,
    )?;

    // 2. Scoring
    println!();
    let configure_scoring = prompt_yes_no("Configure scoring? (n accepts defaults)", false)?;
    let scoring = if configure_scoring {
        println!("Only a climber's best sends count toward their total.");
        let top_climbs = prompt_until(
            "Number of climbs counted",
            &DEFAULT_TOP_CLIMBS.to_string(),
            parse_top_climbs,
        )?;
        println!("Onsights earn a small bonus that breaks ties between equal problems.");
        let onsight_bonus = prompt_until(
            "Onsight bonus",
            &DEFAULT_ONSIGHT_BONUS.to_string(),
            parse_onsight_bonus,
        )?;
        Some(ScoringConfig::new(onsight_bonus, top_climbs))
    } else {
        None
    };

    // 3. TUI
    println!();
    let auto_refresh_interval = prompt_until(
        "Auto-refresh interval in seconds (0 disables)",
        &crate::config::DEFAULT_AUTO_REFRESH_SECS.to_string(),
        |s| s.trim().parse::<u64>().map_err(|_| "must be a whole number".to_string()),
    )?;
    let mock_toggle = prompt_yes_no("Allow switching to mock data in the TUI?", false)?;
    let theme = prompt_until("Theme (auto/dark/light)", "auto", parse_theme)?;

    // 4. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        feed: FeedConfig { url, timeout },
        scoring,
        auto_refresh_interval,
        mock_toggle,
        theme,
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `topout` to see the leaderboard, or `topout tui` for the live view.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;

    #[test]
    fn test_parse_feed_url() {
        assert!(parse_feed_url("https://example.com/api").is_ok());
        assert!(parse_feed_url("  http://localhost:3000 ").is_ok());
        assert!(parse_feed_url("example.com").is_err());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("30s").unwrap(), "30s");
        assert!(parse_timeout("0s").is_err());
        assert!(parse_timeout("later").is_err());
    }

    #[test]
    fn test_parse_top_climbs() {
        assert_eq!(parse_top_climbs("5").unwrap(), 5);
        assert!(parse_top_climbs("0").is_err());
        assert!(parse_top_climbs("-1").is_err());
        assert!(parse_top_climbs("five").is_err());
    }

    #[test]
    fn test_parse_onsight_bonus() {
        assert_eq!(parse_onsight_bonus("0.1").unwrap(), 0.1);
        assert_eq!(parse_onsight_bonus("0").unwrap(), 0.0);
        assert!(parse_onsight_bonus("-0.1").is_err());
        assert!(parse_onsight_bonus("inf").is_err());
        assert!(parse_onsight_bonus("abc").is_err());
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!(parse_theme("Dark").unwrap(), ThemeConfig::Dark);
        assert_eq!(parse_theme("light").unwrap(), ThemeConfig::Light);
        assert!(parse_theme("solarized").is_err());
    }

    #[test]
    fn test_write_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = Config {
            feed: FeedConfig {
                url: "http://localhost:9000/api/results".to_string(),
                timeout: "5s".to_string(),
            },
            scoring: Some(ScoringConfig::new(0.2, 4)),
            auto_refresh_interval: 0,
            mock_toggle: true,
            theme: ThemeConfig::Dark,
        };
        write_config(&path, &config).unwrap();

        let loaded = load_config(Some(path)).unwrap();
        assert_eq!(loaded, config);
    }
}
