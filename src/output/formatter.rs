use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::roster::Division;
use crate::standings::ClimberResult;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with at most two decimals and no trailing zeros
/// (4000 -> "4000", 4000.1 -> "4000.1", 12.3456 -> "12.35")
pub fn format_score(score: f64) -> String {
    let formatted = format!("{:.2}", score);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
pub fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Format results as a ranked table with a header row:
/// Rank, Climber, Score, Climbs, Scored Climbs.
///
/// Returns `empty_message` when there are no results.
pub fn format_results_table(
    results: &[ClimberResult],
    empty_message: &str,
    use_colors: bool,
) -> String {
    format_results_table_with_width(results, empty_message, use_colors, get_terminal_width())
}

fn format_results_table_with_width(
    results: &[ClimberResult],
    empty_message: &str,
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if results.is_empty() {
        return empty_message.to_string();
    }

    let rank_width = 4; // "99."
    let name_width = results
        .iter()
        .map(|r| r.climber_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Climber".len());
    let score_width = results
        .iter()
        .map(|r| format_score(r.score).len())
        .max()
        .unwrap_or(0)
        .max("Score".len());
    let climbs_width = "Climbs".len();
    let separator = "  ";

    let fixed_width = rank_width + name_width + score_width + climbs_width + separator.len() * 4;
    let scored_width = term_width.and_then(|w| w.checked_sub(fixed_width)).filter(|w| *w >= 10);

    let header = format!(
        "{:>rw$}{sep}{}{sep}{:>sw$}{sep}{:>cw$}{sep}{}",
        "#",
        pad_right("Climber", name_width),
        "Score",
        "Climbs",
        "Scored Climbs",
        rw = rank_width,
        sw = score_width,
        cw = climbs_width,
        sep = separator,
    );

    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    for (idx, result) in results.iter().enumerate() {
        let rank = format!("{:>width$}", format!("{}.", idx + 1), width = rank_width);
        let name = pad_right(&result.climber_name, name_width);
        let score = format!("{:>width$}", format_score(result.score), width = score_width);
        let climbs = format!("{:>width$}", result.num_climbs, width = climbs_width);
        let scored = match scored_width {
            Some(w) => truncate_text(&result.scored_climbs, w),
            None => result.scored_climbs.clone(),
        };

        let line = if use_colors {
            format!(
                "{}{sep}{}{sep}{}{sep}{}{sep}{}",
                rank.dimmed(),
                name,
                score.bold(),
                climbs,
                scored.cyan(),
                sep = separator,
            )
        } else {
            format!(
                "{}{sep}{}{sep}{}{sep}{}{sep}{}",
                rank,
                name,
                score,
                climbs,
                scored,
                sep = separator,
            )
        };
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

/// Format results as tab-separated values for scripting
/// Columns: rank, name, score, climbs, gender, category, scored climbs (no headers, no colors)
pub fn format_tsv(results: &[ClimberResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(idx, r)| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                idx + 1,
                r.climber_name,
                format_score(r.score),
                r.num_climbs,
                r.gender,
                r.category,
                r.scored_climbs
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format results as a pretty-printed JSON array
pub fn format_json(results: &[ClimberResult]) -> Result<String> {
    serde_json::to_string_pretty(results).context("Failed to serialize results")
}

/// "Available divisions: FEMALE Advanced, MALE Advanced"
pub fn format_divisions_line(divisions: &[Division]) -> String {
    let names: Vec<String> = divisions.iter().map(|d| d.to_string()).collect();
    format!("Available divisions: {}", names.join(", "))
}

/// One division per line
pub fn format_divisions(divisions: &[Division]) -> String {
    if divisions.is_empty() {
        return "No divisions found.".to_string();
    }
    divisions
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
