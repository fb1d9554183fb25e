pub mod formatter;

pub use formatter::{
    format_divisions, format_divisions_line, format_json, format_results_table, format_score,
    format_tsv, should_use_colors, truncate_text,
};
