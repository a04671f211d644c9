pub mod formatter;

pub use formatter::{
    format_breakdown, format_hashtags, format_results_table, format_score, format_scoring_config, format_skipped,
    format_summary, should_use_colors,
};
