use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{get_config_path, save_config, Config};
use crate::scoring::{validate_scoring, ScoringConfig, ScoringOverrides};

/// Prompt user with a message and return their trimmed input.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim().to_string())
}

/// Prompt with a default until the answer parses and is non-negative.
/// Empty input (or end of input) takes the default.
fn prompt_number<T, R, W>(input: &mut R, output: &mut W, message: &str, default: T) -> Result<T>
where
    T: FromStr + PartialOrd + Default + std::fmt::Display + Copy,
    R: BufRead,
    W: Write,
{
    loop {
        let answer = prompt(input, output, &format!("{} [{}]: ", message, default))?;
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<T>() {
            Ok(v) if v >= T::default() => return Ok(v),
            _ => writeln!(output, "  Invalid: must be a non-negative number. Try again.")?,
        }
    }
}

/// Ask for each scoring weight, offering the built-in defaults.
pub fn prompt_scoring<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<ScoringConfig> {
    let defaults = ScoringConfig::default();

    writeln!(output, "Time spent is multiplied by the time weight.")?;
    writeln!(
        output,
        "Max time only sizes the normalization denominator; longer sessions are not capped."
    )?;
    let max_time = prompt_number(input, output, "Max time", defaults.max_time)?;
    let time_weight = prompt_number(input, output, "Time weight", defaults.time_weight)?;

    writeln!(output)?;
    writeln!(output, "Bonuses are added once per liked or commented entry, and per share.")?;
    let like_score = prompt_number(input, output, "Like score", defaults.like_score)?;
    let share_score = prompt_number(input, output, "Share score", defaults.share_score)?;
    let comment_score = prompt_number(input, output, "Comment score", defaults.comment_score)?;

    Ok(ScoringConfig {
        max_time,
        like_score,
        share_score,
        comment_score,
        time_weight,
    })
}

/// Create a config file, interactively unless `use_defaults` is set.
///
/// If `path` is None the default config path is used. Returns the path written.
pub fn run_init_wizard(path: Option<PathBuf>, use_defaults: bool) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    let scoring = if use_defaults {
        ScoringConfig::default()
    } else {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        writeln!(output, "Engagement Score Configuration")?;
        writeln!(output, "==============================")?;
        writeln!(output)?;
        prompt_scoring(&mut input, &mut output)?
    };

    if let Err(errors) = validate_scoring(&scoring) {
        anyhow::bail!("Invalid scoring config: {}", errors.join("; "));
    }

    let config = Config {
        scoring: Some(ScoringOverrides::from(&scoring)),
    };
    save_config(&config_path, &config)?;

    Ok(config_path)
}
