use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use engagement_score::scoring::{ScoringConfig, ScoringOverrides, StandardScorer};

const EXIT_FILE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score an activity file and write each user's top entries
    Score(ScoreArgs),
    /// Write a config file with scoring weights
    Init {
        /// Write the built-in defaults without prompting
        #[arg(long)]
        defaults: bool,
    },
    /// Print the effective scoring weights
    ShowConfig(WeightArgs),
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// JSON file mapping user ids to lists of activity entries
    input: PathBuf,

    /// Where to write the JSON results
    output: PathBuf,

    #[command(flatten)]
    weights: WeightArgs,
}

/// Per-run overrides; each wins over the config file.
#[derive(Args, Debug, Default)]
struct WeightArgs {
    /// Reference ceiling for time spent (sizes the normalization denominator)
    #[arg(long)]
    max_time: Option<u64>,

    /// Bonus for a liked entry
    #[arg(long)]
    like_score: Option<f64>,

    /// Bonus per share
    #[arg(long)]
    share_score: Option<f64>,

    /// Bonus for a commented entry
    #[arg(long)]
    comment_score: Option<f64>,

    /// Multiplier applied to time spent
    #[arg(long)]
    time_weight: Option<f64>,
}

impl From<&WeightArgs> for ScoringOverrides {
    fn from(args: &WeightArgs) -> Self {
        Self {
            max_time: args.max_time,
            like_score: args.like_score,
            share_score: args.share_score,
            comment_score: args.comment_score,
            time_weight: args.time_weight,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "engagement-score")]
#[command(about = "Rank user activity by engagement and keep each user's top entries", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/engagement-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve scoring weights from defaults, the config file and CLI flags.
/// Exits with the config exit code on any problem.
fn load_scoring(config_path: Option<PathBuf>, weights: &WeightArgs) -> ScoringConfig {
    let config = match engagement_score::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let scoring = config.scoring_config(&ScoringOverrides::from(weights));

    // Validate scoring config at startup
    if let Err(errors) = engagement_score::scoring::validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    scoring
}

fn run_init(config_path: Option<PathBuf>, defaults: bool) {
    match engagement_score::config::init::run_init_wizard(config_path, defaults) {
        Ok(path) => println!("Config written to {}", path.display()),
        Err(e) => {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn run_score(args: &ScoreArgs, scoring: &ScoringConfig, verbose: bool) {
    let start_time = Instant::now();
    let use_colors = engagement_score::output::should_use_colors();

    let report =
        match engagement_score::process_engagement_data(&args.input, &args.output, scoring) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(EXIT_FILE);
            }
        };

    if verbose {
        println!(
            "{}",
            engagement_score::output::format_results_table(&report.results, use_colors)
        );
        let scorer = StandardScorer::new(*scoring);
        println!();
        println!("Score breakdown:");
        for (result, entries) in report.results.iter().zip(&report.top_entries) {
            println!("  {}", result.user_id);
            for entry in entries {
                println!(
                    "    {}",
                    engagement_score::output::format_breakdown(&scorer.breakdown(entry), use_colors)
                );
            }
        }
        if !report.skipped.is_empty() {
            println!();
            println!("Skipped entries:");
            println!("{}", engagement_score::output::format_skipped(&report.skipped));
        }
        println!();
    }

    println!(
        "{}",
        engagement_score::output::format_summary(&report, use_colors)
    );
    println!("Results written to {}", args.output.display());

    if verbose {
        eprintln!("Finished in {:?}", start_time.elapsed());
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Init { defaults } => run_init(cli.config, *defaults),
        Commands::Score(args) => {
            let scoring = load_scoring(cli.config, &args.weights);
            run_score(args, &scoring, cli.verbose);
        }
        Commands::ShowConfig(weights) => {
            let scoring = load_scoring(cli.config, weights);
            let use_colors = engagement_score::output::should_use_colors();
            println!(
                "{}",
                engagement_score::output::format_scoring_config(&scoring, use_colors)
            );
        }
    }
}
