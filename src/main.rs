use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hotgram::index::build::{CorpusSummary, load_corpus};
use hotgram::index::{DlbDetector, HotspotDetector};
use hotgram::output::{self, CheckReport};
use hotgram::utils::{AppConfig, get_config_path};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hotgram")]
#[command(about = "Find leaked-password n-grams in candidate passwords")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the hotspots found in one or more candidate passwords
    Check {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Candidate passwords to check
        #[arg(required = true)]
        candidates: Vec<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Disable coloured output
        #[arg(long)]
        no_color: bool,
    },
    /// Index a corpus and show what it produced
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the configuration file location and effective values
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
struct CorpusArgs {
    /// Newline-delimited file of leaked passwords
    #[arg(short, long)]
    corpus: PathBuf,

    /// Shortest n-gram to index (overrides config)
    #[arg(long)]
    min_n: Option<usize>,

    /// Longest n-gram to index (overrides config)
    #[arg(long)]
    max_n: Option<usize>,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    debug!(?config, "loaded config");

    match cli.command {
        Commands::Check {
            corpus,
            candidates,
            json,
            no_color,
        } => {
            let (detector, _) = build_detector(&mut config, &corpus)?;

            let mut reports = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                let hotspots = detector.hotspots_in(candidate.as_str())?;
                info!(candidate = %candidate, hotspots = hotspots.len(), "checked candidate");
                reports.push(CheckReport { candidate, hotspots });
            }

            if json {
                output::print_json(&reports)?;
            } else {
                output::print_reports(&reports, !no_color)?;
            }
        }
        Commands::Stats { corpus, json } => {
            let (_, summary) = build_detector(&mut config, &corpus)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                output::print_summary(&corpus.corpus.display().to_string(), &summary)?;
            }
        }
        Commands::Config { init } => {
            if init {
                let path = config.save()?;
                println!("Wrote config to: {}", path.display());
            } else {
                println!("Config file: {}", get_config_path()?.display());
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn build_detector(config: &mut AppConfig, args: &CorpusArgs) -> Result<(DlbDetector, CorpusSummary)> {
    if let Some(min_n) = args.min_n {
        config.min_n = min_n;
    }
    if let Some(max_n) = args.max_n {
        config.max_n = max_n;
    }
    let range = config.ngram_range()?;

    let mut detector = DlbDetector::new();
    let summary = load_corpus(&mut detector, &args.corpus, range, config.corpus_options(!args.quiet))
        .with_context(|| format!("Failed to index {}", args.corpus.display()))?;
    Ok((detector, summary))
}
