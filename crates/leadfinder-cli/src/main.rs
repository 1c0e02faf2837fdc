mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use leadfinder_leads::{classify, search::DEFAULT_RADIUS_MILES, FileStorage, ScanCounter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "leadfinder")]
#[command(about = "Find local businesses without a real website and export them as leads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one search per input file of place-details JSON and export the leads.
    Search {
        /// Business category to search for, e.g. "plumbers".
        #[arg(long)]
        keyword: String,
        /// Place-details JSON files; each file counts as one search.
        #[arg(long = "input", required = true)]
        inputs: Vec<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_RADIUS_MILES)]
        radius_miles: f64,
        /// Minimum star rating; 0 disables the filter.
        #[arg(long, default_value_t = 0.0)]
        min_rating: f64,
        #[arg(long)]
        require_phone: bool,
        /// Where to write the CSV; nothing is written when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show how many scans remain.
    Scans,
    /// Classify a website URL.
    Classify { url: Option<String> },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = leadfinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            keyword,
            inputs,
            radius_miles,
            min_rating,
            require_phone,
            output,
        } => {
            let mut counter =
                ScanCounter::load(FileStorage::new(&config.state_path), config.max_scans)?;
            let args = search::SearchArgs {
                keyword: &keyword,
                inputs: &inputs,
                radius_miles,
                min_rating,
                require_phone,
                output: output.as_deref(),
            };
            search::run_search(&mut counter, &args)?;
        }
        Commands::Scans => {
            let counter =
                ScanCounter::load(FileStorage::new(&config.state_path), config.max_scans)?;
            println!("{}", counter.label());
        }
        Commands::Classify { url } => {
            let class = classify(url.as_deref());
            println!(
                "{} ({}) independent={}",
                class.label, class.kind, class.is_independent_website
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
