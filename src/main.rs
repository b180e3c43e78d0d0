//! recommend-core - assessment recommendations from the command line.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use recommend_core::catalog::{Catalog, CatalogProvider, JsonCatalogFile};
use recommend_core::config::EngineConfig;
use recommend_core::evaluation::{Evaluator, TestCase};
use recommend_core::types::RecommendRequest;
use recommend_core::Recommender;

#[derive(Debug, Parser)]
#[command(name = "recommend-core", version, about = "Recommend assessments for a hiring query")]
struct Cli {
    /// Catalog JSON file; created from the built-in catalog if missing
    #[arg(long, global = true, env = "RECOMMEND_CATALOG")]
    catalog: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank the catalog for a query, job description or job-posting URL
    Recommend {
        query: String,
        #[arg(short = 'n', long)]
        max_results: Option<usize>,
    },
    /// Score ranking quality on labelled queries
    Evaluate {
        #[arg(short, long)]
        k: Option<usize>,
        /// Labelled queries JSON file; defaults to the built-in set
        #[arg(long)]
        cases: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env();
    let recommender = Recommender::from_config(&config)?;

    let catalog = match &cli.catalog {
        Some(path) => JsonCatalogFile::new(path).load_or_init(&Catalog::builtin()?)?,
        None => Catalog::builtin()?,
    };

    match &cli.command {
        Commands::Recommend { query, max_results } => {
            let request = RecommendRequest {
                query: query.clone(),
                max_results: *max_results,
            };
            let response = recommender.handle(request, &catalog as &dyn CatalogProvider)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Evaluate { k, cases } => {
            let cases = match cases {
                Some(path) => TestCase::load_file(path)?,
                None => TestCase::builtin()?,
            };
            let k = k.unwrap_or(config.default_eval_k);
            let report = Evaluator::new(&recommender).evaluate(&catalog, &cases, k)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
