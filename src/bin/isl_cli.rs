use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use isl_translator::capture::SyntheticLandmarkSource;
use isl_translator::catalog::GestureCatalog;
use isl_translator::config::AppConfig;
use isl_translator::engine::{SystemTimeSource, TranslatorHandle};
use isl_translator::recognition::PlaceholderClassifier;

#[derive(Parser, Debug)]
#[command(
    name = "isl_cli",
    about = "Synthetic capture harness for the ISL translator engine"
)]
struct Cli {
    /// Path to a JSON config file (defaults to isl_config.json)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a capture session against synthetic landmarks, streaming results
    Run {
        /// Wall-clock duration of the session in seconds
        #[arg(long, default_value_t = 10)]
        seconds: u64,
        /// Override the acceptance threshold for this run
        #[arg(long)]
        threshold: Option<f32>,
    },
    /// List the gestures the built-in catalog can report
    DumpCatalog {
        /// Load the catalog from a JSON file instead of the built-in set
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    isl_translator::init_logging();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::load(),
    };

    match cli.command {
        Commands::Run { seconds, threshold } => run_session(config, seconds, threshold),
        Commands::DumpCatalog { catalog } => run_dump(catalog),
    }
}

fn run_session(config: AppConfig, seconds: u64, threshold: Option<f32>) -> Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    runtime.block_on(async move {
        let catalog = Arc::new(GestureCatalog::builtin());
        let classifier = Arc::new(PlaceholderClassifier::new(catalog.len()));
        let handle = TranslatorHandle::with_parts(
            config,
            catalog,
            classifier,
            Arc::new(SystemTimeSource::default()),
        );
        if let Some(value) = threshold {
            handle
                .set_confidence_threshold(value)
                .map_err(|err| anyhow::anyhow!("{err}"))?;
        }

        let source = Arc::new(SyntheticLandmarkSource::new());
        let session_id = handle
            .start_capture(source)
            .await
            .map_err(|err| anyhow::anyhow!("{err}"))?;
        eprintln!("capture started: {session_id}");

        let mut results = handle
            .subscribe_results()
            .context("results channel not initialized")?;
        let deadline = tokio::time::sleep(Duration::from_secs(seconds));
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                _ = &mut deadline => break,
                received = results.recv() => match received {
                    Ok(result) => println!("{}", serde_json::to_string(&result)?),
                    Err(_) => break,
                },
            }
        }

        handle
            .stop_capture()
            .await
            .map_err(|err| anyhow::anyhow!("{err}"))?;
        eprintln!("capture stopped");
        Ok(ExitCode::from(0))
    })
}

fn run_dump(catalog_path: Option<PathBuf>) -> Result<ExitCode> {
    let catalog = match catalog_path {
        Some(path) => GestureCatalog::load_from_file(&path),
        None => GestureCatalog::builtin(),
    };

    for (index, entry) in catalog.iter().enumerate() {
        println!("{index:2}  {:<12} {}", entry.name, entry.description);
    }
    Ok(ExitCode::from(0))
}
