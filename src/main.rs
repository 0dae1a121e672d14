//! jpeg-exif - Print the EXIF metadata embedded in JPEG files.
//!
//! This binary reads each file, decodes it on the blocking pool, and prints
//! one report for all of them.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jpeg_exif::{
    config::{Config, OutputFormat},
    decode,
    report::{render_json, render_table, FileOutcome},
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(&config);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let outcomes = process_files(&config).await;

    let rendered = match config.format {
        OutputFormat::Table => render_table(&outcomes),
        OutputFormat::Json => match render_json(&outcomes) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };
    print!("{}", rendered);
    if config.format == OutputFormat::Json {
        println!();
    }

    if outcomes.iter().any(FileOutcome::is_failure) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Read and decode every input file concurrently.
///
/// Outcomes are returned in argument order regardless of completion order.
async fn process_files(config: &Config) -> Vec<FileOutcome> {
    let handles: Vec<_> = config
        .files
        .iter()
        .cloned()
        .map(|path| tokio::spawn(process_file(path, config.max_file_size)))
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (handle, path) in handles.into_iter().zip(&config.files) {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => FileOutcome::failed(path.clone(), format!("task failed: {}", e)),
        };
        outcomes.push(outcome);
    }
    outcomes
}

/// Read one file and decode its EXIF metadata.
async fn process_file(path: PathBuf, max_file_size: u64) -> FileOutcome {
    let size = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata.len(),
        Err(e) => return FileOutcome::failed(path, format!("cannot read file: {}", e)),
    };

    if size > max_file_size {
        warn!(path = %path.display(), size, max_file_size, "file exceeds size limit");
        return FileOutcome::failed(
            path,
            format!("file is {} bytes, limit is {} bytes", size, max_file_size),
        );
    }

    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(e) => return FileOutcome::failed(path, format!("cannot read file: {}", e)),
    };

    debug!(path = %path.display(), bytes = data.len(), "decoding");

    // Decoding is CPU-bound; keep it off the async workers
    match tokio::task::spawn_blocking(move || decode(&data)).await {
        Ok(Ok(metadata)) => FileOutcome::decoded(path, metadata),
        Ok(Err(e)) => FileOutcome::failed(path, e.to_string()),
        Err(e) => FileOutcome::failed(path, format!("decode task failed: {}", e)),
    }
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so stdout only carries the report.
fn init_logging(config: &Config) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
