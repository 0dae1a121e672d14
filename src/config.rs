//! Configuration for the `jpeg-exif` command-line tool.
//!
//! This module provides configuration that supports:
//! - Command-line arguments via clap
//! - Environment variables with `EXIF_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use jpeg_exif::config::Config;
//!
//! let config = Config::parse();
//! config.validate()?;
//! ```
//!
//! # Environment Variables
//!
//! - `EXIF_FORMAT` - Output format, `table` or `json` (default: table)
//! - `EXIF_MAX_FILE_SIZE` - Largest file to read, in bytes (default: 64 MiB)

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// =============================================================================
// Default Values
// =============================================================================

/// Default maximum input file size (64 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

// =============================================================================
// Output Format
// =============================================================================

/// How decoded metadata is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One aligned name/value table per file
    #[default]
    Table,
    /// A JSON array with one object per file
    Json,
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// jpeg-exif - Print the EXIF metadata embedded in JPEG files.
///
/// Decodes camera, exposure and GPS tags from the EXIF segment of each file.
/// Files without EXIF data are reported as having no metadata.
#[derive(Parser, Debug, Clone)]
#[command(name = "jpeg-exif")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// JPEG files to decode.
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, env = "EXIF_FORMAT")]
    pub format: OutputFormat,

    /// Largest file to read, in bytes. Larger files are rejected unread.
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE, env = "EXIF_MAX_FILE_SIZE")]
    pub max_file_size: u64,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.files.is_empty() {
            return Err("At least one input file is required".to_string());
        }

        if self.max_file_size == 0 {
            return Err("max_file_size must be greater than 0".to_string());
        }

        if let Some(path) = self.files.iter().find(|path| path.as_os_str().is_empty()) {
            return Err(format!("Invalid empty file path: {:?}", path));
        }

        Ok(())
    }

    /// Default tracing filter directive for this configuration.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "jpeg_exif=debug"
        } else {
            "jpeg_exif=warn"
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
