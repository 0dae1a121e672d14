//! Rendering of per-file decode results.
//!
//! The binary collects one [`FileOutcome`] per input file and renders them
//! either as plain-text tables or as a single JSON document keyed by path.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::exif::MetadataMap;

/// Message shown for files that decoded to an empty map.
pub const NO_METADATA_MESSAGE: &str = "no metadata found";

// =============================================================================
// FileOutcome
// =============================================================================

/// Result of processing one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    /// Decoded successfully (possibly to an empty map)
    Decoded(MetadataMap),
    /// Could not be read or decoded; carries a human-readable reason
    Failed(String),
}

/// One file and what became of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl FileOutcome {
    pub fn decoded(path: impl Into<PathBuf>, metadata: MetadataMap) -> Self {
        Self {
            path: path.into(),
            outcome: Outcome::Decoded(metadata),
        }
    }

    pub fn failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            outcome: Outcome::Failed(reason.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Render outcomes as aligned two-column tables, one block per file.
pub fn render_table(outcomes: &[FileOutcome]) -> String {
    let mut out = String::new();

    for (index, file) in outcomes.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", file.path.display());

        match &file.outcome {
            Outcome::Failed(reason) => {
                let _ = writeln!(out, "  error: {}", reason);
            }
            Outcome::Decoded(metadata) if metadata.is_empty() => {
                let _ = writeln!(out, "  {}", NO_METADATA_MESSAGE);
            }
            Outcome::Decoded(metadata) => {
                let width = metadata.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
                for (name, value) in metadata.iter() {
                    let _ = writeln!(out, "  {:<width$}  {}", name, value, width = width);
                }
            }
        }
    }

    out
}

/// Render outcomes as a pretty-printed JSON array.
pub fn render_json(outcomes: &[FileOutcome]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(outcomes)
}

// =============================================================================
// Tests
// =============================================================================
