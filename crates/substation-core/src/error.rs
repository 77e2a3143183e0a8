// ── Core error types ──
//
// Telemetry generation is infallible; the only fallible path in the core
// crate is producing and writing a report.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("PDF encoding failed: {0}")]
    Pdf(String),

    #[error("Cannot write report to {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
