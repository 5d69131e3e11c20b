use std::path::PathBuf;
use thiserror::Error;

/// Failure taxonomy for the reporting pipeline.
///
/// Everything here is recoverable: report pages catch these at the page
/// boundary, print a message, and return to the menu. Undefined computations
/// (e.g. a growth ratio over a zero baseline) are *not* errors; they are
/// represented as `None` and rendered blank.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("failed to read workbook {}: {source}", .path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("workbook {} has no readable sheet", .0.display())]
    EmptySheet(PathBuf),

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
