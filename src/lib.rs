// Campaign analysis reporting pipeline.
//
// The library covers the full data path: dataset loading (spreadsheets and
// literal fixtures), per-report aggregation, number humanization, chart
// specs, key-findings narrative, and the executive-summary export document.
// The binary in `main.rs` is only the interactive menu over these pieces.
pub mod chart;
pub mod config;
pub mod document;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod loader;
pub mod narrative;
pub mod output;
pub mod reports;
pub mod table;
pub mod types;
pub mod util;
