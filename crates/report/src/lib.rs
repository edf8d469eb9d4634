pub mod builder;
pub mod export;

pub use builder::{build, MatchedRow, ReportPack, SummaryRow, UnmatchedBankRow, UnmatchedGlRow};
pub use export::{write_csv_pack, write_json_pack};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Match references unknown {side} id: {id}")]
    UnknownId { side: &'static str, id: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
