use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WearError {
    /// A reading arrived dated before one already consumed by the scan.
    #[error(
        "ordering violation for {equipment_id}: reading dated {current} arrived after {previous}"
    )]
    OrderingViolation {
        equipment_id: String,
        previous: NaiveDate,
        current: NaiveDate,
    },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("inspection source error: {0}")]
    Source(String),
    #[error("ledger sink error: {0}")]
    Sink(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
