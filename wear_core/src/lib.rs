#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core wear tracking logic (I/O-agnostic).
//!
//! This crate turns inspection readings for a wearable part (belt, liner)
//! into a ledger of replacement and wear-measurement events plus a projected
//! replacement date. Tabular I/O goes through the `wear_traits::InspectionSource`
//! and `wear_traits::LedgerSink` traits.
//!
//! ## Architecture
//!
//! - **Normalization**: same-day dedup (max thickness), date ordering (`normalize`)
//! - **Tracking**: band classification and wear-state scan (`tracker`)
//! - **Extrapolation**: linear projection to the safety floor (`extrapolate`)
//! - **Reporting**: ordered ledger and summaries (`report`)
//! - **Orchestration**: validated `Analyzer` and parallel fleet runs (`runner`)
//!
//! Nothing here reads the wall clock; every date comes from the data.

pub mod analyzer;
pub mod builder;
pub mod config;
pub mod conversions;
pub mod error;
pub mod extrapolate;
pub mod mocks;
pub mod normalize;
pub mod report;
pub mod runner;
pub mod tracker;
pub mod types;
pub mod util;

pub use analyzer::{Analysis, Analyzer};
pub use builder::AnalyzerBuilder;
pub use config::{Band, BandCfg, ReplacementPolicy, SafetyCfg, TrackerCfg};
pub use error::{BuildError, Result, WearError};
pub use extrapolate::{extrapolate, last_measurement};
pub use normalize::{NormalizeStats, normalize, normalize_with_stats};
pub use report::{Ledger, LedgerEntry, Outlook, Summary, assemble};
pub use runner::{EquipmentOutcome, analyze_rows, deliver, group_by_equipment, load, run_fleet};
pub use tracker::{WearState, WearTracker, track};
pub use types::{Event, EventKind, NormalizedReading, Prediction, Reading};
