#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/jerez/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core trait definitions for the Jerez fundamental scoring engine.
//!
//! This crate provides the foundational abstractions for computing
//! cross-sectional fundamental metrics: the metric trait, per-ticker time
//! series records, fiscal period alignment, and the score cache interface.

/// The version of the jerez-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod align;
pub mod cache;
pub mod error;
pub mod metric;
pub mod types;

// Re-exports
pub use align::{AlignmentConfig, find_period_index, parse_period_date};
pub use cache::{CachedScore, MemoryScoreCache, ScoreCache, ScoreKey};
pub use error::{JerezError, Result};
pub use metric::{Direction, Metric};
pub use types::{Date, RawRecord, Symbol, TickerRecord, fields};
