#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/jerez/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Fundamental time-series ingestion for the Jerez scoring engine.

/// The version of the jerez-data crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod store;
pub mod universe;

pub use store::TimeSeriesStore;
pub use universe::Universe;
