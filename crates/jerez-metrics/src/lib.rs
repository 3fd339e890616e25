#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/jerez/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Metric implementations, registry and percentile ranking for Jerez.
//!
//! Metric values are `Option<f64>`: `None` marks a ticker for which the
//! metric is unavailable, and propagates as "excluded" through ranking
//! and portfolio weighting.

/// The version of the jerez-metrics crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod evaluator;
pub mod growth;
pub mod lookup;
pub mod quality;
pub mod rank;
pub mod registry;
pub mod value;

// Re-export key types
pub use evaluator::{MetricEvaluator, Snapshot};
pub use rank::{ScoreEntry, ScoreReport, percentile_ranks};
pub use registry::{
    MetricCategory, MetricInfo, available_metrics, metric_by_name, metric_info,
    metrics_by_category,
};
