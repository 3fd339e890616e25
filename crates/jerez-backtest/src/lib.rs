#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/jerez/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Annually rebalanced portfolio simulation for the Jerez engine.

/// The version of the jerez-backtest crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod simulator;
pub mod weights;

pub use simulator::{
    BacktestConfig, BacktestReport, METRIC_WEIGHTED, REVENUE_WEIGHTED, RebalancingSimulator,
    YearMembership,
};
pub use weights::{WeightingPolicy, derive_weights};
