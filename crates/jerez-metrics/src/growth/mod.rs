//! Revenue growth metrics.

mod growth_consistency;
mod revenue_growth;

pub use growth_consistency::{GrowthConsistency, GrowthConsistencyConfig};
pub use revenue_growth::{RevenueGrowth, RevenueGrowthConfig};
