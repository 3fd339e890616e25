//! Profitability and capital-efficiency metrics.

mod ebit_to_ppe;
mod margins;
mod return_on_assets;

pub use ebit_to_ppe::EbitToPpe;
pub use margins::{GrossMargin, OperatingMargin};
pub use return_on_assets::ReturnOnAssets;
