//! Valuation metrics comparing fundamentals to price.

mod ev_to_ebit;

pub use ev_to_ebit::EvToEbit;
