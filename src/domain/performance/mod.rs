// Return and risk metrics
pub mod metrics;
pub mod stats;
