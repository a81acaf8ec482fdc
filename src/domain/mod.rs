// Correlation results and interpretation
pub mod correlation;

// Domain-specific error types
pub mod errors;

// Prices, trading calendar and return series
pub mod market;

// Headlines and timestamp normalization
pub mod news;

// Return and risk metrics
pub mod performance;

// Port interfaces
pub mod ports;
