// Headline-to-session alignment and daily aggregation
pub mod alignment;

// Per-ticker batch runs
pub mod batch;

// Sentiment/return correlation
pub mod engine;

// Price-side analysis
pub mod indicators;
pub mod price_analysis;

pub mod reporting;
