// CSV inputs and output artifacts
pub mod files;

// Sentiment scoring adapters
pub mod sentiment;
