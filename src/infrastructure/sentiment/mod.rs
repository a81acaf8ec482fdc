pub mod vader;

pub use vader::VaderScorer;
