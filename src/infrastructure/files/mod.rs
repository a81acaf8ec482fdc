pub mod artifact_writer;
pub mod headers;
pub mod news_feed;
pub mod price_reader;
pub mod returns_reader;

pub use artifact_writer::ArtifactWriter;
pub use news_feed::NewsFeed;
pub use price_reader::PriceReader;
pub use returns_reader::ReturnsReader;
