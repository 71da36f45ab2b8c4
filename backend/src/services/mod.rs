pub mod batch_fetcher;
pub mod channel_resolver;
pub mod exporter;
pub mod input_resolver;
pub mod metrics;
pub mod ranker;
pub mod session;
pub mod youtube_client;
