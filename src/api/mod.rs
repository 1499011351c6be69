pub mod models;
pub mod parsers;
pub mod sources;
pub mod stats_client;

pub use sources::{LookupStrategy, NameTagSource, PuuidSource};
pub use stats_client::StatsClient;
