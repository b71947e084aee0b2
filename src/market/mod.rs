//! External market data and logos: ordered fallback chains over HTTP sources

pub mod aggregator;
pub mod coingecko;
pub mod dexscreener;
pub mod logo;
pub mod source;

pub use aggregator::ExternalDataAggregator;
pub use source::{LogoSource, MarketDataSource};
