//! External source seams
//!
//! Market and logo sources sit behind traits so the aggregator can walk an
//! ordered fallback chain without knowing which API is which, and tests can
//! script sources without a network.

use futures_util::future::BoxFuture;

use crate::models::errors::ScanResult;
use crate::models::{LogoResult, MarketSnapshot};

/// One market data API. `Ok(None)` means "this source has no listing for the
/// token", which moves the chain along just like an error does.
pub trait MarketDataSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn fetch<'a>(&'a self, address: &'a str) -> BoxFuture<'a, ScanResult<Option<MarketSnapshot>>>;
}

/// One logo source.
pub trait LogoSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn fetch<'a>(&'a self, address: &'a str) -> BoxFuture<'a, ScanResult<Option<LogoResult>>>;
}
