//! Shared utilities: constants and the report cache

pub mod cache;
pub mod constants;
