//! Book search: external provider client, result shapes, and the aggregator

pub mod aggregator;
pub mod client;
pub mod types;

pub use aggregator::aggregate_search;
pub use client::{HttpSearchClient, SearchProvider};
pub use types::{ExternalBookResult, SearchResultItem};
