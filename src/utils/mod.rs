//! Utility functions and helpers.

pub mod http;

pub use http::{Fetcher, HttpFetcher, create_async_client, fetch_as};
