//! HTTP request handlers

mod search;

pub use search::{resolve_resource, ApiError, SearchParams};
