//! Core domain types and traits for the fedsearch resolution services.

pub mod config;
pub mod counters;
pub mod error;
pub mod resource;
pub mod result;
pub mod traits;

pub use config::{CacheConfig, FedsearchConfig, NodeConfig, PolicyConfig, RemoteConfig, ServerConfig};
pub use counters::{CounterSnapshot, QueryCounters};
pub use error::{CoreError, CoreResult, RemoteError};
pub use resource::{DirectoryHealth, ResourceDescriptor, ResourceHealth, ResourceView};
pub use result::{Hit, ResourceScore, SearchResult};
pub use traits::{RemoteClient, ResourceDirectory, SearchIndex, SelectionScorer};
