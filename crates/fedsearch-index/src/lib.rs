//! Result cache and local corpus index for a fedsearch node.
//!
//! Serves three jobs behind the `SearchIndex` trait: searching the
//! node's own documents, looking up previously fetched peer results by
//! `(query, resource id)`, and best-effort write-through of fresh ones.

mod cache;
mod corpus;
mod index;
mod tokenize;

pub use cache::ResultCache;
pub use corpus::CorpusIndex;
pub use index::MemoryIndex;
