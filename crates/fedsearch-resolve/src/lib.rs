//! The resolution engine: decides, per request, whether to answer from
//! the local index, a cached peer result, a live peer call, or by
//! escalating to mother.

mod engine;
mod error;
mod selection;

pub use engine::{Health, NodeHealth, QueryResponse, ResolutionEngine};
pub use error::ResolveError;
pub use selection::TermOverlapScorer;
