//! HTTP client for the remote APIs of federation peers.

mod http;
mod template;

pub use http::HttpRemoteClient;
pub use template::expand_template;
