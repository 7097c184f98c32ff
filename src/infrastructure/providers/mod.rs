//! Provider probes - HTTP smoke tests against completion APIs

pub mod http;

pub use http::HttpProbeClient;
