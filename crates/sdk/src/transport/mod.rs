//! Transport layer for the Sumble SDK.

pub mod http;

pub use http::HttpTransport;
