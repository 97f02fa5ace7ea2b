//! # Sumble SDK
//!
//! Async client for the Sumble data API: organization search and enrichment,
//! job search and people search.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sumble_sdk::{SumbleClient, SumbleResult};
//! use sumble_sdk::api::{FindJobsRequest, JobFilters};
//!
//! #[tokio::main]
//! async fn main() -> SumbleResult<()> {
//!     let client = SumbleClient::builder()
//!         .api_key("sk-your-api-key")
//!         .build()?;
//!
//!     let request = FindJobsRequest {
//!         organization: None,
//!         filters: JobFilters {
//!             technologies: Some(vec!["rust".to_string()]),
//!             ..Default::default()
//!         },
//!         limit: 10,
//!         offset: 0,
//!     };
//!
//!     let jobs = client.jobs().find(&request).await?;
//!     println!("{}", serde_json::to_string_pretty(&jobs)?);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{SumbleClient, SumbleClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{SumbleError, SumbleResult};
