//! Scholar Archive
//!
//! Fetches Google Scholar author profiles through SerpAPI, reshapes the nested
//! response into a flat canonical profile, and maps its articles into records
//! ready for storage.
//!
//! # Pipeline
//!
//! - **Fetch**: [`ScholarClient::fetch`], one GET with status-code classification
//! - **Normalize**: [`normalize::normalize`], pure JSON restructuring
//! - **Map**: [`mapper::to_storable`], defaults and derived fields
//!
//! # Example
//!
//! ```no_run
//! use scholar_archive::{client::ScholarClient, config::Config, mapper, normalize};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ScholarClient::new(Config::from_env()?)?;
//!     let raw = client.fetch("4bahYMkAAAAJ", "my-serpapi-key").await?;
//!     let profile = normalize::normalize(raw);
//!
//!     for dto in profile.article_dtos().into_iter().flatten() {
//!         let record = mapper::to_storable(&dto)?;
//!         println!("{} ({})", record.title, record.publication_date);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod mapper;
pub mod models;
pub mod normalize;
pub mod server;
pub mod service;
pub mod store;

pub use client::ScholarClient;
pub use config::Config;
pub use error::{ArchiveError, FetchError, ValidationError};
pub use service::ArchiveService;
