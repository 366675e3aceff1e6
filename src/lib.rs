//! goear-rs: quality-filtered, windowed search over paginated music providers
//!
//! Upstream providers only serve fixed-size result pages with no quality
//! filter. This crate turns such a provider into one that answers "give me
//! window N of size M with bitrate at least Q", bounded by a time budget, and
//! optionally enriches the window with per-track extended info.
//!
//! ```no_run
//! use goear_rs::{network::HttpClient, providers::goear::GoEar, Search, SearchOptions};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = GoEar::from_config(&Default::default(), HttpClient::new()?)?;
//! let search = Search::new(Arc::new(provider));
//! let result = search
//!     .search("Mike Oldfield", SearchOptions::new().min_quality(192))
//!     .await?;
//! for track in &result.tracks {
//!     println!("{} ({} kbps)", track.title, track.quality);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod network;
pub mod providers;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::{Result, SearchError};
pub use providers::SearchProvider;
pub use search::{LookupTarget, OneOrMany, Search, SearchOptions, SearchResult, Track};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
