//! HTTP networking module
//!
//! Provides the transport collaborator providers use to reach upstream sites.

mod client;
mod user_agent;

pub use client::HttpClient;
pub use user_agent::generate_user_agent;
