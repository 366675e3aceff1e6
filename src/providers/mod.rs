//! Upstream provider module
//!
//! Defines the `SearchProvider` trait the aggregation engine drives, a
//! registry of configured providers, and the concrete implementations.

mod loader;
mod registry;
mod template;
mod traits;

// Provider implementations
pub mod goear;

pub use loader::ProviderLoader;
pub use registry::ProviderRegistry;
pub use template::substitute;
pub use traits::*;
