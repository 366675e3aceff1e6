//! Search aggregation module
//!
//! Turns a provider that only serves fixed-size pages into one that answers
//! arbitrary quality-filtered windows, and enriches results on demand.

mod accumulator;
mod enricher;
mod executor;
mod filter;
mod models;
mod window;

pub use accumulator::{Accumulation, PageAccumulator};
pub use enricher::Enricher;
pub use executor::Search;
pub use filter::QualityFilter;
pub use models::*;
pub use window::{shape_result, slice_window, window_bounds};
