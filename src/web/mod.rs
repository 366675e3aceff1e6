//! Web server module
//!
//! Exposes search and lookup as a JSON HTTP API.

mod handlers;
mod routes;
mod state;

pub use handlers::ApiError;
pub use routes::create_router;
pub use state::AppState;
