//! coursedir-server: course directory REST API
//!
//! Users register, then use HTTP Basic credentials to create courses and to
//! update or delete the courses they own. Storage is PostgreSQL, or an
//! in-memory store for tests and throwaway dev runs.

pub mod auth;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;

pub use error::{AppError, AppResult};
pub use http::{build_router, run_server, ServerConfig};
pub use state::AppState;
