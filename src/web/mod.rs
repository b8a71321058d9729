//! Web API module for filetree.
//!
//! This module provides the REST API over the file tree: CRUD on single
//! entries plus the folder listing, with OpenAPI docs and a health check.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_health_router, create_router, create_swagger_router, ApiDoc};
pub use server::WebServer;
