//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by Axum-based services.
//!
//! ## Modules
//!
//! - **[`errors`]**: uniform JSON error responses
//! - **[`extractors`]**: custom extractors (integer id path, validated JSON)
//! - **[`server`]**: router assembly, API docs, graceful shutdown
//! - **[`middleware`]**: security headers

pub mod errors;
pub mod extractors;
pub mod health;
pub mod middleware;
pub mod server;
pub mod shutdown;

pub use errors::{AppError, ErrorResponse};
pub use extractors::{IdPath, ValidatedJson};
pub use health::{health_handler, HealthResponse};
pub use middleware::security_headers;
pub use server::{create_app, create_production_app, create_router};
pub use shutdown::{shutdown_signal, ShutdownCoordinator};
