//! # customerdb HTTP Server Module
//!
//! Axum server exposing the customer collection as a JSON API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/customer` - List, create, and update customers
//! - `/api/customer/:id` - Fetch or delete a single customer

pub mod config;
pub mod customer_routes;
pub mod errors;
pub mod extract;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use customer_routes::{customer_routes, CustomerState};
pub use errors::{ApiError, ApiResult, ErrorEnvelope};
pub use server::HttpServer;
