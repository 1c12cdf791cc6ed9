//! # HTTP Server Module
//!
//! Combines the songs routes and the health check into one Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/songs`, `/songs/:id` - Songs resource

pub mod health_routes;
pub mod server;

pub use server::HttpServer;
