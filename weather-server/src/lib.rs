//! HTTP layer for the weather gateway.
//!
//! Exposes `GET /api/weather?q=<city>` plus informational and liveness
//! endpoints, translating `GatewayError` into JSON error responses.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use server::{build_app, serve};
pub use state::AppState;
