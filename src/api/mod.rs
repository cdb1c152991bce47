//! HTTP surface for the service.
//!
//! Routes are nested under `/api/` and the router is composable — it can be
//! mounted on any axum server instance. There is no auth layer: deployments
//! front this service with their own gateway.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::ApiServer;
pub use types::ApiContext;
