//! HTTP API layer.
//!
//! Routes are nested under `/api/`. Apart from account creation, login
//! and the health probe, every endpoint sits behind the bearer token
//! middleware. All bodies use a uniform JSON envelope built in
//! [`response`].

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod response;
pub mod router;
pub mod types;

pub use router::api_router;
pub use types::ApiContext;
