//! Middleware for the protected route group.

pub mod auth;
