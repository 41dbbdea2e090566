//! SGHSS: hospital management REST backend.
//!
//! CRUD over users, patients, professionals, consultations, medications and
//! prescriptions, behind bearer-token authentication. Every route follows
//! the same shape: validate input, open a store connection scoped to the
//! operation, run parameterized SQL, return a uniform JSON envelope.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod validation;
