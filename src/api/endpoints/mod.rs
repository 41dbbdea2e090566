//! Endpoint handlers, one module per resource.

pub mod auth;
pub mod consultas;
pub mod medicamentos;
pub mod pacientes;
pub mod prescricoes;
pub mod profissionais;
pub mod usuarios;
