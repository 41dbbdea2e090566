//! Entity records and request payloads.

pub mod consulta;
pub mod medicamento;
pub mod paciente;
pub mod prescricao;
pub mod profissional;
pub mod usuario;

pub use consulta::*;
pub use medicamento::*;
pub use paciente::*;
pub use prescricao::*;
pub use profissional::*;
pub use usuario::*;
