use serde::{Deserialize, Serialize};

/// A system user (admin, medico, paciente, ...).
///
/// The stored password hash is carried only for internal authentication
/// lookups and is never serialized into a response.
#[derive(Debug, Clone, Serialize)]
pub struct Usuario {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub tipo: String,
    #[serde(skip_serializing)]
    pub senha: Option<String>,
    pub criado_em: String,
    pub atualizado_em: String,
}

/// Creation payload for `POST /usuarios`.
#[derive(Debug, Default, Deserialize)]
pub struct NovoUsuario {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
    pub tipo: Option<String>,
}

/// Partial patch for `PUT /usuarios/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct AtualizaUsuario {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub tipo: Option<String>,
}
