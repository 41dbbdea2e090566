use serde::{Deserialize, Serialize};

/// A healthcare professional. The `registro` (professional registration
/// number) is unique and serves as an alternate lookup key.
#[derive(Debug, Clone, Serialize)]
pub struct Profissional {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub especialidade: String,
    pub registro: String,
    pub criado_em: String,
    pub atualizado_em: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NovoProfissional {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub especialidade: Option<String>,
    pub registro: Option<String>,
}

/// Partial patch; the registro is immutable after creation.
#[derive(Debug, Default, Deserialize)]
pub struct AtualizaProfissional {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub especialidade: Option<String>,
}
