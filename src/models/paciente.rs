use serde::{Deserialize, Serialize};

/// A patient record.
#[derive(Debug, Clone, Serialize)]
pub struct Paciente {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub cpf: String,
    pub data_nascimento: Option<String>,
    pub endereco: Option<String>,
    pub criado_em: String,
    pub atualizado_em: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NovoPaciente {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub cpf: Option<String>,
    pub data_nascimento: Option<String>,
    pub endereco: Option<String>,
}

/// Partial patch; the cpf is immutable after creation.
#[derive(Debug, Default, Deserialize)]
pub struct AtualizaPaciente {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub endereco: Option<String>,
}
