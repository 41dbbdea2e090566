use serde::{Deserialize, Serialize};

/// A prescription linking a consultation to a medication.
#[derive(Debug, Clone, Serialize)]
pub struct Prescricao {
    pub id: i64,
    pub consulta_id: i64,
    pub medicamento_id: i64,
    pub duracao: Option<String>,
    pub instrucoes: Option<String>,
    pub criado_em: String,
    pub atualizado_em: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NovaPrescricao {
    pub consulta_id: Option<i64>,
    pub medicamento_id: Option<i64>,
    pub duracao: Option<String>,
    pub instrucoes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AtualizaPrescricao {
    pub duracao: Option<String>,
    pub instrucoes: Option<String>,
}
