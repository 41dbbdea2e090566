use serde::{Deserialize, Serialize};

/// A medication in the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Medicamento {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub dosagem: Option<String>,
    pub criado_em: String,
    pub atualizado_em: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NovoMedicamento {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub dosagem: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AtualizaMedicamento {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub dosagem: Option<String>,
}
