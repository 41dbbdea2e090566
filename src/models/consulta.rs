use serde::{Deserialize, Serialize};

/// Consultation kind: in person or over video.
pub const TIPO_PRESENCIAL: &str = "presencial";
pub const TIPO_TELEMEDICINA: &str = "telemedicina";

/// A consultation, always tied to a patient and optionally to a
/// professional. `link_video` is required exactly when the kind is
/// telemedicina.
#[derive(Debug, Clone, Serialize)]
pub struct Consulta {
    pub id: i64,
    pub paciente_id: i64,
    pub profissional_id: Option<i64>,
    pub data: String,
    pub motivo: String,
    pub observacoes: Option<String>,
    pub tipo_consulta: String,
    pub link_video: Option<String>,
    pub criado_em: String,
    pub atualizado_em: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NovaConsulta {
    pub paciente_id: Option<i64>,
    pub profissional_id: Option<i64>,
    pub data: Option<String>,
    pub motivo: Option<String>,
    pub observacoes: Option<String>,
    pub tipo_consulta: Option<String>,
    pub link_video: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AtualizaConsulta {
    pub data: Option<String>,
    pub motivo: Option<String>,
    pub observacoes: Option<String>,
    pub link_video: Option<String>,
}
