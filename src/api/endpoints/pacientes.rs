//! Paciente endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;

use crate::api::error::{resource, ApiError};
use crate::api::response::{self, Pagination};
use crate::api::types::{ApiContext, PaginationQuery};
use crate::db::repository::paciente;
use crate::models::{AtualizaPaciente, NovoPaciente};

const PACIENTE_ERROR: &str = "PACIENTE_ERROR";

/// `POST /api/pacientes`
pub async fn criar(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NovoPaciente>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(novo) = payload?;
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PACIENTE_ERROR)(e.into()))?;
    let criado = paciente::criar_paciente(&conn, &novo).map_err(resource(PACIENTE_ERROR))?;
    Ok(response::criado("Paciente created successfully", criado))
}

/// `GET /api/pacientes`
pub async fn listar(
    State(ctx): State<ApiContext>,
    Query(paginacao): Query<PaginationQuery>,
) -> Result<Response, ApiError> {
    let (page, per_page, offset) = paginacao.limites();
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PACIENTE_ERROR)(e.into()))?;
    let pacientes =
        paciente::listar_pacientes(&conn, per_page, offset).map_err(resource(PACIENTE_ERROR))?;
    let total = paciente::contar_pacientes(&conn).map_err(resource(PACIENTE_ERROR))?;
    Ok(response::paginado(
        "Pacientes listed successfully",
        pacientes,
        Pagination::new(page, per_page, total),
    ))
}

/// `GET /api/pacientes/{id}`
pub async fn obter(
    State(ctx): State<ApiContext>,
    Path(paciente_id): Path<i64>,
) -> Result<Response, ApiError> {
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PACIENTE_ERROR)(e.into()))?;
    let encontrado =
        paciente::obter_paciente_por_id(&conn, paciente_id).map_err(resource(PACIENTE_ERROR))?;
    Ok(response::sucesso(
        "Paciente retrieved successfully",
        encontrado,
    ))
}

/// `PUT /api/pacientes/{id}`
pub async fn atualizar(
    State(ctx): State<ApiContext>,
    Path(paciente_id): Path<i64>,
    payload: Result<Json<AtualizaPaciente>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(patch) = payload?;
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PACIENTE_ERROR)(e.into()))?;
    let atualizado = paciente::atualizar_paciente(&conn, paciente_id, &patch)
        .map_err(resource(PACIENTE_ERROR))?;
    Ok(response::sucesso(
        "Paciente updated successfully",
        atualizado,
    ))
}

/// `DELETE /api/pacientes/{id}`
pub async fn deletar(
    State(ctx): State<ApiContext>,
    Path(paciente_id): Path<i64>,
) -> Result<Response, ApiError> {
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PACIENTE_ERROR)(e.into()))?;
    paciente::deletar_paciente(&conn, paciente_id).map_err(resource(PACIENTE_ERROR))?;
    Ok(response::sucesso(
        "Paciente deleted successfully",
        serde_json::Value::Null,
    ))
}
