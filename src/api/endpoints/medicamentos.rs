//! Medicamento endpoints. The listing accepts an optional `busca`
//! name filter.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::api::error::{resource, ApiError};
use crate::api::response::{self, Pagination};
use crate::api::types::ApiContext;
use crate::db::repository::medicamento;
use crate::models::{AtualizaMedicamento, NovoMedicamento};

const MEDICAMENTO_ERROR: &str = "MEDICAMENTO_ERROR";

#[derive(Debug, Deserialize)]
pub struct MedicamentoListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub busca: Option<String>,
}

/// `POST /api/medicamentos`
pub async fn criar(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NovoMedicamento>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(novo) = payload?;
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(MEDICAMENTO_ERROR)(e.into()))?;
    let criado =
        medicamento::criar_medicamento(&conn, &novo).map_err(resource(MEDICAMENTO_ERROR))?;
    Ok(response::criado("Medicamento created successfully", criado))
}

/// `GET /api/medicamentos?busca=`
pub async fn listar(
    State(ctx): State<ApiContext>,
    Query(query): Query<MedicamentoListQuery>,
) -> Result<Response, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).max(1);
    let offset = (page - 1) * per_page;
    let busca = query.busca.as_deref().filter(|b| !b.trim().is_empty());

    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(MEDICAMENTO_ERROR)(e.into()))?;
    let medicamentos = medicamento::listar_medicamentos(&conn, busca, per_page, offset)
        .map_err(resource(MEDICAMENTO_ERROR))?;
    let total =
        medicamento::contar_medicamentos(&conn, busca).map_err(resource(MEDICAMENTO_ERROR))?;
    Ok(response::paginado(
        "Medicamentos listed successfully",
        medicamentos,
        Pagination::new(page, per_page, total),
    ))
}

/// `GET /api/medicamentos/{id}`
pub async fn obter(
    State(ctx): State<ApiContext>,
    Path(medicamento_id): Path<i64>,
) -> Result<Response, ApiError> {
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(MEDICAMENTO_ERROR)(e.into()))?;
    let encontrado = medicamento::obter_medicamento_por_id(&conn, medicamento_id)
        .map_err(resource(MEDICAMENTO_ERROR))?;
    Ok(response::sucesso(
        "Medicamento retrieved successfully",
        encontrado,
    ))
}

/// `PUT /api/medicamentos/{id}`
pub async fn atualizar(
    State(ctx): State<ApiContext>,
    Path(medicamento_id): Path<i64>,
    payload: Result<Json<AtualizaMedicamento>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(patch) = payload?;
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(MEDICAMENTO_ERROR)(e.into()))?;
    let atualizado = medicamento::atualizar_medicamento(&conn, medicamento_id, &patch)
        .map_err(resource(MEDICAMENTO_ERROR))?;
    Ok(response::sucesso(
        "Medicamento updated successfully",
        atualizado,
    ))
}

/// `DELETE /api/medicamentos/{id}`
pub async fn deletar(
    State(ctx): State<ApiContext>,
    Path(medicamento_id): Path<i64>,
) -> Result<Response, ApiError> {
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(MEDICAMENTO_ERROR)(e.into()))?;
    medicamento::deletar_medicamento(&conn, medicamento_id)
        .map_err(resource(MEDICAMENTO_ERROR))?;
    Ok(response::sucesso(
        "Medicamento deleted successfully",
        serde_json::Value::Null,
    ))
}
