//! Consulta endpoints. The listing accepts an optional `paciente_id`
//! filter.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::api::error::{resource, ApiError};
use crate::api::response::{self, Pagination};
use crate::api::types::ApiContext;
use crate::db::repository::consulta;
use crate::models::{AtualizaConsulta, NovaConsulta};

const CONSULTA_ERROR: &str = "CONSULTA_ERROR";

#[derive(Debug, Deserialize)]
pub struct ConsultaListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub paciente_id: Option<i64>,
}

/// `POST /api/consultas`
pub async fn criar(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NovaConsulta>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(nova) = payload?;
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(CONSULTA_ERROR)(e.into()))?;
    let criada = consulta::criar_consulta(&conn, &nova).map_err(resource(CONSULTA_ERROR))?;
    Ok(response::criado("Consulta created successfully", criada))
}

/// `GET /api/consultas?paciente_id=`
pub async fn listar(
    State(ctx): State<ApiContext>,
    Query(query): Query<ConsultaListQuery>,
) -> Result<Response, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).max(1);
    let offset = (page - 1) * per_page;

    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(CONSULTA_ERROR)(e.into()))?;
    let consultas = consulta::listar_consultas(&conn, query.paciente_id, per_page, offset)
        .map_err(resource(CONSULTA_ERROR))?;
    let total = consulta::contar_consultas(&conn, query.paciente_id)
        .map_err(resource(CONSULTA_ERROR))?;
    Ok(response::paginado(
        "Consultas listed successfully",
        consultas,
        Pagination::new(page, per_page, total),
    ))
}

/// `GET /api/consultas/{id}`
pub async fn obter(
    State(ctx): State<ApiContext>,
    Path(consulta_id): Path<i64>,
) -> Result<Response, ApiError> {
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(CONSULTA_ERROR)(e.into()))?;
    let encontrada =
        consulta::obter_consulta_por_id(&conn, consulta_id).map_err(resource(CONSULTA_ERROR))?;
    Ok(response::sucesso("Consulta retrieved successfully", encontrada))
}

/// `PUT /api/consultas/{id}`
pub async fn atualizar(
    State(ctx): State<ApiContext>,
    Path(consulta_id): Path<i64>,
    payload: Result<Json<AtualizaConsulta>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(patch) = payload?;
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(CONSULTA_ERROR)(e.into()))?;
    let atualizada = consulta::atualizar_consulta(&conn, consulta_id, &patch)
        .map_err(resource(CONSULTA_ERROR))?;
    Ok(response::sucesso("Consulta updated successfully", atualizada))
}

/// `DELETE /api/consultas/{id}`
pub async fn deletar(
    State(ctx): State<ApiContext>,
    Path(consulta_id): Path<i64>,
) -> Result<Response, ApiError> {
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(CONSULTA_ERROR)(e.into()))?;
    consulta::deletar_consulta(&conn, consulta_id).map_err(resource(CONSULTA_ERROR))?;
    Ok(response::sucesso(
        "Consulta deleted successfully",
        serde_json::Value::Null,
    ))
}
