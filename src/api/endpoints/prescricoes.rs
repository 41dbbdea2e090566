//! Prescricao endpoints, including the per-consultation listing.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;

use crate::api::error::{resource, ApiError};
use crate::api::response::{self, Pagination};
use crate::api::types::{ApiContext, PaginationQuery};
use crate::db::repository::prescricao;
use crate::models::{AtualizaPrescricao, NovaPrescricao};

const PRESCRICAO_ERROR: &str = "PRESCRICAO_ERROR";

/// `POST /api/prescricoes`
pub async fn criar(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NovaPrescricao>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(nova) = payload?;
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PRESCRICAO_ERROR)(e.into()))?;
    let criada =
        prescricao::criar_prescricao(&conn, &nova).map_err(resource(PRESCRICAO_ERROR))?;
    Ok(response::criado("Prescricao created successfully", criada))
}

/// `GET /api/prescricoes`
pub async fn listar(
    State(ctx): State<ApiContext>,
    Query(paginacao): Query<PaginationQuery>,
) -> Result<Response, ApiError> {
    let (page, per_page, offset) = paginacao.limites();
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PRESCRICAO_ERROR)(e.into()))?;
    let prescricoes = prescricao::listar_prescricoes(&conn, per_page, offset)
        .map_err(resource(PRESCRICAO_ERROR))?;
    let total = prescricao::contar_prescricoes(&conn).map_err(resource(PRESCRICAO_ERROR))?;
    Ok(response::paginado(
        "Prescricoes listed successfully",
        prescricoes,
        Pagination::new(page, per_page, total),
    ))
}

/// `GET /api/prescricoes/consulta/{consulta_id}`
pub async fn listar_por_consulta(
    State(ctx): State<ApiContext>,
    Path(consulta_id): Path<i64>,
    Query(paginacao): Query<PaginationQuery>,
) -> Result<Response, ApiError> {
    let (page, per_page, offset) = paginacao.limites();
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PRESCRICAO_ERROR)(e.into()))?;
    let prescricoes =
        prescricao::listar_prescricoes_por_consulta(&conn, consulta_id, per_page, offset)
            .map_err(resource(PRESCRICAO_ERROR))?;
    let total = prescricao::contar_prescricoes_por_consulta(&conn, consulta_id)
        .map_err(resource(PRESCRICAO_ERROR))?;
    Ok(response::paginado(
        "Prescricoes listed successfully",
        prescricoes,
        Pagination::new(page, per_page, total),
    ))
}

/// `GET /api/prescricoes/{id}`
pub async fn obter(
    State(ctx): State<ApiContext>,
    Path(prescricao_id): Path<i64>,
) -> Result<Response, ApiError> {
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PRESCRICAO_ERROR)(e.into()))?;
    let encontrada = prescricao::obter_prescricao_por_id(&conn, prescricao_id)
        .map_err(resource(PRESCRICAO_ERROR))?;
    Ok(response::sucesso(
        "Prescricao retrieved successfully",
        encontrada,
    ))
}

/// `PUT /api/prescricoes/{id}`
pub async fn atualizar(
    State(ctx): State<ApiContext>,
    Path(prescricao_id): Path<i64>,
    payload: Result<Json<AtualizaPrescricao>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(patch) = payload?;
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PRESCRICAO_ERROR)(e.into()))?;
    let atualizada = prescricao::atualizar_prescricao(&conn, prescricao_id, &patch)
        .map_err(resource(PRESCRICAO_ERROR))?;
    Ok(response::sucesso(
        "Prescricao updated successfully",
        atualizada,
    ))
}

/// `DELETE /api/prescricoes/{id}`
pub async fn deletar(
    State(ctx): State<ApiContext>,
    Path(prescricao_id): Path<i64>,
) -> Result<Response, ApiError> {
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PRESCRICAO_ERROR)(e.into()))?;
    prescricao::deletar_prescricao(&conn, prescricao_id)
        .map_err(resource(PRESCRICAO_ERROR))?;
    Ok(response::sucesso(
        "Prescricao deleted successfully",
        serde_json::Value::Null,
    ))
}
