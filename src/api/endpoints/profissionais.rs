//! Profissional endpoints, including lookup by registration number.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;

use crate::api::error::{resource, ApiError};
use crate::api::response::{self, Pagination};
use crate::api::types::{ApiContext, PaginationQuery};
use crate::db::repository::profissional;
use crate::models::{AtualizaProfissional, NovoProfissional};

const PROFISSIONAL_ERROR: &str = "PROFISSIONAL_ERROR";

/// `POST /api/profissionais`
pub async fn criar(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NovoProfissional>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(novo) = payload?;
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PROFISSIONAL_ERROR)(e.into()))?;
    let criado = profissional::criar_profissional(&conn, &novo)
        .map_err(resource(PROFISSIONAL_ERROR))?;
    Ok(response::criado("Profissional created successfully", criado))
}

/// `GET /api/profissionais`
pub async fn listar(
    State(ctx): State<ApiContext>,
    Query(paginacao): Query<PaginationQuery>,
) -> Result<Response, ApiError> {
    let (page, per_page, offset) = paginacao.limites();
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PROFISSIONAL_ERROR)(e.into()))?;
    let profissionais = profissional::listar_profissionais(&conn, per_page, offset)
        .map_err(resource(PROFISSIONAL_ERROR))?;
    let total =
        profissional::contar_profissionais(&conn).map_err(resource(PROFISSIONAL_ERROR))?;
    Ok(response::paginado(
        "Profissionais listed successfully",
        profissionais,
        Pagination::new(page, per_page, total),
    ))
}

/// `GET /api/profissionais/{id}`
pub async fn obter(
    State(ctx): State<ApiContext>,
    Path(profissional_id): Path<i64>,
) -> Result<Response, ApiError> {
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PROFISSIONAL_ERROR)(e.into()))?;
    let encontrado = profissional::obter_profissional_por_id(&conn, profissional_id)
        .map_err(resource(PROFISSIONAL_ERROR))?;
    Ok(response::sucesso(
        "Profissional retrieved successfully",
        encontrado,
    ))
}

/// `GET /api/profissionais/registro/{registro}`
pub async fn obter_por_registro(
    State(ctx): State<ApiContext>,
    Path(registro): Path<String>,
) -> Result<Response, ApiError> {
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PROFISSIONAL_ERROR)(e.into()))?;
    let encontrado = profissional::obter_profissional_por_registro(&conn, &registro)
        .map_err(resource(PROFISSIONAL_ERROR))?;
    Ok(response::sucesso(
        "Profissional retrieved successfully",
        encontrado,
    ))
}

/// `PUT /api/profissionais/{id}`
pub async fn atualizar(
    State(ctx): State<ApiContext>,
    Path(profissional_id): Path<i64>,
    payload: Result<Json<AtualizaProfissional>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(patch) = payload?;
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PROFISSIONAL_ERROR)(e.into()))?;
    let atualizado = profissional::atualizar_profissional(&conn, profissional_id, &patch)
        .map_err(resource(PROFISSIONAL_ERROR))?;
    Ok(response::sucesso(
        "Profissional updated successfully",
        atualizado,
    ))
}

/// `DELETE /api/profissionais/{id}`
pub async fn deletar(
    State(ctx): State<ApiContext>,
    Path(profissional_id): Path<i64>,
) -> Result<Response, ApiError> {
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(PROFISSIONAL_ERROR)(e.into()))?;
    profissional::deletar_profissional(&conn, profissional_id)
        .map_err(resource(PROFISSIONAL_ERROR))?;
    Ok(response::sucesso(
        "Profissional deleted successfully",
        serde_json::Value::Null,
    ))
}
