//! Usuario endpoints. Account creation is public; everything else
//! requires a token.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;

use crate::api::error::{resource, ApiError};
use crate::api::response::{self, Pagination};
use crate::api::types::{ApiContext, PaginationQuery};
use crate::db::repository::usuario;
use crate::models::{AtualizaUsuario, NovoUsuario};

const USUARIO_ERROR: &str = "USUARIO_ERROR";

/// `POST /api/usuarios`
pub async fn criar(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NovoUsuario>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(novo) = payload?;
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(USUARIO_ERROR)(e.into()))?;
    let criado = usuario::criar_usuario(&conn, &novo).map_err(resource(USUARIO_ERROR))?;
    Ok(response::criado("Usuario created successfully", criado))
}

/// `GET /api/usuarios`
pub async fn listar(
    State(ctx): State<ApiContext>,
    Query(paginacao): Query<PaginationQuery>,
) -> Result<Response, ApiError> {
    let (page, per_page, offset) = paginacao.limites();
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(USUARIO_ERROR)(e.into()))?;
    let usuarios =
        usuario::listar_usuarios(&conn, per_page, offset).map_err(resource(USUARIO_ERROR))?;
    let total = usuario::contar_usuarios(&conn).map_err(resource(USUARIO_ERROR))?;
    Ok(response::paginado(
        "Usuarios listed successfully",
        usuarios,
        Pagination::new(page, per_page, total),
    ))
}

/// `GET /api/usuarios/{id}`
pub async fn obter(
    State(ctx): State<ApiContext>,
    Path(usuario_id): Path<i64>,
) -> Result<Response, ApiError> {
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(USUARIO_ERROR)(e.into()))?;
    let encontrado =
        usuario::obter_usuario_por_id(&conn, usuario_id).map_err(resource(USUARIO_ERROR))?;
    Ok(response::sucesso("Usuario retrieved successfully", encontrado))
}

/// `PUT /api/usuarios/{id}`
pub async fn atualizar(
    State(ctx): State<ApiContext>,
    Path(usuario_id): Path<i64>,
    payload: Result<Json<AtualizaUsuario>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(patch) = payload?;
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(USUARIO_ERROR)(e.into()))?;
    let atualizado = usuario::atualizar_usuario(&conn, usuario_id, &patch)
        .map_err(resource(USUARIO_ERROR))?;
    Ok(response::sucesso("Usuario updated successfully", atualizado))
}

/// `DELETE /api/usuarios/{id}`
pub async fn deletar(
    State(ctx): State<ApiContext>,
    Path(usuario_id): Path<i64>,
) -> Result<Response, ApiError> {
    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(USUARIO_ERROR)(e.into()))?;
    usuario::deletar_usuario(&conn, usuario_id).map_err(resource(USUARIO_ERROR))?;
    Ok(response::sucesso(
        "Usuario deleted successfully",
        serde_json::Value::Null,
    ))
}
