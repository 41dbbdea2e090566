//! Login and health endpoints. Both are public.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::api::error::{resource, ApiError, CODE_AUTH};
use crate::api::response;
use crate::api::types::ApiContext;
use crate::db::repository::usuario;
use crate::validation;

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub senha: Option<String>,
}

/// `POST /api/auth/login`: verify credentials and issue a token.
///
/// The response data is the user record plus a `token` field.
pub async fn login(
    State(ctx): State<ApiContext>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(credenciais) = payload?;
    if !validation::presente(credenciais.email.as_deref())
        || !validation::presente(credenciais.senha.as_deref())
    {
        return Err(ApiError::validation("Email and password are required"));
    }
    let email = credenciais.email.as_deref().unwrap_or_default();
    let senha = credenciais.senha.as_deref().unwrap_or_default();

    let conn = ctx
        .db
        .connect()
        .map_err(|e| resource(CODE_AUTH)(e.into()))?;
    let usuario = usuario::autenticar(&conn, email, senha).map_err(resource(CODE_AUTH))?;

    let mut data = serde_json::to_value(&usuario)
        .map_err(|e| ApiError::internal(format!("serializing usuario: {e}")))?;
    data["token"] = serde_json::Value::String(ctx.tokens.issue(usuario.id));

    Ok(response::sucesso("Login successful", data))
}

/// `GET /api/auth/health`: liveness probe.
pub async fn health() -> Response {
    response::sucesso("Server is running", serde_json::json!({"status": "healthy"}))
}
