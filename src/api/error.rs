//! Error envelope for the API boundary.
//!
//! Handlers tag a [`ServiceError`] with the code of the resource they
//! serve. Cross-cutting kinds (validation, auth, internal) override the
//! resource code so clients can branch on `error_code` alone.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::errors::ServiceError;

pub const CODE_VALIDATION: &str = "VALIDATION_ERROR";
pub const CODE_AUTH: &str = "AUTH_ERROR";
pub const CODE_INTERNAL: &str = "INTERNAL_ERROR";

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: &'static str,
    pub message: String,
    pub error_code: &'static str,
    /// Always present in the envelope, `null` when there is nothing to add.
    pub details: Option<serde_json::Value>,
}

/// A [`ServiceError`] tagged with the owning resource's error code.
#[derive(Debug)]
pub struct ApiError {
    error_code: &'static str,
    kind: ServiceError,
}

impl ApiError {
    pub fn new(error_code: &'static str, kind: ServiceError) -> Self {
        Self { error_code, kind }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(CODE_AUTH, ServiceError::Authentication(message.into()))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(CODE_VALIDATION, ServiceError::Validation(message.into()))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(CODE_INTERNAL, ServiceError::Internal(message.into()))
    }

    fn effective_code(&self) -> &'static str {
        match self.kind {
            ServiceError::Validation(_) => CODE_VALIDATION,
            ServiceError::Authentication(_) | ServiceError::Authorization(_) => CODE_AUTH,
            ServiceError::Internal(_) => CODE_INTERNAL,
            _ => self.error_code,
        }
    }
}

/// Returns a converter that tags failures with a resource error code.
/// Used as `.map_err(resource(USUARIO_ERROR))` in handlers.
pub fn resource(error_code: &'static str) -> impl Fn(ServiceError) -> ApiError {
    move |kind| ApiError::new(error_code, kind)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.kind {
            ServiceError::Database(detail) => {
                tracing::error!(detail, "database failure");
            }
            ServiceError::Internal(detail) => {
                tracing::error!(detail, "internal failure");
            }
            _ => {}
        }

        let body = ErrorEnvelope {
            status: "error",
            message: self.kind.client_message(),
            error_code: self.effective_code(),
            details: None,
        };
        (self.kind.status_code(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(format!("Invalid JSON body: {rejection}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    async fn body_of(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn resource_code_is_kept_for_not_found() {
        let err = resource("PACIENTE_ERROR")(ServiceError::NotFound("Paciente not found".into()));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_of(resp).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["error_code"], "PACIENTE_ERROR");
        assert_eq!(body["message"], "Paciente not found");
    }

    #[tokio::test]
    async fn details_key_is_always_emitted() {
        let err = resource("PACIENTE_ERROR")(ServiceError::NotFound("Paciente not found".into()));
        let body = body_of(err.into_response()).await;
        let obj = body.as_object().unwrap();
        assert!(obj.contains_key("details"));
        assert!(obj["details"].is_null());
    }

    #[tokio::test]
    async fn validation_overrides_resource_code() {
        let err = resource("PACIENTE_ERROR")(ServiceError::Validation("Invalid email".into()));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_of(resp).await;
        assert_eq!(body["error_code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn store_detail_never_reaches_the_client() {
        let err = resource("USUARIO_ERROR")(ServiceError::Database(
            "UNIQUE constraint failed: usuarios.email".into(),
        ));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(resp).await;
        assert_eq!(body["message"], "Database operation failed");
        assert_eq!(body["error_code"], "USUARIO_ERROR");
        assert!(!body.to_string().contains("UNIQUE constraint"));
    }

    #[tokio::test]
    async fn internal_maps_to_generic_message_and_code() {
        let resp = ApiError::internal("lock poisoned").into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(resp).await;
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["error_code"], "INTERNAL_ERROR");
    }
}
