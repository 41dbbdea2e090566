//! Uniform JSON envelopes.
//!
//! Every success body is `{status, message, data}`; list endpoints add
//! a `pagination` block. Error envelopes are built in [`super::error`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    pub message: String,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct PaginatedEnvelope<T> {
    pub status: &'static str,
    pub message: String,
    pub data: T,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

/// `200 OK` with a success envelope.
pub fn sucesso<T: Serialize>(message: impl Into<String>, data: T) -> Response {
    (
        StatusCode::OK,
        Json(Envelope {
            status: "success",
            message: message.into(),
            data,
        }),
    )
        .into_response()
}

/// `201 Created` with a success envelope.
pub fn criado<T: Serialize>(message: impl Into<String>, data: T) -> Response {
    (
        StatusCode::CREATED,
        Json(Envelope {
            status: "success",
            message: message.into(),
            data,
        }),
    )
        .into_response()
}

/// `200 OK` with a success envelope plus pagination metadata.
pub fn paginado<T: Serialize>(
    message: impl Into<String>,
    data: T,
    pagination: Pagination,
) -> Response {
    (
        StatusCode::OK,
        Json(PaginatedEnvelope {
            status: "success",
            message: message.into(),
            data,
            pagination,
        }),
    )
        .into_response()
}
