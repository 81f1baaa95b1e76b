// Aggregate handlers (a001-a004)
pub mod a001_trabajador;
pub mod a002_tipo_contrato;
pub mod a003_contrato;
pub mod a004_historial_contrato;

use axum::http::StatusCode;
use axum::Json;
use contracts::domain::common::{DomainError, DomainResult};
use contracts::shared::ApiResponse;
use serde::Serialize;

pub(crate) fn status_for(err: &DomainError) -> StatusCode {
    match err.code.as_str() {
        "NOT_FOUND" => StatusCode::NOT_FOUND,
        "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
        "INVALID_STATE" => StatusCode::UNPROCESSABLE_ENTITY,
        "CONFLICT" => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wrap a service result in the uniform response envelope
pub(crate) fn respond<T: Serialize>(
    message: &str,
    result: DomainResult<T>,
) -> (StatusCode, Json<ApiResponse<T>>) {
    match result {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::ok(message, data))),
        Err(err) => (status_for(&err), Json(ApiResponse::failure(&err))),
    }
}

pub(crate) fn respond_created<T: Serialize>(
    message: &str,
    result: DomainResult<T>,
) -> (StatusCode, Json<ApiResponse<T>>) {
    match result {
        Ok(data) => (StatusCode::CREATED, Json(ApiResponse::ok(message, data))),
        Err(err) => (status_for(&err), Json(ApiResponse::failure(&err))),
    }
}

pub(crate) fn parse_uuid(raw: &str, what: &str) -> DomainResult<uuid::Uuid> {
    uuid::Uuid::parse_str(raw).map_err(|_| DomainError::validation(format!("Invalid {} ID", what)))
}
