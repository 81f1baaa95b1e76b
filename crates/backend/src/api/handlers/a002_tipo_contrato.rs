use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a002_tipo_contrato::aggregate::{TipoContrato, TipoContratoDto};
use contracts::domain::common::DomainError;
use contracts::shared::ApiResponse;
use serde_json::{json, Value};

use super::{parse_uuid, respond, respond_created, status_for};
use crate::domain::a002_tipo_contrato::service;

/// GET /api/tipo-contrato
pub async fn list_all() -> (StatusCode, Json<ApiResponse<Vec<TipoContrato>>>) {
    respond("Tipos de contrato", service::list_all().await)
}

/// GET /api/tipo-contrato/:id
pub async fn get_by_id(Path(id): Path<String>) -> (StatusCode, Json<ApiResponse<TipoContrato>>) {
    let result = match parse_uuid(&id, "tipo contrato") {
        Ok(uuid) => service::get_by_id(uuid).await,
        Err(e) => Err(e),
    };
    respond("Tipo de contrato", result)
}

/// POST /api/tipo-contrato (upsert)
pub async fn upsert(Json(dto): Json<TipoContratoDto>) -> (StatusCode, Json<ApiResponse<Value>>) {
    if dto.id.is_some() {
        let result = service::update(dto).await.map(|_| json!({}));
        respond("Tipo de contrato actualizado", result)
    } else {
        let result = service::create(dto)
            .await
            .map(|id| json!({ "id": id.to_string() }));
        respond_created("Tipo de contrato creado", result)
    }
}

/// DELETE /api/tipo-contrato/:id
pub async fn delete(Path(id): Path<String>) -> (StatusCode, Json<ApiResponse<Value>>) {
    let result = match parse_uuid(&id, "tipo contrato") {
        Ok(uuid) => match service::delete(uuid).await {
            Ok(true) => Ok(json!({})),
            Ok(false) => Err(DomainError::not_found("Tipo de contrato not found")),
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };
    match result {
        Ok(data) => (
            StatusCode::OK,
            Json(ApiResponse::ok("Tipo de contrato eliminado", data)),
        ),
        Err(err) => (status_for(&err), Json(ApiResponse::failure(&err))),
    }
}
