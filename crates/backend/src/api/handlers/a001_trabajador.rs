use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_trabajador::aggregate::{Trabajador, TrabajadorDto};
use contracts::domain::common::DomainError;
use contracts::shared::ApiResponse;
use serde_json::{json, Value};

use super::{parse_uuid, respond, respond_created, status_for};
use crate::domain::a001_trabajador::service;

/// GET /api/trabajador
pub async fn list_all() -> (StatusCode, Json<ApiResponse<Vec<Trabajador>>>) {
    respond("Trabajadores", service::list_all().await)
}

/// GET /api/trabajador/:id
pub async fn get_by_id(Path(id): Path<String>) -> (StatusCode, Json<ApiResponse<Trabajador>>) {
    let result = match parse_uuid(&id, "trabajador") {
        Ok(uuid) => service::get_by_id(uuid).await,
        Err(e) => Err(e),
    };
    respond("Trabajador", result)
}

/// POST /api/trabajador (upsert)
pub async fn upsert(Json(dto): Json<TrabajadorDto>) -> (StatusCode, Json<ApiResponse<Value>>) {
    if dto.id.is_some() {
        let result = service::update(dto).await.map(|_| json!({}));
        respond("Trabajador actualizado", result)
    } else {
        let result = service::create(dto)
            .await
            .map(|id| json!({ "id": id.to_string() }));
        respond_created("Trabajador creado", result)
    }
}

/// DELETE /api/trabajador/:id
pub async fn delete(Path(id): Path<String>) -> (StatusCode, Json<ApiResponse<Value>>) {
    let result = match parse_uuid(&id, "trabajador") {
        Ok(uuid) => match service::delete(uuid).await {
            Ok(true) => Ok(json!({})),
            Ok(false) => Err(DomainError::not_found("Trabajador not found")),
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };
    match result {
        Ok(data) => (
            StatusCode::OK,
            Json(ApiResponse::ok("Trabajador eliminado", data)),
        ),
        Err(err) => (status_for(&err), Json(ApiResponse::failure(&err))),
    }
}
