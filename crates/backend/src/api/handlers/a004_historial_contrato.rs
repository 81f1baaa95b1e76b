use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use contracts::domain::a004_historial_contrato::aggregate::{
    EstadisticasHistorial, HistorialContrato, RegistrarAccionDto, ResumenActividad,
    TipoAccionHistorial,
};
use contracts::domain::common::DomainError;
use contracts::shared::ApiResponse;
use serde::Deserialize;

use super::{parse_uuid, respond, respond_created};
use crate::domain::a004_historial_contrato::service;

/// POST /api/historial-contrato
pub async fn registrar(
    Json(dto): Json<RegistrarAccionDto>,
) -> (StatusCode, Json<ApiResponse<HistorialContrato>>) {
    respond_created("Accion registrada", service::registrar_accion(dto).await)
}

#[derive(Debug, Deserialize)]
pub struct OrdenQuery {
    /// "asc" for oldest-first; anything else (or absent) is newest-first
    pub orden: Option<String>,
}

/// GET /api/historial-contrato/contrato/:id?orden=asc|desc
pub async fn por_contrato(
    Path(id): Path<String>,
    Query(query): Query<OrdenQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<HistorialContrato>>>) {
    let oldest_first = query.orden.as_deref() == Some("asc");
    let result = match parse_uuid(&id, "contrato") {
        Ok(uuid) => service::find_by_contrato(uuid, oldest_first).await,
        Err(e) => Err(e),
    };
    respond("Historial del contrato", result)
}

/// GET /api/historial-contrato/contrato/:id/ultima
pub async fn ultima_accion(
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<HistorialContrato>>) {
    let result = match parse_uuid(&id, "contrato") {
        Ok(uuid) => service::ultima_accion(uuid).await,
        Err(e) => Err(e),
    };
    respond("Ultima accion", result)
}

/// GET /api/historial-contrato/contrato/:id/resumen
pub async fn resumen(
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<ResumenActividad>>) {
    let result = match parse_uuid(&id, "contrato") {
        Ok(uuid) => service::resumen_actividad(uuid).await,
        Err(e) => Err(e),
    };
    respond("Resumen de actividad", result)
}

/// GET /api/historial-contrato/trabajador/:id
pub async fn por_trabajador(
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<Vec<HistorialContrato>>>) {
    let result = match parse_uuid(&id, "trabajador") {
        Ok(uuid) => service::find_by_trabajador(uuid).await,
        Err(e) => Err(e),
    };
    respond("Historial del trabajador", result)
}

/// GET /api/historial-contrato/tipo-accion/:tipo
pub async fn por_tipo_accion(
    Path(tipo): Path<String>,
) -> (StatusCode, Json<ApiResponse<Vec<HistorialContrato>>>) {
    let result = match tipo.parse::<TipoAccionHistorial>() {
        Ok(accion) => service::find_by_accion(accion).await,
        Err(e) => Err(DomainError::validation(e)),
    };
    respond("Historial por tipo de accion", result)
}

#[derive(Debug, Deserialize)]
pub struct RecientesQuery {
    pub dias: Option<i64>,
}

/// GET /api/historial-contrato/recientes?dias=N (default 30)
pub async fn recientes(
    Query(query): Query<RecientesQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<HistorialContrato>>>) {
    respond(
        "Acciones recientes",
        service::find_recientes(query.dias).await,
    )
}

#[derive(Debug, Deserialize)]
pub struct RangoQuery {
    /// YYYY-MM-DD, inclusive
    pub desde: String,
    /// YYYY-MM-DD, inclusive
    pub hasta: String,
}

/// GET /api/historial-contrato/rango?desde=YYYY-MM-DD&hasta=YYYY-MM-DD
pub async fn por_rango(
    Query(query): Query<RangoQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<HistorialContrato>>>) {
    let fechas = query
        .desde
        .parse::<NaiveDate>()
        .and_then(|desde| query.hasta.parse::<NaiveDate>().map(|hasta| (desde, hasta)));
    let result = match fechas {
        Ok((desde, hasta)) => service::find_by_rango(desde, hasta).await,
        Err(_) => Err(DomainError::validation(
            "Dates must use the YYYY-MM-DD format",
        )),
    };
    respond("Historial por rango de fechas", result)
}

/// GET /api/historial-contrato/estadisticas
pub async fn estadisticas() -> (StatusCode, Json<ApiResponse<EstadisticasHistorial>>) {
    respond("Estadisticas del historial", service::estadisticas().await)
}
