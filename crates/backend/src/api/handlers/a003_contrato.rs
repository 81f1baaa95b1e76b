use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a003_contrato::aggregate::{
    Contrato, CrearContratoDto, RenovarContratoDto,
};
use contracts::domain::a003_contrato::sync::{
    ConsistenciaSalario, SalarioSync, SincronizacionMasiva,
};
use contracts::shared::ApiResponse;

use super::{parse_uuid, respond, respond_created};
use crate::domain::a003_contrato::service;

/// GET /api/contrato
pub async fn list_all() -> (StatusCode, Json<ApiResponse<Vec<Contrato>>>) {
    respond("Contratos", service::list_all().await)
}

/// GET /api/contrato/:id
pub async fn get_by_id(Path(id): Path<String>) -> (StatusCode, Json<ApiResponse<Contrato>>) {
    let result = match parse_uuid(&id, "contrato") {
        Ok(uuid) => service::get_by_id(uuid).await,
        Err(e) => Err(e),
    };
    respond("Contrato", result)
}

/// POST /api/contrato
///
/// The central lifecycle operation: supersedes the worker's active contract
/// (if any), creates the new one and writes the audit trail, atomically.
pub async fn create(
    Json(dto): Json<CrearContratoDto>,
) -> (StatusCode, Json<ApiResponse<Contrato>>) {
    respond_created("Contrato creado", service::create_contract(dto).await)
}

/// GET /api/contrato/trabajador/:id
pub async fn list_by_trabajador(
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<Vec<Contrato>>>) {
    let result = match parse_uuid(&id, "trabajador") {
        Ok(uuid) => service::find_by_trabajador(uuid).await,
        Err(e) => Err(e),
    };
    respond("Contratos del trabajador", result)
}

/// GET /api/contrato/trabajador/:id/activo
pub async fn get_activo(
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<Option<Contrato>>>) {
    let result = match parse_uuid(&id, "trabajador") {
        Ok(uuid) => service::get_active_contract(uuid).await,
        Err(e) => Err(e),
    };
    respond("Contrato activo", result)
}

/// POST /api/contrato/:id/renovar
pub async fn renovar(
    Path(id): Path<String>,
    Json(dto): Json<RenovarContratoDto>,
) -> (StatusCode, Json<ApiResponse<Contrato>>) {
    let result = match parse_uuid(&id, "contrato") {
        Ok(uuid) => service::renew_contract(uuid, dto).await,
        Err(e) => Err(e),
    };
    respond("Contrato renovado", result)
}

/// POST /api/contrato/trabajador/:id/sincronizar-salario
pub async fn sincronizar_salario(
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<SalarioSync>>) {
    let result = match parse_uuid(&id, "trabajador") {
        Ok(uuid) => service::sync_worker_salary(uuid).await,
        Err(e) => Err(e),
    };
    respond("Salario sincronizado", result)
}

/// GET /api/contrato/trabajador/:id/validar-salario
pub async fn validar_salario(
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<ConsistenciaSalario>>) {
    let result = match parse_uuid(&id, "trabajador") {
        Ok(uuid) => service::validate_salary_consistency(uuid).await,
        Err(e) => Err(e),
    };
    respond("Consistencia de salario", result)
}

/// POST /api/contrato/sincronizar-salarios
pub async fn sincronizar_salarios() -> (StatusCode, Json<ApiResponse<SincronizacionMasiva>>) {
    respond(
        "Sincronizacion masiva de salarios",
        service::bulk_sync_all_salaries().await,
    )
}
