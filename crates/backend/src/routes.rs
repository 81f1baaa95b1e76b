use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Trabajador handlers
        .route(
            "/api/trabajador",
            get(handlers::a001_trabajador::list_all).post(handlers::a001_trabajador::upsert),
        )
        .route(
            "/api/trabajador/:id",
            get(handlers::a001_trabajador::get_by_id).delete(handlers::a001_trabajador::delete),
        )
        // A002 Tipo de contrato handlers
        .route(
            "/api/tipo-contrato",
            get(handlers::a002_tipo_contrato::list_all).post(handlers::a002_tipo_contrato::upsert),
        )
        .route(
            "/api/tipo-contrato/:id",
            get(handlers::a002_tipo_contrato::get_by_id)
                .delete(handlers::a002_tipo_contrato::delete),
        )
        // A003 Contrato handlers (lifecycle)
        .route(
            "/api/contrato",
            get(handlers::a003_contrato::list_all).post(handlers::a003_contrato::create),
        )
        .route(
            "/api/contrato/sincronizar-salarios",
            post(handlers::a003_contrato::sincronizar_salarios),
        )
        .route("/api/contrato/:id", get(handlers::a003_contrato::get_by_id))
        .route(
            "/api/contrato/:id/renovar",
            post(handlers::a003_contrato::renovar),
        )
        .route(
            "/api/contrato/trabajador/:id",
            get(handlers::a003_contrato::list_by_trabajador),
        )
        .route(
            "/api/contrato/trabajador/:id/activo",
            get(handlers::a003_contrato::get_activo),
        )
        .route(
            "/api/contrato/trabajador/:id/sincronizar-salario",
            post(handlers::a003_contrato::sincronizar_salario),
        )
        .route(
            "/api/contrato/trabajador/:id/validar-salario",
            get(handlers::a003_contrato::validar_salario),
        )
        // A004 Historial de contrato handlers (audit trail)
        .route(
            "/api/historial-contrato",
            post(handlers::a004_historial_contrato::registrar),
        )
        .route(
            "/api/historial-contrato/contrato/:id",
            get(handlers::a004_historial_contrato::por_contrato),
        )
        .route(
            "/api/historial-contrato/contrato/:id/ultima",
            get(handlers::a004_historial_contrato::ultima_accion),
        )
        .route(
            "/api/historial-contrato/contrato/:id/resumen",
            get(handlers::a004_historial_contrato::resumen),
        )
        .route(
            "/api/historial-contrato/trabajador/:id",
            get(handlers::a004_historial_contrato::por_trabajador),
        )
        .route(
            "/api/historial-contrato/tipo-accion/:tipo",
            get(handlers::a004_historial_contrato::por_tipo_accion),
        )
        .route(
            "/api/historial-contrato/recientes",
            get(handlers::a004_historial_contrato::recientes),
        )
        .route(
            "/api/historial-contrato/rango",
            get(handlers::a004_historial_contrato::por_rango),
        )
        .route(
            "/api/historial-contrato/estadisticas",
            get(handlers::a004_historial_contrato::estadisticas),
        )
}
