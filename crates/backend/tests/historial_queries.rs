use backend::domain::a001_trabajador::service as trabajador_service;
use backend::domain::a002_tipo_contrato::service as tipo_service;
use backend::domain::a003_contrato::service as contrato_service;
use backend::domain::a004_historial_contrato::service as historial_service;
use backend::shared::data::db;
use chrono::{NaiveDate, Utc};
use contracts::domain::a001_trabajador::aggregate::TrabajadorDto;
use contracts::domain::a002_tipo_contrato::aggregate::TipoContratoDto;
use contracts::domain::a003_contrato::aggregate::CrearContratoDto;
use contracts::domain::a004_historial_contrato::aggregate::{
    RegistrarAccionDto, TipoAccionHistorial,
};
use serde_json::json;
use uuid::Uuid;

fn fecha(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[tokio::test]
async fn historial_query_surface() {
    let db_file = std::env::temp_dir().join(format!("historial-test-{}.db", Uuid::new_v4()));
    db::initialize_database(db_file.to_str()).await.unwrap();

    let tipo_id = tipo_service::create(TipoContratoDto {
        id: None,
        code: None,
        nombre: "Locacion de servicios".to_string(),
        comment: None,
    })
    .await
    .unwrap();

    let trabajador_id = trabajador_service::create(TrabajadorDto {
        id: None,
        code: None,
        nombres: "Rosa".to_string(),
        apellidos: "Mendoza".to_string(),
        documento: "71234567".to_string(),
        cargo: "Jardinera".to_string(),
        telefono: None,
        email: None,
        salario_actual: Some(1800.0),
        comment: None,
    })
    .await
    .unwrap();

    let contrato = contrato_service::create_contract(CrearContratoDto {
        trabajador_id: trabajador_id.to_string(),
        tipo_contrato_id: tipo_id.to_string(),
        fecha_inicio: fecha("2025-01-01"),
        fecha_fin: fecha("2025-12-31"),
        documento_url: None,
        usuario: None,
        ip_origen: None,
    })
    .await
    .unwrap();
    let contrato_id = contrato.base.id.value();

    // Explicit record call appends on top of the automatic CREACION
    let suspension = historial_service::registrar_accion(RegistrarAccionDto {
        contrato_id: contrato_id.to_string(),
        accion: TipoAccionHistorial::Suspension,
        descripcion: "Suspension por licencia sin goce".to_string(),
        estado_anterior: Some(json!({ "estado": "ACTIVO" })),
        estado_nuevo: Some(json!({ "estado": "SUSPENDIDO" })),
        usuario: Some("administrador".to_string()),
        ip_origen: Some("10.0.0.5".to_string()),
        observaciones: Some("Retorna el proximo mes".to_string()),
    })
    .await
    .unwrap();
    assert!(suspension.id > 0);
    assert_eq!(suspension.accion, TipoAccionHistorial::Suspension);

    // Recording against a missing contract fails and appends nothing
    let err = historial_service::registrar_accion(RegistrarAccionDto {
        contrato_id: Uuid::new_v4().to_string(),
        accion: TipoAccionHistorial::Modificacion,
        descripcion: "No debe registrarse".to_string(),
        estado_anterior: None,
        estado_nuevo: None,
        usuario: None,
        ip_origen: None,
        observaciones: None,
    })
    .await
    .unwrap_err();
    assert_eq!(err.code, "NOT_FOUND");

    // Chronological vs reverse-chronological per contract
    let asc = historial_service::find_by_contrato(contrato_id, true)
        .await
        .unwrap();
    assert_eq!(asc.len(), 2);
    assert_eq!(asc[0].accion, TipoAccionHistorial::Creacion);
    assert_eq!(asc[1].accion, TipoAccionHistorial::Suspension);

    let desc = historial_service::find_by_contrato(contrato_id, false)
        .await
        .unwrap();
    assert_eq!(desc[0].accion, TipoAccionHistorial::Suspension);
    assert_eq!(desc[1].accion, TipoAccionHistorial::Creacion);

    // Snapshot fields survive the round trip untouched
    assert_eq!(asc[1].estado_anterior, Some(json!({ "estado": "ACTIVO" })));
    assert_eq!(asc[1].observaciones.as_deref(), Some("Retorna el proximo mes"));

    // Filter by action type
    let suspensiones = historial_service::find_by_accion(TipoAccionHistorial::Suspension)
        .await
        .unwrap();
    assert_eq!(suspensiones.len(), 1);
    assert_eq!(suspensiones[0].contrato_id, contrato_id.to_string());

    // Entries just written are within any recent window
    let recientes = historial_service::find_recientes(Some(7)).await.unwrap();
    assert_eq!(recientes.len(), 2);
    let recientes_defecto = historial_service::find_recientes(None).await.unwrap();
    assert_eq!(recientes_defecto.len(), 2);
    let err = historial_service::find_recientes(Some(0)).await.unwrap_err();
    assert_eq!(err.code, "VALIDATION_ERROR");

    // Date-range query, inclusive on both ends
    let hoy = Utc::now().date_naive();
    let en_rango = historial_service::find_by_rango(hoy, hoy).await.unwrap();
    assert_eq!(en_rango.len(), 2);
    let vacio = historial_service::find_by_rango(fecha("2000-01-01"), fecha("2000-01-31"))
        .await
        .unwrap();
    assert!(vacio.is_empty());
    let err = historial_service::find_by_rango(fecha("2025-02-01"), fecha("2025-01-01"))
        .await
        .unwrap_err();
    assert_eq!(err.code, "VALIDATION_ERROR");

    // Last action and per-contract summary
    let ultima = historial_service::ultima_accion(contrato_id).await.unwrap();
    assert_eq!(ultima.accion, TipoAccionHistorial::Suspension);

    let resumen = historial_service::resumen_actividad(contrato_id)
        .await
        .unwrap();
    assert_eq!(resumen.total_acciones, 2);
    assert_eq!(resumen.por_accion.get("CREACION"), Some(&1));
    assert_eq!(resumen.por_accion.get("SUSPENSION"), Some(&1));
    assert!(resumen.primera_accion.unwrap() <= resumen.ultima_accion.unwrap());

    // Global statistics
    let stats = historial_service::estadisticas().await.unwrap();
    assert_eq!(stats.total_acciones, 2);
    assert_eq!(stats.contratos_con_actividad, 1);
    assert_eq!(stats.por_accion.get("CREACION"), Some(&1));

    // Worker view covers every contract the worker has owned
    let por_trabajador = historial_service::find_by_trabajador(trabajador_id)
        .await
        .unwrap();
    assert_eq!(por_trabajador.len(), 2);
    let err = historial_service::find_by_trabajador(Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code, "NOT_FOUND");

    let _ = std::fs::remove_file(&db_file);
}
