use backend::domain::a001_trabajador::service as trabajador_service;
use backend::domain::a002_tipo_contrato::service as tipo_service;
use backend::domain::a003_contrato::service as contrato_service;
use backend::domain::a004_historial_contrato::service as historial_service;
use backend::shared::data::db;
use chrono::NaiveDate;
use contracts::domain::a001_trabajador::aggregate::TrabajadorDto;
use contracts::domain::a002_tipo_contrato::aggregate::TipoContratoDto;
use contracts::domain::a003_contrato::aggregate::{
    CrearContratoDto, EstadoContrato, RenovarContratoDto,
};
use contracts::domain::a004_historial_contrato::aggregate::TipoAccionHistorial;
use uuid::Uuid;

fn fecha(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn trabajador_dto(nombres: &str, salario: Option<f64>) -> TrabajadorDto {
    TrabajadorDto {
        id: None,
        code: None,
        nombres: nombres.to_string(),
        apellidos: "Quispe".to_string(),
        documento: format!("DOC-{}", Uuid::new_v4()),
        cargo: "Conserje".to_string(),
        telefono: None,
        email: None,
        salario_actual: salario,
        comment: None,
    }
}

fn crear_contrato_dto(
    trabajador_id: &Uuid,
    tipo_id: &Uuid,
    inicio: &str,
    fin: &str,
) -> CrearContratoDto {
    CrearContratoDto {
        trabajador_id: trabajador_id.to_string(),
        tipo_contrato_id: tipo_id.to_string(),
        fecha_inicio: fecha(inicio),
        fecha_fin: fecha(fin),
        documento_url: Some("https://files.example.test/contrato.pdf".to_string()),
        usuario: Some("admin".to_string()),
        ip_origen: Some("127.0.0.1".to_string()),
    }
}

#[tokio::test]
async fn contract_lifecycle_end_to_end() {
    let db_file = std::env::temp_dir().join(format!("lifecycle-test-{}.db", Uuid::new_v4()));
    db::initialize_database(db_file.to_str()).await.unwrap();

    let tipo_id = tipo_service::create(TipoContratoDto {
        id: None,
        code: None,
        nombre: "Planilla".to_string(),
        comment: None,
    })
    .await
    .unwrap();

    // First contract for a worker hired at 2000.00
    let trabajador_id = trabajador_service::create(trabajador_dto("Maria", Some(2000.0)))
        .await
        .unwrap();

    let primero = contrato_service::create_contract(crear_contrato_dto(
        &trabajador_id,
        &tipo_id,
        "2024-01-01",
        "2024-12-31",
    ))
    .await
    .unwrap();

    assert_eq!(primero.remuneracion, 2000.0);
    assert_eq!(primero.estado, EstadoContrato::Activo);
    assert!(!primero.renovado);

    let trabajador = trabajador_service::get_by_id(trabajador_id).await.unwrap();
    assert_eq!(trabajador.salario_actual, Some(2000.0));

    // Exactly one CREACION entry for a first contract
    let historial = historial_service::find_by_contrato(primero.base.id.value(), true)
        .await
        .unwrap();
    assert_eq!(historial.len(), 1);
    assert_eq!(historial[0].accion, TipoAccionHistorial::Creacion);
    assert_eq!(historial[0].usuario.as_deref(), Some("admin"));

    // Raise the hiring rate, then re-contract: the old contract is superseded
    let mut dto = trabajador_dto("Maria", Some(2500.0));
    dto.id = Some(trabajador_id.to_string());
    trabajador_service::update(dto).await.unwrap();

    let segundo = contrato_service::create_contract(crear_contrato_dto(
        &trabajador_id,
        &tipo_id,
        "2025-01-01",
        "2025-12-31",
    ))
    .await
    .unwrap();

    assert_eq!(segundo.remuneracion, 2500.0);
    assert_eq!(segundo.estado, EstadoContrato::Activo);

    let superado = contrato_service::get_by_id(primero.base.id.value())
        .await
        .unwrap();
    assert_eq!(superado.estado, EstadoContrato::Renovado);
    assert!(superado.renovado);
    assert!(superado.fecha_renovacion.is_some());
    assert_eq!(
        superado.motivo_terminacion.as_deref(),
        Some("Reemplazado por nuevo contrato")
    );

    // Supersession produces TERMINACION on the old contract plus CREACION and
    // CAMBIO_SALARIO on the new one: 3 new rows, 4 in total for the worker
    let historial_viejo = historial_service::find_by_contrato(primero.base.id.value(), true)
        .await
        .unwrap();
    assert_eq!(historial_viejo.len(), 2);
    assert_eq!(historial_viejo[1].accion, TipoAccionHistorial::Terminacion);

    let historial_nuevo = historial_service::find_by_contrato(segundo.base.id.value(), true)
        .await
        .unwrap();
    let acciones: Vec<_> = historial_nuevo.iter().map(|e| e.accion).collect();
    assert_eq!(
        acciones,
        vec![
            TipoAccionHistorial::Creacion,
            TipoAccionHistorial::CambioSalario
        ]
    );

    let todo = historial_service::find_by_trabajador(trabajador_id)
        .await
        .unwrap();
    assert_eq!(todo.len(), 4);

    // Single-active invariant
    let contratos = contrato_service::find_by_trabajador(trabajador_id)
        .await
        .unwrap();
    let activos: Vec<_> = contratos.iter().filter(|c| c.is_activo()).collect();
    assert_eq!(activos.len(), 1);
    assert_eq!(activos[0].base.id, segundo.base.id);

    // Salary mirror follows the new contract
    let trabajador = trabajador_service::get_by_id(trabajador_id).await.unwrap();
    assert_eq!(trabajador.salario_actual, Some(2500.0));

    // Consistency check is a pure read: repeated calls agree
    let chequeo = contrato_service::validate_salary_consistency(trabajador_id)
        .await
        .unwrap();
    assert!(chequeo.es_consistente);
    let chequeo2 = contrato_service::validate_salary_consistency(trabajador_id)
        .await
        .unwrap();
    assert_eq!(chequeo.es_consistente, chequeo2.es_consistente);

    // A worker without a valid salary cannot be contracted
    let sin_salario = trabajador_service::create(trabajador_dto("Jorge", None))
        .await
        .unwrap();
    let err = contrato_service::create_contract(crear_contrato_dto(
        &sin_salario,
        &tipo_id,
        "2025-01-01",
        "2025-12-31",
    ))
    .await
    .unwrap_err();
    assert_eq!(err.code, "INVALID_STATE");
    assert!(contrato_service::find_by_trabajador(sin_salario)
        .await
        .unwrap()
        .is_empty());

    // Atomicity: a failing creation leaves no trace
    let stats_antes = historial_service::estadisticas().await.unwrap();
    let err = contrato_service::create_contract(crear_contrato_dto(
        &trabajador_id,
        &Uuid::new_v4(),
        "2026-01-01",
        "2026-12-31",
    ))
    .await
    .unwrap_err();
    assert_eq!(err.code, "NOT_FOUND");

    let stats_despues = historial_service::estadisticas().await.unwrap();
    assert_eq!(stats_antes.total_acciones, stats_despues.total_acciones);
    let activo = contrato_service::get_active_contract(trabajador_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(activo.base.id, segundo.base.id);
    assert_eq!(activo.estado, EstadoContrato::Activo);
    let trabajador = trabajador_service::get_by_id(trabajador_id).await.unwrap();
    assert_eq!(trabajador.salario_actual, Some(2500.0));

    // Invalid date ordering is rejected before touching the database
    let err = contrato_service::create_contract(crear_contrato_dto(
        &trabajador_id,
        &tipo_id,
        "2026-12-31",
        "2026-01-01",
    ))
    .await
    .unwrap_err();
    assert_eq!(err.code, "VALIDATION_ERROR");

    // In-place renewal with a raise re-syncs the mirror as a follow-up
    let renovado = contrato_service::renew_contract(
        segundo.base.id.value(),
        RenovarContratoDto {
            nueva_fecha_fin: fecha("2026-06-30"),
            nueva_remuneracion: Some(2600.0),
            usuario: Some("admin".to_string()),
            ip_origen: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(renovado.fecha_fin, fecha("2026-06-30"));
    assert_eq!(renovado.remuneracion, 2600.0);
    assert!(renovado.renovado);
    assert_eq!(renovado.estado, EstadoContrato::Activo);

    let trabajador = trabajador_service::get_by_id(trabajador_id).await.unwrap();
    assert_eq!(trabajador.salario_actual, Some(2600.0));

    let ultima = historial_service::ultima_accion(segundo.base.id.value())
        .await
        .unwrap();
    assert_eq!(ultima.accion, TipoAccionHistorial::Renovacion);

    // Terminal contracts cannot be renewed in place
    let err = contrato_service::renew_contract(
        primero.base.id.value(),
        RenovarContratoDto {
            nueva_fecha_fin: fecha("2026-06-30"),
            nueva_remuneracion: None,
            usuario: None,
            ip_origen: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, "INVALID_STATE");

    // Bulk sync over a consistent database touches nothing
    let masiva = contrato_service::bulk_sync_all_salaries().await.unwrap();
    assert_eq!(masiva.procesados, 2);
    assert_eq!(masiva.errores, 0);
    assert_eq!(masiva.actualizados, 0);

    let _ = std::fs::remove_file(&db_file);
}
