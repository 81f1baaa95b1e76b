use chrono::{NaiveDate, Utc};
use contracts::domain::a003_contrato::aggregate::{
    Contrato, CrearContratoDto, EstadoContrato, RenovarContratoDto,
};
use contracts::domain::a003_contrato::sync::{
    ConsistenciaSalario, SalarioSync, SincronizacionDetalle, SincronizacionMasiva,
};
use contracts::domain::a004_historial_contrato::aggregate::TipoAccionHistorial;
use contracts::domain::common::{DomainError, DomainResult};
use sea_orm::TransactionTrait;
use serde_json::json;
use uuid::Uuid;

use super::repository;
use crate::domain::a001_trabajador::repository as trabajador_repo;
use crate::domain::a002_tipo_contrato::repository as tipo_repo;
use crate::domain::a004_historial_contrato::repository as historial_repo;
use crate::domain::a004_historial_contrato::repository::NuevaAccion;
use crate::shared::data::db::get_connection;

/// Tolerance for comparing monetary amounts stored as REAL
const TOLERANCIA_SALARIO: f64 = 0.01;

const MOTIVO_REEMPLAZO: &str = "Reemplazado por nuevo contrato";

fn salarios_iguales(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => (x - y).abs() <= TOLERANCIA_SALARIO,
        _ => false,
    }
}

fn salario_valido(salario: Option<f64>) -> Option<f64> {
    salario.filter(|s| s.is_finite() && *s > 0.0)
}

/// Logical state derived from the calendar, independent of the persisted
/// `estado` column. Reporting view only; it never overwrites the database.
pub fn derive_logical_state(contrato: &Contrato, hoy: NaiveDate) -> EstadoContrato {
    if hoy >= contrato.fecha_inicio && hoy <= contrato.fecha_fin {
        EstadoContrato::Activo
    } else if hoy > contrato.fecha_fin {
        if contrato.renovado {
            EstadoContrato::Renovado
        } else {
            EstadoContrato::Vencido
        }
    } else {
        // Future-dated contract: not yet in force
        EstadoContrato::Vencido
    }
}

pub async fn get_by_id(id: Uuid) -> DomainResult<Contrato> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Contrato not found"))
}

pub async fn list_all() -> DomainResult<Vec<Contrato>> {
    repository::list_all().await.map_err(DomainError::from)
}

pub async fn find_by_trabajador(trabajador_id: Uuid) -> DomainResult<Vec<Contrato>> {
    repository::find_by_trabajador(&trabajador_id.to_string())
        .await
        .map_err(DomainError::from)
}

pub async fn get_active_contract(trabajador_id: Uuid) -> DomainResult<Option<Contrato>> {
    repository::find_activo_by_trabajador(&trabajador_id.to_string())
        .await
        .map_err(DomainError::from)
}

/// Central operation: hire or re-contract a worker.
///
/// Everything runs inside one database transaction so "supersede the old
/// contract + insert the new one + append ledger rows + refresh the salary
/// mirror" is all-or-nothing. On SQLite the write transaction serializes
/// concurrent writers, which keeps the single-ACTIVO invariant under
/// concurrent requests for the same worker.
pub async fn create_contract(dto: CrearContratoDto) -> DomainResult<Contrato> {
    let trabajador_id = Uuid::parse_str(&dto.trabajador_id)
        .map_err(|_| DomainError::validation("Invalid trabajador ID"))?;
    let tipo_contrato_id = Uuid::parse_str(&dto.tipo_contrato_id)
        .map_err(|_| DomainError::validation("Invalid tipo contrato ID"))?;
    if dto.fecha_inicio > dto.fecha_fin {
        return Err(DomainError::validation(
            "Fecha inicio must not be after fecha fin",
        ));
    }

    let db = get_connection();
    let txn = db
        .begin()
        .await
        .map_err(|e| DomainError::internal(e.to_string()))?;

    // An early return drops the transaction, which rolls it back.
    let trabajador = trabajador_repo::get_by_id_txn(&txn, trabajador_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Trabajador not found"))?;

    // The worker's mirrored salary is the only remuneration source; the
    // caller never supplies one at creation time.
    let remuneracion = salario_valido(trabajador.salario_actual).ok_or_else(|| {
        DomainError::invalid_state("Trabajador has no valid current salary")
    })?;

    tipo_repo::get_by_id_txn(&txn, tipo_contrato_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Tipo de contrato not found"))?;

    let hoy = Utc::now().date_naive();
    let anterior = repository::find_activo_by_trabajador_txn(&txn, &dto.trabajador_id).await?;

    if let Some(contrato_anterior) = &anterior {
        let mut superado = contrato_anterior.clone();
        superado.marcar_renovado(hoy, MOTIVO_REEMPLAZO);
        repository::update_txn(&txn, &superado).await?;

        historial_repo::insert_txn(
            &txn,
            NuevaAccion {
                contrato_id: superado.to_string_id(),
                accion: TipoAccionHistorial::Terminacion,
                descripcion: format!(
                    "Contrato {} superado por uno nuevo para el trabajador {}",
                    superado.base.code, trabajador.base.description
                ),
                estado_anterior: Some(json!({
                    "estado": EstadoContrato::Activo.as_str(),
                    "remuneracion": contrato_anterior.remuneracion,
                    "fechaInicio": contrato_anterior.fecha_inicio,
                    "fechaFin": contrato_anterior.fecha_fin,
                })),
                estado_nuevo: Some(json!({
                    "estado": EstadoContrato::Renovado.as_str(),
                    "renovado": true,
                    "fechaRenovacion": hoy,
                    "motivoTerminacion": MOTIVO_REEMPLAZO,
                })),
                usuario: dto.usuario.clone(),
                ip_origen: dto.ip_origen.clone(),
                observaciones: None,
            },
        )
        .await?;

        tracing::info!(
            "Contrato {} marcado RENOVADO para trabajador {}",
            superado.base.code,
            trabajador.to_string_id()
        );
    }

    let mut nuevo = Contrato::new_for_insert(
        dto.trabajador_id.clone(),
        dto.tipo_contrato_id.clone(),
        remuneracion,
        dto.fecha_inicio,
        dto.fecha_fin,
        dto.documento_url.clone(),
    );
    nuevo.validate().map_err(DomainError::validation)?;
    nuevo.before_write();
    repository::insert_txn(&txn, &nuevo).await?;

    let referencia_anterior = match &anterior {
        Some(c) => json!({
            "contratoAnterior": c.to_string_id(),
            "remuneracion": c.remuneracion,
        }),
        None => json!({ "primerContrato": true }),
    };
    historial_repo::insert_txn(
        &txn,
        NuevaAccion {
            contrato_id: nuevo.to_string_id(),
            accion: TipoAccionHistorial::Creacion,
            descripcion: format!(
                "Contrato {} creado para el trabajador {}",
                nuevo.base.code, trabajador.base.description
            ),
            estado_anterior: Some(referencia_anterior),
            estado_nuevo: Some(json!({
                "estado": EstadoContrato::Activo.as_str(),
                "remuneracion": nuevo.remuneracion,
                "fechaInicio": nuevo.fecha_inicio,
                "fechaFin": nuevo.fecha_fin,
            })),
            usuario: dto.usuario.clone(),
            ip_origen: dto.ip_origen.clone(),
            observaciones: None,
        },
    )
    .await?;

    if let Some(contrato_anterior) = &anterior {
        if !salarios_iguales(Some(contrato_anterior.remuneracion), Some(remuneracion)) {
            historial_repo::insert_txn(
                &txn,
                NuevaAccion {
                    contrato_id: nuevo.to_string_id(),
                    accion: TipoAccionHistorial::CambioSalario,
                    descripcion: format!(
                        "Remuneracion cambio de {:.2} a {:.2}",
                        contrato_anterior.remuneracion, remuneracion
                    ),
                    estado_anterior: Some(json!({
                        "remuneracion": contrato_anterior.remuneracion
                    })),
                    estado_nuevo: Some(json!({ "remuneracion": remuneracion })),
                    usuario: dto.usuario.clone(),
                    ip_origen: dto.ip_origen.clone(),
                    observaciones: None,
                },
            )
            .await?;
        }
    }

    // Salary mirror stays in sync inside the same transaction
    trabajador_repo::set_salario_actual_txn(&txn, trabajador_id, Some(remuneracion)).await?;

    txn.commit()
        .await
        .map_err(|e| DomainError::internal(e.to_string()))?;

    tracing::info!(
        "Contrato {} creado (remuneracion {:.2}) para trabajador {}",
        nuevo.base.code,
        remuneracion,
        trabajador.to_string_id()
    );

    Ok(nuevo)
}

/// Extend an existing contract in place.
///
/// Deliberately weaker than creation: a single-row update plus an optional
/// follow-up salary sync, not one big transaction.
pub async fn renew_contract(contrato_id: Uuid, dto: RenovarContratoDto) -> DomainResult<Contrato> {
    let mut contrato = repository::get_by_id(contrato_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Contrato not found"))?;

    if contrato.estado != EstadoContrato::Activo {
        return Err(DomainError::invalid_state(format!(
            "Only ACTIVO contracts can be renewed, contract is {}",
            contrato.estado
        )));
    }
    if dto.nueva_fecha_fin < contrato.fecha_inicio {
        return Err(DomainError::validation(
            "Nueva fecha fin must not be before fecha inicio",
        ));
    }
    if let Some(remuneracion) = dto.nueva_remuneracion {
        if !remuneracion.is_finite() || remuneracion <= 0.0 {
            return Err(DomainError::validation(
                "Nueva remuneracion must be a positive number",
            ));
        }
    }

    let fecha_fin_anterior = contrato.fecha_fin;
    let remuneracion_anterior = contrato.remuneracion;
    let hoy = Utc::now().date_naive();

    contrato.fecha_fin = dto.nueva_fecha_fin;
    contrato.renovado = true;
    contrato.fecha_renovacion = Some(hoy);
    if let Some(remuneracion) = dto.nueva_remuneracion {
        contrato.remuneracion = remuneracion;
    }
    contrato.before_write();
    repository::update(&contrato).await?;

    historial_repo::insert(NuevaAccion {
        contrato_id: contrato.to_string_id(),
        accion: TipoAccionHistorial::Renovacion,
        descripcion: format!(
            "Contrato {} renovado hasta {}",
            contrato.base.code, contrato.fecha_fin
        ),
        estado_anterior: Some(json!({
            "fechaFin": fecha_fin_anterior,
            "remuneracion": remuneracion_anterior,
        })),
        estado_nuevo: Some(json!({
            "fechaFin": contrato.fecha_fin,
            "remuneracion": contrato.remuneracion,
            "fechaRenovacion": hoy,
        })),
        usuario: dto.usuario.clone(),
        ip_origen: dto.ip_origen.clone(),
        observaciones: None,
    })
    .await?;

    if !salarios_iguales(Some(remuneracion_anterior), Some(contrato.remuneracion)) {
        let trabajador_id = Uuid::parse_str(&contrato.trabajador_id)
            .map_err(|_| DomainError::internal("Contrato has malformed trabajador ID"))?;
        sync_worker_salary(trabajador_id).await?;
    }

    tracing::info!(
        "Contrato {} renovado hasta {}",
        contrato.base.code,
        contrato.fecha_fin
    );

    Ok(contrato)
}

/// Set the worker's salary mirror to the active contract's remuneration, or
/// clear it when no active contract exists.
pub async fn sync_worker_salary(trabajador_id: Uuid) -> DomainResult<SalarioSync> {
    let trabajador = trabajador_repo::get_by_id(trabajador_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Trabajador not found"))?;

    let activo = repository::find_activo_by_trabajador(&trabajador_id.to_string()).await?;
    let salario_nuevo = activo.map(|c| c.remuneracion);
    let salario_anterior = trabajador.salario_actual;

    let actualizado = !salarios_iguales(salario_anterior, salario_nuevo);
    if actualizado {
        trabajador_repo::set_salario_actual_txn(get_connection(), trabajador_id, salario_nuevo)
            .await?;
        tracing::info!(
            "Salario de trabajador {} sincronizado: {:?} -> {:?}",
            trabajador_id,
            salario_anterior,
            salario_nuevo
        );
    }

    Ok(SalarioSync {
        trabajador_id: trabajador_id.to_string(),
        salario_anterior,
        salario_nuevo,
        actualizado,
    })
}

/// Consistency repair over every worker. Individual failures are recorded in
/// the result, never propagated.
pub async fn bulk_sync_all_salaries() -> DomainResult<SincronizacionMasiva> {
    let trabajadores = trabajador_repo::list_all().await?;

    let mut resultado = SincronizacionMasiva::default();
    for trabajador in trabajadores {
        resultado.procesados += 1;
        let id = trabajador.base.id.value();
        match sync_worker_salary(id).await {
            Ok(sync) => {
                if sync.actualizado {
                    resultado.actualizados += 1;
                }
                resultado.detalle.push(SincronizacionDetalle {
                    trabajador_id: id.to_string(),
                    resultado: if sync.actualizado {
                        "actualizado".to_string()
                    } else {
                        "sin cambios".to_string()
                    },
                    error: None,
                });
            }
            Err(e) => {
                tracing::warn!("Salary sync failed for trabajador {}: {}", id, e);
                resultado.errores += 1;
                resultado.detalle.push(SincronizacionDetalle {
                    trabajador_id: id.to_string(),
                    resultado: "error".to_string(),
                    error: Some(e.to_string()),
                });
            }
        }
    }

    tracing::info!(
        "Bulk salary sync: {} processed, {} updated, {} errors",
        resultado.procesados,
        resultado.actualizados,
        resultado.errores
    );
    Ok(resultado)
}

/// Pure read: compares the mirror against the active contract with a 0.01
/// tolerance. No active contract means the mirror must be empty.
pub async fn validate_salary_consistency(trabajador_id: Uuid) -> DomainResult<ConsistenciaSalario> {
    let trabajador = trabajador_repo::get_by_id(trabajador_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Trabajador not found"))?;

    let activo = repository::find_activo_by_trabajador(&trabajador_id.to_string()).await?;
    let remuneracion_contrato = activo.map(|c| c.remuneracion);
    let salario_trabajador = trabajador.salario_actual;

    let es_consistente = salarios_iguales(salario_trabajador, remuneracion_contrato);
    let detalle = match (salario_trabajador, remuneracion_contrato) {
        (None, None) => "Sin contrato activo y sin salario registrado".to_string(),
        (Some(s), Some(r)) if es_consistente => {
            format!("Salario {:.2} coincide con el contrato activo ({:.2})", s, r)
        }
        (Some(s), Some(r)) => format!(
            "Salario {:.2} difiere de la remuneracion del contrato activo {:.2}",
            s, r
        ),
        (Some(s), None) => format!("Salario {:.2} registrado sin contrato activo", s),
        (None, Some(r)) => format!(
            "Contrato activo con remuneracion {:.2} pero sin salario registrado",
            r
        ),
    };

    Ok(ConsistenciaSalario {
        trabajador_id: trabajador_id.to_string(),
        es_consistente,
        salario_trabajador,
        remuneracion_contrato,
        detalle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_contrato::aggregate::Contrato;

    fn contrato(inicio: &str, fin: &str, renovado: bool) -> Contrato {
        let mut c = Contrato::new_for_insert(
            Uuid::new_v4().to_string(),
            Uuid::new_v4().to_string(),
            1500.0,
            inicio.parse().unwrap(),
            fin.parse().unwrap(),
            None,
        );
        c.renovado = renovado;
        c
    }

    fn dia(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_logical_state_within_range_is_activo() {
        let c = contrato("2024-01-01", "2024-12-31", false);
        assert_eq!(
            derive_logical_state(&c, dia("2024-06-15")),
            EstadoContrato::Activo
        );
        // Boundaries are inclusive
        assert_eq!(
            derive_logical_state(&c, dia("2024-01-01")),
            EstadoContrato::Activo
        );
        assert_eq!(
            derive_logical_state(&c, dia("2024-12-31")),
            EstadoContrato::Activo
        );
    }

    #[test]
    fn test_logical_state_past_end_depends_on_renewal_flag() {
        let sin_renovar = contrato("2024-01-01", "2024-12-31", false);
        assert_eq!(
            derive_logical_state(&sin_renovar, dia("2025-01-01")),
            EstadoContrato::Vencido
        );

        let renovado = contrato("2024-01-01", "2024-12-31", true);
        assert_eq!(
            derive_logical_state(&renovado, dia("2025-01-01")),
            EstadoContrato::Renovado
        );
    }

    #[test]
    fn test_logical_state_future_contract_is_vencido() {
        let c = contrato("2030-01-01", "2030-12-31", false);
        assert_eq!(
            derive_logical_state(&c, dia("2024-06-15")),
            EstadoContrato::Vencido
        );
    }

    #[test]
    fn test_salarios_iguales_tolerance() {
        assert!(salarios_iguales(Some(2000.0), Some(2000.005)));
        assert!(salarios_iguales(Some(2000.0), Some(2000.01)));
        assert!(!salarios_iguales(Some(2000.0), Some(2000.02)));
        assert!(salarios_iguales(None, None));
        assert!(!salarios_iguales(Some(2000.0), None));
        assert!(!salarios_iguales(None, Some(2000.0)));
    }

    #[test]
    fn test_salario_valido_rejects_non_positive() {
        assert_eq!(salario_valido(Some(2000.0)), Some(2000.0));
        assert_eq!(salario_valido(Some(0.0)), None);
        assert_eq!(salario_valido(Some(-10.0)), None);
        assert_eq!(salario_valido(Some(f64::NAN)), None);
        assert_eq!(salario_valido(None), None);
    }
}
