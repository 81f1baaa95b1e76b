use chrono::{DateTime, Duration, NaiveDate, Utc};
use contracts::domain::a004_historial_contrato::aggregate::{
    EstadisticasHistorial, HistorialContrato, RegistrarAccionDto, ResumenActividad,
    TipoAccionHistorial,
};
use contracts::domain::common::{DomainError, DomainResult};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

use super::repository;
use super::repository::NuevaAccion;
use crate::domain::a001_trabajador::repository as trabajador_repo;
use crate::domain::a003_contrato::repository as contrato_repo;

const DIAS_RECIENTES_DEFECTO: i64 = 30;

/// Append one ledger entry. Always appends: idempotence is the caller's
/// responsibility.
pub async fn registrar_accion(dto: RegistrarAccionDto) -> DomainResult<HistorialContrato> {
    let contrato_id = Uuid::parse_str(&dto.contrato_id)
        .map_err(|_| DomainError::validation("Invalid contrato ID"))?;
    if dto.descripcion.trim().is_empty() {
        return Err(DomainError::validation("Descripcion cannot be empty"));
    }

    contrato_repo::get_by_id(contrato_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Contrato not found"))?;

    let entry = repository::insert(NuevaAccion {
        contrato_id: dto.contrato_id.clone(),
        accion: dto.accion,
        descripcion: dto.descripcion.clone(),
        estado_anterior: dto.estado_anterior.clone(),
        estado_nuevo: dto.estado_nuevo.clone(),
        usuario: dto.usuario.clone(),
        ip_origen: dto.ip_origen.clone(),
        observaciones: dto.observaciones.clone(),
    })
    .await?;

    tracing::info!(
        "Accion {} registrada para contrato {}",
        entry.accion,
        entry.contrato_id
    );
    Ok(entry)
}

pub async fn find_by_contrato(
    contrato_id: Uuid,
    oldest_first: bool,
) -> DomainResult<Vec<HistorialContrato>> {
    repository::find_by_contrato(&contrato_id.to_string(), oldest_first)
        .await
        .map_err(DomainError::from)
}

/// Ledger entries for every contract the worker has owned
pub async fn find_by_trabajador(trabajador_id: Uuid) -> DomainResult<Vec<HistorialContrato>> {
    trabajador_repo::get_by_id(trabajador_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Trabajador not found"))?;

    let contratos = contrato_repo::find_by_trabajador(&trabajador_id.to_string()).await?;
    let ids: Vec<String> = contratos.iter().map(|c| c.to_string_id()).collect();
    repository::find_by_contrato_ids(ids)
        .await
        .map_err(DomainError::from)
}

pub async fn find_by_accion(accion: TipoAccionHistorial) -> DomainResult<Vec<HistorialContrato>> {
    repository::find_by_accion(accion)
        .await
        .map_err(DomainError::from)
}

/// Entries recorded within the last `dias` days (default 30), across all
/// contracts and workers.
pub async fn find_recientes(dias: Option<i64>) -> DomainResult<Vec<HistorialContrato>> {
    let dias = dias.unwrap_or(DIAS_RECIENTES_DEFECTO);
    if dias <= 0 {
        return Err(DomainError::validation("Dias must be a positive number"));
    }
    let cutoff = Utc::now() - Duration::days(dias);
    repository::find_since(cutoff).await.map_err(DomainError::from)
}

/// Entries within `[desde, hasta]`, both endpoints inclusive (whole days)
pub async fn find_by_rango(
    desde: NaiveDate,
    hasta: NaiveDate,
) -> DomainResult<Vec<HistorialContrato>> {
    if desde > hasta {
        return Err(DomainError::validation(
            "Desde must not be after hasta",
        ));
    }
    let inicio: DateTime<Utc> = desde.and_time(chrono::NaiveTime::MIN).and_utc();
    let fin: DateTime<Utc> = (hasta + Duration::days(1))
        .and_time(chrono::NaiveTime::MIN)
        .and_utc();
    repository::find_between(inicio, fin)
        .await
        .map_err(DomainError::from)
}

pub async fn ultima_accion(contrato_id: Uuid) -> DomainResult<HistorialContrato> {
    repository::find_last(&contrato_id.to_string())
        .await?
        .ok_or_else(|| DomainError::not_found("No ledger entries for this contract"))
}

/// Per-contract activity summary: counts per action type plus first/last
/// timestamps.
pub async fn resumen_actividad(contrato_id: Uuid) -> DomainResult<ResumenActividad> {
    contrato_repo::get_by_id(contrato_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Contrato not found"))?;

    let entradas = repository::find_by_contrato(&contrato_id.to_string(), true).await?;

    let mut por_accion: BTreeMap<String, usize> = BTreeMap::new();
    for entrada in &entradas {
        *por_accion.entry(entrada.accion.as_str().to_string()).or_insert(0) += 1;
    }

    Ok(ResumenActividad {
        contrato_id: contrato_id.to_string(),
        total_acciones: entradas.len(),
        por_accion,
        primera_accion: entradas.first().map(|e| e.fecha_accion),
        ultima_accion: entradas.last().map(|e| e.fecha_accion),
    })
}

/// Global ledger statistics
pub async fn estadisticas() -> DomainResult<EstadisticasHistorial> {
    let entradas = repository::list_all().await?;

    let mut por_accion: BTreeMap<String, usize> = BTreeMap::new();
    let mut contratos: HashSet<&str> = HashSet::new();
    for entrada in &entradas {
        *por_accion.entry(entrada.accion.as_str().to_string()).or_insert(0) += 1;
        contratos.insert(entrada.contrato_id.as_str());
    }

    Ok(EstadisticasHistorial {
        total_acciones: entradas.len(),
        contratos_con_actividad: contratos.len(),
        por_accion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accion_round_trip() {
        for accion in TipoAccionHistorial::all() {
            let parsed: TipoAccionHistorial = accion.as_str().parse().unwrap();
            assert_eq!(parsed, *accion);
        }
        assert!("PROMOCION".parse::<TipoAccionHistorial>().is_err());
    }

    #[test]
    fn test_rango_limits_cover_whole_days() {
        let desde: NaiveDate = "2024-03-01".parse().unwrap();
        let hasta: NaiveDate = "2024-03-31".parse().unwrap();
        let inicio = desde.and_time(chrono::NaiveTime::MIN).and_utc();
        let fin = (hasta + Duration::days(1))
            .and_time(chrono::NaiveTime::MIN)
            .and_utc();
        assert_eq!(inicio.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert_eq!(fin.to_rfc3339(), "2024-04-01T00:00:00+00:00");
    }
}
