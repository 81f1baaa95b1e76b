use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Action type
// ============================================================================
/// Closed set of state-changing actions recorded in the contract ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoAccionHistorial {
    Creacion,
    Modificacion,
    Renovacion,
    Suspension,
    Reactivacion,
    Terminacion,
    CambioSalario,
    CambioEstado,
    Vencimiento,
}

impl TipoAccionHistorial {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoAccionHistorial::Creacion => "CREACION",
            TipoAccionHistorial::Modificacion => "MODIFICACION",
            TipoAccionHistorial::Renovacion => "RENOVACION",
            TipoAccionHistorial::Suspension => "SUSPENSION",
            TipoAccionHistorial::Reactivacion => "REACTIVACION",
            TipoAccionHistorial::Terminacion => "TERMINACION",
            TipoAccionHistorial::CambioSalario => "CAMBIO_SALARIO",
            TipoAccionHistorial::CambioEstado => "CAMBIO_ESTADO",
            TipoAccionHistorial::Vencimiento => "VENCIMIENTO",
        }
    }

    pub fn all() -> &'static [TipoAccionHistorial] {
        &[
            TipoAccionHistorial::Creacion,
            TipoAccionHistorial::Modificacion,
            TipoAccionHistorial::Renovacion,
            TipoAccionHistorial::Suspension,
            TipoAccionHistorial::Reactivacion,
            TipoAccionHistorial::Terminacion,
            TipoAccionHistorial::CambioSalario,
            TipoAccionHistorial::CambioEstado,
            TipoAccionHistorial::Vencimiento,
        ]
    }
}

impl std::fmt::Display for TipoAccionHistorial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TipoAccionHistorial {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREACION" => Ok(TipoAccionHistorial::Creacion),
            "MODIFICACION" => Ok(TipoAccionHistorial::Modificacion),
            "RENOVACION" => Ok(TipoAccionHistorial::Renovacion),
            "SUSPENSION" => Ok(TipoAccionHistorial::Suspension),
            "REACTIVACION" => Ok(TipoAccionHistorial::Reactivacion),
            "TERMINACION" => Ok(TipoAccionHistorial::Terminacion),
            "CAMBIO_SALARIO" => Ok(TipoAccionHistorial::CambioSalario),
            "CAMBIO_ESTADO" => Ok(TipoAccionHistorial::CambioEstado),
            "VENCIMIENTO" => Ok(TipoAccionHistorial::Vencimiento),
            other => Err(format!("Unknown action type: {}", other)),
        }
    }
}

// ============================================================================
// Ledger entry
// ============================================================================
/// Immutable audit record of one state-changing action on a contract.
///
/// The owning contract may change state later; the snapshot fields here never
/// do. Entries are appended by the lifecycle service or through the explicit
/// record endpoint and are never updated or deleted in normal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorialContrato {
    pub id: i64,
    #[serde(rename = "contratoId")]
    pub contrato_id: String,
    pub accion: TipoAccionHistorial,
    pub descripcion: String,
    /// Free-form JSON snapshot of the record before the action
    #[serde(rename = "estadoAnterior")]
    pub estado_anterior: Option<serde_json::Value>,
    /// Free-form JSON snapshot of the record after the action
    #[serde(rename = "estadoNuevo")]
    pub estado_nuevo: Option<serde_json::Value>,
    pub usuario: Option<String>,
    #[serde(rename = "ipOrigen")]
    pub ip_origen: Option<String>,
    pub observaciones: Option<String>,
    /// Server time at write
    #[serde(rename = "fechaAccion")]
    pub fecha_accion: DateTime<Utc>,
}

// ============================================================================
// DTOs
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrarAccionDto {
    #[serde(rename = "contratoId")]
    pub contrato_id: String,
    pub accion: TipoAccionHistorial,
    pub descripcion: String,
    #[serde(rename = "estadoAnterior")]
    pub estado_anterior: Option<serde_json::Value>,
    #[serde(rename = "estadoNuevo")]
    pub estado_nuevo: Option<serde_json::Value>,
    pub usuario: Option<String>,
    #[serde(rename = "ipOrigen")]
    pub ip_origen: Option<String>,
    pub observaciones: Option<String>,
}

/// Per-contract activity summary over the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumenActividad {
    #[serde(rename = "contratoId")]
    pub contrato_id: String,
    #[serde(rename = "totalAcciones")]
    pub total_acciones: usize,
    /// Count per action type, keyed by the wire name (e.g. "CREACION")
    #[serde(rename = "porAccion")]
    pub por_accion: std::collections::BTreeMap<String, usize>,
    #[serde(rename = "primeraAccion")]
    pub primera_accion: Option<DateTime<Utc>>,
    #[serde(rename = "ultimaAccion")]
    pub ultima_accion: Option<DateTime<Utc>>,
}

/// Global ledger statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstadisticasHistorial {
    #[serde(rename = "totalAcciones")]
    pub total_acciones: usize,
    #[serde(rename = "contratosConActividad")]
    pub contratos_con_actividad: usize,
    #[serde(rename = "porAccion")]
    pub por_accion: std::collections::BTreeMap<String, usize>,
}
