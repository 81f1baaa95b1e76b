use serde::{Deserialize, Serialize};

/// Outcome of re-syncing one worker's salary mirror
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalarioSync {
    #[serde(rename = "trabajadorId")]
    pub trabajador_id: String,
    #[serde(rename = "salarioAnterior")]
    pub salario_anterior: Option<f64>,
    #[serde(rename = "salarioNuevo")]
    pub salario_nuevo: Option<f64>,
    /// True when the mirror actually changed
    pub actualizado: bool,
}

/// Per-worker outcome inside a bulk sync run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SincronizacionDetalle {
    #[serde(rename = "trabajadorId")]
    pub trabajador_id: String,
    pub resultado: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregated result of a bulk salary sync; individual failures are recorded,
/// never thrown.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SincronizacionMasiva {
    pub procesados: usize,
    pub actualizados: usize,
    pub errores: usize,
    pub detalle: Vec<SincronizacionDetalle>,
}

/// Result of comparing the salary mirror against the active contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistenciaSalario {
    #[serde(rename = "trabajadorId")]
    pub trabajador_id: String,
    #[serde(rename = "esConsistente")]
    pub es_consistente: bool,
    #[serde(rename = "salarioTrabajador")]
    pub salario_trabajador: Option<f64>,
    #[serde(rename = "remuneracionContrato")]
    pub remuneracion_contrato: Option<f64>,
    pub detalle: String,
}
