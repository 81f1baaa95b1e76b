use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Contract state
// ============================================================================
/// Persisted lifecycle state of a contract.
///
/// ACTIVO is the only non-terminal state: a superseded or expired contract is
/// never reactivated in place, a new contract is created instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoContrato {
    Activo,
    Vencido,
    Renovado,
}

impl EstadoContrato {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoContrato::Activo => "ACTIVO",
            EstadoContrato::Vencido => "VENCIDO",
            EstadoContrato::Renovado => "RENOVADO",
        }
    }
}

impl std::fmt::Display for EstadoContrato {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EstadoContrato {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVO" => Ok(EstadoContrato::Activo),
            "VENCIDO" => Ok(EstadoContrato::Vencido),
            "RENOVADO" => Ok(EstadoContrato::Renovado),
            other => Err(format!("Unknown contract state: {}", other)),
        }
    }
}

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContratoId(pub Uuid);

impl ContratoId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ContratoId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ContratoId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contrato {
    #[serde(flatten)]
    pub base: BaseAggregate<ContratoId>,

    /// Owning worker (referenced, never owned)
    #[serde(rename = "trabajadorId")]
    pub trabajador_id: String,
    #[serde(rename = "tipoContratoId")]
    pub tipo_contrato_id: String,

    /// Always mirrors the worker's salary at creation time
    pub remuneracion: f64,
    #[serde(rename = "fechaInicio")]
    pub fecha_inicio: NaiveDate,
    #[serde(rename = "fechaFin")]
    pub fecha_fin: NaiveDate,

    pub estado: EstadoContrato,
    /// Renewal flag: set when the contract was renewed or superseded
    pub renovado: bool,
    #[serde(rename = "fechaRenovacion")]
    pub fecha_renovacion: Option<NaiveDate>,
    #[serde(rename = "motivoTerminacion")]
    pub motivo_terminacion: Option<String>,
    #[serde(rename = "documentoUrl")]
    pub documento_url: Option<String>,
}

impl Contrato {
    pub fn new_for_insert(
        trabajador_id: String,
        tipo_contrato_id: String,
        remuneracion: f64,
        fecha_inicio: NaiveDate,
        fecha_fin: NaiveDate,
        documento_url: Option<String>,
    ) -> Self {
        let id = ContratoId::new_v4();
        let code = format!("CTR-{}", &id.as_string()[..8]);
        let description = format!("Contrato {} desde {}", code, fecha_inicio);
        let base = BaseAggregate::new(id, code, description);

        Self {
            base,
            trabajador_id,
            tipo_contrato_id,
            remuneracion,
            fecha_inicio,
            fecha_fin,
            estado: EstadoContrato::Activo,
            renovado: false,
            fecha_renovacion: None,
            motivo_terminacion: None,
            documento_url,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn is_activo(&self) -> bool {
        self.estado == EstadoContrato::Activo
    }

    /// Mark this contract as superseded by a newer one
    pub fn marcar_renovado(&mut self, fecha: NaiveDate, motivo: impl Into<String>) {
        self.estado = EstadoContrato::Renovado;
        self.renovado = true;
        self.fecha_renovacion = Some(fecha);
        self.motivo_terminacion = Some(motivo.into());
        self.base.touch();
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.remuneracion.is_finite() || self.remuneracion <= 0.0 {
            return Err("Remuneracion must be a positive number".into());
        }
        if self.fecha_inicio > self.fecha_fin {
            return Err("Fecha inicio must not be after fecha fin".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Contrato {
    type Id = ContratoId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "contrato"
    }

    fn element_name() -> &'static str {
        "Contrato"
    }

    fn list_name() -> &'static str {
        "Contratos"
    }
}

// ============================================================================
// DTOs
// ============================================================================
/// Input for contract creation. Remuneration is intentionally absent: the new
/// contract always mirrors the worker's current salary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrearContratoDto {
    #[serde(rename = "trabajadorId")]
    pub trabajador_id: String,
    #[serde(rename = "tipoContratoId")]
    pub tipo_contrato_id: String,
    #[serde(rename = "fechaInicio")]
    pub fecha_inicio: NaiveDate,
    #[serde(rename = "fechaFin")]
    pub fecha_fin: NaiveDate,
    #[serde(rename = "documentoUrl")]
    pub documento_url: Option<String>,
    pub usuario: Option<String>,
    #[serde(rename = "ipOrigen")]
    pub ip_origen: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenovarContratoDto {
    #[serde(rename = "nuevaFechaFin")]
    pub nueva_fecha_fin: NaiveDate,
    #[serde(rename = "nuevaRemuneracion")]
    pub nueva_remuneracion: Option<f64>,
    pub usuario: Option<String>,
    #[serde(rename = "ipOrigen")]
    pub ip_origen: Option<String>,
}
