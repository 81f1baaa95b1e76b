use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrabajadorId(pub Uuid);

impl TrabajadorId {
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

impl AggregateId for TrabajadorId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(TrabajadorId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trabajador {
    #[serde(flatten)]
    pub base: BaseAggregate<TrabajadorId>,

    pub nombres: String,
    pub apellidos: String,
    /// National identity document number
    pub documento: String,
    /// Job title within the building staff
    pub cargo: String,
    pub telefono: Option<String>,
    pub email: Option<String>,

    /// Salary mirror: always equals the remuneration of the worker's unique
    /// ACTIVO contract, or None when no active contract exists. Written only
    /// by the contract lifecycle service's sync step.
    #[serde(rename = "salarioActual")]
    pub salario_actual: Option<f64>,
}

impl Trabajador {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        nombres: String,
        apellidos: String,
        documento: String,
        cargo: String,
        telefono: Option<String>,
        email: Option<String>,
        comment: Option<String>,
    ) -> Self {
        let description = format!("{} {}", nombres, apellidos);
        let mut base = BaseAggregate::new(TrabajadorId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            nombres,
            apellidos,
            documento,
            cargo,
            telefono,
            email,
            salario_actual: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &TrabajadorDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.nombres = dto.nombres.clone();
        self.apellidos = dto.apellidos.clone();
        self.base.description = format!("{} {}", self.nombres, self.apellidos);
        self.documento = dto.documento.clone();
        self.cargo = dto.cargo.clone();
        self.telefono = dto.telefono.clone();
        self.email = dto.email.clone();
        self.base.comment = dto.comment.clone();
        if let Some(salario) = dto.salario_actual {
            self.salario_actual = Some(salario);
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.nombres.trim().is_empty() {
            return Err("Nombres cannot be empty".into());
        }
        if self.apellidos.trim().is_empty() {
            return Err("Apellidos cannot be empty".into());
        }
        if self.documento.trim().is_empty() {
            return Err("Documento cannot be empty".into());
        }
        if let Some(salario) = self.salario_actual {
            if !salario.is_finite() || salario <= 0.0 {
                return Err("Salario actual must be a positive number".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Trabajador {
    type Id = TrabajadorId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "trabajador"
    }

    fn element_name() -> &'static str {
        "Trabajador"
    }

    fn list_name() -> &'static str {
        "Trabajadores"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrabajadorDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub nombres: String,
    pub apellidos: String,
    pub documento: String,
    pub cargo: String,
    pub telefono: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "salarioActual")]
    pub salario_actual: Option<f64>,
    pub comment: Option<String>,
}
