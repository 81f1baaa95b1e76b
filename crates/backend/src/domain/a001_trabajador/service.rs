use super::repository;
use contracts::domain::a001_trabajador::aggregate::{Trabajador, TrabajadorDto};
use contracts::domain::common::{DomainError, DomainResult};
use uuid::Uuid;

pub async fn create(dto: TrabajadorDto) -> DomainResult<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("TRB-{}", Uuid::new_v4()));
    let mut aggregate = Trabajador::new_for_insert(
        code,
        dto.nombres.clone(),
        dto.apellidos.clone(),
        dto.documento.clone(),
        dto.cargo.clone(),
        dto.telefono.clone(),
        dto.email.clone(),
        dto.comment.clone(),
    );
    // Hiring rate entered with the worker record; the lifecycle service
    // mirrors it onto the contract at creation time.
    aggregate.salario_actual = dto.salario_actual;

    aggregate.validate().map_err(DomainError::validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await.map_err(DomainError::from)
}

pub async fn update(dto: TrabajadorDto) -> DomainResult<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| DomainError::validation("Invalid trabajador ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Trabajador not found"))?;

    aggregate.update(&dto);

    aggregate.validate().map_err(DomainError::validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await.map_err(DomainError::from)
}

pub async fn delete(id: Uuid) -> DomainResult<bool> {
    repository::soft_delete(id).await.map_err(DomainError::from)
}

pub async fn get_by_id(id: Uuid) -> DomainResult<Trabajador> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Trabajador not found"))
}

pub async fn list_all() -> DomainResult<Vec<Trabajador>> {
    repository::list_all().await.map_err(DomainError::from)
}
