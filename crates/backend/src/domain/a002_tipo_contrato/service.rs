use super::repository;
use contracts::domain::a002_tipo_contrato::aggregate::{TipoContrato, TipoContratoDto};
use contracts::domain::common::{DomainError, DomainResult};
use uuid::Uuid;

pub async fn create(dto: TipoContratoDto) -> DomainResult<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("TPC-{}", Uuid::new_v4()));
    let mut aggregate = TipoContrato::new_for_insert(code, dto.nombre.clone(), dto.comment.clone());

    aggregate.validate().map_err(DomainError::validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await.map_err(DomainError::from)
}

pub async fn update(dto: TipoContratoDto) -> DomainResult<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| DomainError::validation("Invalid tipo contrato ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Tipo de contrato not found"))?;

    aggregate.update(&dto);

    aggregate.validate().map_err(DomainError::validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await.map_err(DomainError::from)
}

pub async fn delete(id: Uuid) -> DomainResult<bool> {
    repository::soft_delete(id).await.map_err(DomainError::from)
}

pub async fn get_by_id(id: Uuid) -> DomainResult<TipoContrato> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Tipo de contrato not found"))
}

pub async fn list_all() -> DomainResult<Vec<TipoContrato>> {
    repository::list_all().await.map_err(DomainError::from)
}
