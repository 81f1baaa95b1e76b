use chrono::Utc;
use contracts::domain::a003_contrato::aggregate::{Contrato, ContratoId, EstadoContrato};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_contrato")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub trabajador_id: String,
    pub tipo_contrato_id: String,
    pub remuneracion: f64,
    pub fecha_inicio: chrono::NaiveDate,
    pub fecha_fin: chrono::NaiveDate,
    pub estado: String,
    pub renovado: bool,
    pub fecha_renovacion: Option<chrono::NaiveDate>,
    pub motivo_terminacion: Option<String>,
    pub documento_url: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Contrato {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let estado = m.estado.parse().unwrap_or(EstadoContrato::Activo);

        Contrato {
            base: BaseAggregate::with_metadata(
                ContratoId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            trabajador_id: m.trabajador_id,
            tipo_contrato_id: m.tipo_contrato_id,
            remuneracion: m.remuneracion,
            fecha_inicio: m.fecha_inicio,
            fecha_fin: m.fecha_fin,
            estado,
            renovado: m.renovado,
            fecha_renovacion: m.fecha_renovacion,
            motivo_terminacion: m.motivo_terminacion,
            documento_url: m.documento_url,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Contrato) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        trabajador_id: Set(aggregate.trabajador_id.clone()),
        tipo_contrato_id: Set(aggregate.tipo_contrato_id.clone()),
        remuneracion: Set(aggregate.remuneracion),
        fecha_inicio: Set(aggregate.fecha_inicio),
        fecha_fin: Set(aggregate.fecha_fin),
        estado: Set(aggregate.estado.as_str().to_string()),
        renovado: Set(aggregate.renovado),
        fecha_renovacion: Set(aggregate.fecha_renovacion),
        motivo_terminacion: Set(aggregate.motivo_terminacion.clone()),
        documento_url: Set(aggregate.documento_url.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Contrato>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::FechaInicio)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Contrato>> {
    get_by_id_txn(conn(), id).await
}

pub async fn get_by_id_txn<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<Option<Contrato>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn find_by_trabajador(trabajador_id: &str) -> anyhow::Result<Vec<Contrato>> {
    let items = Entity::find()
        .filter(Column::TrabajadorId.eq(trabajador_id))
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::FechaInicio)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn find_activo_by_trabajador(trabajador_id: &str) -> anyhow::Result<Option<Contrato>> {
    find_activo_by_trabajador_txn(conn(), trabajador_id).await
}

/// Newest start date first: if more than one ACTIVO row somehow exists the
/// most recent contract wins.
pub async fn find_activo_by_trabajador_txn<C: ConnectionTrait>(
    db: &C,
    trabajador_id: &str,
) -> anyhow::Result<Option<Contrato>> {
    let result = Entity::find()
        .filter(Column::TrabajadorId.eq(trabajador_id))
        .filter(Column::Estado.eq(EstadoContrato::Activo.as_str()))
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::FechaInicio)
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert_txn<C: ConnectionTrait>(db: &C, aggregate: &Contrato) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(db).await?;
    Ok(uuid)
}

pub async fn update_txn<C: ConnectionTrait>(db: &C, aggregate: &Contrato) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
    Ok(())
}

pub async fn update(aggregate: &Contrato) -> anyhow::Result<()> {
    update_txn(conn(), aggregate).await
}
