use chrono::{DateTime, Utc};
use contracts::domain::a004_historial_contrato::aggregate::{
    HistorialContrato, TipoAccionHistorial,
};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a004_historial_contrato")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub contrato_id: String,
    pub accion: String,
    pub descripcion: String,
    pub estado_anterior: Option<Json>,
    pub estado_nuevo: Option<Json>,
    pub usuario: Option<String>,
    pub ip_origen: Option<String>,
    pub observaciones: Option<String>,
    pub fecha_accion: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for HistorialContrato {
    fn from(m: Model) -> Self {
        let accion = m
            .accion
            .parse()
            .unwrap_or(TipoAccionHistorial::Modificacion);
        HistorialContrato {
            id: m.id,
            contrato_id: m.contrato_id,
            accion,
            descripcion: m.descripcion,
            estado_anterior: m.estado_anterior,
            estado_nuevo: m.estado_nuevo,
            usuario: m.usuario,
            ip_origen: m.ip_origen,
            observaciones: m.observaciones,
            fecha_accion: m.fecha_accion,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Ledger row about to be appended; `fecha_accion` is stamped at insert time.
#[derive(Debug, Clone)]
pub struct NuevaAccion {
    pub contrato_id: String,
    pub accion: TipoAccionHistorial,
    pub descripcion: String,
    pub estado_anterior: Option<serde_json::Value>,
    pub estado_nuevo: Option<serde_json::Value>,
    pub usuario: Option<String>,
    pub ip_origen: Option<String>,
    pub observaciones: Option<String>,
}

/// Append one entry. The ledger is append-only: no update or delete
/// functions exist on purpose.
pub async fn insert_txn<C: ConnectionTrait>(
    db: &C,
    accion: NuevaAccion,
) -> anyhow::Result<HistorialContrato> {
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        contrato_id: Set(accion.contrato_id),
        accion: Set(accion.accion.as_str().to_string()),
        descripcion: Set(accion.descripcion),
        estado_anterior: Set(accion.estado_anterior),
        estado_nuevo: Set(accion.estado_nuevo),
        usuario: Set(accion.usuario),
        ip_origen: Set(accion.ip_origen),
        observaciones: Set(accion.observaciones),
        fecha_accion: Set(Utc::now()),
    };
    let model = active.insert(db).await?;
    Ok(model.into())
}

pub async fn insert(accion: NuevaAccion) -> anyhow::Result<HistorialContrato> {
    insert_txn(conn(), accion).await
}

/// Entries for one contract. Insertion order (the autoincrement id) is the
/// chronological order, so ordering uses the id column.
pub async fn find_by_contrato(
    contrato_id: &str,
    oldest_first: bool,
) -> anyhow::Result<Vec<HistorialContrato>> {
    let mut query = Entity::find().filter(Column::ContratoId.eq(contrato_id));
    query = if oldest_first {
        query.order_by_asc(Column::Id)
    } else {
        query.order_by_desc(Column::Id)
    };
    let items = query
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn find_by_contrato_ids(
    contrato_ids: Vec<String>,
) -> anyhow::Result<Vec<HistorialContrato>> {
    if contrato_ids.is_empty() {
        return Ok(Vec::new());
    }
    let items = Entity::find()
        .filter(Column::ContratoId.is_in(contrato_ids))
        .order_by_desc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn find_by_accion(accion: TipoAccionHistorial) -> anyhow::Result<Vec<HistorialContrato>> {
    let items = Entity::find()
        .filter(Column::Accion.eq(accion.as_str()))
        .order_by_desc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn find_since(cutoff: DateTime<Utc>) -> anyhow::Result<Vec<HistorialContrato>> {
    let items = Entity::find()
        .filter(Column::FechaAccion.gte(cutoff))
        .order_by_desc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn find_between(
    desde: DateTime<Utc>,
    hasta: DateTime<Utc>,
) -> anyhow::Result<Vec<HistorialContrato>> {
    let items = Entity::find()
        .filter(Column::FechaAccion.gte(desde))
        .filter(Column::FechaAccion.lt(hasta))
        .order_by_desc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn find_last(contrato_id: &str) -> anyhow::Result<Option<HistorialContrato>> {
    let item = Entity::find()
        .filter(Column::ContratoId.eq(contrato_id))
        .order_by_desc(Column::Id)
        .one(conn())
        .await?;
    Ok(item.map(Into::into))
}

pub async fn list_all() -> anyhow::Result<Vec<HistorialContrato>> {
    let items = Entity::find()
        .order_by_desc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}
