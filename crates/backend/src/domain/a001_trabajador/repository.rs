use chrono::Utc;
use contracts::domain::a001_trabajador::aggregate::{Trabajador, TrabajadorId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_trabajador")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub nombres: String,
    pub apellidos: String,
    pub documento: String,
    pub cargo: String,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub salario_actual: Option<f64>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Trabajador {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Trabajador {
            base: BaseAggregate::with_metadata(
                TrabajadorId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            nombres: m.nombres,
            apellidos: m.apellidos,
            documento: m.documento,
            cargo: m.cargo,
            telefono: m.telefono,
            email: m.email,
            salario_actual: m.salario_actual,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Trabajador) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        nombres: Set(aggregate.nombres.clone()),
        apellidos: Set(aggregate.apellidos.clone()),
        documento: Set(aggregate.documento.clone()),
        cargo: Set(aggregate.cargo.clone()),
        telefono: Set(aggregate.telefono.clone()),
        email: Set(aggregate.email.clone()),
        salario_actual: Set(aggregate.salario_actual),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Trabajador>> {
    let mut items: Vec<Trabajador> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    // Sort by apellidos, then nombres (case-insensitive)
    items.sort_by(|a, b| {
        (a.apellidos.to_lowercase(), a.nombres.to_lowercase())
            .cmp(&(b.apellidos.to_lowercase(), b.nombres.to_lowercase()))
    });
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Trabajador>> {
    get_by_id_txn(conn(), id).await
}

pub async fn get_by_id_txn<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<Option<Trabajador>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Trabajador) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Trabajador) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

/// Single writer path for the salary mirror. Only the contract lifecycle
/// service calls this.
pub async fn set_salario_actual_txn<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    salario: Option<f64>,
) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::SalarioActual, Expr::value(salario))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
