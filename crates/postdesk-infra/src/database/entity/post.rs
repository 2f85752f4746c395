//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "_id")]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub username: String,
    pub timestamp: DateTimeWithTimeZone,
    #[sea_orm(nullable)]
    pub categories: Option<String>,
    #[sea_orm(default_value = 0)]
    pub views_count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post_view::Entity")]
    Views,
}

impl Related<super::post_view::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Views.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for postdesk_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            message: model.message,
            username: model.username,
            timestamp: model.timestamp.into(),
            categories: model.categories,
            views_count: model.views_count,
        }
    }
}
