//! User entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(nullable)]
    pub hobby: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub profile_picture: Option<String>,
    #[sea_orm(column_name = "Music", nullable)]
    pub music: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<postdesk_core::domain::ProfileField> for Column {
    fn from(field: postdesk_core::domain::ProfileField) -> Self {
        use postdesk_core::domain::ProfileField;

        match field {
            ProfileField::Hobby => Column::Hobby,
            ProfileField::Description => Column::Description,
            ProfileField::ProfilePicture => Column::ProfilePicture,
        }
    }
}
