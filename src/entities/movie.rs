use sea_orm::entity::prelude::*;

/// A row of the `movie` table.
///
/// The database also maintains a full-text search vector over `title` and
/// `extract`. It is not mapped, so the application never reads or writes it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub genre: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub extract: String,
    pub thumbnail: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
