use sea_orm::entity::prelude::*;

/// Storage row of the `product` table.
///
/// Integer columns are signed in PostgreSQL; the domain's unsigned values are
/// range-checked when crossing this boundary (see `conversions`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_id: Option<String>,
    pub price: i64,
    pub currency_id: i32,
    pub rating: i32,
    pub category_id: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub specification: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
