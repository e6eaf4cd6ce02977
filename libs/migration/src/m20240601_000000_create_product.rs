use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(text(Product::Id).primary_key())
                    .col(text(Product::Name))
                    .col(text(Product::Description))
                    .col(text_null(Product::ImageId))
                    .col(big_integer(Product::Price))
                    .col(integer(Product::CurrencyId))
                    .col(integer(Product::Rating))
                    .col(integer(Product::CategoryId))
                    .col(json_binary(Product::Specification).default(Expr::cust("'{}'::jsonb")))
                    .col(timestamp_with_time_zone(Product::CreatedAt))
                    .col(timestamp_with_time_zone_null(Product::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_category_id")
                    .table(Product::Table)
                    .col(Product::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Product {
    Table,
    Id,
    Name,
    Description,
    ImageId,
    Price,
    CurrencyId,
    Rating,
    CategoryId,
    Specification,
    CreatedAt,
    UpdatedAt,
}
