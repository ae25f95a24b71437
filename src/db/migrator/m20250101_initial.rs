use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create_table<E: EntityTrait>(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before children so foreign keys resolve.
        create_table(manager, &schema, Users).await?;
        create_table(manager, &schema, Wallets).await?;
        create_table(manager, &schema, Categories).await?;
        create_table(manager, &schema, Tags).await?;
        create_table(manager, &schema, Languages).await?;
        create_table(manager, &schema, ContentRatings).await?;
        create_table(manager, &schema, Actors).await?;
        create_table(manager, &schema, Directors).await?;
        create_table(manager, &schema, DramaSeries).await?;
        create_table(manager, &schema, DramaSeriesTags).await?;
        create_table(manager, &schema, DramaSeriesLanguages).await?;
        create_table(manager, &schema, DramaSeriesCast).await?;
        create_table(manager, &schema, DramaSeriesCategories).await?;
        create_table(manager, &schema, Seasons).await?;
        create_table(manager, &schema, Episodes).await?;
        create_table(manager, &schema, Reviews).await?;
        create_table(manager, &schema, Likes).await?;
        create_table(manager, &schema, EpisodeWatchProgress).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EpisodeWatchProgress).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Likes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Episodes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seasons).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DramaSeriesCategories).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DramaSeriesCast).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DramaSeriesLanguages).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DramaSeriesTags).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DramaSeries).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Directors).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Actors).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContentRatings).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Languages).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Wallets).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;

        Ok(())
    }
}
