use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Composite uniqueness the entity derive cannot express, plus sort indexes
/// used by the home sections.
const UP: &[&str] = &[
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_seasons_series_number ON seasons(series_id, season_number)",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_episodes_season_number ON episodes(season_id, episode_number)",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_reviews_user_series ON reviews(user_id, series_id)",
    "CREATE INDEX IF NOT EXISTS idx_drama_series_view_count ON drama_series(view_count)",
    "CREATE INDEX IF NOT EXISTS idx_drama_series_created_at ON drama_series(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_progress_user_updated ON episode_watch_progress(user_id, updated_at)",
];

const DOWN: &[&str] = &[
    "DROP INDEX IF EXISTS idx_progress_user_updated",
    "DROP INDEX IF EXISTS idx_drama_series_created_at",
    "DROP INDEX IF EXISTS idx_drama_series_view_count",
    "DROP INDEX IF EXISTS idx_reviews_user_series",
    "DROP INDEX IF EXISTS idx_episodes_season_number",
    "DROP INDEX IF EXISTS idx_seasons_series_number",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for sql in UP {
            conn.execute_unprepared(sql).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for sql in DOWN {
            conn.execute_unprepared(sql).await?;
        }

        Ok(())
    }
}
