use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::Page;
pub use repositories::engagement::{ReviewRow, ReviewStats};
pub use repositories::people::Person;
pub use repositories::season::EpisodeFields;
pub use repositories::series::{FilterThresholds, SeriesFields, SeriesLinks};
pub use repositories::user::{NewUser, User, UserChanges};
pub use repositories::wallet::{CreditOutcome, DebitOutcome};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn users(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn wallets(&self) -> repositories::wallet::WalletRepository {
        repositories::wallet::WalletRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn lookups(&self) -> repositories::lookup::LookupRepository {
        repositories::lookup::LookupRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn people(&self) -> repositories::people::PeopleRepository {
        repositories::people::PeopleRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn series(&self) -> repositories::series::SeriesRepository {
        repositories::series::SeriesRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn seasons(&self) -> repositories::season::SeasonRepository {
        repositories::season::SeasonRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn engagement(&self) -> repositories::engagement::EngagementRepository {
        repositories::engagement::EngagementRepository::new(self.conn.clone())
    }
}

/// True when the error chain ends in a UNIQUE constraint failure.
#[must_use]
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DbErr>()
        .and_then(DbErr::sql_err)
        .is_some_and(|e| matches!(e, SqlErr::UniqueConstraintViolation(_)))
}
