//! Application state - shared across all handlers.

use std::sync::Arc;

use news_core::ports::{ArticleRepository, UserRepository};
use news_core::services::{ArticleService, UserService};
use news_infra::{InMemoryArticleRepository, InMemoryUserRepository};

use crate::config::AppConfig;

/// Failures that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to connect to database: {0}")]
    Database(String),

    #[error("Failed to run migrations: {0}")]
    Migration(String),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub articles: ArticleService,
    /// Human-readable name of the backing store, reported by the health check.
    pub database: &'static str,
}

impl AppState {
    /// Build the state for `config`, connecting and seeding the store.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        #[cfg(feature = "postgres")]
        let (users, articles, database): (
            Arc<dyn UserRepository>,
            Arc<dyn ArticleRepository>,
            &'static str,
        ) = match &config.database {
            Some(db_config) => {
                use migration::MigratorTrait;
                use news_infra::{PostgresArticleRepository, PostgresUserRepository};

                let conn = news_infra::database::connect(db_config)
                    .await
                    .map_err(|e| StartupError::Database(e.to_string()))?;

                if config.run_migrations {
                    migration::Migrator::up(&conn, None)
                        .await
                        .map_err(|e| StartupError::Migration(e.to_string()))?;
                    tracing::info!("Migrations applied");
                }

                (
                    Arc::new(PostgresUserRepository::new(conn.clone())),
                    Arc::new(PostgresArticleRepository::new(conn)),
                    "PostgreSQL",
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                in_memory_stores()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (users, articles, database) = {
            if config.database.is_some() {
                tracing::warn!("DATABASE_URL ignored - built without postgres feature");
            }
            in_memory_stores()
        };

        let state = Self::from_stores(users, articles, database, config.comment_write_retries);
        state.seed().await;

        tracing::info!(database, "Application state initialized");
        Ok(state)
    }

    /// Seeded in-memory state.
    pub async fn in_memory(comment_write_retries: u32) -> Self {
        let (users, articles, database) = in_memory_stores();
        let state = Self::from_stores(users, articles, database, comment_write_retries);
        state.seed().await;
        state
    }

    fn from_stores(
        users: Arc<dyn UserRepository>,
        articles: Arc<dyn ArticleRepository>,
        database: &'static str,
        comment_write_retries: u32,
    ) -> Self {
        Self {
            users: UserService::new(users.clone()),
            articles: ArticleService::new(articles, users)
                .with_write_retries(comment_write_retries),
            database,
        }
    }

    // Seed failures are logged and startup continues.
    async fn seed(&self) {
        if let Err(e) = self.users.seed().await {
            tracing::error!(error = %e, "Error seeding users");
        }
    }
}

fn in_memory_stores() -> (
    Arc<dyn UserRepository>,
    Arc<dyn ArticleRepository>,
    &'static str,
) {
    (
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryArticleRepository::new()),
        "in-memory",
    )
}
