//! Repository layer for database operations

pub mod assets;
pub mod projects;
pub mod repair_tickets;
pub mod usage_logs;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub assets: assets::AssetsRepository,
    pub usage_logs: usage_logs::UsageLogsRepository,
    pub repair_tickets: repair_tickets::RepairTicketsRepository,
    pub projects: projects::ProjectsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            assets: assets::AssetsRepository::new(pool.clone()),
            usage_logs: usage_logs::UsageLogsRepository::new(pool.clone()),
            repair_tickets: repair_tickets::RepairTicketsRepository::new(pool.clone()),
            projects: projects::ProjectsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Open a transaction for a multi-write unit of work. A primary record
    /// write and its corrective asset-status write always share one of
    /// these: either both commit or neither does.
    pub async fn begin(&self) -> crate::error::AppResult<sqlx::Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }
}
