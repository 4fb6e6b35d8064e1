//! Projects and test profiles repository

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::project::{
        CreateProject, CreateTestProfile, NewProjectConfig, Project, ProjectConfig,
        TestProfile, UpdateProject, UpdateTestProfile,
    },
};

#[derive(Clone)]
pub struct ProjectsRepository {
    pool: Pool<Postgres>,
}

/// Assign server-side IDs to incoming configs, keeping IDs that already exist
fn materialize_configs(configs: &[NewProjectConfig]) -> Vec<ProjectConfig> {
    configs
        .iter()
        .map(|c| ProjectConfig {
            id: c.id.unwrap_or_else(Uuid::new_v4),
            name: c.name.clone(),
            remark: c.remark.clone(),
        })
        .collect()
}

impl ProjectsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // ---- Projects ----

    /// List all projects, newest first
    pub async fn list(&self) -> AppResult<Vec<Project>> {
        let projects =
            sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(projects)
    }

    /// Get project by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Project> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    /// Create a project
    pub async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        let configs = materialize_configs(data.configs.as_deref().unwrap_or_default());

        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (id, name, description, customer_name, configs, waterfalls, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.customer_name)
        .bind(Json(configs))
        .bind(&data.waterfalls)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(project)
    }

    /// Update a project
    pub async fn update(&self, id: Uuid, data: &UpdateProject) -> AppResult<Project> {
        let current = self.get_by_id(id).await?;

        let configs = match &data.configs {
            Some(incoming) => Json(materialize_configs(incoming)),
            None => current.configs,
        };

        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET
                name = $2, description = $3, customer_name = $4,
                configs = $5, waterfalls = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.name.as_ref().unwrap_or(&current.name))
        .bind(data.description.as_ref().or(current.description.as_ref()))
        .bind(data.customer_name.as_ref().or(current.customer_name.as_ref()))
        .bind(configs)
        .bind(data.waterfalls.as_ref().or(current.waterfalls.as_ref()))
        .fetch_one(&self.pool)
        .await?;
        Ok(project)
    }

    /// Delete a project
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Project {} not found", id)));
        }
        Ok(())
    }

    // ---- Test profiles ----

    /// List all test profiles, newest first
    pub async fn list_profiles(&self) -> AppResult<Vec<TestProfile>> {
        let profiles = sqlx::query_as::<_, TestProfile>(
            "SELECT * FROM test_profiles ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }

    /// Get test profile by ID
    pub async fn get_profile(&self, id: Uuid) -> AppResult<TestProfile> {
        sqlx::query_as::<_, TestProfile>("SELECT * FROM test_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test profile {} not found", id)))
    }

    /// Create a test profile
    pub async fn create_profile(&self, data: &CreateTestProfile) -> AppResult<TestProfile> {
        let profile = sqlx::query_as::<_, TestProfile>(
            r#"
            INSERT INTO test_profiles (id, name, temperature, humidity, duration_hours, project_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(data.temperature)
        .bind(data.humidity)
        .bind(data.duration_hours)
        .bind(data.project_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    /// Update a test profile
    pub async fn update_profile(
        &self,
        id: Uuid,
        data: &UpdateTestProfile,
    ) -> AppResult<TestProfile> {
        let current = self.get_profile(id).await?;

        let profile = sqlx::query_as::<_, TestProfile>(
            r#"
            UPDATE test_profiles SET
                name = $2, temperature = $3, humidity = $4,
                duration_hours = $5, project_id = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.name.as_ref().unwrap_or(&current.name))
        .bind(data.temperature.unwrap_or(current.temperature))
        .bind(data.humidity.unwrap_or(current.humidity))
        .bind(data.duration_hours.unwrap_or(current.duration_hours))
        .bind(data.project_id.or(current.project_id))
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    /// Delete a test profile
    pub async fn delete_profile(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM test_profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Test profile {} not found", id)));
        }
        Ok(())
    }
}
