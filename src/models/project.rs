//! Project and test profile models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A named sub-resource configuration within a project. Usage logs select
/// config IDs to fan one reservation into several timeline bars.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectConfig {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// Project from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub customer_name: Option<String>,
    #[schema(value_type = Vec<ProjectConfig>)]
    pub configs: Json<Vec<ProjectConfig>>,
    /// Waterfall identifiers selectable on usage logs
    pub waterfalls: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// Create project request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub customer_name: Option<String>,
    /// Config names; IDs are assigned server-side
    pub configs: Option<Vec<NewProjectConfig>>,
    pub waterfalls: Option<Vec<String>>,
}

/// Config payload inside a project create/update
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewProjectConfig {
    /// Present when editing an existing config, absent for a new one
    pub id: Option<Uuid>,
    pub name: String,
    pub remark: Option<String>,
}

/// Update project request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub customer_name: Option<String>,
    pub configs: Option<Vec<NewProjectConfig>>,
    pub waterfalls: Option<Vec<String>>,
}

/// Test profile (temperature/humidity/duration recipe) from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TestProfile {
    pub id: Uuid,
    pub name: String,
    /// Setpoint in degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    pub duration_hours: f64,
    pub project_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Create test profile request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTestProfile {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub temperature: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,
    #[validate(range(min = 0.0))]
    pub duration_hours: f64,
    pub project_id: Option<Uuid>,
}

/// Update test profile request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTestProfile {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub temperature: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: Option<f64>,
    #[validate(range(min = 0.0))]
    pub duration_hours: Option<f64>,
    pub project_id: Option<Uuid>,
}
