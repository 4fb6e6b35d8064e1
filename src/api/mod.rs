//! API handlers for LabWatch REST endpoints

pub mod assets;
pub mod health;
pub mod openapi;
pub mod projects;
pub mod repairs;
pub mod settings;
pub mod stats;
pub mod timeline;
pub mod usage_logs;

use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run derive-based validation on a request body, surfacing failures as a
/// 400 with the field errors spelled out
pub(crate) fn validate_body<T: Validate>(body: &T) -> AppResult<()> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}
