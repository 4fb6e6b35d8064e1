//! LabWatch Lab Equipment Tracking System
//!
//! A Rust implementation of the LabWatch equipment tracking server,
//! providing a REST JSON API for managing lab assets, usage logs,
//! repair tickets and the scheduling timeline.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod scheduling;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
