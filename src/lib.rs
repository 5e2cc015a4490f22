//! Medical equipment utilization tracking server
//!
//! Tracks where wound care and bariatric equipment is deployed across hospital
//! floors, what it costs per day, and reports active and historical spend over
//! a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
