//! Shared utilities.

mod config;

pub use config::{load_config, ApiConfig, Config, PredictConfig, BASE_URL_ENV};
