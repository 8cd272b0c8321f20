//! # NVDA Forecast Client
//!
//! Client library for the NVDA Forecast inference service: turns pasted
//! tabular data (CSV or JSON) into a validated feature matrix and requests
//! a single prediction over HTTP.
//!
//! ## Modules
//!
//! - `matrix` - input normalization: parsing, shape validation, mode reduction
//! - `api` - wire types and the HTTP client for the forecast service
//! - `session` - caller-side outcome slot with an in-flight guard
//! - `utils` - configuration loading
//!
//! ## Example Usage
//!
//! ```no_run
//! use nvda_forecast::{ForecastClient, Framework, InputMode, Tag};
//! use nvda_forecast::matrix::normalize;
//!
//! #[tokio::main]
//! async fn main() {
//!     let raw = "0.12,0.03,0.45,0.20\n0.10,0.04,0.44,0.18";
//!     let x = normalize(raw, InputMode::Auto, Framework::Lgbm).unwrap();
//!
//!     let client = ForecastClient::new("http://localhost:8000");
//!     let result = client
//!         .predict_regression(Tag::B, Framework::Lgbm, x)
//!         .await
//!         .unwrap();
//!
//!     println!("y_pred = {}", result.y_pred);
//! }
//! ```

pub mod api;
pub mod matrix;
pub mod session;
pub mod utils;

// Re-exports for convenience
pub use api::{
    ApiError, ClassificationResponse, ForecastClient, Framework, HealthResponse, Matrix,
    PredictionRequest, RegressionResponse, Tag,
};
pub use matrix::{normalize, InputMode, NormalizeError};
pub use session::{OperationOutcome, PredictionSession, SessionBusy};
pub use utils::{load_config, Config};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Forecast service base URL
    pub const BASE_URL: &str = "http://localhost:8000";

    /// Request timeout (seconds)
    pub const TIMEOUT_SECS: u64 = 30;
}
