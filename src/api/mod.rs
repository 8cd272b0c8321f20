//! Forecast service client: wire types, errors, HTTP operations.

mod client;
mod error;
mod types;

pub use client::ForecastClient;
pub use error::ApiError;
pub use types::{
    ClassificationResponse, Framework, HealthResponse, Matrix, PredictionRequest,
    RegressionResponse, Tag,
};
