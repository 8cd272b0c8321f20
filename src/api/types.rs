//! Wire types shared by the forecast service endpoints.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use crate::matrix::Matrix;

/// Dataset view the server selects a model for. Passed through verbatim,
/// never interpreted by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Tag {
    /// NVDA only
    #[value(name = "A", alias = "a")]
    A,
    /// All tickers
    #[value(name = "B", alias = "b")]
    B,
    /// Affiliates
    #[serde(rename = "AFF")]
    #[value(name = "AFF", alias = "aff")]
    Aff,
}

impl Default for Tag {
    fn default() -> Self {
        Tag::B
    }
}

impl Tag {
    /// Wire string for this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::A => "A",
            Tag::B => "B",
            Tag::Aff => "AFF",
        }
    }
}

/// Model family to query. Determines the input shape the server expects,
/// which is why input-mode resolution keys off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// LightGBM regression on the last time step
    Lgbm,
    /// LSTM over the full sequence
    Lstm,
    /// BiLSTM with attention over the full sequence
    Bilstm,
}

impl Default for Framework {
    fn default() -> Self {
        Framework::Lgbm
    }
}

impl Framework {
    /// Wire string for this framework.
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Lgbm => "lgbm",
            Framework::Lstm => "lstm",
            Framework::Bilstm => "bilstm",
        }
    }

    /// Whether the server consumes only the final row for this framework.
    pub fn uses_last_step(&self) -> bool {
        matches!(self, Framework::Lgbm)
    }
}

/// Request body for both prediction endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub tag: Tag,
    pub framework: Framework,
    #[serde(rename = "X")]
    pub x: Matrix,
}

impl PredictionRequest {
    pub fn new(tag: Tag, framework: Framework, x: Matrix) -> Self {
        Self { tag, framework, x }
    }
}

/// Successful regression response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionResponse {
    pub framework: Framework,
    pub tag: Tag,
    /// Predicted value, in the target's original space unless `scaled`.
    pub y_pred: f64,
    /// True when the server could not inverse-transform the prediction.
    #[serde(default)]
    pub scaled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Successful classification response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResponse {
    pub tag: Tag,
    pub framework: Framework,
    /// Probability of an up move.
    pub p_up: f64,
    /// Hard label after thresholding.
    pub label: i64,
    pub threshold: f64,
}

/// Health-check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_wire_strings() {
        assert_eq!(serde_json::to_string(&Tag::A).unwrap(), "\"A\"");
        assert_eq!(serde_json::to_string(&Tag::B).unwrap(), "\"B\"");
        assert_eq!(serde_json::to_string(&Tag::Aff).unwrap(), "\"AFF\"");
        assert_eq!(Tag::Aff.as_str(), "AFF");
    }

    #[test]
    fn test_framework_wire_strings() {
        assert_eq!(serde_json::to_string(&Framework::Lgbm).unwrap(), "\"lgbm\"");
        assert_eq!(serde_json::to_string(&Framework::Bilstm).unwrap(), "\"bilstm\"");
        assert!(Framework::Lgbm.uses_last_step());
        assert!(!Framework::Lstm.uses_last_step());
    }

    #[test]
    fn test_request_serializes_matrix_as_x() {
        let req = PredictionRequest::new(
            Tag::B,
            Framework::Lgbm,
            vec![vec![0.1, 0.2], vec![0.3, 0.4]],
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["tag"], "B");
        assert_eq!(json["framework"], "lgbm");
        assert_eq!(json["X"][1][0], 0.3);
        assert!(json.get("x").is_none());
    }

    #[test]
    fn test_regression_response_decode() {
        let body = r#"{"framework":"lgbm","tag":"B","y_pred":123.4}"#;
        let resp: RegressionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.y_pred, 123.4);
        assert!(!resp.scaled);
        assert!(resp.note.is_none());
    }

    #[test]
    fn test_regression_response_with_note() {
        let body = r#"{"framework":"lstm","tag":"A","y_pred":0.5,"scaled":true,"note":"y left in scaled space"}"#;
        let resp: RegressionResponse = serde_json::from_str(body).unwrap();
        assert!(resp.scaled);
        assert_eq!(resp.note.as_deref(), Some("y left in scaled space"));
    }

    #[test]
    fn test_classification_response_decode() {
        let body = r#"{"tag":"B","framework":"lgbm","p_up":0.73,"label":1,"threshold":0.5}"#;
        let resp: ClassificationResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.label, 1);
        assert!(resp.p_up > 0.7);
    }
}
