//! Parsing pasted text into a rectangular numeric matrix.
//!
//! Format detection is exclusive: text starting with `[` is JSON and the
//! CSV path is never attempted for it. Everything else is treated as
//! CSV/whitespace-delimited rows.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::mode::InputMode;
use super::Matrix;
use crate::api::Framework;

/// Errors from normalizing pasted input.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("empty input")]
    EmptyInput,

    #[error("Failed to parse input as JSON or CSV: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid number {token:?} at row {row}, column {column}")]
    InvalidNumber {
        row: usize,
        column: usize,
        token: String,
    },

    #[error("Input must be a 2D array [T,F] or CSV rows.")]
    NotTwoDimensional,

    #[error("ragged matrix: row {row} has {width} values, expected {expected}")]
    RaggedRow {
        row: usize,
        width: usize,
        expected: usize,
    },
}

impl NormalizeError {
    /// True for errors about decomposing the text into numbers.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            NormalizeError::EmptyInput
                | NormalizeError::InvalidJson(_)
                | NormalizeError::InvalidNumber { .. }
        )
    }

    /// True for errors about the structure of the parsed data.
    pub fn is_shape(&self) -> bool {
        !self.is_parse()
    }
}

/// Normalize pasted text into the matrix a prediction request carries.
///
/// Parses `raw` (JSON or CSV), validates the shape, resolves `mode`
/// against `framework` and applies the reduction. Pure function of its
/// inputs.
pub fn normalize(
    raw: &str,
    mode: InputMode,
    framework: Framework,
) -> Result<Matrix, NormalizeError> {
    let parsed = parse_matrix(raw)?;
    let resolved = mode.resolve(framework);
    debug!(
        "normalized {} rows, mode {:?}",
        parsed.len(),
        resolved
    );
    Ok(resolved.reduce(parsed))
}

/// Parse pasted text into a validated [T,F] matrix, without any mode
/// reduction.
pub fn parse_matrix(raw: &str) -> Result<Matrix, NormalizeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::EmptyInput);
    }

    let rows = if trimmed.starts_with('[') {
        matrix_from_json(serde_json::from_str(trimmed)?)?
    } else {
        parse_delimited(trimmed)?
    };

    validate_shape(&rows)?;
    Ok(rows)
}

/// Convert a parsed JSON value into rows of numbers.
///
/// Non-numeric cells are rejected with their coordinates rather than
/// forwarded as NaN.
fn matrix_from_json(value: Value) -> Result<Matrix, NormalizeError> {
    let Value::Array(json_rows) = value else {
        return Err(NormalizeError::NotTwoDimensional);
    };

    let mut rows = Vec::with_capacity(json_rows.len());
    for (r, json_row) in json_rows.into_iter().enumerate() {
        let Value::Array(cells) = json_row else {
            return Err(NormalizeError::NotTwoDimensional);
        };
        let mut row = Vec::with_capacity(cells.len());
        for (c, cell) in cells.into_iter().enumerate() {
            let number = cell.as_f64().ok_or_else(|| NormalizeError::InvalidNumber {
                row: r + 1,
                column: c + 1,
                token: cell.to_string(),
            })?;
            row.push(number);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Parse CSV/whitespace-delimited lines. Lines with no tokens are dropped
/// entirely, never kept as empty rows.
fn parse_delimited(text: &str) -> Result<Matrix, NormalizeError> {
    let mut rows = Vec::new();
    for (line_idx, line) in text.lines().enumerate() {
        let mut row = Vec::new();
        let mut column = 0;
        for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            column += 1;
            let number: f64 = token.parse().map_err(|_| NormalizeError::InvalidNumber {
                row: line_idx + 1,
                column,
                token: token.to_string(),
            })?;
            row.push(number);
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// A usable matrix has at least one row, a non-empty first row, and
/// uniform row width.
fn validate_shape(rows: &Matrix) -> Result<(), NormalizeError> {
    let Some(first) = rows.first() else {
        return Err(NormalizeError::NotTwoDimensional);
    };
    if first.is_empty() {
        return Err(NormalizeError::NotTwoDimensional);
    }

    let expected = first.len();
    for (i, row) in rows.iter().enumerate().skip(1) {
        if row.len() != expected {
            return Err(NormalizeError::RaggedRow {
                row: i + 1,
                width: row.len(),
                expected,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_last_step_keeps_final_row() {
        let input = "0.12,0.03,0.45,0.20\n0.10,0.04,0.44,0.18";
        let matrix = normalize(input, InputMode::LastStep, Framework::Lgbm).unwrap();
        assert_eq!(matrix, vec![vec![0.10, 0.04, 0.44, 0.18]]);
    }

    #[test]
    fn test_json_sequence_is_preserved() {
        let matrix = normalize("[[1,2],[3,4]]", InputMode::Sequence, Framework::Lstm).unwrap();
        assert_eq!(matrix, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn test_auto_matches_explicit_mode() {
        let input = "1,2\n3,4\n5,6";
        let auto_lgbm = normalize(input, InputMode::Auto, Framework::Lgbm).unwrap();
        let last = normalize(input, InputMode::LastStep, Framework::Lgbm).unwrap();
        assert_eq!(auto_lgbm, last);

        let auto_lstm = normalize(input, InputMode::Auto, Framework::Lstm).unwrap();
        let seq = normalize(input, InputMode::Sequence, Framework::Lstm).unwrap();
        assert_eq!(auto_lstm, seq);
    }

    #[test]
    fn test_sequence_preserves_row_count() {
        let input = "1 2\n3 4\n5 6\n7 8";
        let matrix = normalize(input, InputMode::Sequence, Framework::Bilstm).unwrap();
        assert_eq!(matrix.len(), 4);
    }

    #[test]
    fn test_whitespace_and_comma_tokens_mix() {
        let matrix = parse_matrix("1, 2  3\t4\n5 ,6, 7, 8").unwrap();
        assert_eq!(matrix, vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]]);
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let matrix = parse_matrix("1,2\n\n   \n3,4\n").unwrap();
        assert_eq!(matrix.len(), 2);
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            parse_matrix(""),
            Err(NormalizeError::EmptyInput)
        ));
        assert!(matches!(
            parse_matrix("   \n\t  "),
            Err(NormalizeError::EmptyInput)
        ));
    }

    #[test]
    fn test_commas_only_input_fails_shape() {
        // Every line tokenizes to nothing, so zero rows survive.
        let err = parse_matrix(",,,\n,,").unwrap_err();
        assert!(err.is_shape());
        assert_eq!(err.to_string(), "Input must be a 2D array [T,F] or CSV rows.");
    }

    #[test]
    fn test_json_scalar_rows_fail_shape() {
        let err = parse_matrix("[1,2,3]").unwrap_err();
        assert!(matches!(err, NormalizeError::NotTwoDimensional));
    }

    #[test]
    fn test_json_empty_array_fails_shape() {
        assert!(parse_matrix("[]").unwrap_err().is_shape());
        assert!(parse_matrix("[[]]").unwrap_err().is_shape());
    }

    #[test]
    fn test_malformed_json_names_both_formats() {
        let err = parse_matrix("[[1,2],").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("JSON or CSV"));
    }

    #[test]
    fn test_non_numeric_token_reports_position() {
        let err = parse_matrix("not,a,number").unwrap_err();
        match err {
            NormalizeError::InvalidNumber { row, column, ref token } => {
                assert_eq!(row, 1);
                assert_eq!(column, 1);
                assert_eq!(token, "not");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }

        let err = parse_matrix("1,2\n3,oops").unwrap_err();
        match err {
            NormalizeError::InvalidNumber { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, 2);
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_json_non_numeric_cell_rejected() {
        let err = parse_matrix(r#"[[1,"x"],[3,4]]"#).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::InvalidNumber { row: 1, column: 2, .. }
        ));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = parse_matrix("1,2,3\n4,5").unwrap_err();
        match err {
            NormalizeError::RaggedRow { row, width, expected } => {
                assert_eq!(row, 2);
                assert_eq!(width, 2);
                assert_eq!(expected, 3);
            }
            other => panic!("expected RaggedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let original: Matrix = vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]];
        let text = serde_json::to_string(&original).unwrap();
        let reparsed = parse_matrix(&text).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_single_row_last_step() {
        let matrix = normalize("[[7,8,9]]", InputMode::LastStep, Framework::Lgbm).unwrap();
        assert_eq!(matrix, vec![vec![7.0, 8.0, 9.0]]);
    }
}
