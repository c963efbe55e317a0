//! Screening API request/response types
//!
//! The backend is loose about response shapes, so every decode goes through
//! an explicit step here rather than relying on a single derived struct.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ScreenError};

/// Name of an uploaded resume file, as returned by the backend
pub type ResumeId = String;

/// Marker shown when the backend produced no test for a skill
pub const NO_TEST_GENERATED: &str = "No test generated";

/// One ranked resume from a screening run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    /// Resume file name
    #[serde(rename = "cv_name")]
    pub resume: ResumeId,
    /// Match score in 0.0..=1.0
    pub score: f64,
}

/// A number the backend's LLM may emit either as JSON number or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Number(f64),
    Text(String),
}

impl Rating {
    /// Numeric value, parsing text ratings like `"85"`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Rating::Number(n) => Some(*n),
            Rating::Text(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Rating::Number(n) => write!(f, "{}", n),
            Rating::Text(s) => write!(f, "{}", s.trim()),
        }
    }
}

/// Qualitative assessment of one resume against one job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Relevance percentage
    #[serde(rename = "Relevance")]
    pub relevance: Rating,
    #[serde(rename = "Strengths", default)]
    pub strengths: Vec<String>,
    #[serde(rename = "Weaknesses", default)]
    pub weaknesses: Vec<String>,
    #[serde(rename = "Recommendation")]
    pub recommendation: String,
}

/// A generated assessment question for one skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTest {
    #[serde(rename = "Skill", default)]
    pub skill: String,
    #[serde(rename = "Confidence", default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Rating>,
    #[serde(rename = "Test", default)]
    pub test: String,
}

impl SkillTest {
    /// The single-item fallback used when a response carries no tests at all
    pub fn no_test_generated() -> Self {
        Self {
            skill: String::new(),
            confidence: None,
            test: NO_TEST_GENERATED.to_string(),
        }
    }

    /// Test text, or the "no test" marker when the backend left it blank
    pub fn test_text(&self) -> &str {
        if self.test.trim().is_empty() {
            NO_TEST_GENERATED
        } else {
            &self.test
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Screening response normalization
// ─────────────────────────────────────────────────────────────────────────────

/// The response shapes `/screen/` is known to produce.
///
/// Detection order is fixed: a top-level array, then a `results` field, then
/// `top_results`, then `data`. Anything else is [`ScreeningShape::Unrecognized`]
/// and decodes to an empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreeningShape {
    Bare(Value),
    Results(Value),
    TopResults(Value),
    Data(Value),
    Unrecognized,
}

impl ScreeningShape {
    /// Classify a parsed response body
    pub fn detect(body: Value) -> Self {
        match body {
            Value::Array(list) => ScreeningShape::Bare(Value::Array(list)),
            Value::Object(mut map) => {
                for key in ["results", "top_results", "data"] {
                    match map.remove(key) {
                        Some(Value::Null) | None => continue,
                        Some(list) => {
                            return match key {
                                "results" => ScreeningShape::Results(list),
                                "top_results" => ScreeningShape::TopResults(list),
                                _ => ScreeningShape::Data(list),
                            }
                        }
                    }
                }
                ScreeningShape::Unrecognized
            }
            _ => ScreeningShape::Unrecognized,
        }
    }

    /// Decode the selected list into screening results
    pub fn into_results(self) -> Result<Vec<ScreeningResult>> {
        match self {
            ScreeningShape::Bare(list)
            | ScreeningShape::Results(list)
            | ScreeningShape::TopResults(list)
            | ScreeningShape::Data(list) => Ok(serde_json::from_value(list)?),
            ScreeningShape::Unrecognized => Ok(Vec::new()),
        }
    }
}

/// Decode a `/screen/` response body
pub fn decode_screening(body: &str) -> Result<Vec<ScreeningResult>> {
    let value: Value = serde_json::from_str(body)?;
    ScreeningShape::detect(value).into_results()
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-candidate responses
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct EvaluateResponse {
    #[serde(default)]
    evaluation: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Decode an `/evaluate/` response body into its nested evaluation
pub fn decode_evaluation(body: &str) -> Result<Evaluation> {
    let response: EvaluateResponse = serde_json::from_str(body)?;

    match (response.evaluation, response.error) {
        (Some(evaluation), _) => {
            // The LLM's own parse failures come back as {"error": ..} in place of the evaluation
            if let Some(err) = evaluation.get("error").and_then(Value::as_str) {
                return Err(ScreenError::Decode(format!("evaluation unavailable: {}", err)));
            }
            Ok(serde_json::from_value(evaluation)?)
        }
        (_, Some(err)) => Err(ScreenError::Backend(err)),
        _ => Err(ScreenError::Decode(
            "response has no 'evaluation' field".to_string(),
        )),
    }
}

#[derive(Debug, Deserialize)]
struct SkillTestResponse {
    #[serde(rename = "SkillTests", default)]
    skill_tests: Option<Vec<SkillTest>>,
}

/// Decode a `/generate-test/` response body.
///
/// A missing or null `SkillTests` field yields the single "no test" marker.
pub fn decode_skill_tests(body: &str) -> Result<Vec<SkillTest>> {
    let response: SkillTestResponse = serde_json::from_str(body)?;
    Ok(response
        .skill_tests
        .unwrap_or_else(|| vec![SkillTest::no_test_generated()]))
}

/// Decode a `/list-cvs/` response body
pub fn decode_resume_list(body: &str) -> Result<Vec<ResumeId>> {
    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Null => Ok(Vec::new()),
        other => Ok(serde_json::from_value(other)?),
    }
}
