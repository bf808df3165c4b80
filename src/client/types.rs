//! Data carried between the gateway and the result display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user query: trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Trim `raw`; `None` if nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire body of a query submission.
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a Query,
}

/// A successful answer from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub answer: String,
    /// Backend relevance order; never re-sorted here.
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub requires_review: bool,
    #[serde(default)]
    pub hitl_review: Option<HitlReview>,
    pub processing_time_ms: f64,
    pub request_id: String,
    #[serde(default)]
    pub workflow_steps: Vec<String>,
}

impl ExperimentResult {
    /// Review details, only when the result is flagged for review.
    pub fn review(&self) -> Option<&HitlReview> {
        if self.requires_review {
            self.hitl_review.as_ref()
        } else {
            None
        }
    }
}

/// One cited source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub speech_id: String,
    pub speaker: String,
    pub date: String,
    pub content: String,
    /// Conventionally in [0, 1]; not clamped.
    pub score: f64,
    #[serde(default)]
    pub house: Option<String>,
    #[serde(default)]
    pub meeting: Option<String>,
}

impl Source {
    /// House name, treating the backend's empty string as absent.
    pub fn house(&self) -> Option<&str> {
        self.house.as_deref().filter(|h| !h.is_empty())
    }

    pub fn meeting(&self) -> Option<&str> {
        self.meeting.as_deref().filter(|m| !m.is_empty())
    }
}

/// Why a result was routed to human review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitlReview {
    pub reason: HitlReason,
    pub query: String,
    pub relevant_doc_count: u64,
    #[serde(default)]
    pub sensitive_keywords: Vec<String>,
}

/// Review reason. The backend may add values; unknown ones are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HitlReason {
    LowConfidence,
    SensitiveTopic,
    Other(String),
}

impl HitlReason {
    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            HitlReason::LowConfidence => "low confidence",
            HitlReason::SensitiveTopic => "sensitive topic",
            HitlReason::Other(raw) if raw.trim().is_empty() => "other",
            HitlReason::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for HitlReason {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "low_confidence" => HitlReason::LowConfidence,
            "sensitive_topic" => HitlReason::SensitiveTopic,
            _ => HitlReason::Other(raw),
        }
    }
}

impl From<HitlReason> for String {
    fn from(reason: HitlReason) -> Self {
        match reason {
            HitlReason::LowConfidence => "low_confidence".to_string(),
            HitlReason::SensitiveTopic => "sensitive_topic".to_string(),
            HitlReason::Other(raw) => raw,
        }
    }
}

impl fmt::Display for HitlReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
