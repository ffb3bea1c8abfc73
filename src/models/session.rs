use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a session comment, in characters.
pub const MAX_COMMENT_CHARS: usize = 30;

/// Fixed workout session taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionType {
    #[serde(rename = "Upper A")]
    UpperA,
    Lower,
    #[serde(rename = "Upper B")]
    UpperB,
    Other,
}

impl SessionType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Upper A" => Some(SessionType::UpperA),
            "Lower" => Some(SessionType::Lower),
            "Upper B" => Some(SessionType::UpperB),
            "Other" => Some(SessionType::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::UpperA => "Upper A",
            SessionType::Lower => "Lower",
            SessionType::UpperB => "Upper B",
            SessionType::Other => "Other",
        }
    }
}

/// A workout instance grouping exercise records with summary metadata.
/// `exercise_records` holds references to records owned by the same caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub body_weight: f64,
    pub exercise_records: Vec<Uuid>,
    pub is_done: bool,
    pub owner_id: Uuid,
    pub comment: Option<String>,
}

/// Fields for a new session. `date` defaults to now, `is_done` to false,
/// and `owner_id` is stamped from the authenticated caller.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub session_type: SessionType,
    pub body_weight: f64,
    pub comment: Option<String>,
    pub owner_id: Uuid,
}

/// Validated session update change-set. `is_done` is left unchanged when
/// the payload omits it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionChanges {
    pub session_type: SessionType,
    pub body_weight: f64,
    pub comment: Option<String>,
    pub is_done: Option<bool>,
}
