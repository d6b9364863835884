pub mod audit;
pub mod readme;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::core::error::ClientError;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// What a commit reply turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Success { content: JsonValue },
    Failure { error: String },
    Unknown { raw: JsonValue },
}

impl From<JsonValue> for CommitOutcome {
    /// `content` wins over `error` when a reply carries both.
    fn from(raw: JsonValue) -> Self {
        if let JsonValue::Object(map) = &raw {
            if let Some(content) = map.get("content").filter(|v| is_truthy(v)) {
                return Self::Success { content: content.clone() };
            }
            if let Some(error) = map.get("error").filter(|v| is_truthy(v)) {
                return Self::Failure { error: display_value(error) };
            }
        }
        Self::Unknown { raw }
    }
}

impl CommitOutcome {
    pub fn describe(&self, file_path: &str, branch: &str) -> String {
        match self {
            Self::Success { .. } => {
                format!("File '{file_path}' committed successfully to branch '{branch}'.")
            }
            Self::Failure { error } => error.clone(),
            Self::Unknown { raw } => format!("GitHub API Error: {}", display_value(raw)),
        }
    }
}

/// String form of a collaborator value: strings verbatim, everything else as
/// JSON text.
pub fn display_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(a) => !a.is_empty(),
        JsonValue::Object(o) => !o.is_empty(),
    }
}

fn default_true() -> bool {
    true
}

/// Subset of `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoInfo {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub clone_url: Option<String>,
    pub homepage: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default = "default_true")]
    pub has_issues: bool,
    #[serde(default)]
    pub topics: Vec<String>,
    pub language: Option<String>,
    pub license: Option<LicenseInfo>,
    pub default_branch: Option<String>,
    pub pushed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseInfo {
    pub spdx_id: Option<String>,
    pub name: String,
}

/// Subset of `GET /repos/{owner}/{repo}/community/profile`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunityProfile {
    #[serde(default)]
    pub health_percentage: u32,
    #[serde(default)]
    pub files: CommunityFiles,
}

/// Each entry is `null` when the file is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunityFiles {
    pub readme: Option<JsonValue>,
    pub contributing: Option<JsonValue>,
    pub code_of_conduct: Option<JsonValue>,
    pub issue_template: Option<JsonValue>,
    pub pull_request_template: Option<JsonValue>,
}
