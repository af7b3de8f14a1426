use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::identifiers::JobId;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// External job record as delivered by the listings provider.
///
/// Only `job_id` is required; every other field may be absent upstream and
/// defaults to empty here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawJob {
    pub job_id: JobId,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub is_remote: Option<bool>,
}

/// Free-text category lists a skill declares against other categories.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SkillConnections {
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub preferred: Vec<String>,
}

/// External skill record from the skills payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSkill {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub connections: Option<SkillConnections>,
}

/// Subcategory entry from the skills payload; carries a display name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryEntry {
    #[serde(default)]
    pub name: Option<String>,
}

/// The skills/subcategories payload as delivered by the skills provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SkillsPayload {
    #[serde(default)]
    pub skills: Vec<RawSkill>,
    #[serde(default)]
    pub subcategories: Vec<SubcategoryEntry>,
}

impl SkillsPayload {
    /// Parse the payload from JSON, dropping individual entries that do not
    /// deserialize. Only a malformed top-level shape is an error.
    pub fn from_json(raw: &str) -> Result<Self, PayloadError> {
        #[derive(Deserialize)]
        struct Loose {
            #[serde(default)]
            skills: Vec<serde_json::Value>,
            #[serde(default)]
            subcategories: Vec<serde_json::Value>,
        }

        let loose: Loose = serde_json::from_str(raw)?;

        Ok(SkillsPayload {
            skills: loose
                .skills
                .into_iter()
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
            subcategories: loose
                .subcategories
                .into_iter()
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
        })
    }
}

/// Parse a JSON array of job records, dropping entries that do not
/// deserialize. Only a malformed top-level shape is an error.
pub fn jobs_from_json(raw: &str) -> Result<Vec<RawJob>, PayloadError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;

    Ok(values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}
