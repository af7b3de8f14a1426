use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::identifiers::NormalizedKey;
use crate::types::records::{RawJob, RawSkill};

/// A skill record augmented with the canonical form of its connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedSkill {
    pub skill: RawSkill,
    pub normalized_connections: NormalizedConnections,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedConnections {
    pub required: Vec<NormalizedKey>,
    pub preferred: Vec<NormalizedKey>,
}

/// One atomically published bundle of derived indexes.
///
/// A snapshot is rebuilt from scratch on every ingest and replaced wholesale;
/// consumers never observe a partially updated index.
///
/// `revision` is a content hash over the index entries. Identical inputs
/// always hash to the identical revision, so observers can cheaply detect
/// whether anything actually changed. `built_at` is informational only and
/// takes no part in the hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedSnapshot {
    pub jobs: BTreeMap<NormalizedKey, Vec<RawJob>>,
    pub skills: BTreeMap<NormalizedKey, IndexedSkill>,
    pub subcategories: BTreeMap<NormalizedKey, String>,
    pub revision: String,
    pub built_at: DateTime<Utc>,
}

impl CombinedSnapshot {
    /// The empty snapshot every session starts from.
    pub fn empty() -> Self {
        let jobs = BTreeMap::new();
        let skills = BTreeMap::new();
        let subcategories = BTreeMap::new();
        let revision = compute_revision(&jobs, &skills, &subcategories);

        CombinedSnapshot {
            jobs,
            skills,
            subcategories,
            revision,
            built_at: Utc::now(),
        }
    }

    /// True when no index holds any entry.
    pub fn is_unpopulated(&self) -> bool {
        self.jobs.is_empty() && self.skills.is_empty() && self.subcategories.is_empty()
    }
}

/// Content hash of the three indexes: `sha256:<hex>`.
///
/// BTreeMap iteration gives a stable entry order, so the digest is a pure
/// function of the index contents.
pub(crate) fn compute_revision(
    jobs: &BTreeMap<NormalizedKey, Vec<RawJob>>,
    skills: &BTreeMap<NormalizedKey, IndexedSkill>,
    subcategories: &BTreeMap<NormalizedKey, String>,
) -> String {
    let mut hasher = Sha256::new();

    for (key, bucket) in jobs {
        for job in bucket {
            let line = format!("job:{}:{}\n", key.as_str(), job.job_id.as_str());
            hasher.update(line.as_bytes());
        }
    }

    for (key, indexed) in skills {
        let required: Vec<&str> = indexed
            .normalized_connections
            .required
            .iter()
            .map(|k| k.as_str())
            .collect();
        let preferred: Vec<&str> = indexed
            .normalized_connections
            .preferred
            .iter()
            .map(|k| k.as_str())
            .collect();
        let line = format!(
            "skill:{}:{}:{}\n",
            key.as_str(),
            required.join(","),
            preferred.join(","),
        );
        hasher.update(line.as_bytes());
    }

    for (key, display) in subcategories {
        let line = format!("subcategory:{}:{}\n", key.as_str(), display);
        hasher.update(line.as_bytes());
    }

    let hash = hasher.finalize();
    format!("sha256:{}", hex::encode(hash))
}
