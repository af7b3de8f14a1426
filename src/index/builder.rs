use std::collections::BTreeMap;

use chrono::Utc;

use crate::index::snapshot::{compute_revision, CombinedSnapshot, IndexedSkill, NormalizedConnections};
use crate::normalize::NormalizeCache;
use crate::types::identifiers::NormalizedKey;
use crate::types::records::{RawJob, SkillsPayload};

/// Builds a `CombinedSnapshot` from the raw provider data.
///
/// SnapshotBuilder is single-threaded and non-reentrant; it borrows the
/// normalize cache for the duration of a build. Records with missing required
/// fields are skipped one at a time; a build itself never fails.
#[derive(Debug, Default)]
pub struct SnapshotBuilder;

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(
        &self,
        cache: &mut NormalizeCache,
        jobs: &[RawJob],
        payload: &SkillsPayload,
    ) -> CombinedSnapshot {
        let mut job_index: BTreeMap<NormalizedKey, Vec<RawJob>> = BTreeMap::new();
        let mut skill_index: BTreeMap<NormalizedKey, IndexedSkill> = BTreeMap::new();
        let mut subcategory_index: BTreeMap<NormalizedKey, String> = BTreeMap::new();

        // 1. Jobs first: their display names take precedence over the payload's.
        for job in jobs {
            let subcategory = match job.subcategory.as_deref() {
                Some(s) if !s.is_empty() => s,
                _ => continue,
            };

            let key = cache.normalize(subcategory);
            job_index.entry(key.clone()).or_default().push(job.clone());

            // First spelling seen for a key becomes its display name.
            subcategory_index
                .entry(key)
                .or_insert_with(|| subcategory.to_string());
        }

        // 2. Skills: a later record overwrites an earlier one on key collision.
        for skill in &payload.skills {
            let name = match skill.name.as_deref() {
                Some(s) if !s.is_empty() => s,
                _ => continue,
            };

            let key = cache.normalize(name);
            let connections = skill.connections.clone().unwrap_or_default();
            let normalized_connections = NormalizedConnections {
                required: connections
                    .required
                    .iter()
                    .map(|c| cache.normalize(c))
                    .collect(),
                preferred: connections
                    .preferred
                    .iter()
                    .map(|c| cache.normalize(c))
                    .collect(),
            };

            skill_index.insert(
                key,
                IndexedSkill {
                    skill: skill.clone(),
                    normalized_connections,
                },
            );
        }

        // 3. Payload subcategories only fill display names no job claimed.
        for entry in &payload.subcategories {
            let name = match entry.name.as_deref() {
                Some(s) if !s.is_empty() => s,
                _ => continue,
            };

            let key = cache.normalize(name);
            subcategory_index
                .entry(key)
                .or_insert_with(|| name.to_string());
        }

        let revision = compute_revision(&job_index, &skill_index, &subcategory_index);

        CombinedSnapshot {
            jobs: job_index,
            skills: skill_index,
            subcategories: subcategory_index,
            revision,
            built_at: Utc::now(),
        }
    }
}
