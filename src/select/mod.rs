use std::collections::BTreeSet;

use crate::index::CombinedSnapshot;
use crate::normalize::NormalizeCache;
use crate::types::identifiers::{JobId, NormalizedKey};

/// Union of the job ids in every bucket matching a selected subcategory.
///
/// An empty selection derives the empty set; consumers read that as "no
/// filter applied", never as "nothing matches".
pub fn selected_jobs(
    selection: &BTreeSet<String>,
    snapshot: &CombinedSnapshot,
    cache: &mut NormalizeCache,
) -> BTreeSet<JobId> {
    let mut result = BTreeSet::new();
    if selection.is_empty() {
        return result;
    }

    let keys: BTreeSet<NormalizedKey> =
        selection.iter().map(|raw| cache.normalize(raw)).collect();

    for key in &keys {
        if let Some(bucket) = snapshot.jobs.get(key) {
            for job in bucket {
                result.insert(job.job_id.clone());
            }
        }
    }

    result
}
