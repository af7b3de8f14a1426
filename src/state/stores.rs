use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::identifiers::JobId;
use crate::types::records::RawJob;

/// Fetched listings split the way the map renders them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CachedJobs {
    pub remote: Vec<RawJob>,
    pub non_remote: Vec<RawJob>,
}

impl CachedJobs {
    pub fn counts(&self) -> JobCounts {
        JobCounts {
            remote: self.remote.len(),
            non_remote: self.non_remote.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobCounts {
    pub remote: usize,
    pub non_remote: usize,
}

/// Placement of one job on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMarker {
    pub job_id: JobId,
    pub latitude: f64,
    pub longitude: f64,
}

/// Markers currently placed on the map. Remote jobs have no location and are
/// rendered as a flat list; on-site jobs are keyed by job id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapMarkers {
    pub remote: Vec<JobMarker>,
    pub non_remote: BTreeMap<JobId, JobMarker>,
}

/// Viewport of the map; all bounds are unset until the user zooms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VisibleBounds {
    pub min_lat: Option<f64>,
    pub max_lat: Option<f64>,
    pub min_lng: Option<f64>,
    pub max_lng: Option<f64>,
    pub is_zoomed: bool,
}

/// Category under the pointer, for hover highlighting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HoveredCategory {
    pub subcategory: Option<String>,
    pub is_remote: Option<bool>,
}
