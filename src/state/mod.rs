pub mod observers;
pub mod stores;

use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, error};

use crate::index::{CombinedSnapshot, SnapshotBuilder};
use crate::normalize::NormalizeCache;
use crate::select;
use crate::types::identifiers::{JobId, NormalizedKey};
use crate::types::records::{RawJob, SkillsPayload};

pub use observers::{Observers, SubscriptionId};
pub use stores::{CachedJobs, HoveredCategory, JobCounts, JobMarker, MapMarkers, VisibleBounds};

/// All mutable state of the job map, owned in one place.
///
/// Single-threaded push model: every write recomputes its dependents and
/// notifies subscribers before it returns. On a concurrent runtime, route all
/// writes through one owning task; the atomic-replace and memoization
/// contracts assume a single writer.
#[derive(Debug)]
pub struct AppState {
    builder: SnapshotBuilder,
    cache: NormalizeCache,
    snapshot: CombinedSnapshot,

    selected_skills: BTreeSet<String>,
    selected_subcategories: BTreeSet<String>,
    highlighted_jobs: BTreeSet<JobId>,
    visible_jobs: Vec<JobId>,
    cached_jobs: CachedJobs,
    map_markers: MapMarkers,
    visible_bounds: VisibleBounds,
    hovered_category: HoveredCategory,

    selected_jobs: BTreeSet<JobId>,

    snapshot_observers: Observers<CombinedSnapshot>,
    selected_jobs_observers: Observers<BTreeSet<JobId>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            builder: SnapshotBuilder::new(),
            cache: NormalizeCache::new(),
            snapshot: CombinedSnapshot::empty(),
            selected_skills: BTreeSet::new(),
            selected_subcategories: BTreeSet::new(),
            highlighted_jobs: BTreeSet::new(),
            visible_jobs: Vec::new(),
            cached_jobs: CachedJobs::default(),
            map_markers: MapMarkers::default(),
            visible_bounds: VisibleBounds::default(),
            hovered_category: HoveredCategory::default(),
            selected_jobs: BTreeSet::new(),
            snapshot_observers: Observers::new(),
            selected_jobs_observers: Observers::new(),
        }
    }

    // ------------------------------------------------------------------
    // Ingest
    // ------------------------------------------------------------------

    /// Rebuild the combined snapshot from fresh provider data and publish it.
    ///
    /// If either input is absent the previous snapshot is left untouched:
    /// a silent no-op, not an error.
    pub fn ingest(&mut self, jobs: Option<&[RawJob]>, payload: Option<&SkillsPayload>) {
        let (jobs, payload) = match (jobs, payload) {
            (Some(jobs), Some(payload)) => (jobs, payload),
            _ => {
                debug!("ingest skipped: jobs or skills payload missing");
                return;
            }
        };

        self.snapshot = self.builder.build(&mut self.cache, jobs, payload);
        debug!(
            "published snapshot {} ({} job buckets, {} skills, {} subcategories)",
            self.snapshot.revision,
            self.snapshot.jobs.len(),
            self.snapshot.skills.len(),
            self.snapshot.subcategories.len(),
        );

        self.snapshot_observers.notify(&self.snapshot);
        self.recompute_selected_jobs();
    }

    pub fn snapshot(&self) -> &CombinedSnapshot {
        &self.snapshot
    }

    // ------------------------------------------------------------------
    // Normalization
    // ------------------------------------------------------------------

    /// Canonical key for a raw category string, memoized in the shared cache.
    pub fn normalize(&mut self, raw: &str) -> NormalizedKey {
        self.cache.normalize(raw)
    }

    pub fn normalize_cache(&self) -> &NormalizeCache {
        &self.cache
    }

    // ------------------------------------------------------------------
    // Selection stores
    // ------------------------------------------------------------------

    /// Derived store: ids of every job in a selected subcategory.
    ///
    /// Empty while no subcategory is selected (the show-all convention).
    pub fn selected_jobs(&self) -> &BTreeSet<JobId> {
        &self.selected_jobs
    }

    pub fn selected_subcategories(&self) -> &BTreeSet<String> {
        &self.selected_subcategories
    }

    pub fn set_selected_subcategories(&mut self, selection: impl IntoIterator<Item = String>) {
        self.selected_subcategories = selection.into_iter().collect();
        self.recompute_selected_jobs();
    }

    pub fn select_subcategory(&mut self, subcategory: impl Into<String>) {
        self.selected_subcategories.insert(subcategory.into());
        self.recompute_selected_jobs();
    }

    pub fn deselect_subcategory(&mut self, subcategory: &str) {
        self.selected_subcategories.remove(subcategory);
        self.recompute_selected_jobs();
    }

    pub fn clear_selected_subcategories(&mut self) {
        self.selected_subcategories.clear();
        self.recompute_selected_jobs();
    }

    pub fn selected_skills(&self) -> &BTreeSet<String> {
        &self.selected_skills
    }

    pub fn set_selected_skills(&mut self, selection: impl IntoIterator<Item = String>) {
        self.selected_skills = selection.into_iter().collect();
    }

    pub fn select_skill(&mut self, skill: impl Into<String>) {
        self.selected_skills.insert(skill.into());
    }

    pub fn deselect_skill(&mut self, skill: &str) {
        self.selected_skills.remove(skill);
    }

    pub fn clear_selected_skills(&mut self) {
        self.selected_skills.clear();
    }

    pub fn highlighted_jobs(&self) -> &BTreeSet<JobId> {
        &self.highlighted_jobs
    }

    pub fn highlight_job(&mut self, id: JobId) {
        self.highlighted_jobs.insert(id);
    }

    pub fn unhighlight_job(&mut self, id: &JobId) {
        self.highlighted_jobs.remove(id);
    }

    pub fn clear_highlighted_jobs(&mut self) {
        self.highlighted_jobs.clear();
    }

    // ------------------------------------------------------------------
    // Map-facing stores
    // ------------------------------------------------------------------

    pub fn visible_jobs(&self) -> &[JobId] {
        &self.visible_jobs
    }

    pub fn set_visible_jobs(&mut self, jobs: Vec<JobId>) {
        self.visible_jobs = jobs;
    }

    pub fn has_visible_jobs(&self) -> bool {
        !self.visible_jobs.is_empty()
    }

    pub fn cached_jobs(&self) -> &CachedJobs {
        &self.cached_jobs
    }

    pub fn set_cached_jobs(&mut self, cached: CachedJobs) {
        self.cached_jobs = cached;
    }

    pub fn job_counts(&self) -> JobCounts {
        self.cached_jobs.counts()
    }

    pub fn map_markers(&self) -> &MapMarkers {
        &self.map_markers
    }

    pub fn set_map_markers(&mut self, markers: MapMarkers) {
        self.map_markers = markers;
    }

    pub fn visible_bounds(&self) -> &VisibleBounds {
        &self.visible_bounds
    }

    pub fn set_visible_bounds(&mut self, bounds: VisibleBounds) {
        self.visible_bounds = bounds;
    }

    pub fn hovered_category(&self) -> &HoveredCategory {
        &self.hovered_category
    }

    pub fn set_hovered_category(&mut self, hovered: HoveredCategory) {
        self.hovered_category = hovered;
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    pub fn subscribe_snapshot(
        &mut self,
        subscriber: impl FnMut(&CombinedSnapshot) + 'static,
    ) -> SubscriptionId {
        self.snapshot_observers.subscribe(subscriber)
    }

    pub fn unsubscribe_snapshot(&mut self, id: SubscriptionId) -> bool {
        self.snapshot_observers.unsubscribe(id)
    }

    pub fn subscribe_selected_jobs(
        &mut self,
        subscriber: impl FnMut(&BTreeSet<JobId>) + 'static,
    ) -> SubscriptionId {
        self.selected_jobs_observers.subscribe(subscriber)
    }

    pub fn unsubscribe_selected_jobs(&mut self, id: SubscriptionId) -> bool {
        self.selected_jobs_observers.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------

    /// Restore every store to its empty initial value.
    ///
    /// Clears the normalize cache as well, so a later lookup recomputes
    /// rather than reusing a pre-reset entry. Subscribers are notified with
    /// the emptied values.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.snapshot = CombinedSnapshot::empty();

        self.selected_skills.clear();
        self.selected_subcategories.clear();
        self.highlighted_jobs.clear();
        self.visible_jobs.clear();
        self.cached_jobs = CachedJobs::default();
        self.map_markers = MapMarkers::default();
        self.visible_bounds = VisibleBounds::default();
        self.hovered_category = HoveredCategory::default();
        self.selected_jobs.clear();

        debug!("state reset to initial values");

        self.snapshot_observers.notify(&self.snapshot);
        self.selected_jobs_observers.notify(&self.selected_jobs);
    }

    // ------------------------------------------------------------------
    // Derivation
    // ------------------------------------------------------------------

    /// Recompute the selected-jobs set and push it to subscribers.
    ///
    /// A derivation failure must never reach a subscriber: it is logged and
    /// the published value degrades to the empty set.
    fn recompute_selected_jobs(&mut self) {
        let selection = &self.selected_subcategories;
        let snapshot = &self.snapshot;
        let cache = &mut self.cache;

        let derived = panic::catch_unwind(AssertUnwindSafe(|| {
            select::selected_jobs(selection, snapshot, cache)
        }))
        .unwrap_or_else(|_| {
            error!("selected-jobs derivation failed; publishing the empty set");
            BTreeSet::new()
        });

        self.selected_jobs = derived;
        self.selected_jobs_observers.notify(&self.selected_jobs);
    }
}
