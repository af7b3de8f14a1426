use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use jobmap_core::state::{AppState, CachedJobs, HoveredCategory, JobMarker, MapMarkers, VisibleBounds};
use jobmap_core::types::{JobId, RawJob, RawSkill, SkillsPayload, SubcategoryEntry};

fn make_job(id: &str, subcategory: &str) -> RawJob {
    RawJob {
        job_id: JobId::new(id),
        subcategory: Some(subcategory.to_string()),
        title: None,
        latitude: None,
        longitude: None,
        is_remote: None,
    }
}

fn sample_payload() -> SkillsPayload {
    SkillsPayload {
        skills: vec![RawSkill {
            name: Some("Rust".to_string()),
            connections: None,
        }],
        subcategories: vec![SubcategoryEntry {
            name: Some("Machine Learning".to_string()),
        }],
    }
}

#[test]
fn ingest_publishes_a_snapshot_and_notifies_subscribers() {
    let mut state = AppState::new();

    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    state.subscribe_snapshot(move |snapshot| {
        sink.borrow_mut().push(snapshot.revision.clone());
    });

    let jobs = vec![make_job("a", "Front End")];
    state.ingest(Some(&jobs), Some(&sample_payload()));

    let revisions = seen.borrow();
    assert_eq!(revisions.len(), 1, "one ingest, one notification");
    assert_eq!(revisions[0], state.snapshot().revision);
    assert!(!state.snapshot().is_unpopulated());
}

#[test]
fn ingest_with_a_missing_input_is_a_silent_noop() {
    let mut state = AppState::new();

    let jobs = vec![make_job("a", "Front End")];
    state.ingest(Some(&jobs), Some(&sample_payload()));

    let notified = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&notified);
    state.subscribe_snapshot(move |_| *sink.borrow_mut() += 1);

    let before = serde_json::to_string(state.snapshot()).unwrap();

    state.ingest(None, Some(&sample_payload()));
    state.ingest(Some(&jobs), None);
    state.ingest(None, None);

    let after = serde_json::to_string(state.snapshot()).unwrap();
    assert_eq!(before, after, "prior snapshot must survive byte-for-byte");
    assert_eq!(*notified.borrow(), 0, "a no-op must not notify subscribers");
}

#[test]
fn selection_writes_push_the_derived_value_synchronously() {
    let mut state = AppState::new();

    let jobs = vec![
        make_job("a", "Front End"),
        make_job("b", "front-end"),
        make_job("c", "Data Science"),
    ];
    state.ingest(Some(&jobs), Some(&SkillsPayload::default()));

    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    state.subscribe_selected_jobs(move |ids| sink.borrow_mut().push(ids.len()));

    state.select_subcategory("Front End");

    // The subscriber already ran by the time select_subcategory returned.
    assert_eq!(seen.borrow().as_slice(), &[2]);

    let expected: BTreeSet<JobId> = [JobId::new("a"), JobId::new("b")].into_iter().collect();
    assert_eq!(state.selected_jobs(), &expected);

    state.clear_selected_subcategories();
    assert!(state.selected_jobs().is_empty(), "empty selection means show all");
    assert_eq!(seen.borrow().as_slice(), &[2, 0]);
}

#[test]
fn reingest_recomputes_the_selection_against_the_new_snapshot() {
    let mut state = AppState::new();

    let first = vec![make_job("a", "Front End")];
    state.ingest(Some(&first), Some(&SkillsPayload::default()));
    state.select_subcategory("Front End");
    assert_eq!(state.selected_jobs().len(), 1);

    let second = vec![make_job("x", "Front End"), make_job("y", "Front End")];
    state.ingest(Some(&second), Some(&SkillsPayload::default()));

    let expected: BTreeSet<JobId> = [JobId::new("x"), JobId::new("y")].into_iter().collect();
    assert_eq!(
        state.selected_jobs(),
        &expected,
        "the derived set must follow the replaced snapshot"
    );
}

#[test]
fn unsubscribe_stops_notifications() {
    let mut state = AppState::new();

    let count = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&count);
    let id = state.subscribe_snapshot(move |_| *sink.borrow_mut() += 1);

    let jobs = vec![make_job("a", "Front End")];
    state.ingest(Some(&jobs), Some(&SkillsPayload::default()));
    assert_eq!(*count.borrow(), 1);

    assert!(state.unsubscribe_snapshot(id));
    assert!(!state.unsubscribe_snapshot(id), "second unsubscribe is a no-op");

    state.ingest(Some(&jobs), Some(&SkillsPayload::default()));
    assert_eq!(*count.borrow(), 1, "no notification after unsubscribe");
}

#[test]
fn auxiliary_stores_hold_and_derive() {
    let mut state = AppState::new();

    assert!(!state.has_visible_jobs());
    state.set_visible_jobs(vec![JobId::new("a"), JobId::new("b")]);
    assert!(state.has_visible_jobs());

    state.set_cached_jobs(CachedJobs {
        remote: vec![make_job("r", "Front End")],
        non_remote: vec![make_job("n1", "Front End"), make_job("n2", "Data Science")],
    });
    let counts = state.job_counts();
    assert_eq!(counts.remote, 1);
    assert_eq!(counts.non_remote, 2);

    state.set_map_markers(MapMarkers {
        remote: Vec::new(),
        non_remote: [(
            JobId::new("n1"),
            JobMarker {
                job_id: JobId::new("n1"),
                latitude: 52.37,
                longitude: 4.89,
            },
        )]
        .into_iter()
        .collect(),
    });
    assert_eq!(state.map_markers().non_remote.len(), 1);

    state.set_visible_bounds(VisibleBounds {
        min_lat: Some(50.0),
        max_lat: Some(54.0),
        min_lng: Some(3.0),
        max_lng: Some(7.0),
        is_zoomed: true,
    });
    assert!(state.visible_bounds().is_zoomed);

    state.set_hovered_category(HoveredCategory {
        subcategory: Some("Front End".to_string()),
        is_remote: Some(false),
    });
    assert_eq!(
        state.hovered_category().subcategory.as_deref(),
        Some("Front End")
    );
}

#[test]
fn reset_restores_every_store_to_its_initial_value() {
    let mut state = AppState::new();

    let jobs = vec![make_job("a", "Front End")];
    state.ingest(Some(&jobs), Some(&sample_payload()));
    state.select_subcategory("Front End");
    state.select_skill("Rust");
    state.highlight_job(JobId::new("a"));
    state.set_visible_jobs(vec![JobId::new("a")]);
    state.set_cached_jobs(CachedJobs {
        remote: jobs.clone(),
        non_remote: Vec::new(),
    });
    state.set_visible_bounds(VisibleBounds {
        min_lat: Some(1.0),
        max_lat: Some(2.0),
        min_lng: Some(3.0),
        max_lng: Some(4.0),
        is_zoomed: true,
    });

    assert!(!state.normalize_cache().is_empty());
    assert!(!state.selected_jobs().is_empty());

    let notified = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&notified);
    state.subscribe_snapshot(move |snapshot| {
        sink.borrow_mut().push(snapshot.jobs.len());
    });

    state.reset();

    assert!(state.snapshot().is_unpopulated());
    assert!(state.selected_subcategories().is_empty());
    assert!(state.selected_skills().is_empty());
    assert!(state.highlighted_jobs().is_empty());
    assert!(state.selected_jobs().is_empty());
    assert!(!state.has_visible_jobs());
    assert_eq!(state.job_counts().remote, 0);
    assert_eq!(state.visible_bounds(), &VisibleBounds::default());
    assert_eq!(state.hovered_category(), &HoveredCategory::default());
    assert!(state.normalize_cache().is_empty());
    assert_eq!(
        notified.borrow().as_slice(),
        &[0],
        "reset publishes the emptied snapshot"
    );

    // A previously cached string is recomputed, not served stale.
    state.normalize("Front End");
    assert_eq!(state.normalize_cache().len(), 1);
}
