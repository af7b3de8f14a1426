use jobmap_core::types::{jobs_from_json, PayloadError, SkillsPayload};

#[test]
fn malformed_job_entries_are_skipped_individually() {
    let raw = r#"[
        {"job_id": "a", "subcategory": "Front End"},
        42,
        {"subcategory": "no id here"},
        {"job_id": "b"}
    ]"#;

    let jobs = jobs_from_json(raw).expect("array parse should succeed");

    assert_eq!(jobs.len(), 2, "entries without a usable shape are dropped");
    assert_eq!(jobs[0].job_id.as_str(), "a");
    assert_eq!(jobs[1].job_id.as_str(), "b");
    assert_eq!(jobs[1].subcategory, None);
}

#[test]
fn top_level_shape_errors_are_reported() {
    let err = jobs_from_json(r#"{"jobs": []}"#).expect_err("object is not a job array");
    match err {
        PayloadError::Json(_) => {}
    }
}

#[test]
fn skills_payload_sections_default_to_empty() {
    let payload = SkillsPayload::from_json("{}").expect("empty object parses");
    assert!(payload.skills.is_empty());
    assert!(payload.subcategories.is_empty());
}

#[test]
fn malformed_skill_entries_are_skipped_individually() {
    let raw = r#"{
        "skills": [
            {"name": "Rust", "connections": {"required": ["Back End"]}},
            "not-an-object"
        ],
        "subcategories": [
            {"name": "Data Science"},
            17
        ]
    }"#;

    let payload = SkillsPayload::from_json(raw).expect("payload parse should succeed");

    assert_eq!(payload.skills.len(), 1);
    assert_eq!(payload.skills[0].name.as_deref(), Some("Rust"));
    assert_eq!(payload.subcategories.len(), 1);
    assert_eq!(payload.subcategories[0].name.as_deref(), Some("Data Science"));
}

#[test]
fn optional_job_fields_default_when_absent() {
    let raw = r#"[{"job_id": "a"}]"#;
    let jobs = jobs_from_json(raw).unwrap();

    let job = &jobs[0];
    assert_eq!(job.subcategory, None);
    assert_eq!(job.title, None);
    assert_eq!(job.latitude, None);
    assert_eq!(job.longitude, None);
    assert_eq!(job.is_remote, None);
}
