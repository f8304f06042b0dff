// tests/export_e2e.rs

use std::fs;
use std::path::PathBuf;

use audit_scrape::export::{from_json, to_json};
use audit_scrape::params::{Mode, Params};
use audit_scrape::runner;
use audit_scrape::specs::audit_log::{Entry, OnMissing};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("audit_scrape_e2e_{name}"));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn sample() -> Vec<Entry> {
    vec![
        Entry {
            who: "alice".into(),
            what: "created repo".into(),
            kind: "repo.create".into(),
            when: "2024-01-01T00:00:00Z".into(),
        },
        Entry {
            who: "bob".into(),
            what: "installed travis for acme/widgets".into(),
            kind: "hook.create".into(),
            when: "2024-01-02T00:00:00Z".into(),
        },
    ]
}

#[test]
fn round_trip_preserves_values_and_order() {
    let records = sample();
    let json = to_json(&records).unwrap();
    assert_eq!(from_json(&json).unwrap(), records);
}

#[test]
fn empty_collection_serializes_as_brackets() {
    assert_eq!(to_json(&[]).unwrap(), "[]");
}

#[test]
fn pretty_format_keys_in_order() {
    let json = to_json(&sample()).unwrap();
    // 2-space indentation, one object per record.
    assert!(json.starts_with("[\n  {\n    \"who\""));
    let first = &json[..json.find('}').unwrap()];
    let pos = |key: &str| first.find(&format!("\"{key}\"")).unwrap();
    assert!(pos("who") < pos("what"));
    assert!(pos("what") < pos("type"));
    assert!(pos("type") < pos("when"));
    // The category field serializes under its contract name.
    assert!(!json.contains("\"kind\""));
}

#[test]
fn one_call_surface_matches_the_two_step_path() {
    let doc = r#"<div class="audit-log-item">
         <a class="member-username">alice</a>
         <span class="audit-action-info">created repo</span>
         <span class="audit-type">repo.create</span>
         <time datetime="2024-01-01T00:00:00Z">Jan 1</time>
       </div>"#;
    let json = audit_scrape::export::export_document(doc, OnMissing::Abort).unwrap();
    let records = from_json(&json).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, "repo.create");
}

#[test]
fn runner_writes_default_name_into_directory_hint() {
    let dir = tmp_dir("dir_hint");
    let page = dir.join("page.html");
    fs::write(
        &page,
        r#"<div class="audit-log-item">
             <a class="member-username">alice</a>
             <span class="audit-action-info">created repo</span>
             <span class="audit-type">repo.create</span>
             <time datetime="2024-01-01T00:00:00Z">Jan 1</time>
           </div>"#,
    )
    .unwrap();

    let mut params = Params::new();
    params.mode = Mode::Extract;
    params.input = Some(page);
    params.out = Some(dir.clone());

    let summary = runner::run(&params).unwrap();
    assert_eq!(summary.records, 1);
    assert_eq!(summary.files_written, vec![dir.join("audit-log.json")]);

    let written = fs::read_to_string(&summary.files_written[0]).unwrap();
    let records = from_json(&written).unwrap();
    assert_eq!(records[0].who, "alice");
    assert_eq!(records[0].when, "2024-01-01T00:00:00Z");
}

#[test]
fn abort_run_produces_no_file() {
    let dir = tmp_dir("abort");
    let page = dir.join("page.html");
    // Entry without its time element.
    fs::write(
        &page,
        r#"<div class="audit-log-item">
             <a class="member-username">alice</a>
             <span class="audit-action-info">created repo</span>
             <span class="audit-type">repo.create</span>
           </div>"#,
    )
    .unwrap();

    let mut params = Params::new();
    params.input = Some(page);
    params.out = Some(dir.clone());
    params.on_missing = OnMissing::Abort;

    assert!(runner::run(&params).is_err());
    assert!(!dir.join("audit-log.json").exists());
}

#[test]
fn explicit_file_path_is_respected() {
    let dir = tmp_dir("explicit");
    let page = dir.join("page.html");
    fs::write(&page, "<p>no entries here</p>").unwrap();

    let out = dir.join("nested").join("my-log.json");
    let mut params = Params::new();
    params.input = Some(page);
    params.out = Some(out.clone());

    let summary = runner::run(&params).unwrap();
    assert_eq!(summary.records, 0);
    assert_eq!(summary.files_written, vec![out.clone()]);
    assert_eq!(fs::read_to_string(&out).unwrap(), "[]");
}
