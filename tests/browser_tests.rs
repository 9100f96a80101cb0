use std::collections::BTreeSet;

use job_browser::{
    parse_posted, Browser, Field, FilterSelection, Job, LoadError, PostedAge, RawJob, SortKey,
};
use serde_json::json;

fn titles(jobs: &[&Job]) -> Vec<String> {
    jobs.iter().map(|job| job.title.clone()).collect()
}

#[test]
fn test_posted_table() {
    assert_eq!(parse_posted("5 minutes ago"), PostedAge::Minutes(5));
    assert_eq!(parse_posted("1 hour ago"), PostedAge::Minutes(60));
    assert_eq!(parse_posted("2 days ago"), PostedAge::Minutes(2880));
    assert_eq!(parse_posted("HIRING NOW"), PostedAge::Unknown);
    assert_eq!(parse_posted(""), PostedAge::Unknown);
}

#[test]
fn test_missing_fields_default() {
    let keys = ["Title", "Posted", "Type", "Level", "Skill", "Detail", "Job Page Link"];
    // Every subset of the recognized keys.
    for mask in 0..(1u32 << keys.len()) {
        let mut map = serde_json::Map::new();
        for (i, key) in keys.iter().enumerate() {
            if mask & (1 << i) != 0 {
                map.insert(key.to_string(), json!("1 day ago"));
            }
        }
        let job = Job::new(&RawJob::from(map));
        let has = |i: usize| mask & (1 << i) != 0;
        assert_eq!(job.title == "No Title", !has(0));
        assert_eq!(job.posted == PostedAge::Unknown, !has(1));
        assert_eq!(job.kind == "No Type", !has(2));
        assert_eq!(job.level == "No Level", !has(3));
        assert_eq!(job.skill == "No Skill", !has(4));
        assert_eq!(job.detail == "No Details", !has(5));
        assert_eq!(job.link == "#", !has(6));
    }
}

#[test]
fn test_end_to_end() {
    let payload = json!([
        {"Title": "A", "Posted": "10 minutes ago", "Level": "Senior"},
        {"Title": "B", "Posted": "1 day ago", "Level": "Entry"},
    ])
    .to_string();

    let mut browser = Browser::new();
    let view = browser.load(&payload).unwrap();
    assert_eq!(titles(&view.jobs), ["A", "B"]);

    let view = browser.set_sort(SortKey::TitleAsc);
    assert_eq!(titles(&view.jobs), ["A", "B"]);

    // 10 < 1440 minutes.
    let view = browser.set_sort(SortKey::TimeOldest);
    assert_eq!(titles(&view.jobs), ["A", "B"]);

    let view = browser.set_sort(SortKey::TimeNewest);
    assert_eq!(titles(&view.jobs), ["B", "A"]);

    let view = browser.set_filter(FilterSelection::default().with_level("Senior"));
    assert_eq!(titles(&view.jobs), ["A"]);
    assert_eq!(view.vocabulary.levels, BTreeSet::from(["Entry", "Senior"]));
}

#[test]
fn test_vocabulary_from_file_order() {
    let payload = json!([
        {"Level": "Entry"},
        {"Level": "Senior"},
        {"Level": "Entry"},
    ])
    .to_string();

    let mut browser = Browser::new();
    let view = browser.load(&payload).unwrap();
    assert_eq!(view.vocabulary.levels, BTreeSet::from(["Entry", "Senior"]));
    assert_eq!(view.vocabulary.types, BTreeSet::from(["No Type"]));
    let options = view.vocabulary.options(Field::Level).collect::<Vec<_>>();
    assert_eq!(options[0], ("", "All"));
    assert_eq!(options.len(), 3);
}

#[test]
fn test_load_file() {
    let path = std::env::temp_dir().join(format!("job_browser_{}.json", std::process::id()));
    std::fs::write(&path, r#"[{"Title": "From disk", "Skill": "Rust"}]"#).unwrap();

    let mut browser = Browser::new();
    let view = browser.load_file(&path).unwrap();
    assert_eq!(titles(&view.jobs), ["From disk"]);

    std::fs::write(&path, "{ not json").unwrap();
    let err = browser.load_file(&path).unwrap_err();
    assert!(matches!(err, LoadError::Json(_)));
    assert_eq!(browser.catalog().jobs()[0].skill, "Rust");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_view_serializes() {
    let mut browser = Browser::new();
    let view = browser
        .load(r#"[{"Title": "A", "Posted": "2 hours ago", "Type": "Contract"}]"#)
        .unwrap();
    let value = serde_json::to_value(&view).unwrap();
    assert_eq!(value["jobs"][0]["title"], "A");
    assert_eq!(value["jobs"][0]["posted"], 120);
    assert_eq!(value["jobs"][0]["type"], "Contract");
    assert_eq!(value["vocabulary"]["types"], json!(["Contract"]));
}

#[test]
fn test_titles_use_locale_order() {
    let payload = json!([
        {"Title": "zebra"},
        {"Title": "éclair"},
        {"Title": "{draft} role"},
        {"Title": "Apple"},
    ])
    .to_string();

    let mut browser = Browser::new();
    browser.load(&payload).unwrap();
    let view = browser.set_sort(SortKey::TitleAsc);
    assert_eq!(titles(&view.jobs), ["{draft} role", "Apple", "éclair", "zebra"]);
    let view = browser.set_sort(SortKey::TitleDesc);
    assert_eq!(titles(&view.jobs), ["zebra", "éclair", "Apple", "{draft} role"]);
}
