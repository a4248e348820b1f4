use std::sync::Arc;

use academy::featured::{FeaturedLoader, LoadState};
use academy::schema::{SpecialLecture, tables};
use academy::table::MemoryTable;
use pretty_assertions::assert_eq;
use serde_json::json;

fn lecture(id: &str, date: Option<&str>, featured: bool, upcoming: bool) -> serde_json::Value {
    json!({
        "id": id,
        "expert_name": "Expert",
        "expert_title": "Title",
        "expert_credentials": null,
        "expert_image_url": null,
        "topic": format!("Topic {id}"),
        "description": "Description",
        "key_takeaways": null,
        "lecture_date": date,
        "duration_minutes": 60,
        "is_upcoming": upcoming,
        "is_featured": featured
    })
}

fn ids(state: &LoadState<SpecialLecture>) -> Vec<&str> {
    state.items().iter().map(|l| l.id.as_str()).collect()
}

#[tokio::test]
async fn only_featured_upcoming_lectures_soonest_first() {
    let table = Arc::new(MemoryTable::new());
    table.seed_values(
        tables::SPECIAL_LECTURES,
        vec![
            lecture("late", Some("2026-12-01T10:00:00Z"), true, true),
            lecture("past", Some("2026-01-01T10:00:00Z"), true, false),
            lecture("hidden", Some("2026-11-02T10:00:00Z"), false, true),
            lecture("unscheduled", None, true, true),
            lecture("soon", Some("2026-11-01T10:00:00Z"), true, true),
        ],
    );
    let loader = FeaturedLoader::lectures(table.clone());
    assert!(loader.state().is_loading());

    let state = loader.load().await.unwrap();

    assert_eq!(ids(&state), vec!["soon", "late", "unscheduled"]);
    assert!(state.renders_section());
    let first = &state.items()[0];
    assert!(first.credentials.is_empty());
    assert!(first.highlights().is_empty());
}

#[tokio::test]
async fn empty_table_hides_the_section() {
    let table = Arc::new(MemoryTable::new());
    let loader = FeaturedLoader::lectures(table.clone());

    let state = loader.load().await.unwrap();

    assert_eq!(state, LoadState::Loaded(Vec::new()));
    assert!(!state.renders_section());
}

#[tokio::test]
async fn fetch_failure_degrades_to_an_empty_section() {
    let table = Arc::new(MemoryTable::preview());
    table.fail_selects("upstream timeout");
    let loader = FeaturedLoader::lectures(table.clone());

    let state = loader.load().await.unwrap();

    assert!(matches!(state, LoadState::Failed(ref message) if message.contains("upstream timeout")));
    assert!(state.items().is_empty());
    assert!(!loader.state().renders_section());
}

#[tokio::test]
async fn loads_once_per_instance() {
    let table = Arc::new(MemoryTable::preview());
    let loader = FeaturedLoader::lectures(table.clone());

    assert!(loader.load().await.is_some());
    assert!(loader.load().await.is_none());
    assert_eq!(table.select_calls(), 1);
    assert_eq!(ids(&loader.state()), vec!["preview-rrb-ntpc", "preview-ssc-cgl"]);

    // a new mount fetches again
    let remount = FeaturedLoader::lectures(table.clone());
    remount.load().await;
    assert_eq!(table.select_calls(), 2);
}
