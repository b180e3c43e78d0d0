use std::fs;

use recommend_core::catalog::{AssessmentItem, Catalog, CatalogError, CatalogProvider, JsonCatalogFile};
use recommend_core::evaluation::TestCase;

fn make_item(name: &str, duration: &str, test_type: &str) -> AssessmentItem {
    AssessmentItem::new(
        name,
        format!("https://catalog.example/{}", name.to_lowercase().replace(' ', "-")),
        duration,
        test_type,
    )
}

fn seed() -> Catalog {
    Catalog::new(vec![
        make_item("Java 8 (New)", "40 minutes", "Technical"),
        make_item("Sales Solution", "55 minutes", "Sales"),
        make_item("English Comprehension", "30 minutes", "Language"),
    ])
    .unwrap()
}

#[test]
fn load_or_init_writes_the_seed_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonCatalogFile::new(dir.path().join("nested").join("catalog.json"));

    let first = store.load_or_init(&seed()).unwrap();
    assert!(store.path().exists());
    assert_eq!(first.version, seed().version);

    // A second call reads the file instead of overwriting it.
    let other_seed = Catalog::new(vec![make_item("Other", "10 minutes", "Cognitive")]).unwrap();
    let second = store.load_or_init(&other_seed).unwrap();
    assert_eq!(second.version, seed().version);
    assert_eq!(second.items(), seed().items());
}

#[test]
fn write_then_load_keeps_order_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonCatalogFile::new(dir.path().join("catalog.json"));
    let catalog = seed();

    store.write(&catalog).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded.version, catalog.version);
    let names: Vec<&str> = loaded.items().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Java 8 (New)", "Sales Solution", "English Comprehension"]);

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1, "temp file left behind: {leftovers:?}");
}

#[test]
fn write_accepts_versions_of_any_shape() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonCatalogFile::new(dir.path().join("catalog.json"));

    for raw in ["\"v1\"", "\"sha256:é\"", "\"\""] {
        let mut catalog = seed();
        catalog.version = serde_json::from_str(raw).unwrap();
        store.write(&catalog).unwrap();
        assert_eq!(store.load().unwrap().items(), seed().items());
    }
}

#[test]
fn version_tracks_content_and_order() {
    let a = seed();
    let b = seed();
    assert_eq!(a.version, b.version);
    assert!(a.version.as_str().starts_with("sha256:"));

    let mut reversed = seed().items().to_vec();
    reversed.reverse();
    let c = Catalog::new(reversed).unwrap();
    assert_ne!(a.version, c.version);

    let mut edited = seed().items().to_vec();
    edited[0].duration = "45 minutes".into();
    let d = Catalog::new(edited).unwrap();
    assert_ne!(a.version, d.version);
}

#[test]
fn version_separates_field_boundaries() {
    // Same characters, split differently between name and url.
    let a = Catalog::new(vec![AssessmentItem::new("Java\tCore", "https://x", "30 minutes", "Technical")]).unwrap();
    let b = Catalog::new(vec![AssessmentItem::new("Java", "Core\thttps://x", "30 minutes", "Technical")]).unwrap();
    assert_ne!(a.version, b.version);

    let c = Catalog::new(vec![
        AssessmentItem::new("Verbal\nReasoning", "https://v", "20 minutes", "Cognitive"),
    ])
    .unwrap();
    let d = Catalog::new(vec![
        AssessmentItem::new("Verbal", "https://v", "20 minutes", "Cognitive"),
        AssessmentItem::new("Reasoning", "https://v", "20 minutes", "Cognitive"),
    ])
    .unwrap();
    assert_ne!(c.version, d.version);
}

#[test]
fn duplicate_names_are_rejected() {
    let result = Catalog::new(vec![
        make_item("Java 8 (New)", "40 minutes", "Technical"),
        make_item("Java 8 (New)", "30 minutes", "Technical"),
    ]);
    assert!(matches!(result, Err(CatalogError::DuplicateName(name)) if name == "Java 8 (New)"));
}

#[test]
fn invalid_durations_are_rejected() {
    let result = Catalog::new(vec![make_item("Odd", "untimed", "Personality")]);
    match result {
        Err(CatalogError::InvalidDuration { name, duration }) => {
            assert_eq!(name, "Odd");
            assert_eq!(duration, "untimed");
        }
        other => panic!("expected InvalidDuration, got {other:?}"),
    }
}

#[test]
fn missing_or_malformed_files_are_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = JsonCatalogFile::new(dir.path().join("absent.json"));
    assert!(matches!(missing.load(), Err(CatalogError::Io(_))));

    let path = dir.path().join("broken.json");
    fs::write(&path, "[{\"name\": \"Java 8\"").unwrap();
    assert!(matches!(JsonCatalogFile::new(&path).load(), Err(CatalogError::Serialization(_))));
}

#[test]
fn builtin_catalog_is_valid_and_covers_the_labelled_queries() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(catalog.len(), 41);
    assert!(catalog.items().iter().all(|i| i.duration_minutes().is_some()));

    let cases = TestCase::builtin().unwrap();
    assert_eq!(cases.len(), 4);
    for case in &cases {
        for name in &case.relevant_names {
            assert!(catalog.get(name).is_some(), "unknown relevant name {name:?}");
        }
    }
}

#[test]
fn catalog_provider_snapshot_is_stable() {
    let catalog = seed();
    let loaded = catalog.load().unwrap();
    assert_eq!(loaded.version, catalog.version);
    assert_eq!(loaded.items(), catalog.items());
}
