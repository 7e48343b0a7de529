// History and preferences persisted through SQLite.

use std::sync::Arc;
use std::thread;

use plantcare_app_lib::db::DbPool;
use plantcare_app_lib::models::diagnosis::{HealthTrend, NewDiagnosis, SeverityFilter};
use plantcare_app_lib::models::disease::Severity;
use plantcare_app_lib::models::preferences::{ExperienceMode, PreferencesUpdate, UserPreferences};
use plantcare_app_lib::services::catalog::DiseaseCatalog;
use plantcare_app_lib::services::history_service::{HistoryService, HISTORY_KEY};
use plantcare_app_lib::services::preferences_service::PreferencesService;
use plantcare_app_lib::store::{KeyValueStore, SqliteKeyValueStore};
use tempfile::{tempdir, TempDir};

fn setup() -> (Arc<dyn KeyValueStore>, DbPool, TempDir) {
    let dir = tempdir().expect("temp dir");
    let pool = DbPool::new(dir.path().join("history.sqlite")).expect("db pool");
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::new(pool.clone()));
    (store, pool, dir)
}

fn diagnosis(id: &str, score: Option<u8>) -> NewDiagnosis {
    let disease = DiseaseCatalog::new().find_by_id(id).expect("catalog entry").clone();
    NewDiagnosis {
        image_url: format!("/photos/{id}.jpg"),
        disease,
        confidence: 0.9,
        health_score: score,
        crop_type: None,
    }
}

#[test]
fn save_two_delete_first_keeps_second() {
    let (store, _pool, _dir) = setup();
    let history = HistoryService::new(store);

    let first = history.save(diagnosis("apple-scab", Some(70))).unwrap();
    let second = history.save(diagnosis("corn-rust", Some(80))).unwrap();

    let listed = history.list().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id, "most recent first");
    assert_ne!(first.id, second.id);

    assert!(history.delete(&first.id).unwrap());
    let remaining = history.list().unwrap();
    assert_eq!(remaining, vec![second]);
}

#[test]
fn deleting_unknown_id_changes_nothing() {
    let (store, _pool, _dir) = setup();
    let history = HistoryService::new(store);
    history.save(diagnosis("apple-scab", None)).unwrap();

    assert!(!history.delete("missing").unwrap());
    assert_eq!(history.list().unwrap().len(), 1);
}

#[test]
fn empty_history_is_empty_list() {
    let (store, _pool, _dir) = setup();
    let history = HistoryService::new(store);
    assert!(history.list().unwrap().is_empty());
    assert_eq!(history.health_trend().unwrap(), HealthTrend::Neutral);
}

#[test]
fn severity_filter_selects_matching_records() {
    let (store, _pool, _dir) = setup();
    let history = HistoryService::new(store);
    history.save(diagnosis("tomato-late-blight", None)).unwrap();
    history.save(diagnosis("corn-rust", None)).unwrap();
    history.save(diagnosis("grape-black-rot", None)).unwrap();

    let high = history
        .list_by_severity(SeverityFilter::Only(Severity::High))
        .unwrap();
    assert_eq!(high.len(), 2);
    assert!(high.iter().all(|record| record.disease.severity == Severity::High));

    assert_eq!(history.list_by_severity(SeverityFilter::All).unwrap().len(), 3);
    assert!(history
        .list_by_severity(SeverityFilter::parse("medium").unwrap())
        .unwrap()
        .is_empty());
}

#[test]
fn progression_is_oldest_first_with_estimates() {
    let (store, _pool, _dir) = setup();
    let history = HistoryService::new(store);
    history.save(diagnosis("tomato-late-blight", None)).unwrap();
    history.save(diagnosis("healthy", None)).unwrap();

    let points = history.progression().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].index, 1);
    assert_eq!(points[0].health_score, 35);
    assert_eq!(points[1].health_score, 95);
    assert_eq!(points[1].confidence_percent, 90);
    assert_eq!(history.health_trend().unwrap(), HealthTrend::Improving);
}

#[test]
fn history_survives_reopening_the_database() {
    let (store, pool, _dir) = setup();
    let saved = HistoryService::new(store).save(diagnosis("wheat-rust", Some(66))).unwrap();

    let reopened = DbPool::new(pool.path().to_path_buf()).unwrap();
    let history = HistoryService::new(Arc::new(SqliteKeyValueStore::new(reopened)));
    assert_eq!(history.list().unwrap(), vec![saved]);
}

#[test]
fn stored_document_is_camel_case_json_array() {
    let (store, _pool, _dir) = setup();
    let history = HistoryService::new(Arc::clone(&store));
    history.save(diagnosis("apple-scab", Some(70))).unwrap();

    let raw = store.get(HISTORY_KEY).unwrap().expect("history stored");
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value[0];
    assert!(first.get("imageUrl").is_some());
    assert!(first.get("healthScore").is_some());
    assert!(first["timestamp"].as_i64().unwrap() > 0);
}

#[test]
fn concurrent_saves_are_not_lost() {
    let (store, _pool, _dir) = setup();
    let history = Arc::new(HistoryService::new(store));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let history = Arc::clone(&history);
            thread::spawn(move || {
                history.save(diagnosis("corn-rust", None)).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(history.list().unwrap().len(), 8);
}

#[test]
fn preferences_default_then_merge_and_persist() {
    let (store, pool, _dir) = setup();
    let preferences = PreferencesService::new(store);
    assert_eq!(preferences.get().unwrap(), UserPreferences::default());

    preferences
        .update(PreferencesUpdate {
            mode: Some(ExperienceMode::Advanced),
            field_mode: Some(true),
            ..PreferencesUpdate::default()
        })
        .unwrap();

    let reopened = PreferencesService::new(Arc::new(SqliteKeyValueStore::new(
        DbPool::new(pool.path().to_path_buf()).unwrap(),
    )));
    let loaded = reopened.get().unwrap();
    assert_eq!(loaded.mode, ExperienceMode::Advanced);
    assert!(loaded.field_mode);
    assert!(!loaded.data_contribution);
    assert_eq!(loaded.selected_crop, "auto");
}
