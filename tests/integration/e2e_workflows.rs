// End-to-end workflows through the command layer.

use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as Base64, Engine as _};
use tempfile::{tempdir, TempDir};

use plantcare_app_lib::commands::analysis::{
    analysis_reset, analysis_share_text, analyze_image, image_validate, AnalyzePayload,
};
use plantcare_app_lib::commands::catalog::{catalog_list, catalog_show, crop_families};
use plantcare_app_lib::commands::history::{history_delete, history_list, history_trend};
use plantcare_app_lib::commands::preferences::{
    preferences_get, preferences_update, PreferencesUpdatePayload,
};
use plantcare_app_lib::commands::AppState;
use plantcare_app_lib::db::DbPool;
use plantcare_app_lib::models::analysis::{AnalysisResponse, ImageSource};
use plantcare_app_lib::models::diagnosis::HealthTrend;
use plantcare_app_lib::services::analysis_service::AnalysisService;
use plantcare_app_lib::services::catalog::DiseaseCatalog;
use plantcare_app_lib::services::inference::LocalSimulatedProvider;
use plantcare_app_lib::services::session_service::{Guarded, SessionService};
use plantcare_app_lib::store::{MemoryKeyValueStore, SqliteKeyValueStore};

fn setup(seed: u64) -> (AppState, TempDir) {
    let dir = tempdir().expect("temp dir");
    let pool = DbPool::new(dir.path().join("plantcare.sqlite")).expect("db pool");
    let provider = LocalSimulatedProvider::new(DiseaseCatalog::new(), Duration::ZERO, Some(seed));
    let analysis = AnalysisService::new(Arc::new(provider), Some(seed));
    let state = AppState::from_parts(analysis, Arc::new(SqliteKeyValueStore::new(pool)));
    (state, dir)
}

fn image() -> String {
    format!("data:image/png;base64,{}", Base64.encode(b"leaf-photo"))
}

#[tokio::test]
async fn analyze_and_save_then_delete_first() {
    let (state, _dir) = setup(1);

    let first = analyze_image(
        &state,
        AnalyzePayload {
            image: image(),
            crop: Some("tomato".to_string()),
            save: true,
        },
    )
    .await
    .unwrap();
    let second = analyze_image(
        &state,
        AnalyzePayload {
            image: image(),
            crop: Some("apple".to_string()),
            save: true,
        },
    )
    .await
    .unwrap();

    let first_saved = first.saved.expect("saved");
    let second_saved = second.saved.expect("saved");
    assert_eq!(first_saved.crop_type.as_deref(), Some("tomato"));
    assert_eq!(first_saved.health_score, Some(first.result.health_score.score));
    assert_eq!(first_saved.image_url, image());

    let listed = history_list(&state, None).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second_saved.id);

    assert!(history_delete(&state, first_saved.id.clone()).await.unwrap());
    let remaining = history_list(&state, None).await.unwrap();
    assert_eq!(remaining, vec![second_saved]);
}

#[tokio::test]
async fn analyze_without_save_leaves_history_untouched() {
    let (state, _dir) = setup(2);
    let outcome = analyze_image(
        &state,
        AnalyzePayload {
            image: image(),
            crop: None,
            save: false,
        },
    )
    .await
    .unwrap();

    assert!(outcome.saved.is_none());
    assert!(history_list(&state, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn crop_defaults_to_saved_preference() {
    let (state, _dir) = setup(3);
    preferences_update(
        &state,
        PreferencesUpdatePayload {
            selected_crop: Some("potato".to_string()),
            ..PreferencesUpdatePayload::default()
        },
    )
    .await
    .unwrap();

    let outcome = analyze_image(
        &state,
        AnalyzePayload {
            image: image(),
            crop: None,
            save: true,
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome.result.disease.crop_family, "potato");
    assert_eq!(outcome.saved.unwrap().crop_type.as_deref(), Some("potato"));
}

#[tokio::test]
async fn invalid_image_is_a_validation_error() {
    let (state, _dir) = setup(4);
    let error = analyze_image(
        &state,
        AnalyzePayload {
            image: format!("data:text/plain;base64,{}", Base64.encode(b"hello")),
            crop: None,
            save: true,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(error.code, "VALIDATION_ERROR");
    assert_eq!(error.message, "Please select an image file");
    assert!(history_list(&state, None).await.unwrap().is_empty());

    let check = image_validate("image/png", 15 * 1024 * 1024);
    assert!(!check.valid);
}

#[tokio::test]
async fn share_text_follows_session_and_reset() {
    let (state, _dir) = setup(5);
    assert_eq!(analysis_share_text(&state).unwrap(), Guarded::RedirectHome);

    let outcome = analyze_image(
        &state,
        AnalyzePayload {
            image: image(),
            crop: Some("corn".to_string()),
            save: false,
        },
    )
    .await
    .unwrap();

    let text = analysis_share_text(&state).unwrap().ready().expect("result in session");
    assert!(text.starts_with("PlantCare AI Diagnosis"));
    assert!(text.contains(&outcome.result.disease.name));
    assert!(text.contains(&format!("Health Score: {}/100", outcome.result.health_score.score)));
    assert!(text.contains("1. "));

    analysis_reset(&state).unwrap();
    assert!(analysis_share_text(&state).unwrap().is_redirect());
}

#[test]
fn session_guards_redirect_when_state_missing() {
    let session = SessionService::new(Arc::new(MemoryKeyValueStore::new()));
    assert!(session.pending_analysis().unwrap().is_redirect());
    assert!(session.current_result().unwrap().is_redirect());

    session.begin("/tmp/leaf.jpg", None).unwrap();
    let pending = session.pending_analysis().unwrap().ready().expect("pending");
    assert_eq!(pending.crop, "auto");
    assert_eq!(
        pending.to_request().image,
        ImageSource::File("/tmp/leaf.jpg".into())
    );
    // image without a result is still not enough for the result step
    assert!(session.current_result().unwrap().is_redirect());
}

#[test]
fn session_begin_drops_previous_result() {
    let session = SessionService::new(Arc::new(MemoryKeyValueStore::new()));
    let disease = DiseaseCatalog::new().healthy().clone();
    let response = AnalysisResponse {
        disease,
        confidence: 0.95,
        processing_time: 10,
        alternatives: Vec::new(),
        health_score: Default::default(),
        heatmap_regions: Vec::new(),
        confidence_level: plantcare_app_lib::models::analysis::ConfidenceLevel::High,
        multi_disease_warning: false,
    };

    session.begin("/tmp/a.jpg", Some("grape")).unwrap();
    session.store_result(&response).unwrap();
    let (image, stored) = session.current_result().unwrap().ready().expect("ready");
    assert_eq!(image, "/tmp/a.jpg");
    assert_eq!(stored, response);

    session.begin("/tmp/b.jpg", Some("grape")).unwrap();
    assert!(session.current_result().unwrap().is_redirect());
}

#[tokio::test]
async fn trend_reflects_saved_scores() {
    let (state, _dir) = setup(6);
    assert_eq!(history_trend(&state).await.unwrap().trend, HealthTrend::Neutral);

    for _ in 0..3 {
        analyze_image(
            &state,
            AnalyzePayload {
                image: image(),
                crop: None,
                save: true,
            },
        )
        .await
        .unwrap();
    }

    let summary = history_trend(&state).await.unwrap();
    assert_eq!(summary.points.len(), 3);
    assert_eq!(summary.points[0].index, 1);
    assert_ne!(summary.trend, HealthTrend::Neutral);
}

#[tokio::test]
async fn history_filter_rejects_unknown_severity() {
    let (state, _dir) = setup(7);
    let error = history_list(&state, Some("extreme".to_string())).await.unwrap_err();
    assert_eq!(error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn preferences_round_trip_through_commands() {
    let (state, _dir) = setup(8);
    let defaults = preferences_get(&state).await.unwrap();
    assert_eq!(defaults.region, "Auto Detect");

    let updated = preferences_update(
        &state,
        PreferencesUpdatePayload {
            mode: Some("advanced".to_string()),
            region: Some("Pacific Northwest".to_string()),
            data_contribution: Some(true),
            ..PreferencesUpdatePayload::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.region, "Pacific Northwest");
    assert!(updated.data_contribution);

    let error = preferences_update(
        &state,
        PreferencesUpdatePayload {
            mode: Some("expert".to_string()),
            ..PreferencesUpdatePayload::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(error.code, "VALIDATION_ERROR");
    assert_eq!(preferences_get(&state).await.unwrap(), updated);
}

#[test]
fn catalog_commands() {
    let (state, _dir) = setup(9);

    let all = catalog_list(&state, None).unwrap();
    assert_eq!(all.len(), DiseaseCatalog::new().all().len());

    let grape = catalog_list(&state, Some("Grape")).unwrap();
    assert!(grape.iter().all(|disease| disease.crop_family == "grape"));

    assert_eq!(catalog_list(&state, Some("banana")).unwrap_err().code, "VALIDATION_ERROR");
    assert_eq!(catalog_show(&state, "apple-scab").unwrap().id, "apple-scab");
    assert_eq!(catalog_show(&state, "nope").unwrap_err().code, "NOT_FOUND");
    assert_eq!(crop_families(&state).len(), 10);
}
