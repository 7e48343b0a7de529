// Analysis pipeline: image validation, provider call, normalization.

use std::sync::Arc;
use std::time::Duration;

use approx::assert_abs_diff_eq;
use base64::{engine::general_purpose::STANDARD as Base64, Engine as _};
use httpmock::prelude::*;
use serde_json::json;
use tempfile::tempdir;

use plantcare_app_lib::config::{AppConfig, InferenceMode};
use plantcare_app_lib::error::{AnalysisErrorCode, ANALYSIS_FAILED_MESSAGE};
use plantcare_app_lib::models::analysis::{AnalysisRequest, ConfidenceLevel, ImageSource};
use plantcare_app_lib::services::analysis_service::AnalysisService;
use plantcare_app_lib::services::catalog::DiseaseCatalog;
use plantcare_app_lib::services::inference::{LocalSimulatedProvider, RemoteHttpProvider};
use plantcare_app_lib::utils::image::{validate_image, MAX_IMAGE_BYTES};

fn local_service(seed: u64) -> AnalysisService {
    let provider = LocalSimulatedProvider::new(DiseaseCatalog::new(), Duration::ZERO, Some(seed));
    AnalysisService::new(Arc::new(provider), Some(seed))
}

fn remote_service(url: String) -> AnalysisService {
    let provider = RemoteHttpProvider::try_new(url, Duration::from_secs(5)).unwrap();
    AnalysisService::new(Arc::new(provider), Some(9))
}

fn jpeg_data_uri() -> String {
    format!("data:image/jpeg;base64,{}", Base64.encode(b"not-really-a-jpeg"))
}

#[test]
fn validation_rejects_large_png_accepts_small_jpeg() {
    let large = validate_image("image/png", 15 * 1024 * 1024);
    assert!(!large.valid);
    assert!(large.error.unwrap().contains("10MB"));

    let small = validate_image("image/jpeg", 2 * 1024 * 1024);
    assert!(small.valid);
    assert!(small.error.is_none());

    assert!(validate_image("image/webp", MAX_IMAGE_BYTES).valid);
    assert!(!validate_image("image/webp", MAX_IMAGE_BYTES + 1).valid);
    assert_eq!(
        validate_image("text/plain", 10).error.as_deref(),
        Some("Please select an image file")
    );
}

#[tokio::test]
async fn tomato_hint_in_local_mode_returns_tomato_disease() {
    for seed in 0..10 {
        let request = AnalysisRequest::new(ImageSource::DataUri(jpeg_data_uri())).with_crop_hint("tomato");
        let response = local_service(seed).analyze(request).await.unwrap();

        assert_eq!(response.disease.crop_family, "tomato");
        assert!((0.88..=0.99).contains(&response.confidence));
        assert!(!response.heatmap_regions.is_empty());

        let total: f64 = response.alternatives.iter().map(|a| a.confidence).sum::<f64>() + response.confidence;
        assert_abs_diff_eq!(total, 1.0, epsilon = 0.02);
    }
}

#[tokio::test]
async fn local_mode_is_reproducible_with_seed() {
    let request = || AnalysisRequest::new(ImageSource::DataUri(jpeg_data_uri()));
    let first = local_service(123).analyze(request()).await.unwrap();
    let second = local_service(123).analyze(request()).await.unwrap();

    assert_eq!(first.disease, second.disease);
    assert_eq!(first.confidence, second.confidence);
    assert_eq!(first.alternatives, second.alternatives);
    assert_eq!(first.health_score, second.health_score);
    assert_eq!(first.heatmap_regions, second.heatmap_regions);
}

#[tokio::test]
async fn file_images_are_read_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("leaf.png");
    std::fs::write(&path, b"png-ish bytes").unwrap();

    let response = local_service(4)
        .analyze(AnalysisRequest::new(ImageSource::File(path)))
        .await
        .unwrap();
    assert!(response.confidence >= 0.85);
}

#[tokio::test]
async fn oversized_or_non_image_input_never_reaches_the_server() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/analyze");
            then.status(200).json_body(json!({ "class": "healthy", "confidence": 0.99 }));
        })
        .await;
    let service = remote_service(server.url("/analyze"));

    let too_big = AnalysisRequest::new(ImageSource::Bytes {
        bytes: vec![0u8; (MAX_IMAGE_BYTES + 1) as usize],
        mime_type: "image/png".to_string(),
        file_name: None,
    });
    let error = service.analyze(too_big).await.unwrap_err();
    assert!(error.is_validation());

    let not_image = AnalysisRequest::new(ImageSource::DataUri(format!(
        "data:application/pdf;base64,{}",
        Base64.encode(b"%PDF")
    )));
    assert!(service.analyze(not_image).await.unwrap_err().is_validation());

    let missing = AnalysisRequest::new(ImageSource::File("/definitely/not/here.jpg".into()));
    assert!(service.analyze(missing).await.unwrap_err().is_validation());

    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn remote_raw_prediction_is_completed_locally() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/analyze");
            then.status(200)
                .json_body(json!({ "class": "potato-late-blight", "confidence": 0.64 }));
        })
        .await;

    let response = remote_service(server.url("/analyze"))
        .analyze(AnalysisRequest::new(ImageSource::DataUri(jpeg_data_uri())).with_crop_hint("potato"))
        .await
        .unwrap();

    assert_eq!(response.disease.id, "potato-late-blight");
    assert_eq!(response.confidence_level, ConfidenceLevel::Low);
    assert!(response.multi_disease_warning);
    assert!(!response.alternatives.is_empty());
    assert!((2..=4).contains(&response.heatmap_regions.len()));
    assert!(response.health_score.score >= 5);
}

#[tokio::test]
async fn remote_level_is_recomputed_not_trusted() {
    let server = MockServer::start_async().await;
    let healthy = DiseaseCatalog::new().healthy().clone();
    server
        .mock_async(|when, then| {
            when.method(POST).path("/analyze");
            then.status(200).json_body(json!({
                "disease": healthy,
                "confidence": 0.97,
                "alternatives": [],
                "heatmapRegions": [{ "x": 0.5, "y": 0.5, "radius": 0.2 }],
                "confidenceLevel": "Low",
                "multiDiseaseWarning": true
            }));
        })
        .await;

    let response = remote_service(server.url("/analyze"))
        .analyze(AnalysisRequest::new(ImageSource::DataUri(jpeg_data_uri())))
        .await
        .unwrap();

    assert_eq!(response.confidence_level, ConfidenceLevel::High);
    assert!(!response.multi_disease_warning);
    assert!(response.alternatives.is_empty());
    assert!(response.heatmap_regions.is_empty());
    assert_eq!(response.health_score.breakdown.infection_severity, 0);
}

#[tokio::test]
async fn remote_failure_surfaces_single_retry_message() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/analyze");
            then.status(500);
        })
        .await;

    let error = remote_service(server.url("/analyze"))
        .analyze(AnalysisRequest::new(ImageSource::DataUri(jpeg_data_uri())))
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), ANALYSIS_FAILED_MESSAGE);
    assert_eq!(error.analysis_code(), Some(AnalysisErrorCode::InferenceUnavailable));
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn service_built_from_config_uses_selected_mode() {
    let config = AppConfig {
        inference_mode: InferenceMode::Local,
        simulated_delay: Duration::ZERO,
        rng_seed: Some(5),
        ..AppConfig::default()
    };
    let service = AnalysisService::from_config(&config).unwrap();
    assert_eq!(service.provider_name(), "local-simulated");

    let remote = AnalysisService::from_config(&AppConfig::default()).unwrap();
    assert_eq!(remote.provider_name(), "remote-http");
}

#[tokio::test]
async fn auto_detect_still_sends_crop_type() {
    let server = MockServer::start_async().await;
    let with_crop = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/analyze")
                .body_contains("name=\"cropType\"\r\n\r\nauto");
            then.status(200).json_body(json!({ "class": "corn-rust", "confidence": 0.93 }));
        })
        .await;
    let service = remote_service(server.url("/analyze"));

    let explicit = AnalysisRequest::new(ImageSource::DataUri(jpeg_data_uri())).with_crop_hint("auto");
    assert_eq!(service.analyze(explicit).await.unwrap().disease.id, "corn-rust");

    let implicit = AnalysisRequest::new(ImageSource::DataUri(jpeg_data_uri()));
    service.analyze(implicit).await.unwrap();

    with_crop.assert_hits_async(2).await;
}

#[tokio::test]
async fn remote_health_score_out_of_range_is_rejected() {
    let server = MockServer::start_async().await;
    let disease = DiseaseCatalog::new().find_by_id("apple-scab").unwrap().clone();
    server
        .mock_async(|when, then| {
            when.method(POST).path("/analyze");
            then.status(200).json_body(json!({
                "disease": disease,
                "confidence": 0.91,
                "healthScore": {
                    "score": 250,
                    "breakdown": { "leafCondition": 240, "infectionSeverity": 10, "colorAnalysis": 80 }
                }
            }));
        })
        .await;

    let error = remote_service(server.url("/analyze"))
        .analyze(AnalysisRequest::new(ImageSource::DataUri(jpeg_data_uri())))
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), ANALYSIS_FAILED_MESSAGE);
    assert_eq!(error.analysis_code(), Some(AnalysisErrorCode::InvalidResponse));
}
