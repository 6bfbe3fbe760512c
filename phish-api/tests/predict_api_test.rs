use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use phish_api::{router, AppState};
use phish_rs::features::{FeatureBuilder, TfidfConfig};
use phish_rs::model::{ForestConfig, RandomForest};
use phish_rs::text::Normalizer;
use phish_rs::{ArtifactSet, Predictor};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn trained_set() -> ArtifactSet {
    let normalizer = Normalizer::new();
    let emails = [
        ("Account suspended", "Verify your password at http://login.example now", 1),
        ("Prize", "Claim your lottery prize, reply to win@prize.example", 1),
        ("Billing", "Update bank details urgently or lose access", 1),
        ("Lunch", "Lunch tomorrow at the usual place?", 0),
        ("Notes", "Meeting notes from the project sync attached", 0),
        ("Photos", "Photos from the weekend hike are uploaded", 0),
    ];
    let corpus: Vec<String> = emails
        .iter()
        .map(|(s, b, _)| normalizer.normalize_email(s, b))
        .collect();
    let labels: Vec<usize> = emails.iter().map(|(_, _, l)| *l).collect();

    let mut builder = FeatureBuilder::new(TfidfConfig {
        max_features: None,
        max_df: 1.0,
        min_df: 1,
        ..TfidfConfig::default()
    });
    let x = builder.fit(&corpus).unwrap();
    let model = RandomForest::fit(
        ForestConfig {
            n_trees: 10,
            ..ForestConfig::default()
        },
        &x,
        &labels,
    )
    .unwrap();
    let (vectorizer, scaler) = builder.into_parts();
    ArtifactSet::new(vectorizer, scaler, model).unwrap()
}

fn trained_predictor() -> Predictor {
    Predictor::new(trained_set()).unwrap()
}

fn app() -> Router {
    router(Arc::new(AppState::new(trained_predictor())))
}

async fn post_predict(app: Router, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_predict_returns_label_and_percentage() {
    let (status, json) = post_predict(
        app(),
        r#"{"text": "Verify your password at http://login.example now"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let prediction = json["prediction"].as_u64().unwrap();
    assert!(prediction <= 1);
    let probability = json["probability"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&probability));
    // two decimals at most
    assert!(((probability * 100.0).round() - probability * 100.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_predict_empty_text_is_valid() {
    let (status, json) = post_predict(app(), r#"{"text": ""}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["prediction"].is_u64());
}

#[tokio::test]
async fn test_predict_is_deterministic() {
    let body = r#"{"text": "Claim your lottery prize"}"#;
    let (_, first) = post_predict(app(), body).await;
    let (_, second) = post_predict(app(), body).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_text_is_bad_request() {
    let (status, json) = post_predict(app(), r#"{"body": "hello"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("'text'"));
    assert_eq!(json["message"], "Error processing email prediction");
}

#[tokio::test]
async fn test_malformed_body_is_server_error() {
    for body in ["not json", "[1, 2, 3]", r#"{"text": 42}"#] {
        let (status, json) = post_predict(app(), body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body: {}", body);
        assert!(json["error"].is_string());
        assert_eq!(json["message"], "Error processing email prediction");
    }
}

#[tokio::test]
async fn test_large_body_reaches_handler() {
    // well past axum's 2 MB default limit
    let text = "hello ".repeat(500_000);
    let body = serde_json::json!({ "text": text }).to_string();
    assert!(body.len() > 2 * 1024 * 1024);

    let state = AppState::unavailable("Artifact not found: ./scaler.bin");
    let (status, json) = post_predict(router(Arc::new(state)), &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Artifact not found: ./scaler.bin");
    assert_eq!(json["message"], "Error processing email prediction");

    let (status, json) = post_predict(app(), &body).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["prediction"].is_u64());
}

#[tokio::test]
async fn test_unloaded_model_is_server_error() {
    let dir = TempDir::new().unwrap();
    let state = AppState::load(dir.path());
    assert!(!state.model_loaded());

    let (status, json) = post_predict(router(Arc::new(state)), r#"{"text": "hello"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("not found"));
    assert_eq!(json["message"], "Error processing email prediction");
}

#[tokio::test]
async fn test_artifacts_loaded_from_disk_serve_same_predictions() {
    let dir = TempDir::new().unwrap();
    let set = trained_set();
    set.save(dir.path()).unwrap();

    let in_memory = router(Arc::new(AppState::new(Predictor::new(set).unwrap())));
    let state = AppState::load(dir.path());
    assert!(state.model_loaded());
    let from_disk = router(Arc::new(state));

    for body in [
        r#"{"text": "Update bank details urgently"}"#,
        r#"{"text": "Meeting notes attached"}"#,
    ] {
        let (status_a, a) = post_predict(in_memory.clone(), body).await;
        let (status_b, b) = post_predict(from_disk.clone(), body).await;
        assert_eq!(status_a, StatusCode::OK);
        assert_eq!(status_b, StatusCode::OK);
        assert_eq!(a, b);
    }
}

#[tokio::test]
async fn test_health_reports_model_state() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model_loaded"], true);
    assert_eq!(json["service"], "phish-api");

    let degraded = router(Arc::new(AppState::unavailable("missing artifacts")));
    let response = degraded
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["model_loaded"], false);
}
