use phish_rs::artifacts::{ArtifactPaths, MODEL_FILE, SCALER_FILE, VECTORIZER_FILE};
use phish_rs::{training, ArtifactSet, Predictor, TrainingConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PHISHING_BODIES: &[&str] = &[
    "Your account has been suspended. Click http://secure-login.example/verify to restore access",
    "Urgent: confirm your password and bank details at https://bank-update.example today",
    "You have won a lottery prize! Send your details to claims@prize.example to collect",
    "Dear customer, verify your billing information immediately or your account will be closed",
    "Transfer fee required to release your inheritance funds, reply to agent@funds.example",
];

const BENIGN_BODIES: &[&str] = &[
    "Notes from the project sync are attached, see you at the Thursday meeting",
    "Are we still on for lunch tomorrow? The new place near the office looks good",
    "The quarterly report draft is ready for review, comments welcome before Friday",
    "Reminder: team offsite planning call moved to next week, agenda unchanged",
    "Thanks for the photos from the weekend hike, the lake view was great",
];

fn write_dataset(dir: &Path, name: &str, rows: &[(String, String, u8)]) -> PathBuf {
    let path = dir.join(name);
    let mut writer = csv::Writer::from_path(&path).unwrap();
    writer.write_record(["sender", "subject", "body", "label"]).unwrap();
    for (subject, body, label) in rows {
        let label = label.to_string();
        writer
            .write_record(["someone@example.com", subject.as_str(), body.as_str(), label.as_str()])
            .unwrap();
    }
    writer.flush().unwrap();
    path
}

fn fixture(dir: &Path) -> Vec<PathBuf> {
    let mut first = Vec::new();
    let mut second = Vec::new();
    for round in 0..4 {
        for (i, body) in PHISHING_BODIES.iter().enumerate() {
            let target = if round % 2 == 0 { &mut first } else { &mut second };
            target.push((format!("Action required {}", i), body.to_string(), 1));
        }
        for (i, body) in BENIGN_BODIES.iter().enumerate() {
            let target = if round % 2 == 0 { &mut first } else { &mut second };
            target.push((format!("Hello team {}", i), body.to_string(), 0));
        }
    }
    vec![
        write_dataset(dir, "ceas.csv", &first),
        write_dataset(dir, "fraud.csv", &second),
    ]
}

fn config(datasets: Vec<PathBuf>, output_dir: PathBuf) -> TrainingConfig {
    let mut config = TrainingConfig::development();
    config.datasets = datasets;
    config.output_dir = output_dir;
    config
}

#[test]
fn test_training_writes_consistent_artifacts() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let config = config(fixture(data.path()), out.path().to_path_buf());

    let report = training::run(&config).unwrap();

    assert_eq!(report.n_examples, 40);
    assert_eq!(report.n_test, 8);
    assert_eq!(report.n_train, 32);
    assert_eq!(report.n_features, report.vocabulary_size + 1);
    assert_eq!(report.preview.len(), 5);
    assert!(report.accuracy >= 0.75, "accuracy {}", report.accuracy);
    assert_eq!(report.artifacts, ArtifactPaths::in_dir(out.path()));

    for file in [VECTORIZER_FILE, SCALER_FILE, MODEL_FILE] {
        assert!(out.path().join(file).exists(), "{} missing", file);
    }

    let set = ArtifactSet::load(out.path()).unwrap();
    assert_eq!(set.set_id, report.set_id);
    assert_eq!(set.scaler.n_features(), report.n_features);
    assert_eq!(set.model.n_features(), report.n_features);
}

#[test]
fn test_report_serializes_to_json() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let report = training::run(&config(fixture(data.path()), out.path().to_path_buf())).unwrap();

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["set_id"], report.set_id.to_string());
    assert_eq!(json["n_test"], 8);
    assert_eq!(json["vocabulary_size"], report.vocabulary_size);
    assert_eq!(json["accuracy"], report.accuracy);
    assert_eq!(json["report"]["classes"].as_array().unwrap().len(), 2);
    assert_eq!(json["preview"].as_array().unwrap().len(), 5);
    assert!(json["preview"][0]["confidence"].is_f64());
    assert!(json.get("artifacts").is_none());
}

#[test]
fn test_reloaded_model_scores_emails() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    training::run(&config(fixture(data.path()), out.path().to_path_buf())).unwrap();

    let predictor = Predictor::load(out.path()).unwrap();

    // subject + body of known training emails
    let phishing = predictor
        .predict(&format!("Action required 0 {}", PHISHING_BODIES[0]))
        .unwrap();
    assert_eq!(phishing.prediction, 1);

    let benign = predictor
        .predict(&format!("Hello team 1 {}", BENIGN_BODIES[1]))
        .unwrap();
    assert_eq!(benign.prediction, 0);

    for p in [phishing, benign] {
        assert!((0.0..=100.0).contains(&p.probability));
    }
}

#[test]
fn test_training_is_reproducible() {
    let data = TempDir::new().unwrap();
    let datasets = fixture(data.path());
    let out_a = TempDir::new().unwrap();
    let out_b = TempDir::new().unwrap();

    let a = training::run(&config(datasets.clone(), out_a.path().to_path_buf())).unwrap();
    let b = training::run(&config(datasets, out_b.path().to_path_buf())).unwrap();

    assert_eq!(a.accuracy, b.accuracy);
    assert_eq!(a.preview, b.preview);
    assert_ne!(a.set_id, b.set_id);

    let pa = Predictor::load(out_a.path()).unwrap();
    let pb = Predictor::load(out_b.path()).unwrap();
    for text in ["claim your lottery prize now", "weekend hike photos", ""] {
        assert_eq!(pa.predict(text).unwrap(), pb.predict(text).unwrap());
    }
}

#[test]
fn test_missing_dataset_fails_without_artifacts() {
    let out = TempDir::new().unwrap();
    let config = config(
        vec![PathBuf::from("/nonexistent/data.csv")],
        out.path().to_path_buf(),
    );

    assert!(training::run(&config).is_err());
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}
