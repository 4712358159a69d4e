//! Upload/download behavior against an in-process backend double.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::Multipart;
use axum::http::{header, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use policy_artifact_client::{ArtifactClient, ArtifactUpload, MAX_ARTIFACT_SIZE_BYTES};
use policy_client_errors::PolicyClientError;
use policy_session::{MemorySessionStore, SessionStore};
use policy_service_client::PolicyServiceClient;
use serde_json::json;

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base: &str) -> ArtifactClient {
    let session = Arc::new(MemorySessionStore::with_token("token-123"));
    ArtifactClient::new(PolicyServiceClient::new(base, session))
}

#[tokio::test]
async fn oversized_file_is_rejected_before_any_request() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/api/v1/policy/234567/upload-artifacts",
        post(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!({"id": 1, "fileName": "a.pdf"}))
            }
        }),
    );
    let base = spawn(app).await;
    let client = client_for(&base);

    let files = vec![
        ArtifactUpload::new("small.pdf", vec![0u8; 16]),
        ArtifactUpload::new("huge.pdf", vec![0u8; MAX_ARTIFACT_SIZE_BYTES as usize + 1]),
    ];
    let err = client.upload_artifacts("234567", &files).await.unwrap_err();
    match err {
        PolicyClientError::Validation { message } => {
            assert!(message.contains("huge.pdf"), "message: {message}");
            assert!(message.contains("1048576"), "message: {message}");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_batch_is_rejected() {
    let client = client_for("http://127.0.0.1:9");
    let err = client.upload_artifacts("234567", &[]).await.unwrap_err();
    assert!(matches!(err, PolicyClientError::Validation { .. }));
}

#[tokio::test]
async fn uploads_go_out_one_multipart_request_per_file() {
    let seen: Arc<std::sync::Mutex<Vec<String>>> = Arc::default();
    let recorder = seen.clone();
    let app = Router::new().route(
        "/api/v1/policy/234567/upload-artifacts",
        post(move |mut multipart: Multipart| {
            let recorder = recorder.clone();
            async move {
                let field = multipart.next_field().await.unwrap().unwrap();
                assert_eq!(field.name(), Some("file"));
                let file_name = field.file_name().unwrap().to_string();
                let size = field.bytes().await.unwrap().len();
                recorder.lock().unwrap().push(file_name.clone());
                Json(json!({"id": size, "fileName": file_name, "size": size}))
            }
        }),
    );
    let base = spawn(app).await;
    let client = client_for(&base);

    let files = vec![
        ArtifactUpload::new("claim-form.pdf", vec![0u8; 10])
            .with_content_type("application/pdf"),
        ArtifactUpload::new("nominee-id.png", vec![0u8; 20]),
    ];
    let uploaded = client.upload_artifacts("234567", &files).await.unwrap();

    assert_eq!(uploaded.len(), 2);
    assert_eq!(uploaded[0].file_name, "claim-form.pdf");
    assert_eq!(uploaded[1].file_name, "nominee-id.png");
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        ["claim-form.pdf", "nominee-id.png"]
    );
}

#[tokio::test]
async fn batch_stops_at_first_failing_file() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/api/v1/policy/234567/upload-artifacts",
        post(move |mut multipart: Multipart| {
            let counter = counter.clone();
            async move {
                while multipart.next_field().await.unwrap().is_some() {}
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    (StatusCode::OK, Json(json!({"id": 1, "fileName": "first.pdf"})))
                } else {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"message": "disk full"})),
                    )
                }
            }
        }),
    );
    let base = spawn(app).await;
    let client = client_for(&base);

    let files = vec![
        ArtifactUpload::new("first.pdf", vec![0u8; 8]),
        ArtifactUpload::new("second.pdf", vec![0u8; 8]),
        ArtifactUpload::new("third.pdf", vec![0u8; 8]),
    ];
    let err = client.upload_artifacts("234567", &files).await.unwrap_err();
    match err {
        PolicyClientError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "disk full");
        }
        other => panic!("expected Http, got {other:?}"),
    }
    // The third file is never sent.
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn download_saves_under_suggested_filename() {
    let app = Router::new().route(
        "/api/v1/policy/234567/download-artifacts/7",
        get(|| async {
            (
                [(
                    header::CONTENT_DISPOSITION,
                    r#"attachment; filename="report.csv""#,
                )],
                "policyNo,premium\nLP234567,15000\n",
            )
        }),
    );
    let base = spawn(app).await;
    let client = client_for(&base);

    let dir = tempfile::tempdir().unwrap();
    let path = client
        .download_artifact("234567", 7, "fallback.bin", dir.path())
        .await
        .unwrap();

    assert_eq!(path, dir.path().join("report.csv"));
    let saved = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(saved, "policyNo,premium\nLP234567,15000\n");
}

#[tokio::test]
async fn download_uses_default_filename_without_header() {
    let app = Router::new().route(
        "/api/v1/policy/234567/download-artifacts/42",
        get(|| async { "raw bytes" }),
    );
    let base = spawn(app).await;
    let client = client_for(&base);

    let dir = tempfile::tempdir().unwrap();
    let path = client
        .download_artifact("234567", 42, "claim-form.pdf", dir.path())
        .await
        .unwrap();
    assert_eq!(path, dir.path().join("claim-form.pdf"));
}

#[tokio::test]
async fn excel_export_posts_records_and_saves_workbook() {
    let app = Router::new().route(
        "/api/v1/policy/download-all-policies-excel",
        post(|Json(records): Json<serde_json::Value>| async move {
            assert_eq!(records.as_array().unwrap().len(), 2);
            (
                [(
                    header::CONTENT_DISPOSITION,
                    r#"attachment; filename="policies.xlsx""#,
                )],
                vec![0x50u8, 0x4b, 0x03, 0x04],
            )
        }),
    );
    let base = spawn(app).await;
    let client = client_for(&base);

    let records: Vec<models_policy::RawRecord> = vec![
        serde_json::from_value(json!({"policyNo": "LP234567"})).unwrap(),
        serde_json::from_value(json!({"policyNo": "CC123456"})).unwrap(),
    ];
    let dir = tempfile::tempdir().unwrap();
    let path = client
        .download_all_policies_excel(&records, dir.path())
        .await
        .unwrap();

    assert_eq!(path, dir.path().join("policies.xlsx"));
    let saved = tokio::fs::read(&path).await.unwrap();
    assert_eq!(saved, [0x50, 0x4b, 0x03, 0x04]);
}

#[tokio::test]
async fn unauthorized_download_expires_the_session() {
    let app = Router::new().route(
        "/api/v1/policy/234567/download-artifacts/7",
        get(|| async { StatusCode::UNAUTHORIZED }),
    );
    let base = spawn(app).await;

    let session = Arc::new(MemorySessionStore::with_token("token-123"));
    let client = ArtifactClient::new(PolicyServiceClient::new(&base, session.clone()));

    let dir = tempfile::tempdir().unwrap();
    let err = client
        .download_artifact("234567", 7, "claim-form.pdf", dir.path())
        .await
        .unwrap_err();
    assert!(err.is_auth_expired());
    assert_eq!(session.token(), None);
}

#[tokio::test]
async fn list_and_delete_round_trip() {
    let app = Router::new()
        .route(
            "/api/v1/policy/234567/list-artifacts",
            get(|| async {
                Json(json!({"content": [
                    {"id": 7, "fileName": "claim-form.pdf", "size": 1024},
                    {"id": 8, "fileName": "nominee-id.png", "size": 2048},
                ]}))
            }),
        )
        .route(
            "/api/v1/policy/234567/delete-artifact",
            delete(|query: axum::extract::RawQuery| async move {
                assert_eq!(query.0.as_deref(), Some("artifactId=7"));
                StatusCode::NO_CONTENT
            }),
        );
    let base = spawn(app).await;
    let client = client_for(&base);

    let artifacts = client.list_artifacts("234567", 0, 50).await.unwrap();
    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0].file_name, "claim-form.pdf");

    client.delete_artifact("234567", 7).await.unwrap();
}
