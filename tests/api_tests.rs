// Wire-level tests for the analyzer API client, driven against a mock server.

use resume_match::core::executor::{ExecutorError, RetryPolicy};
use resume_match::models::{AnalysisRequest, LoginRequest, ResumeFile, Session};
use resume_match::services::{ApiClient, ApiError};
use std::time::Duration;

const REPORT_BODY: &str = r#"{
    "suitability_score": 85,
    "is_suitable": true,
    "key_strengths": ["X"],
    "key_gaps": ["Y"],
    "recommendation": "Z"
}"#;

fn test_client(base_url: String) -> ApiClient {
    // Short backoff so retry tests stay fast; the schedule itself is
    // covered by the RetryPolicy unit tests.
    ApiClient::new(
        base_url,
        Duration::from_secs(5),
        RetryPolicy::new(3, Duration::from_millis(10)),
    )
}

fn request() -> AnalysisRequest {
    AnalysisRequest {
        resume: ResumeFile::new("resume.pdf", vec![0u8; 2 * 1024 * 1024]),
        job_description: "Senior Rust engineer".to_string(),
    }
}

fn session() -> Session {
    Session {
        token: "tok-123".into(),
        username: "jdoe".into(),
    }
}

#[tokio::test]
async fn test_analyze_success_sends_single_authorized_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/analyze")
        .match_header("authorization", "Bearer tok-123")
        .match_body(mockito::Matcher::Regex("Senior Rust engineer".into()))
        .with_status(200)
        .with_body(REPORT_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = test_client(server.url());
    let s = session();
    let outcome = client.analyze(&request(), Some(&s)).await.unwrap();

    mock.assert_async().await;
    match outcome {
        resume_match::models::AnalysisOutcome::Complete(report) => {
            assert_eq!(report.suitability_score, 85);
            assert!(report.is_suitable);
            assert_eq!(report.key_strengths, vec!["X"]);
            assert_eq!(report.key_gaps, vec!["Y"]);
            assert_eq!(report.recommendation, "Z");
        }
        other => panic!("expected Complete, got {:?}", other),
    }
}

#[tokio::test]
async fn test_analyze_accepts_double_encoded_body() {
    let mut server = mockito::Server::new_async().await;
    let wrapped = serde_json::to_string(REPORT_BODY).unwrap();
    let _mock = server
        .mock("POST", "/api/analyze")
        .with_status(200)
        .with_body(wrapped)
        .create_async()
        .await;

    let client = test_client(server.url());
    let s = session();
    let outcome = client.analyze(&request(), Some(&s)).await.unwrap();
    match outcome {
        resume_match::models::AnalysisOutcome::Complete(report) => {
            assert_eq!(report.suitability_score, 85);
        }
        other => panic!("expected Complete, got {:?}", other),
    }
}

#[tokio::test]
async fn test_analyze_auth_failure_makes_exactly_one_attempt() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/analyze")
        .with_status(401)
        .with_body(r#"{"error": "token expired"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = test_client(server.url());
    let s = session();
    let err = client.analyze(&request(), Some(&s)).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, ExecutorError::Auth { status: 401 }));
}

#[tokio::test]
async fn test_analyze_exhausts_retries_and_propagates_error_field() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/analyze")
        .with_status(500)
        .with_body(r#"{"error": "Internal server error during analysis. Check service logs."}"#)
        .expect(3)
        .create_async()
        .await;

    let client = test_client(server.url());
    let s = session();
    let err = client.analyze(&request(), Some(&s)).await.unwrap_err();

    mock.assert_async().await;
    assert_eq!(
        err.to_string(),
        "Internal server error during analysis. Check service logs."
    );
}

#[tokio::test]
async fn test_analyze_generic_message_for_unparseable_error_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/analyze")
        .with_status(502)
        .with_body("<html>bad gateway</html>")
        .expect(3)
        .create_async()
        .await;

    let client = test_client(server.url());
    let s = session();
    let err = client.analyze(&request(), Some(&s)).await.unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.to_string(), "HTTP error! Status: 502");
}

#[tokio::test]
async fn test_pending_timeout_is_terminal_and_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/analyze")
        .with_status(200)
        .with_body(r#"{"status": "PENDING_TIMEOUT", "message": "still scoring"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = test_client(server.url());
    let s = session();
    let outcome = client.analyze(&request(), Some(&s)).await.unwrap();

    mock.assert_async().await;
    assert!(outcome.is_pending());

    // The pending notice directs to the history; no score card
    let rendered = resume_match::cli::render::render_outcome(&outcome);
    assert!(rendered.contains("history"));
    assert!(!rendered.contains("Score:"));
}

#[tokio::test]
async fn test_analyze_without_session_omits_bearer_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/analyze")
        .match_header("authorization", mockito::Matcher::Missing)
        .with_status(200)
        .with_body(REPORT_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = test_client(server.url());
    let outcome = client.analyze(&request(), None).await.unwrap();

    mock.assert_async().await;
    assert!(!outcome.is_pending());
}

#[tokio::test]
async fn test_login_returns_session() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/auth/login")
        .match_body(mockito::Matcher::JsonString(
            r#"{"username": "jdoe", "password": "hunter22"}"#.into(),
        ))
        .with_status(200)
        .with_body(r#"{"token": "jwt-abc", "username": "jdoe"}"#)
        .create_async()
        .await;

    let client = test_client(server.url());
    let session = client
        .login(&LoginRequest {
            username: "jdoe".into(),
            password: "hunter22".into(),
        })
        .await
        .unwrap();

    assert_eq!(session.token, "jwt-abc");
    assert_eq!(session.username, "jdoe");
}

#[tokio::test]
async fn test_login_failure_carries_backend_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/auth/login")
        .with_status(401)
        .with_body(r#"{"error": "Invalid username or password"}"#)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client
        .login(&LoginRequest {
            username: "jdoe".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { status: 401 }));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/auth/register")
        .with_status(400)
        .with_body(r#"{"error": "Username is already taken!"}"#)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client
        .register(&resume_match::models::RegisterRequest {
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            full_name: "Jane Doe".into(),
            password: "hunter22".into(),
        })
        .await
        .unwrap_err();

    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Username is already taken!");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_history_sends_bearer_and_parses_rows() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/profile/history")
        .match_header("authorization", "Bearer tok-123")
        .with_status(200)
        .with_body(
            r#"[
                {"id": 2, "jobTitle": "Backend Engineer", "suitabilityScore": 72,
                 "createdAt": "2026-08-01T10:15:30", "fileUrl": "https://files/2.pdf"},
                {"id": 1, "jobTitle": null, "suitabilityScore": null,
                 "createdAt": "2026-07-30T08:00:00"}
            ]"#,
        )
        .create_async()
        .await;

    let client = test_client(server.url());
    let s = session();
    let history = client.history(&s).await.unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, 2);
    assert_eq!(history[0].suitability_score, Some(72));
    assert!(history[1].job_title.is_none());
}

#[tokio::test]
async fn test_admin_users_passes_pagination() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/admin/users")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("page".into(), "2".into()),
            mockito::Matcher::UrlEncoded("size".into(), "10".into()),
        ]))
        .match_header("authorization", "Bearer tok-123")
        .with_status(200)
        .with_body(
            r#"{
                "users": [{"id": 1, "username": "jdoe", "email": "jdoe@example.com",
                           "fullName": "Jane Doe", "role": "USER", "analysisCount": 4}],
                "currentPage": 2,
                "totalItems": 21,
                "totalPages": 3
            }"#,
        )
        .expect(1)
        .create_async()
        .await;

    let client = test_client(server.url());
    let s = session();
    let page = client.admin_users(&s, 2, 10).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.current_page, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.users[0].username, "jdoe");
    assert_eq!(page.users[0].analysis_count, 4);
}

#[tokio::test]
async fn test_admin_forbidden_maps_to_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/admin/stats")
        .with_status(403)
        .create_async()
        .await;

    let client = test_client(server.url());
    let s = session();
    let err = client.admin_stats(&s).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { status: 403 }));
}
