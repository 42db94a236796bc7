//! Quiz generation, wrong-answer notes and account endpoint tests.
//!
//! Run with: `cargo test -p docuquiz-api-client --test quiz_api_test`

use docuquiz_api_client::{ApiClient, Auth, Session};
use docuquiz_core::models::{Difficulty, GenerationOptions, QuestionType};
use docuquiz_core::{ClientError, UploadStage};
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

fn client(server: &mockito::ServerGuard, session: Session) -> ApiClient {
    ApiClient::new(server.url(), session, Duration::from_secs(5))
        .unwrap()
        .with_generation_timeout(Duration::from_secs(10))
}

fn options(question_count: u32) -> GenerationOptions {
    GenerationOptions {
        question_count,
        types: vec![QuestionType::MultipleChoice],
        difficulty: Difficulty::Normal,
    }
}

#[tokio::test]
async fn generate_quiz_posts_file_id_and_options() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/quiz/generate")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::Json(json!({
            "fileId": "file-42",
            "questionCount": 10,
            "types": ["객관식"],
            "difficulty": "보통"
        })))
        .with_status(201)
        .with_body(json!({ "id": "quiz-7", "title": "lecture" }).to_string())
        .create_async()
        .await;

    let quiz = client(&server, Session::with_auth(Auth::Bearer("test-token".into())))
        .generate_quiz("file-42", &options(10))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(quiz.id, "quiz-7");
    assert_eq!(quiz.title.as_deref(), Some("lecture"));
}

#[tokio::test]
async fn generate_quiz_validates_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/quiz/generate")
        .expect(0)
        .create_async()
        .await;
    let api = client(&server, Session::new());

    for count in [4, 21] {
        let err = api.generate_quiz("file-42", &options(count)).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)), "{}", err);
    }

    let no_types = GenerationOptions {
        types: vec![],
        ..options(10)
    };
    let err = api.generate_quiz("file-42", &no_types).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let err = api.generate_quiz("", &options(10)).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    mock.assert_async().await;
}

#[tokio::test]
async fn generate_quiz_surfaces_backend_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/quiz/generate")
        .with_status(422)
        .with_body(json!({ "message": "문서에서 텍스트를 추출할 수 없습니다." }).to_string())
        .create_async()
        .await;

    let err = client(&server, Session::new())
        .generate_quiz("file-42", &options(10))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Generation(_)));
    assert_eq!(err.stage(), Some(UploadStage::Generation));
    assert_eq!(err.to_string(), "문서에서 텍스트를 추출할 수 없습니다.");
}

#[tokio::test]
async fn generate_quiz_falls_back_to_localized_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/quiz/generate")
        .with_status(500)
        .with_body(json!({ "error": "internal" }).to_string())
        .create_async()
        .await;

    let err = client(&server, Session::new())
        .generate_quiz("file-42", &options(10))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "퀴즈 생성에 실패했습니다.");
}

#[tokio::test]
async fn generate_quiz_rejects_handle_without_id() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/quiz/generate")
        .with_status(200)
        .with_body(json!({ "id": "" }).to_string())
        .create_async()
        .await;

    let err = client(&server, Session::new())
        .generate_quiz("file-42", &options(10))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Generation(_)));
}

#[tokio::test]
async fn lists_wrong_answer_notes() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/wrong-answer-notes")
        .with_status(200)
        .with_body(
            json!([
                {
                    "id": "note-1",
                    "createdAt": "2025-04-02T00:00:00Z",
                    "quizResult": { "quiz": { "id": "quiz-1", "title": "미적분 기초" } }
                }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let notes = client(&server, Session::new())
        .get_wrong_answer_notes()
        .await
        .unwrap();

    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].quiz_result.quiz.title, "미적분 기초");
}

#[tokio::test]
async fn notes_failure_uses_fallback() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/wrong-answer-notes")
        .with_status(503)
        .create_async()
        .await;

    let err = client(&server, Session::new())
        .get_wrong_answer_notes()
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Notes(_)));
    assert_eq!(err.to_string(), "오답노트 목록을 불러오는 데 실패했습니다.");
}

#[tokio::test]
async fn regenerates_quiz_from_note() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/wrong-answer-notes/note-1/regenerate")
        .with_status(201)
        .with_body(json!({ "id": "quiz-9" }).to_string())
        .create_async()
        .await;
    let api = client(&server, Session::new());

    let quiz = api.regenerate_from_note("note-1").await.unwrap();
    assert_eq!(quiz.id, "quiz-9");
    mock.assert_async().await;

    let err = api.regenerate_from_note("").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn sign_up_populates_session_for_later_calls() {
    let mut server = mockito::Server::new_async().await;
    let signup = server
        .mock("POST", "/auth/signup")
        .match_body(Matcher::Json(json!({ "displayName": "민수" })))
        .with_status(201)
        .with_body(json!({ "token": "issued-token", "userId": "user-1" }).to_string())
        .create_async()
        .await;
    let notes = server
        .mock("GET", "/wrong-answer-notes")
        .match_header("authorization", "Bearer issued-token")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let session = Session::new();
    let api = client(&server, session.clone());

    let auth = api.sign_up(Some(" 민수 ")).await.unwrap();
    assert_eq!(auth.user_id, "user-1");
    assert_eq!(session.auth(), Some(Auth::Bearer("issued-token".to_string())));

    assert!(api.get_wrong_answer_notes().await.unwrap().is_empty());
    signup.assert_async().await;
    notes.assert_async().await;

    api.logout();
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn login_replaces_session_token() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .match_body(Matcher::Json(json!({ "token": "old-token" })))
        .with_status(200)
        .with_body(
            json!({ "token": "fresh-token", "userId": "user-1", "displayName": "민수" }).to_string(),
        )
        .create_async()
        .await;

    let session = Session::new();
    let auth = client(&server, session.clone())
        .login("old-token")
        .await
        .unwrap();

    assert_eq!(auth.display_name.as_deref(), Some("민수"));
    assert_eq!(session.auth(), Some(Auth::Bearer("fresh-token".to_string())));
}

#[tokio::test]
async fn failed_login_leaves_session_untouched() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .with_status(401)
        .with_body(json!({ "message": "유효하지 않은 토큰입니다." }).to_string())
        .create_async()
        .await;

    let session = Session::with_auth(Auth::Bearer("current".to_string()));
    let err = client(&server, session.clone())
        .login("bogus")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Auth(_)));
    assert_eq!(err.to_string(), "유효하지 않은 토큰입니다.");
    assert_eq!(session.auth(), Some(Auth::Bearer("current".to_string())));
}

#[tokio::test]
async fn unconfigured_backend_fails_with_config_error() {
    let api = ApiClient::from_config(&docuquiz_core::ClientConfig::mock(), Session::new()).unwrap();

    let err = api.generate_quiz("file-42", &options(10)).await.unwrap_err();
    assert!(matches!(err, ClientError::Config(_)));
    assert!(err.to_string().contains("DOCUQUIZ_API_BASE_URL"), "{}", err);

    assert!(matches!(
        api.get_wrong_answer_notes().await,
        Err(ClientError::Config(_))
    ));
    assert!(matches!(api.login("token").await, Err(ClientError::Config(_))));
}
