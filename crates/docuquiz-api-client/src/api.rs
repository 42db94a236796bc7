//! Domain methods for the DocuQuiz API client: quiz generation, wrong-answer notes,
//! and account sign-up / login.
//!
//! Every method validates its input before any request is sent and maps transport
//! failures to a typed error, preferring the backend's own message.

use crate::{ApiClient, Auth};
use docuquiz_core::models::{
    AuthSession, GenerateQuizRequest, GenerationOptions, LoginRequest, QuizHandle, SignupRequest,
    WrongAnswerNote,
};
use docuquiz_core::validation::{validate_generation_request, validate_identifier};
use docuquiz_core::{ClientError, ClientResult};

pub const GENERATE_QUIZ_PATH: &str = "/quiz/generate";
pub const WRONG_ANSWER_NOTES_PATH: &str = "/wrong-answer-notes";
pub const SIGNUP_PATH: &str = "/auth/signup";
pub const LOGIN_PATH: &str = "/auth/login";

const GENERATION_FAILED_MESSAGE: &str = "퀴즈 생성에 실패했습니다.";
const REGENERATION_FAILED_MESSAGE: &str = "퀴즈 재생성에 실패했습니다.";
const NOTES_FAILED_MESSAGE: &str = "오답노트 목록을 불러오는 데 실패했습니다.";
const SIGNUP_FAILED_MESSAGE: &str = "회원가입에 실패했습니다.";
const LOGIN_FAILED_MESSAGE: &str = "로그인에 실패했습니다.";

impl ApiClient {
    /// Generate a quiz from an uploaded file. One request, one terminal response.
    pub async fn generate_quiz(
        &self,
        file_id: &str,
        options: &GenerationOptions,
    ) -> ClientResult<QuizHandle> {
        validate_generation_request(file_id, options)?;
        self.require_backend()?;

        tracing::info!(
            file_id,
            question_count = options.question_count,
            difficulty = %options.difficulty,
            "Requesting quiz generation"
        );

        let body = GenerateQuizRequest { file_id, options };
        let quiz: QuizHandle = self
            .post_json_with_timeout(GENERATE_QUIZ_PATH, &body, self.generation_timeout())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, file_id, "Quiz generation failed");
                ClientError::Generation(e.message_or(GENERATION_FAILED_MESSAGE))
            })?;

        if quiz.id.trim().is_empty() {
            return Err(ClientError::Generation(
                GENERATION_FAILED_MESSAGE.to_string(),
            ));
        }

        Ok(quiz)
    }

    /// List the signed-in user's wrong-answer notes.
    pub async fn get_wrong_answer_notes(&self) -> ClientResult<Vec<WrongAnswerNote>> {
        self.require_backend()?;
        self.get(WRONG_ANSWER_NOTES_PATH, &[]).await.map_err(|e| {
            tracing::warn!(error = %e, "Listing wrong-answer notes failed");
            ClientError::Notes(e.message_or(NOTES_FAILED_MESSAGE))
        })
    }

    /// Generate a fresh quiz from the questions of a wrong-answer note.
    pub async fn regenerate_from_note(&self, note_id: &str) -> ClientResult<QuizHandle> {
        validate_identifier("Note ID", note_id)?;
        self.require_backend()?;

        let path = format!(
            "{}/{}/regenerate",
            WRONG_ANSWER_NOTES_PATH,
            urlencoding::encode(note_id)
        );
        let quiz: QuizHandle = self
            .post_json_with_timeout(&path, &serde_json::json!({}), self.generation_timeout())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, note_id, "Quiz regeneration failed");
                ClientError::Generation(e.message_or(REGENERATION_FAILED_MESSAGE))
            })?;

        Ok(quiz)
    }

    /// Register an anonymous user and sign the session in with the issued token.
    pub async fn sign_up(&self, display_name: Option<&str>) -> ClientResult<AuthSession> {
        self.require_backend()?;
        let body = SignupRequest {
            display_name: display_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from),
        };
        let session: AuthSession = self.post_json(SIGNUP_PATH, &body).await.map_err(|e| {
            tracing::warn!(error = %e, "Sign-up failed");
            ClientError::Auth(e.message_or(SIGNUP_FAILED_MESSAGE))
        })?;

        self.session().sign_in(Auth::Bearer(session.token.clone()));
        tracing::info!(user_id = %session.user_id, "Signed up");
        Ok(session)
    }

    /// Verify an issued token and sign the session in with the returned one.
    pub async fn login(&self, token: &str) -> ClientResult<AuthSession> {
        validate_identifier("Token", token)?;
        self.require_backend()?;

        let body = LoginRequest {
            token: token.trim().to_string(),
        };
        let session: AuthSession = self.post_json(LOGIN_PATH, &body).await.map_err(|e| {
            tracing::warn!(error = %e, "Login failed");
            ClientError::Auth(e.message_or(LOGIN_FAILED_MESSAGE))
        })?;

        self.session().sign_in(Auth::Bearer(session.token.clone()));
        tracing::info!(user_id = %session.user_id, "Logged in");
        Ok(session)
    }

    /// Clear the session credential. Local only.
    pub fn logout(&self) {
        self.session().sign_out();
        tracing::info!("Logged out");
    }
}
