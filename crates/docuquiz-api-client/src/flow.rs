//! Upload flow orchestrator
//!
//! Runs one upload attempt: presigned credential, object-store transfer, upload
//! confirmation, then (optionally) quiz generation. Each stage starts only after the
//! previous one succeeded, since its output (key, file id) is the next stage's input.
//! The first failure ends the attempt; nothing is retried.

use docuquiz_core::models::{ConfirmUploadRequest, GenerationOptions, QuizHandle, UploadConfirmation};
use docuquiz_core::validation::{validate_generation_options, validate_upload};
use docuquiz_core::{ClientError, ClientResult, ErrorMetadata, LogLevel, UploadStage};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::upload::{UploadSource, UploadStrategy};
use crate::ApiClient;

/// State of an upload attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FlowState {
    Idle,
    CredentialRequested,
    CredentialObtained,
    Uploading,
    Uploaded,
    ConfirmPending,
    Confirmed,
    GenerationPending,
    GenerationComplete,
    Failed { stage: UploadStage, message: String },
}

impl FlowState {
    /// Terminal states end the attempt. `Confirmed` is terminal only when no
    /// generation was requested, so it is not listed here.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::GenerationComplete | FlowState::Failed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FlowState::Failed { .. })
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowState::Idle => f.write_str("idle"),
            FlowState::CredentialRequested => f.write_str("requesting upload credential"),
            FlowState::CredentialObtained => f.write_str("upload credential obtained"),
            FlowState::Uploading => f.write_str("uploading file"),
            FlowState::Uploaded => f.write_str("file uploaded"),
            FlowState::ConfirmPending => f.write_str("confirming upload"),
            FlowState::Confirmed => f.write_str("upload confirmed"),
            FlowState::GenerationPending => f.write_str("generating quiz"),
            FlowState::GenerationComplete => f.write_str("quiz generated"),
            FlowState::Failed { stage, message } => write!(f, "{} failed: {}", stage, message),
        }
    }
}

/// Result of a successful attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowOutcome {
    pub confirmation: UploadConfirmation,
    /// Present when generation was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz: Option<QuizHandle>,
}

type TransitionObserver = Box<dyn Fn(&FlowState) + Send + Sync>;

/// One upload attempt. Not reusable: a second `run` is rejected.
pub struct UploadFlow {
    uploads: Arc<dyn UploadStrategy>,
    api: ApiClient,
    history: Vec<FlowState>,
    observer: Option<TransitionObserver>,
}

impl UploadFlow {
    pub fn new(uploads: Arc<dyn UploadStrategy>, api: ApiClient) -> Self {
        Self {
            uploads,
            api,
            history: vec![FlowState::Idle],
            observer: None,
        }
    }

    /// Call `observer` on every state transition.
    pub fn on_transition(mut self, observer: impl Fn(&FlowState) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &FlowState {
        self.history.last().unwrap_or(&FlowState::Idle)
    }

    /// Every state the attempt went through, starting with `Idle`.
    pub fn history(&self) -> &[FlowState] {
        &self.history
    }

    /// Run the attempt. Generation is skipped when `options` is `None`, leaving the
    /// attempt at `Confirmed`.
    pub async fn run(
        &mut self,
        source: &UploadSource,
        options: Option<&GenerationOptions>,
    ) -> ClientResult<FlowOutcome> {
        if self.state() != &FlowState::Idle {
            return Err(ClientError::Validation(
                "This upload attempt has already run. Start a new one".to_string(),
            ));
        }

        // Reject bad input before anything is uploaded.
        if let Some(options) = options {
            let checked = validate_generation_options(options);
            self.guard(UploadStage::Generation, checked)?;
            let backend = self.api.require_backend();
            self.guard(UploadStage::Generation, backend)?;
        }
        let checked = validate_upload(&source.file_name, &source.mime_type, source.size());
        self.guard(UploadStage::Credential, checked)?;

        let uploads = Arc::clone(&self.uploads);

        self.transition(FlowState::CredentialRequested);
        let presigned = uploads.request_presigned_upload(&source.file_name).await;
        let presigned = self.guard(UploadStage::Credential, presigned)?;
        self.transition(FlowState::CredentialObtained);

        self.transition(FlowState::Uploading);
        let uploaded = uploads.upload_file_to_s3(&presigned, source).await;
        let s3_key = self.guard(UploadStage::Transfer, uploaded)?;
        self.transition(FlowState::Uploaded);

        self.transition(FlowState::ConfirmPending);
        let request = ConfirmUploadRequest {
            file_name: source.file_name.clone(),
            s3_key,
            mime_type: source.content_type().to_string(),
            size: source.size(),
        };
        let confirmed = uploads.confirm_upload_metadata(&request).await;
        let confirmation = self.guard(UploadStage::Confirmation, confirmed)?;
        self.transition(FlowState::Confirmed);

        let Some(options) = options else {
            return Ok(FlowOutcome {
                confirmation,
                quiz: None,
            });
        };

        self.transition(FlowState::GenerationPending);
        let api = self.api.clone();
        let generated = api.generate_quiz(&confirmation.id, options).await;
        let quiz = self.guard(UploadStage::Generation, generated)?;
        self.transition(FlowState::GenerationComplete);

        Ok(FlowOutcome {
            confirmation,
            quiz: Some(quiz),
        })
    }

    fn transition(&mut self, state: FlowState) {
        tracing::info!(state = %state, "Upload flow transition");
        if let Some(observer) = &self.observer {
            observer(&state);
        }
        self.history.push(state);
    }

    /// Pass a stage result through, moving to `Failed` on error.
    fn guard<T>(&mut self, stage: UploadStage, result: ClientResult<T>) -> ClientResult<T> {
        result.map_err(|err| {
            match err.log_level() {
                LogLevel::Debug => tracing::debug!(%stage, error = %err, "Upload flow failed"),
                LogLevel::Warn => tracing::warn!(%stage, error = %err, "Upload flow failed"),
                LogLevel::Error => tracing::error!(%stage, error = %err, "Upload flow failed"),
            }
            self.transition(FlowState::Failed {
                stage,
                message: err.to_string(),
            });
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::MockUploads;
    use crate::Session;
    use docuquiz_core::{ClientConfig, MockLatency};
    use std::sync::Mutex;

    fn mock_flow() -> UploadFlow {
        let api = ApiClient::from_config(&ClientConfig::mock(), Session::new()).unwrap();
        UploadFlow::new(Arc::new(MockUploads::new(MockLatency::none())), api)
    }

    fn pdf() -> UploadSource {
        UploadSource::new("lecture.pdf", "application/pdf", vec![0u8; 64])
    }

    #[tokio::test]
    async fn upload_only_stops_at_confirmed() {
        let mut flow = mock_flow();
        let outcome = flow.run(&pdf(), None).await.unwrap();

        assert!(outcome.quiz.is_none());
        assert_eq!(outcome.confirmation.original_name, "lecture.pdf");
        assert_eq!(outcome.confirmation.mime_type, "application/pdf");
        assert_eq!(outcome.confirmation.size, 64);
        assert_eq!(
            flow.history(),
            &[
                FlowState::Idle,
                FlowState::CredentialRequested,
                FlowState::CredentialObtained,
                FlowState::Uploading,
                FlowState::Uploaded,
                FlowState::ConfirmPending,
                FlowState::Confirmed,
            ]
        );
    }

    #[tokio::test]
    async fn invalid_options_fail_before_any_stage() {
        let mut flow = mock_flow();
        let options = GenerationOptions {
            question_count: 21,
            ..GenerationOptions::default()
        };
        let err = flow.run(&pdf(), Some(&options)).await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(flow.history().len(), 2);
        assert!(matches!(
            flow.state(),
            FlowState::Failed {
                stage: UploadStage::Generation,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn generation_without_backend_fails_before_upload() {
        let mut flow = mock_flow();
        let err = flow
            .run(&pdf(), Some(&GenerationOptions::default()))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Config(_)));
        assert_eq!(flow.history().len(), 2);
        assert!(matches!(
            flow.state(),
            FlowState::Failed {
                stage: UploadStage::Generation,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn non_pdf_is_rejected_before_credential_request() {
        let mut flow = mock_flow();
        let source = UploadSource::new("notes.txt", "text/plain", b"hello".to_vec());
        let err = flow.run(&source, None).await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(
            flow.history(),
            &[
                FlowState::Idle,
                FlowState::Failed {
                    stage: UploadStage::Credential,
                    message: "PDF 파일만 업로드할 수 있습니다.".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn oversized_file_is_rejected_before_credential_request() {
        let mut flow = mock_flow();
        let size = docuquiz_core::validation::MAX_UPLOAD_SIZE as usize + 1;
        let source = UploadSource::new("big.pdf", "application/pdf", vec![0u8; size]);
        let err = flow.run(&source, None).await.unwrap_err();

        assert_eq!(err.to_string(), "파일 크기는 10MB를 초과할 수 없습니다.");
        assert!(!flow.history().contains(&FlowState::CredentialRequested));
    }

    #[tokio::test]
    async fn credential_failure_short_circuits() {
        let mut flow = mock_flow();
        let source = UploadSource::new("", "application/pdf", Vec::new());
        assert!(flow.run(&source, None).await.is_err());
        assert_eq!(
            flow.history().last(),
            Some(&FlowState::Failed {
                stage: UploadStage::Credential,
                message: "File name must not be empty".to_string(),
            })
        );
        assert!(!flow.history().contains(&FlowState::Uploading));
    }

    #[tokio::test]
    async fn attempt_cannot_be_rerun() {
        let mut flow = mock_flow();
        flow.run(&pdf(), None).await.unwrap();
        let err = flow.run(&pdf(), None).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn observer_sees_every_transition() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut flow = mock_flow().on_transition(move |state| {
            sink.lock().unwrap().push(state.clone());
        });
        flow.run(&pdf(), None).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &flow.history()[1..]);
    }

    #[test]
    fn terminal_states() {
        assert!(FlowState::GenerationComplete.is_terminal());
        assert!(FlowState::Failed {
            stage: UploadStage::Transfer,
            message: String::new()
        }
        .is_terminal());
        assert!(!FlowState::Uploading.is_terminal());
        assert_eq!(
            FlowState::Failed {
                stage: UploadStage::Transfer,
                message: "boom".to_string()
            }
            .to_string(),
            "transfer failed: boom"
        );
    }
}
