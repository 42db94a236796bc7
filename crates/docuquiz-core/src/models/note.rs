use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quiz a wrong-answer note was recorded from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteQuiz {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteQuizResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub quiz: NoteQuiz,
}

/// Wrong answers of a quiz result, from which a new quiz can be regenerated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrongAnswerNote {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub quiz_result: NoteQuizResult,
}
