use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::ClientError;

/// Smallest number of questions the backend generates
pub const MIN_QUESTION_COUNT: u32 = 5;
/// Largest number of questions the backend generates
pub const MAX_QUESTION_COUNT: u32 = 20;
pub const DEFAULT_QUESTION_COUNT: u32 = 10;

/// Question type, serialized with the backend's labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    /// Four-option multiple choice
    #[serde(rename = "객관식")]
    MultipleChoice,
    /// Short answer
    #[serde(rename = "주관식")]
    ShortAnswer,
    #[serde(rename = "OX")]
    TrueFalse,
    #[serde(rename = "빈칸")]
    FillInBlank,
}

impl QuestionType {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "객관식",
            QuestionType::ShortAnswer => "주관식",
            QuestionType::TrueFalse => "OX",
            QuestionType::FillInBlank => "빈칸",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QuestionType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "객관식" | "multiple-choice" | "multiple_choice" | "mc" => {
                Ok(QuestionType::MultipleChoice)
            }
            "주관식" | "short-answer" | "short_answer" => Ok(QuestionType::ShortAnswer),
            "OX" | "ox" | "true-false" | "true_false" => Ok(QuestionType::TrueFalse),
            "빈칸" | "blank" | "fill-in-blank" | "fill_in_blank" => Ok(QuestionType::FillInBlank),
            other => Err(ClientError::Validation(format!(
                "Unknown question type {:?}. Must be one of: 객관식, 주관식, OX, 빈칸",
                other
            ))),
        }
    }
}

/// Quiz difficulty, serialized with the backend's labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "쉬움")]
    Easy,
    #[serde(rename = "보통")]
    Normal,
    #[serde(rename = "어려움")]
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "쉬움",
            Difficulty::Normal => "보통",
            Difficulty::Hard => "어려움",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "쉬움" | "easy" => Ok(Difficulty::Easy),
            "보통" | "normal" | "medium" => Ok(Difficulty::Normal),
            "어려움" | "hard" => Ok(Difficulty::Hard),
            other => Err(ClientError::Validation(format!(
                "Unknown difficulty {:?}. Must be one of: 쉬움, 보통, 어려움",
                other
            ))),
        }
    }
}

/// Options of a quiz generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Number of questions to generate
    #[validate(range(min = 5, max = 20, message = "Question count must be between 5 and 20"))]
    pub question_count: u32,
    /// Requested question types
    #[validate(length(min = 1, message = "At least one question type is required"))]
    pub types: Vec<QuestionType>,
    pub difficulty: Difficulty,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            types: vec![QuestionType::MultipleChoice],
            difficulty: Difficulty::Normal,
        }
    }
}

/// Body of the quiz generation endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest<'a> {
    pub file_id: &'a str,
    #[serde(flatten)]
    pub options: &'a GenerationOptions,
}

/// Reference to a generated quiz. The backend may echo extra metadata, which is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizHandle {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
