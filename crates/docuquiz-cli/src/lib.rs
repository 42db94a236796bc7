use docuquiz_core::models::{Difficulty, GenerationOptions, QuestionType, WrongAnswerNote};
use docuquiz_core::validation::validate_generation_options;
use docuquiz_core::ClientResult;
use std::collections::HashSet;

/// Build generation options from command-line values. Question types and difficulty
/// accept the backend's labels (객관식, 보통, ...) or their English aliases. Repeated
/// types are dropped, keeping the first occurrence.
pub fn build_generation_options(
    count: u32,
    types: &[String],
    difficulty: &str,
) -> ClientResult<GenerationOptions> {
    let types = if types.is_empty() {
        vec![QuestionType::MultipleChoice]
    } else {
        types
            .iter()
            .map(|t| t.parse::<QuestionType>())
            .collect::<ClientResult<Vec<_>>>()?
    };

    let mut options = GenerationOptions {
        question_count: count,
        types,
        difficulty: difficulty.parse::<Difficulty>()?,
    };
    let mut seen = HashSet::new();
    options.types.retain(|t| seen.insert(*t));

    validate_generation_options(&options)?;
    Ok(options)
}

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// One line of the wrong-answer note listing.
pub fn format_note_line(note: &WrongAnswerNote) -> String {
    format!(
        "{}  {}  {}",
        note.id,
        note.created_at.format("%Y-%m-%d %H:%M"),
        truncate_string(&note.quiz_result.quiz.title, 40)
    )
}


/// Initialize tracing for the CLI. Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
