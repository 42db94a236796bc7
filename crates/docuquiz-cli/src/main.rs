//! DocuQuiz CLI: upload a document and generate a quiz from it.
//!
//! Set DOCUQUIZ_API_BASE_URL and DOCUQUIZ_USE_UPLOAD_MOCK=false to run against a real
//! backend; otherwise uploads are simulated. DOCUQUIZ_API_TOKEN or DOCUQUIZ_API_KEY
//! authenticates requests.

use anyhow::Context;
use clap::{Parser, Subcommand};
use docuquiz_api_client::{
    create_upload_strategy, ApiClient, FlowState, Session, UploadFlow, UploadSource,
};
use docuquiz_cli::{build_generation_options, format_note_line, init_tracing};
use docuquiz_core::models::DEFAULT_QUESTION_COUNT;
use docuquiz_core::ClientConfig;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "docuquiz", about = "DocuQuiz command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct QuizArgs {
    /// Number of questions (5-20)
    #[arg(long, default_value_t = DEFAULT_QUESTION_COUNT)]
    count: u32,
    /// Question type: 객관식, 주관식, OX, 빈칸 (repeatable)
    #[arg(long = "type")]
    types: Vec<String>,
    /// Difficulty: 쉬움, 보통, 어려움
    #[arg(long, default_value = "보통")]
    difficulty: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a document and generate a quiz from it
    Upload {
        /// Path to the document
        file: std::path::PathBuf,
        #[command(flatten)]
        quiz: QuizArgs,
        /// Stop after the upload is confirmed
        #[arg(long)]
        no_generate: bool,
    },
    /// Generate a quiz from an already uploaded file
    Generate {
        /// File ID returned by upload confirmation
        #[arg(long)]
        file_id: String,
        #[command(flatten)]
        quiz: QuizArgs,
    },
    /// Register an anonymous account and print the issued token
    Signup {
        #[arg(long)]
        display_name: Option<String>,
    },
    /// Verify a previously issued token
    Login {
        token: String,
    },
    /// List wrong-answer notes
    Notes {
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
    /// Generate a new quiz from a wrong-answer note
    Regenerate {
        note_id: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn print_progress(state: &FlowState) {
    if state.is_failed() {
        eprintln!("✗ {}", state);
    } else {
        eprintln!("→ {}", state);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("Invalid DOCUQUIZ_* configuration")?;
    let session = Session::from_config(&config);
    let api = ApiClient::from_config(&config, session)
        .context("Failed to create API client. Check DOCUQUIZ_API_BASE_URL")?;

    match cli.command {
        Commands::Upload {
            file,
            quiz,
            no_generate,
        } => {
            let options = if no_generate {
                None
            } else {
                Some(build_generation_options(
                    quiz.count,
                    &quiz.types,
                    &quiz.difficulty,
                )?)
            };
            let source = UploadSource::from_path(&file).await?;

            let uploads = create_upload_strategy(&config, &api);
            let mut flow = UploadFlow::new(uploads, api).on_transition(print_progress);
            let outcome = flow.run(&source, options.as_ref()).await?;
            print_json(&outcome)?;
        }
        Commands::Generate { file_id, quiz } => {
            let options = build_generation_options(quiz.count, &quiz.types, &quiz.difficulty)?;
            let quiz = api.generate_quiz(&file_id, &options).await?;
            print_json(&quiz)?;
        }
        Commands::Signup { display_name } => {
            let auth = api.sign_up(display_name.as_deref()).await?;
            print_json(&auth)?;
        }
        Commands::Login { token } => {
            let auth = api.login(&token).await?;
            print_json(&auth)?;
        }
        Commands::Notes { json } => {
            let notes = api.get_wrong_answer_notes().await?;
            if json {
                print_json(&notes)?;
            } else if notes.is_empty() {
                println!("No wrong-answer notes");
            } else {
                for note in &notes {
                    println!("{}", format_note_line(note));
                }
            }
        }
        Commands::Regenerate { note_id } => {
            let quiz = api.regenerate_from_note(&note_id).await?;
            print_json(&quiz)?;
        }
    }

    Ok(())
}
