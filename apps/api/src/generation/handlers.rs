//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::documents::DocxFile;
use crate::errors::AppError;
use crate::generation::generator::{
    generate_cover_letter, generate_questions, generate_resume, generate_study_guide,
    GenerationContext,
};
use crate::generation::questions::InterviewQuestion;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body shared by the resume and cover-letter endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub api_key: Option<String>,
    pub base_resume: Option<String>,
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsRequest {
    pub api_key: Option<String>,
    pub job_role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<InterviewQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyGuideRequest {
    pub api_key: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Returns the trimmed value of a required body field; blank counts as missing.
fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} cannot be empty")))
}

/// Request key first, then the server-side `ANTHROPIC_API_KEY`.
fn resolve_api_key<'a>(
    state: &'a AppState,
    request_key: &'a Option<String>,
) -> Result<&'a str, AppError> {
    request_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .or(state.config.anthropic_api_key.as_deref())
        .ok_or(AppError::MissingApiKey)
}

fn context<'a>(state: &'a AppState, api_key: &'a str) -> GenerationContext<'a> {
    GenerationContext {
        llm: state.llm.as_ref(),
        config: &state.config,
        api_key,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-resume
///
/// Tailors the base resume to the job description and returns it as a `.docx`
/// named after the detected job title and company.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(request): Json<ApplicationRequest>,
) -> Result<DocxFile, AppError> {
    let base_resume = required(&request.base_resume, "baseResume")?;
    let job_description = required(&request.job_description, "jobDescription")?;
    let api_key = resolve_api_key(&state, &request.api_key)?;

    generate_resume(&context(&state, api_key), base_resume, job_description).await
}

/// POST /api/generate-cover-letter
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<ApplicationRequest>,
) -> Result<DocxFile, AppError> {
    let base_resume = required(&request.base_resume, "baseResume")?;
    let job_description = required(&request.job_description, "jobDescription")?;
    let api_key = resolve_api_key(&state, &request.api_key)?;

    generate_cover_letter(&context(&state, api_key), base_resume, job_description).await
}

/// POST /api/generate-questions
///
/// Returns 20 categorized interview questions as JSON.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(request): Json<QuestionsRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let job_role = required(&request.job_role, "jobRole")?;
    let api_key = resolve_api_key(&state, &request.api_key)?;

    let questions = generate_questions(&context(&state, api_key), job_role).await?;
    Ok(Json(QuestionsResponse { questions }))
}

/// POST /api/generate-study-guide
pub async fn handle_generate_study_guide(
    State(state): State<AppState>,
    Json(request): Json<StudyGuideRequest>,
) -> Result<DocxFile, AppError> {
    let job_title = required(&request.job_title, "jobTitle")?;
    let company = request
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let api_key = resolve_api_key(&state, &request.api_key)?;

    generate_study_guide(&context(&state, api_key), job_title, company).await
}
