//! Document generation: prompt → LLM text → post-processing → `.docx`.
//!
//! Flow per document kind:
//!   resume:       prompt → generate → split metadata → format → download
//!   cover letter: prompt → generate → format → download
//!   study guide:  prompt → generate → format → download
//!   questions:    prompt → generate → parse lines (no document)

use tracing::info;

use crate::config::Config;
use crate::documents::{build_docx, DocxFile};
use crate::errors::AppError;
use crate::generation::metadata::{
    cover_letter_filename, resume_filename, split_metadata, study_guide_filename,
};
use crate::generation::prompts::{
    cover_letter_prompt, questions_prompt, resume_prompt, study_guide_prompt,
};
use crate::generation::questions::{parse_questions, InterviewQuestion};
use crate::llm_client::{Completion, TextGenerator};

/// Everything a generation call needs besides its own inputs.
pub struct GenerationContext<'a> {
    pub llm: &'a dyn TextGenerator,
    pub config: &'a Config,
    pub api_key: &'a str,
}

impl GenerationContext<'_> {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, AppError> {
        let text = self
            .llm
            .generate(Completion {
                api_key: self.api_key,
                prompt,
                max_tokens,
            })
            .await?;
        Ok(text)
    }

    fn render(&self, filename: String, text: &str) -> Result<DocxFile, AppError> {
        let bytes = build_docx(text, &self.config.document_style)?;
        info!("Generated {} ({} bytes)", filename, bytes.len());
        Ok(DocxFile::new(filename, bytes))
    }
}

/// Tailors `base_resume` to `job_description`. The download is named after
/// the job title and company the model reports in its metadata trailer.
pub async fn generate_resume(
    ctx: &GenerationContext<'_>,
    base_resume: &str,
    job_description: &str,
) -> Result<DocxFile, AppError> {
    let prompt = resume_prompt(base_resume, job_description);
    let text = ctx
        .generate(&prompt, ctx.config.generation.resume_max_tokens)
        .await?;

    let (body, metadata) = split_metadata(&text);
    info!(
        "Resume metadata: job_title={:?}, company={:?}",
        metadata.job_title, metadata.company_name
    );

    let filename = resume_filename(&ctx.config.generation.filename_prefix, &metadata);
    ctx.render(filename, &body)
}

pub async fn generate_cover_letter(
    ctx: &GenerationContext<'_>,
    base_resume: &str,
    job_description: &str,
) -> Result<DocxFile, AppError> {
    let prompt = cover_letter_prompt(base_resume, job_description);
    let text = ctx
        .generate(&prompt, ctx.config.generation.cover_letter_max_tokens)
        .await?;

    let filename = cover_letter_filename(&ctx.config.generation.filename_prefix);
    ctx.render(filename, &text)
}

pub async fn generate_study_guide(
    ctx: &GenerationContext<'_>,
    job_title: &str,
    company: Option<&str>,
) -> Result<DocxFile, AppError> {
    let prompt = study_guide_prompt(job_title, company);
    let text = ctx
        .generate(&prompt, ctx.config.generation.study_guide_max_tokens)
        .await?;

    let filename = study_guide_filename(&ctx.config.generation.filename_prefix, job_title);
    ctx.render(filename, &text)
}

pub async fn generate_questions(
    ctx: &GenerationContext<'_>,
    job_role: &str,
) -> Result<Vec<InterviewQuestion>, AppError> {
    let prompt = questions_prompt(job_role);
    let text = ctx
        .generate(&prompt, ctx.config.generation.questions_max_tokens)
        .await?;

    let questions = parse_questions(&text);
    info!("Parsed {} interview questions for {job_role:?}", questions.len());
    Ok(questions)
}
