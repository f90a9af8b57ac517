//! Company search: verifies that a free-text company name is real, then
//! generates an interview profile for it.
//!
//! Two LLM calls, strictly sequential: the profile is only generated for a
//! company the verifier accepted, under the verifier's canonical spelling.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::company::prompts::{
    JOB_POSTING_BLOCK_TEMPLATE, POSITION_LINE_TEMPLATE, PROFILE_PROMPT_TEMPLATE, PROFILE_SYSTEM,
    VERIFY_PROMPT_TEMPLATE, VERIFY_SYSTEM,
};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{complete_json, ChatCompleter, ChatMessage, ChatRequest, CHAT_MODEL, VISION_MODEL};
use crate::models::company::Company;
use crate::models::interview::Position;

/// Id carried by every generated (non-preset) company.
pub const CUSTOM_COMPANY_ID: &str = "custom";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySearchRequest {
    pub company_name: String,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub job_posting: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Exists,
    /// Anything other than `exists` counts as not found.
    #[serde(other)]
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub status: VerificationStatus,
    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default)]
    pub real_name: Option<String>,
}

impl Verification {
    /// The verifier's spelling when it gave one, otherwise the user's input.
    pub fn canonical_name(&self, input: &str) -> String {
        self.real_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(input)
            .to_string()
    }
}

/// The generated part of a company profile.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub interview_focus: Vec<String>,
    #[serde(default)]
    pub portfolio_tips: Vec<String>,
    #[serde(default)]
    pub common_questions: Vec<String>,
}

impl CompanyProfile {
    pub fn is_complete(&self) -> bool {
        !self.industry.trim().is_empty()
            && !self.interview_focus.is_empty()
            && !self.portfolio_tips.is_empty()
            && !self.common_questions.is_empty()
    }
}

pub async fn search_company(
    llm: &dyn ChatCompleter,
    language: &str,
    request: &CompanySearchRequest,
) -> Result<Company, AppError> {
    let input = request.company_name.trim();
    if input.is_empty() {
        return Err(AppError::Validation("Company name is required".to_string()));
    }

    let verification = verify_company(llm, input).await?;
    if verification.status != VerificationStatus::Exists {
        warn!(
            "Company '{}' not found (confidence {:?})",
            input, verification.confidence
        );
        return Err(AppError::CompanyNotFound(input.to_string()));
    }

    let name = verification.canonical_name(input);
    let job_posting = request
        .job_posting
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let profile = generate_profile(llm, &name, request.position, job_posting, language).await?;
    if !profile.is_complete() {
        return Err(AppError::Llm(format!(
            "Incomplete company profile generated for '{name}'"
        )));
    }

    info!(
        "Generated company profile for '{}' ({} focus areas, {} tips, {} questions)",
        name,
        profile.interview_focus.len(),
        profile.portfolio_tips.len(),
        profile.common_questions.len()
    );

    Ok(Company {
        id: CUSTOM_COMPANY_ID.to_string(),
        name,
        industry: profile.industry,
        interview_focus: profile.interview_focus,
        portfolio_tips: profile.portfolio_tips,
        common_questions: profile.common_questions,
        job_posting: job_posting.map(str::to_string),
    })
}

async fn verify_company(llm: &dyn ChatCompleter, input: &str) -> Result<Verification, AppError> {
    let request = ChatRequest {
        model: VISION_MODEL,
        messages: vec![
            ChatMessage::system(VERIFY_SYSTEM),
            ChatMessage::user(fill_template(VERIFY_PROMPT_TEMPLATE, &[("company", input)])),
        ],
        max_tokens: 200,
        temperature: 0.3,
    };

    complete_json(llm, request)
        .await
        .map_err(|e| AppError::Llm(format!("Company verification failed: {e}")))
}

async fn generate_profile(
    llm: &dyn ChatCompleter,
    name: &str,
    position: Option<Position>,
    job_posting: Option<&str>,
    language: &str,
) -> Result<CompanyProfile, AppError> {
    let position_line = position
        .map(|p| fill_template(POSITION_LINE_TEMPLATE, &[("position", p.display_name())]))
        .unwrap_or_default();
    let job_posting_block = job_posting
        .map(|p| fill_template(JOB_POSTING_BLOCK_TEMPLATE, &[("job_posting", p)]))
        .unwrap_or_default();

    let prompt = fill_template(
        PROFILE_PROMPT_TEMPLATE,
        &[
            ("company", name),
            ("position_line", position_line.as_str()),
            ("job_posting_block", job_posting_block.as_str()),
            ("language", language),
        ],
    );

    let request = ChatRequest {
        model: CHAT_MODEL,
        messages: vec![
            ChatMessage::system(format!("{PROFILE_SYSTEM}\n\n{JSON_ONLY_INSTRUCTION}")),
            ChatMessage::user(prompt),
        ],
        max_tokens: 1000,
        temperature: 0.7,
    };

    complete_json(llm, request)
        .await
        .map_err(|e| AppError::Llm(format!("Company profile generation failed: {e}")))
}
