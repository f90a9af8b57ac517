//! Interview turn: one candidate message in, one interviewer message out.
//!
//! Flow: validate → resolve the portfolio analysis (cached or regenerated) →
//! build persona + history → chat completion → screen the reply.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::interview::persona::{
    build_system_prompt, build_turn_messages, with_portfolio_analysis, InterviewContext,
};
use crate::llm_client::{is_refusal, ChatCompleter, ChatRequest, CHAT_MODEL};
use crate::models::company::Company;
use crate::models::interview::{Experience, Message, Position};
use crate::portfolio::analysis::{analyze_portfolio, ANALYSIS_REFUSED_MESSAGE};
use crate::portfolio::document::{document_set, prepare_source, UploadedFile};

const TURN_MAX_TOKENS: u32 = 1000;
const TURN_TEMPERATURE: f32 = 0.7;

pub const CONTENT_POLICY_MESSAGE: &str =
    "The uploaded material violates the content policy. Please use a different file.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    #[serde(default)]
    pub file: Option<UploadedFile>,
    #[serde(default)]
    pub files: Option<Vec<UploadedFile>>,
    pub company: Company,
    pub position: Position,
    pub experience: Experience,
    #[serde(default)]
    pub conversation_history: Vec<Message>,
    #[serde(default)]
    pub portfolio_analysis: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub message: String,
    /// Always returned so the client can replay it on the next turn.
    pub portfolio_analysis: String,
}

pub async fn run_turn(
    llm: &dyn ChatCompleter,
    language: &str,
    request: TurnRequest,
) -> Result<TurnResponse, AppError> {
    if request.company.name.trim().is_empty() {
        return Err(AppError::Validation("Company name is required".to_string()));
    }

    let documents = document_set(request.file.as_ref(), request.files.as_deref());
    let cached = request
        .portfolio_analysis
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty());

    if documents.is_empty() && cached.is_none() {
        return Err(AppError::Validation(
            "A portfolio file or a cached portfolio analysis is required".to_string(),
        ));
    }

    let portfolio_analysis = match cached {
        Some(analysis) => analysis.to_string(),
        None => {
            info!(
                "No cached analysis for {} turn, analyzing {} document(s)",
                if request.conversation_history.is_empty() { "first" } else { "follow-up" },
                documents.len()
            );
            let source = prepare_source(&documents).await?;
            analyze_portfolio(llm, &source).await?
        }
    };

    let ctx = InterviewContext {
        company: &request.company,
        position: request.position,
        experience: request.experience,
        language,
    };
    let system_prompt = with_portfolio_analysis(&build_system_prompt(&ctx), &portfolio_analysis);
    let messages = build_turn_messages(
        system_prompt,
        &request.company.name,
        &request.conversation_history,
    );

    let completion = llm
        .complete(ChatRequest {
            model: CHAT_MODEL,
            messages,
            max_tokens: TURN_MAX_TOKENS,
            temperature: TURN_TEMPERATURE,
        })
        .await
        .map_err(|e| AppError::Llm(format!("Interview turn failed: {e}")))?;

    if completion.is_content_filtered() {
        warn!("Interview turn cut by the content filter");
        return Err(AppError::ContentRejected(CONTENT_POLICY_MESSAGE.to_string()));
    }
    // Only the kickoff reacts to the material alone; later apologies are conversation.
    if request.conversation_history.is_empty() && is_refusal(&completion.text) {
        warn!("Interviewer refused the portfolio material");
        return Err(AppError::ContentRejected(ANALYSIS_REFUSED_MESSAGE.to_string()));
    }

    let message = completion.text.trim().to_string();
    if message.is_empty() {
        return Err(AppError::Llm("Interview turn returned no content".to_string()));
    }

    info!(
        "Interview turn complete: company={}, history={} message(s)",
        request.company.name.trim(),
        request.conversation_history.len()
    );

    Ok(TurnResponse {
        message,
        portfolio_analysis,
    })
}
