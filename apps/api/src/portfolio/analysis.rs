//! Portfolio analysis: converts a prepared `PortfolioSource` into the textual
//! summary that every interview turn replays.
//!
//! Flow: build one request per batch of up to `ANALYSIS_BATCH_SIZE` images
//! (or a single text request) → fan out concurrently → concatenate in order.
//! A failing batch fails the whole analysis; there is no partial result.

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{
    is_refusal, ChatCompleter, ChatMessage, ChatRequest, ContentPart, VISION_MODEL,
};
use crate::portfolio::document::{PortfolioSource, TextPart};
use crate::portfolio::prompts::{
    ACCOMPANYING_TEXT, ANALYSIS_SYSTEM, IMAGE_BATCH_INTRO, IMAGE_PART_INTRO, SINGLE_IMAGE_INTRO,
    TEXT_ANALYSIS_PROMPT,
};

/// Images per analysis request.
pub const ANALYSIS_BATCH_SIZE: usize = 5;
const ANALYSIS_MAX_TOKENS: u32 = 1500;
const ANALYSIS_TEMPERATURE: f32 = 0.3;

pub const ANALYSIS_REFUSED_MESSAGE: &str =
    "The portfolio analysis was refused. Please upload images that contain only portfolio content.";

/// Runs the analysis for a prepared source and returns the concatenated summary.
pub async fn analyze_portfolio(
    llm: &dyn ChatCompleter,
    source: &PortfolioSource,
) -> Result<String, AppError> {
    if source.is_empty() {
        return Err(AppError::Validation(
            "The portfolio contains nothing to analyze".to_string(),
        ));
    }

    let requests = build_analysis_requests(source);
    let batch_count = requests.len();
    info!(
        "Analyzing portfolio: {} image(s), {} text part(s), {} request(s)",
        source.images.len(),
        source.texts.len(),
        batch_count
    );
    for (index, batch) in source.images.chunks(ANALYSIS_BATCH_SIZE).enumerate() {
        let names: Vec<String> = batch
            .iter()
            .map(|image| format!("{} ({})", image.name, image.mime_type))
            .collect();
        debug!("Batch {}/{}: {}", index + 1, batch_count, names.join(", "));
    }

    let completions = try_join_all(requests.into_iter().map(|r| llm.complete(r)))
        .await
        .map_err(|e| AppError::Llm(format!("Portfolio analysis failed: {e}")))?;

    let mut sections = Vec::with_capacity(batch_count);
    for (index, completion) in completions.into_iter().enumerate() {
        if completion.is_content_filtered() || is_refusal(&completion.text) {
            warn!(
                "Portfolio analysis batch {}/{} was refused",
                index + 1,
                batch_count
            );
            return Err(AppError::ContentRejected(
                ANALYSIS_REFUSED_MESSAGE.to_string(),
            ));
        }

        let text = completion.text.trim();
        if text.is_empty() {
            return Err(AppError::Llm(format!(
                "Portfolio analysis batch {}/{} returned no content",
                index + 1,
                batch_count
            )));
        }
        sections.push(text.to_string());
    }

    let analysis = join_sections(&sections);
    info!("Portfolio analysis complete: {} characters", analysis.len());
    Ok(analysis)
}

/// One request for text-only sources; otherwise one request per image batch,
/// with any document text riding along in the first batch.
pub fn build_analysis_requests(source: &PortfolioSource) -> Vec<ChatRequest> {
    if source.images.is_empty() {
        let documents = render_texts(&source.texts);
        let prompt = fill_template(TEXT_ANALYSIS_PROMPT, &[("documents", documents.as_str())]);
        return vec![analysis_request(ChatMessage::user(prompt))];
    }

    let batches: Vec<_> = source.images.chunks(ANALYSIS_BATCH_SIZE).collect();
    let total = batches.len();

    batches
        .into_iter()
        .enumerate()
        .map(|(index, batch)| {
            let intro = if total > 1 {
                let part = (index + 1).to_string();
                let total = total.to_string();
                fill_template(
                    IMAGE_PART_INTRO,
                    &[("part", part.as_str()), ("total", total.as_str())],
                )
            } else if batch.len() > 1 {
                IMAGE_BATCH_INTRO.to_string()
            } else {
                SINGLE_IMAGE_INTRO.to_string()
            };

            let mut parts = vec![ContentPart::text(intro)];
            if index == 0 && !source.texts.is_empty() {
                let documents = render_texts(&source.texts);
                parts.push(ContentPart::text(fill_template(
                    ACCOMPANYING_TEXT,
                    &[("documents", documents.as_str())],
                )));
            }
            parts.extend(batch.iter().map(|image| ContentPart::image(&image.data_url)));

            analysis_request(ChatMessage::user_parts(parts))
        })
        .collect()
}

fn analysis_request(user: ChatMessage) -> ChatRequest {
    ChatRequest {
        model: VISION_MODEL,
        messages: vec![ChatMessage::system(ANALYSIS_SYSTEM), user],
        max_tokens: ANALYSIS_MAX_TOKENS,
        temperature: ANALYSIS_TEMPERATURE,
    }
}

fn render_texts(texts: &[TextPart]) -> String {
    texts
        .iter()
        .map(|t| format!("--- {} ---\n{}", t.name, t.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn join_sections(sections: &[String]) -> String {
    if sections.len() == 1 {
        return sections[0].clone();
    }

    let total = sections.len();
    sections
        .iter()
        .enumerate()
        .map(|(i, s)| format!("[Part {}/{}]\n{}", i + 1, total, s))
        .collect::<Vec<_>>()
        .join("\n\n")
}
