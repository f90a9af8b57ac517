//! Interviewer persona: builds the role-constrained system prompt and the
//! message list for a single interview turn.
//!
//! Pure string construction: no I/O, no LLM calls.

use crate::interview::prompts::{
    INTERVIEWER_SYSTEM_TEMPLATE, JOB_POSTING_SECTION_TEMPLATE, JUNIOR_GUIDANCE,
    KICKOFF_PROMPT_TEMPLATE, MID_GUIDANCE, PORTFOLIO_ANALYSIS_SECTION, SENIOR_GUIDANCE,
    STAY_IN_ROLE_REDIRECT,
};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::ChatMessage;
use crate::models::company::Company;
use crate::models::interview::{Experience, Message, Position};

/// Everything the persona depends on besides the portfolio itself.
#[derive(Debug, Clone, Copy)]
pub struct InterviewContext<'a> {
    pub company: &'a Company,
    pub position: Position,
    pub experience: Experience,
    /// Language every interviewer reply must be written in.
    pub language: &'a str,
}

pub fn experience_guidance(experience: Experience) -> &'static str {
    match experience {
        Experience::Junior => JUNIOR_GUIDANCE,
        Experience::Mid => MID_GUIDANCE,
        Experience::Senior => SENIOR_GUIDANCE,
    }
}

pub fn build_system_prompt(ctx: &InterviewContext<'_>) -> String {
    let company = ctx.company;

    let job_posting_section = company
        .job_posting()
        .map(|posting| fill_template(JOB_POSTING_SECTION_TEMPLATE, &[("job_posting", posting)]))
        .unwrap_or_default();

    let portfolio_tips = company
        .portfolio_tips
        .iter()
        .enumerate()
        .map(|(i, tip)| format!("{}. {}", i + 1, tip))
        .collect::<Vec<_>>()
        .join("\n");

    let interview_focus = company.interview_focus.join(", ");

    fill_template(
        INTERVIEWER_SYSTEM_TEMPLATE,
        &[
            ("company", company.name.trim()),
            ("redirect", STAY_IN_ROLE_REDIRECT),
            ("language", ctx.language),
            ("position", ctx.position.display_name()),
            ("experience", ctx.experience.display_name()),
            ("experience_guidance", experience_guidance(ctx.experience)),
            ("industry", company.industry.as_str()),
            ("interview_focus", interview_focus.as_str()),
            ("job_posting_section", job_posting_section.as_str()),
            ("portfolio_tips", portfolio_tips.as_str()),
        ],
    )
}

/// Appends the cached portfolio analysis to the persona prompt.
pub fn with_portfolio_analysis(system_prompt: &str, analysis: &str) -> String {
    let mut prompt = system_prompt.to_string();
    prompt.push_str(&fill_template(
        PORTFOLIO_ANALYSIS_SECTION,
        &[("analysis", analysis.trim())],
    ));
    prompt
}

pub fn kickoff_prompt(company_name: &str) -> String {
    fill_template(KICKOFF_PROMPT_TEMPLATE, &[("company", company_name.trim())])
}

/// System prompt first, then the kickoff message for an empty history or the
/// history verbatim in order.
pub fn build_turn_messages(
    system_prompt: String,
    company_name: &str,
    history: &[Message],
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(system_prompt));

    if history.is_empty() {
        messages.push(ChatMessage::user(kickoff_prompt(company_name)));
    } else {
        messages.extend(
            history
                .iter()
                .map(|m| ChatMessage::plain(m.role.into(), m.content.clone())),
        );
    }

    messages
}
