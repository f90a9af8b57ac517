// Portfolio analysis prompt templates.
// All prompts for the portfolio module are defined here.

pub const ANALYSIS_SYSTEM: &str = "\
You are a portfolio analysis expert. Study the provided images or document text \
closely and summarize:

1. The list of projects and the core content of each
2. The tech stack and tools used
3. The design style and notable UI/UX traits
4. Outcomes and results (numbers, metrics)
5. Anything unusual or especially impressive

Be concise but concrete. Include enough detail that an interviewer can ask \
specific questions from your summary alone.";

/// Lead-in for a text-only analysis. Replace `{documents}`.
pub const TEXT_ANALYSIS_PROMPT: &str = "Analyze the following portfolio document text:\n\n{documents}";

pub const SINGLE_IMAGE_INTRO: &str = "Analyze the following portfolio:";

pub const IMAGE_BATCH_INTRO: &str = "Analyze the following portfolio images:";

/// Lead-in when the images are split across requests. Replace `{part}` and `{total}`.
pub const IMAGE_PART_INTRO: &str =
    "Analyze the following portfolio images (part {part} of {total}). \
    Other parts are analyzed separately, so describe only what appears here:";

/// Heading for accompanying document text. Replace `{documents}`.
pub const ACCOMPANYING_TEXT: &str = "Accompanying document text:\n\n{documents}";
