// Company module: the preset catalog and LLM-backed company search.

pub mod handlers;
pub mod presets;
pub mod prompts;
pub mod search;
