// Portfolio pipeline: document ingestion and the cached portfolio analysis.
// All LLM calls go through llm_client; no direct provider calls here.

pub mod analysis;
pub mod document;
pub mod handlers;
pub mod prompts;
