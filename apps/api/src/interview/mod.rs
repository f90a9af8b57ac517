// Interview module: persona prompt construction and the turn pipeline.
// All LLM calls go through llm_client.

pub mod handlers;
pub mod persona;
pub mod prompts;
pub mod turn;
