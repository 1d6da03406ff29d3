// Reply generation: translation, original-language reply and Turkish reply for a customer review.
// All LLM calls go through llm_client — nothing here talks to Gemini directly.

pub mod export;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod rules;
pub mod schema;
pub mod tone;
