// Resume advisor: analysis, interview questions, and career chat.
// All LLM calls go through the CompletionGateway trait in llm_client.

pub mod flows;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod sanitizer;
pub mod upload;
