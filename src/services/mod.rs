pub mod llm_service;
pub mod mcq_generator;
pub mod prompts;
pub mod scoring;
pub mod session_store;
pub mod validation;

pub use llm_service::{ChatBackend, ChatRequest, LlmService};
pub use mcq_generator::{plan_batches, McqGenerator, MAX_BATCH_SIZE};
pub use session_store::{SessionData, SessionStore};
