//! LLM-generated summaries of news text.
//!
//! [`Summarizer`] is the entry point. It builds the Spanish fact-checking
//! prompt and sends it through a [`TextGenerator`]; [`OpenAIChatClient`] is
//! the hosted implementation.

pub mod generator;
pub mod openai;
pub mod summarizer;

pub use generator::{ChatMessage, ChatRole, TextGenerator};
pub use openai::OpenAIChatClient;
pub use summarizer::{MISSING_API_KEY_PLACEHOLDER, Summarizer, build_prompt};
