//! Chat completion API client and model selection.

pub mod client;
pub mod decorator;
pub mod model;
pub mod types;

pub use client::{ChatClient, ChatCompletions};
pub use decorator::{BearerAuth, JsonContentType, RequestDecorator};
pub use model::select_model;
pub use types::{ChatCompletionResult, ChatMessage, ChatRequest, Choice, Role};
