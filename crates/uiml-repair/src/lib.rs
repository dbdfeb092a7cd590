//! Best-effort repair of component markup with a chat model.
//!
//! [`Repairer::parse_markup_with_repair`] parses once and, while the markup
//! keeps failing and the attempt budget lasts, sends the ±2-line window around
//! the error to a [`ChatClient`], splices the reply back over that window and
//! parses again. Every attempt is counted, and every answered request is
//! priced with a [`CostModel`].

mod chat;
mod cost;
mod prompt;
mod repair;

pub use chat::ChatClient;
pub use chat::ChatError;
pub use chat::ChatMessage;
pub use chat::ChatReply;
pub use chat::ChatRequest;
pub use chat::ChatRole;
pub use chat::OpenAiChatClient;
pub use cost::estimate_tokens;
pub use cost::CostModel;
pub use cost::CHARS_PER_TOKEN;
pub use prompt::strip_code_fences;
pub use prompt::RepairPrompt;
pub use prompt::SYSTEM_PROMPT;
pub use repair::RepairResult;
pub use repair::Repairer;
pub use repair::DEFAULT_MAX_ATTEMPTS;
pub use repair::DEFAULT_MAX_OUTPUT_TOKENS;
pub use repair::DEFAULT_TEMPERATURE;
