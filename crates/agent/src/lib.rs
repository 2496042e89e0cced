//! Conversational front end of the booking assistant.
//!
//! A chat turn is: assemble the transcript behind the system prompt
//! (`conversation`), ask the language model for a reply (`llm`), then hand
//! the reply to the directive dispatcher (`runtime`). The model only proposes
//! actions through tagged blocks; ranking, validation and persistence stay in
//! `staybot-core`.

pub mod conversation;
pub mod llm;
pub mod runtime;

pub use conversation::{build_transcript, ChatMessage, ConversationError, SYSTEM_PROMPT};
pub use llm::{
    CompletionMessage, LlmClient, LlmError, OpenAiCompatibleClient, Role, ScriptedLlmClient,
};
pub use runtime::{AgentError, AgentRuntime, ChatReply};
