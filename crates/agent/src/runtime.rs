use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use staybot_core::directive::{DirectiveDispatcher, DispatchResult};

use crate::conversation::{build_transcript, ChatMessage, ConversationError};
use crate::llm::{LlmClient, LlmError};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Conversation(#[from] ConversationError),
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Result of one chat turn: the raw model reply and what its directive (if
/// any) produced.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatReply {
    pub reply_text: String,
    pub dispatch: DispatchResult,
}

pub struct AgentRuntime {
    llm: Arc<dyn LlmClient>,
    dispatcher: DirectiveDispatcher,
}

impl AgentRuntime {
    pub fn new(llm: Arc<dyn LlmClient>, dispatcher: DirectiveDispatcher) -> Self {
        Self { llm, dispatcher }
    }

    pub async fn handle_chat(
        &self,
        messages: &[ChatMessage],
        correlation_id: &str,
    ) -> Result<ChatReply, AgentError> {
        let transcript = build_transcript(messages)?;

        let reply_text = self.llm.complete(&transcript).await.map_err(|error| {
            warn!(
                event_name = "agent.llm.failed",
                correlation_id,
                error = %error,
                "language model completion failed"
            );
            error
        })?;

        let dispatch = self.dispatcher.scan_and_dispatch(&reply_text).await;
        info!(
            event_name = "agent.turn.completed",
            correlation_id,
            turns = messages.len(),
            outcome = dispatch.kind(),
            "chat turn completed"
        );

        Ok(ChatReply { reply_text, dispatch })
    }
}
