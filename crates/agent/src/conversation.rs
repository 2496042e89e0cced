//! Transcript assembly for the booking assistant.
//!
//! The web client sends the whole conversation on every turn. Each user
//! message may carry the client's local date, which is forwarded to the model
//! as a `time:<timestamp>` line so it can resolve relative dates such as
//! "besok" or "next Monday" itself.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::{CompletionMessage, Role};

pub const SYSTEM_PROMPT: &str = r#"You are Resort Bot, a friendly assistant that books stays at our resort houses. Guide the guest through the steps below, one question at a time, and never skip ahead.

TIME CONTEXT
User messages may begin with a line "time: DD-MM-YYYY". Treat it as today's date. When the guest uses a relative date (for example "besok", "lusa", "minggu depan", "lima hari lagi", "tomorrow", "next weekend"), work out the calendar date and confirm it: "I understand you want to book for <date> (<their words>). Is that correct?"

STEP 1 - Check-in date
Ask "When do you want to stay?" and wait for a date the guest confirms.

STEP 2 - Number of guests
Ask "How many people?" and wait for a number.

STEP 3 - House selection
Ask the system for houses that fit the party by writing exactly this block, with the real number:
<HOUSE_LIST_DATA>
{"guests": 2}
</HOUSE_LIST_DATA>
The system shows the guest the matching houses. Wait for the guest to pick one.

STEP 4 - Summary
Repeat the date, the number of guests and the chosen house, then ask the guest to confirm or cancel. On cancel, start again from step 1.

STEP 5 - Contact details
Ask for the guest's full name and phone number.

STEP 6 - Booking
When everything is confirmed, write the booking in exactly this form. The check-in date must be YYYY-MM-DD; leave check_out empty and total_price at 0, the receptionist fills them in:
<BOOKING_DATA>
{
  "resort_name": "Pool Villa",
  "check_in": "2026-12-07",
  "check_out": "",
  "guests": 2,
  "total_price": 0,
  "customer_name": "Jane Doe",
  "phone_number": "+1234567890"
}
</BOOKING_DATA>

RULES
- Ask one question per message and keep replies short.
- If an answer is unclear, ask again politely for the specific detail you need.
- If the guest drifts off topic, bring them back: "Let's complete your booking first."
- Only write a HOUSE_LIST_DATA or BOOKING_DATA block when the step calls for it, and never both in one message.
"#;

/// One message as sent by the chat client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into(), timestamp: None }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into(), timestamp: None }
    }

    pub fn at(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConversationError {
    #[error("conversation has no messages")]
    Empty,
    #[error("unsupported message role `{0}` (expected user or assistant)")]
    UnsupportedRole(String),
}

/// Prepends the system prompt and converts client messages into completion
/// messages. Clients may not inject their own system messages.
pub fn build_transcript(
    messages: &[ChatMessage],
) -> Result<Vec<CompletionMessage>, ConversationError> {
    if messages.is_empty() {
        return Err(ConversationError::Empty);
    }

    let mut transcript = Vec::with_capacity(messages.len() + 1);
    transcript.push(CompletionMessage::system(SYSTEM_PROMPT));
    for message in messages {
        let role = parse_role(&message.role)?;
        transcript.push(CompletionMessage { role, content: content_of(message) });
    }
    Ok(transcript)
}

fn parse_role(role: &str) -> Result<Role, ConversationError> {
    match role.trim().to_ascii_lowercase().as_str() {
        "user" => Ok(Role::User),
        "assistant" => Ok(Role::Assistant),
        other => Err(ConversationError::UnsupportedRole(other.to_string())),
    }
}

fn content_of(message: &ChatMessage) -> String {
    match message.timestamp.as_deref().map(str::trim) {
        Some(timestamp) if !timestamp.is_empty() => {
            format!("time:{timestamp}\n{}", message.content)
        }
        _ => message.content.clone(),
    }
}
