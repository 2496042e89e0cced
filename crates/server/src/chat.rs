use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use staybot_agent::{AgentError, ChatMessage};
use staybot_core::directive::DispatchResult;
use tracing::{error, warn};
use uuid::Uuid;

use crate::api::{ApiError, AppState};

pub const HOUSE_OPTIONS_PROMPT: &str = "Please select one of these houses:";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::bad_request("invalid request body"))?;
    let correlation_id = Uuid::new_v4().to_string();

    let reply = state.agent.handle_chat(&request.messages, &correlation_id).await.map_err(
        |failure| match failure {
            AgentError::Conversation(error) => ApiError::bad_request(error.to_string()),
            AgentError::Llm(error) => {
                ApiError::new(StatusCode::BAD_GATEWAY, "failed to get response from assistant")
                    .with_field("details", error.to_string())
                    .with_field("correlation_id", correlation_id.clone())
            }
        },
    )?;

    match reply.dispatch {
        DispatchResult::Options(options) => {
            // The web client expects the list JSON-encoded inside a string.
            let houses = serde_json::to_string(&options).map_err(|error| {
                error!(
                    event_name = "server.chat.encode_failed",
                    correlation_id = %correlation_id,
                    error = %error,
                    "could not encode house options"
                );
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to encode house options")
            })?;
            Ok(Json(json!({
                "type": "house_options",
                "houses": houses,
                "message": HOUSE_OPTIONS_PROMPT,
            })))
        }
        DispatchResult::Message(message) => Ok(Json(json!({ "message": message }))),
        DispatchResult::NoDirective => Ok(Json(json!({ "message": reply.reply_text }))),
        DispatchResult::Error(directive_error) => {
            let status = if directive_error.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            warn!(
                event_name = "server.chat.directive_rejected",
                correlation_id = %correlation_id,
                code = directive_error.code(),
                status = status.as_u16(),
                "directive in assistant reply could not be applied"
            );
            Err(ApiError::new(status, directive_error.to_string())
                .with_field("code", directive_error.code()))
        }
    }
}
