//! HTTP routes for the chat client and the back-office screens.

use std::sync::Arc;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use staybot_agent::AgentRuntime;
use staybot_core::errors::InterfaceError;
use staybot_core::ports::CatalogSource;
use staybot_db::BookingRepository;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use crate::{bookings, chat, houses};

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<AgentRuntime>,
    pub catalog: Arc<dyn CatalogSource>,
    pub bookings: Arc<dyn BookingRepository>,
}

/// JSON error body with an HTTP status. Every handler failure goes through
/// this type so clients always get `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, body: json!({ "error": message.into() }) }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Adds a field next to `error` (for example `details` or `code`).
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Some(object) = self.body.as_object_mut() {
            object.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }
}

impl From<InterfaceError> for ApiError {
    fn from(value: InterfaceError) -> Self {
        let status = match value {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match &value {
            InterfaceError::BadRequest { message, .. } => message.clone(),
            other => {
                error!(
                    event_name = "server.request.failed",
                    correlation_id = other.correlation_id(),
                    error = %other,
                    "request failed"
                );
                other.user_message().to_string()
            }
        };
        Self::new(status, message).with_field("correlation_id", value.correlation_id())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(welcome))
        .route("/api/chat/message", post(chat::send_message))
        .route("/api/houses", get(houses::list_houses))
        .route("/api/houses/guests", get(houses::houses_for_guests))
        .route("/api/houses/search/{query}", get(houses::search_houses))
        .route("/api/houses/{id}", get(houses::get_house))
        .route("/api/bookings", get(bookings::list_bookings).post(bookings::create_booking))
        .route("/api/bookings/customer", get(bookings::bookings_by_customer))
        .route("/api/bookings/status/{status}", get(bookings::bookings_by_status))
        .route("/api/bookings/user/{user_id}", get(bookings::bookings_by_user))
        .route(
            "/api/bookings/{id}",
            get(bookings::get_booking).put(bookings::update_booking).delete(bookings::delete_booking),
        )
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Staybot booking server", "status": "success" }))
}

/// Parses an integer path segment, answering 400 with `message` otherwise.
pub(crate) fn parse_id(raw: &str, message: &str) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|_| ApiError::bad_request(message))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use staybot_agent::{AgentRuntime, ScriptedLlmClient};
    use staybot_core::directive::DirectiveDispatcher;
    use staybot_core::domain::accommodation::{AccommodationId, AccommodationRecord};
    use staybot_core::ports::StaticCatalog;
    use staybot_db::InMemoryBookingRepository;

    use super::AppState;

    pub fn house(id: i64, name: &str, location: &str, capacity: u32, price: f64) -> AccommodationRecord {
        AccommodationRecord {
            id: AccommodationId(id),
            name: name.to_string(),
            description: String::new(),
            location: location.to_string(),
            rating: 4.5,
            nightly_price: price,
            image: format!("/img/{id}.jpg"),
            amenities: Vec::new(),
            capacity,
        }
    }

    pub fn catalog() -> Vec<AccommodationRecord> {
        vec![
            house(1, "Pool Villa", "Ubud", 4, 150.0),
            house(2, "Garden Bungalow", "Canggu", 2, 75.0),
            house(3, "Ocean Suite", "Sanur", 2, 120.0),
            house(4, "Family Joglo", "Ubud", 6, 210.0),
        ]
    }

    pub struct Fixture {
        pub state: AppState,
        pub llm: Arc<ScriptedLlmClient>,
        pub bookings: Arc<InMemoryBookingRepository>,
    }

    pub fn fixture(llm: ScriptedLlmClient) -> Fixture {
        let llm = Arc::new(llm);
        let catalog = Arc::new(StaticCatalog::new(catalog()));
        let bookings = Arc::new(InMemoryBookingRepository::default());
        let dispatcher = DirectiveDispatcher::new(catalog.clone(), bookings.clone());
        let state = AppState {
            agent: Arc::new(AgentRuntime::new(llm.clone(), dispatcher)),
            catalog,
            bookings: bookings.clone(),
        };
        Fixture { state, llm, bookings }
    }
}
