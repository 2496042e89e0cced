use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use staybot_core::domain::booking::{Booking, BookingId, BookingStatus, NewBooking};
use staybot_core::errors::{ApplicationError, DomainError};
use staybot_db::RepositoryError;
use tracing::info;
use uuid::Uuid;

use crate::api::{parse_id, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
    pub resort_name: String,
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    pub guests: i64,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone_number: String,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookingRequest {
    pub user_id: Option<i64>,
    pub resort_name: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub guests: Option<i64>,
    pub total_price: Option<f64>,
    pub status: Option<String>,
    pub payment_date: Option<String>,
    pub customer_name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerQuery {
    pub name: Option<String>,
    pub phone: Option<String>,
}

fn storage_failure(error: RepositoryError) -> ApiError {
    ApiError::from(
        ApplicationError::Persistence(error.to_string()).into_interface(Uuid::new_v4().to_string()),
    )
}

fn parse_status(raw: &str) -> Result<BookingStatus, ApiError> {
    raw.parse::<BookingStatus>().map_err(|error: DomainError| {
        ApiError::from(ApplicationError::from(error).into_interface(Uuid::new_v4().to_string()))
    })
}

fn booking_id(raw: &str) -> Result<BookingId, ApiError> {
    parse_id(raw, "invalid booking id").map(BookingId)
}

fn bookings_body(bookings: Vec<Booking>) -> Value {
    json!({ "count": bookings.len(), "bookings": bookings })
}

fn invalid_body(_: JsonRejection) -> ApiError {
    ApiError::bad_request("invalid request body")
}

pub async fn list_bookings(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let bookings = state.bookings.list_all().await.map_err(storage_failure)?;
    Ok(Json(bookings_body(bookings)))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    let id = booking_id(&id)?;
    state
        .bookings
        .find_by_id(id)
        .await
        .map_err(storage_failure)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("booking not found"))
}

pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let Json(request) = payload.map_err(invalid_body)?;
    if request.resort_name.trim().is_empty() {
        return Err(ApiError::bad_request("resort_name is required"));
    }
    let status = match request.status.as_deref().map(str::trim) {
        None | Some("") => BookingStatus::Pending,
        Some(raw) => parse_status(raw)?,
    };

    let booking = state
        .bookings
        .create(NewBooking {
            user_id: request.user_id,
            resort_name: request.resort_name,
            check_in: request.check_in,
            check_out: request.check_out,
            guests: request.guests,
            total_price: request.total_price,
            status,
            payment_date: request.payment_date,
            customer_name: request.customer_name,
            phone_number: request.phone_number,
        })
        .await
        .map_err(storage_failure)?;

    info!(
        event_name = "server.booking.created",
        booking_id = booking.id.0,
        status = %booking.status,
        "booking created"
    );
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBookingRequest>, JsonRejection>,
) -> Result<Json<Booking>, ApiError> {
    let id = booking_id(&id)?;
    let Json(changes) = payload.map_err(invalid_body)?;

    let mut booking = state
        .bookings
        .find_by_id(id)
        .await
        .map_err(storage_failure)?
        .ok_or_else(|| ApiError::not_found("booking not found"))?;

    if let Some(status) = changes.status.as_deref() {
        booking.status = parse_status(status)?;
    }
    if let Some(user_id) = changes.user_id {
        booking.user_id = Some(user_id);
    }
    if let Some(resort_name) = changes.resort_name {
        booking.resort_name = resort_name;
    }
    if let Some(check_in) = changes.check_in {
        booking.check_in = check_in;
    }
    if let Some(check_out) = changes.check_out {
        booking.check_out = check_out;
    }
    if let Some(guests) = changes.guests {
        booking.guests = guests;
    }
    if let Some(total_price) = changes.total_price {
        booking.total_price = total_price;
    }
    if let Some(payment_date) = changes.payment_date {
        booking.payment_date = Some(payment_date);
    }
    if let Some(customer_name) = changes.customer_name {
        booking.customer_name = customer_name;
    }
    if let Some(phone_number) = changes.phone_number {
        booking.phone_number = phone_number;
    }

    if !state.bookings.update(&booking).await.map_err(storage_failure)? {
        return Err(ApiError::not_found("booking not found"));
    }
    info!(
        event_name = "server.booking.updated",
        booking_id = booking.id.0,
        status = %booking.status,
        "booking updated"
    );
    Ok(Json(booking))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = booking_id(&id)?;
    if !state.bookings.delete(id).await.map_err(storage_failure)? {
        return Err(ApiError::not_found("booking not found"));
    }
    info!(event_name = "server.booking.deleted", booking_id = id.0, "booking deleted");
    Ok(Json(json!({ "message": "Booking deleted successfully" })))
}

pub async fn bookings_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let status = parse_status(&status)?;
    let bookings = state.bookings.list_by_status(status).await.map_err(storage_failure)?;

    let mut body = bookings_body(bookings);
    body["status"] = Value::from(status.as_str());
    Ok(Json(body))
}

pub async fn bookings_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let user_id = parse_id(&user_id, "invalid user id")?;
    let bookings = state.bookings.list_by_user(user_id).await.map_err(storage_failure)?;

    let mut body = bookings_body(bookings);
    body["user_id"] = Value::from(user_id);
    Ok(Json(body))
}

pub async fn bookings_by_customer(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<Value>, ApiError> {
    let (Some(name), Some(phone)) = (
        query.name.filter(|value| !value.trim().is_empty()),
        query.phone.filter(|value| !value.trim().is_empty()),
    ) else {
        return Err(ApiError::bad_request("both name and phone parameters are required"));
    };

    let bookings =
        state.bookings.list_by_customer(name.trim(), phone.trim()).await.map_err(storage_failure)?;
    Ok(Json(bookings_body(bookings)))
}
