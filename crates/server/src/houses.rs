use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use staybot_core::directive::ranker;
use staybot_core::domain::accommodation::{AccommodationId, AccommodationRecord};
use staybot_core::errors::ApplicationError;
use uuid::Uuid;

use crate::api::{parse_id, ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct GuestsQuery {
    pub guests: Option<String>,
}

async fn load_catalog(state: &AppState) -> Result<Vec<AccommodationRecord>, ApiError> {
    state.catalog.fetch_catalog().await.map_err(|error| {
        ApiError::from(
            ApplicationError::Integration(error.to_string())
                .into_interface(Uuid::new_v4().to_string()),
        )
    })
}

fn houses_body(houses: &[&AccommodationRecord]) -> Value {
    json!({ "houses": houses, "count": houses.len() })
}

pub async fn list_houses(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let catalog = load_catalog(&state).await?;
    Ok(Json(houses_body(&catalog.iter().collect::<Vec<_>>())))
}

/// Houses that seat the party, ranked the same way the assistant offers them.
pub async fn houses_for_guests(
    State(state): State<AppState>,
    Query(query): Query<GuestsQuery>,
) -> Result<Json<Value>, ApiError> {
    let raw = query
        .guests
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("guests parameter is required"))?;
    let guests = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ApiError::bad_request("guests parameter must be a valid number"))?;

    let catalog = load_catalog(&state).await?;
    Ok(Json(houses_body(&ranker::matching_records(&catalog, guests))))
}

pub async fn get_house(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccommodationRecord>, ApiError> {
    let id = AccommodationId(parse_id(&id, "invalid house id")?);
    let catalog = load_catalog(&state).await?;

    catalog
        .into_iter()
        .find(|record| record.id == id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("house not found"))
}

/// Case-insensitive substring match on name or location.
pub async fn search_houses(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(ApiError::bad_request("search query is required"));
    }

    let catalog = load_catalog(&state).await?;
    let matches = catalog
        .iter()
        .filter(|record| {
            record.name.to_lowercase().contains(&needle)
                || record.location.to_lowercase().contains(&needle)
        })
        .collect::<Vec<_>>();

    let mut body = houses_body(&matches);
    body["query"] = Value::from(query);
    Ok(Json(body))
}
