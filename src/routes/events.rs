use axum::{extract::State, response::Json};
use serde::Deserialize;

use crate::db::{Database, Filter, Sort};
use crate::error::ApiError;
use crate::models::Event;
use super::effective_limit;
use super::extract::{Params, Payload};

#[derive(Deserialize)]
pub struct ListEventsQuery {
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    20
}

// GET /api/events?limit=20 - Soonest events first
pub async fn get_events(
    State(db): State<Database>,
    Params(params): Params<ListEventsQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = db
        .events()
        .find_many(&Filter::new(), Some(Sort::asc("event_date")), effective_limit(params.limit))
        .await?;

    Ok(Json(events))
}

// POST /api/events - Create an event
pub async fn create_event(
    State(db): State<Database>,
    Payload(event): Payload<Event>,
) -> Result<Json<Event>, ApiError> {
    let event = db.events().insert(event).await?;
    tracing::info!("Created event {} ({})", event.id, event.title);

    Ok(Json(event))
}
