use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;

use crate::db::{Database, Filter, Sort};
use crate::error::ApiError;
use crate::models::{Document, Match};
use super::effective_limit;
use super::extract::{Params, Payload};

// Query parameters for listing matches
#[derive(Deserialize)]
pub struct ListMatchesQuery {
    /// Number of matches to return (default: 50)
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    50
}

// GET /api/matches?limit=50 - Newest matches first
pub async fn get_matches(
    State(db): State<Database>,
    Params(params): Params<ListMatchesQuery>,
) -> Result<Json<Vec<Match>>, ApiError> {
    let matches = db
        .matches()
        .find_many(&Filter::new(), Some(Sort::desc("match_date")), effective_limit(params.limit))
        .await?;

    Ok(Json(matches))
}

// POST /api/matches - Create a match
pub async fn create_match(
    State(db): State<Database>,
    Payload(fixture): Payload<Match>,
) -> Result<Json<Match>, ApiError> {
    let fixture = db.matches().insert(fixture).await?;
    tracing::info!(
        "Created match {} ({} vs {})",
        fixture.id,
        fixture.home_team_name,
        fixture.away_team_name
    );

    Ok(Json(fixture))
}

// GET /api/matches/:id - Get match by ID
pub async fn get_match_by_id(
    State(db): State<Database>,
    Path(match_id): Path<String>,
) -> Result<Json<Match>, ApiError> {
    let fixture = db
        .matches()
        .find_by_id(&match_id)
        .await?
        .ok_or(ApiError::NotFound(Match::LABEL))?;

    Ok(Json(fixture))
}

// PUT /api/matches/:id - Replace a match (e.g. to record the score)
pub async fn update_match(
    State(db): State<Database>,
    Path(match_id): Path<String>,
    Payload(fixture): Payload<Match>,
) -> Result<Json<Match>, ApiError> {
    let fixture = db
        .matches()
        .replace(&match_id, fixture)
        .await?
        .ok_or(ApiError::NotFound(Match::LABEL))?;

    Ok(Json(fixture))
}
