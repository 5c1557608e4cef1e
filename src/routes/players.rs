use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;

use crate::db::{Database, Filter};
use crate::error::ApiError;
use crate::models::{Document, Player};
use super::extract::{Params, Payload};

// Query parameters for listing players
#[derive(Deserialize)]
pub struct ListPlayersQuery {
    #[serde(default)]
    team_id: Option<String>,
}

// GET /api/players?team_id=... - List players, optionally for one team
pub async fn get_players(
    State(db): State<Database>,
    Params(params): Params<ListPlayersQuery>,
) -> Result<Json<Vec<Player>>, ApiError> {
    // `?team_id=` is the same as no filter
    let filter = match params.team_id.filter(|id| !id.is_empty()) {
        Some(team_id) => Filter::new().eq("team_id", team_id),
        None => Filter::new(),
    };

    let players = db.players().find_many(&filter, None, None).await?;

    Ok(Json(players))
}

// POST /api/players - Create a player
pub async fn create_player(
    State(db): State<Database>,
    Payload(player): Payload<Player>,
) -> Result<Json<Player>, ApiError> {
    let player = db.players().insert(player).await?;
    tracing::info!("Created player {} ({})", player.id, player.name);

    Ok(Json(player))
}

// GET /api/players/:id - Get player by ID
pub async fn get_player_by_id(
    State(db): State<Database>,
    Path(player_id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    let player = db
        .players()
        .find_by_id(&player_id)
        .await?
        .ok_or(ApiError::NotFound(Player::LABEL))?;

    Ok(Json(player))
}

// PUT /api/players/:id - Replace a player
pub async fn update_player(
    State(db): State<Database>,
    Path(player_id): Path<String>,
    Payload(player): Payload<Player>,
) -> Result<Json<Player>, ApiError> {
    let player = db
        .players()
        .replace(&player_id, player)
        .await?
        .ok_or(ApiError::NotFound(Player::LABEL))?;

    Ok(Json(player))
}
