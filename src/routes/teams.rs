use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::db::{Database, Filter};
use crate::error::ApiError;
use crate::models::{Document, MessageResponse, Team};
use super::extract::Payload;

// GET /api/teams - List all teams
pub async fn get_teams(State(db): State<Database>) -> Result<Json<Vec<Team>>, ApiError> {
    let teams = db.teams().find_many(&Filter::new(), None, None).await?;

    Ok(Json(teams))
}

// POST /api/teams - Create a team
pub async fn create_team(
    State(db): State<Database>,
    Payload(team): Payload<Team>,
) -> Result<Json<Team>, ApiError> {
    let team = db.teams().insert(team).await?;
    tracing::info!("Created team {} ({})", team.id, team.name);

    Ok(Json(team))
}

// GET /api/teams/:id - Get team by ID
pub async fn get_team_by_id(
    State(db): State<Database>,
    Path(team_id): Path<String>,
) -> Result<Json<Team>, ApiError> {
    let team = db
        .teams()
        .find_by_id(&team_id)
        .await?
        .ok_or(ApiError::NotFound(Team::LABEL))?;

    Ok(Json(team))
}

// PUT /api/teams/:id - Replace a team
pub async fn update_team(
    State(db): State<Database>,
    Path(team_id): Path<String>,
    Payload(team): Payload<Team>,
) -> Result<Json<Team>, ApiError> {
    let team = db
        .teams()
        .replace(&team_id, team)
        .await?
        .ok_or(ApiError::NotFound(Team::LABEL))?;

    Ok(Json(team))
}

// DELETE /api/teams/:id - Remove a team
//
// Players and matches referencing the team are left untouched.
pub async fn delete_team(
    State(db): State<Database>,
    Path(team_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = db.teams().delete(&team_id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(Team::LABEL));
    }

    tracing::info!("Deleted team {}", team_id);
    Ok(Json(MessageResponse {
        message: "Team deleted successfully".to_string(),
    }))
}
