use axum::{extract::State, response::Json};
use serde::Deserialize;

use crate::db::{Database, Filter};
use crate::error::ApiError;
use crate::models::Sponsor;
use super::{default_true, flag};
use super::extract::{Params, Payload};

#[derive(Deserialize)]
pub struct ListSponsorsQuery {
    #[serde(default = "default_true", deserialize_with = "flag")]
    active_only: bool,
}

// GET /api/sponsors?active_only=true - List sponsors
pub async fn get_sponsors(
    State(db): State<Database>,
    Params(params): Params<ListSponsorsQuery>,
) -> Result<Json<Vec<Sponsor>>, ApiError> {
    let filter = if params.active_only {
        Filter::new().eq("active", true)
    } else {
        Filter::new()
    };

    let sponsors = db.sponsors().find_many(&filter, None, None).await?;

    Ok(Json(sponsors))
}

// POST /api/sponsors - Create a sponsor
pub async fn create_sponsor(
    State(db): State<Database>,
    Payload(sponsor): Payload<Sponsor>,
) -> Result<Json<Sponsor>, ApiError> {
    let sponsor = db.sponsors().insert(sponsor).await?;
    tracing::info!("Created sponsor {} ({})", sponsor.id, sponsor.name);

    Ok(Json(sponsor))
}
