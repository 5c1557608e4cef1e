use axum::{extract::State, response::Json};
use chrono::Utc;

use crate::db::{Database, Filter};
use crate::error::ApiError;
use crate::models::{MatchStatus, StatsResponse, timestamp};

/// GET /api/stats - Dashboard counts
///
/// The four counts are independent queries, run concurrently and
/// recomputed on every call.
pub async fn get_stats(State(db): State<Database>) -> Result<Json<StatsResponse>, ApiError> {
    let now = timestamp::format(&Utc::now());

    let all = Filter::new();
    let active_players = Filter::new().eq("is_active", true);
    let upcoming = Filter::new()
        .eq("status", MatchStatus::Scheduled.as_str())
        .gte("match_date", now);
    let published = Filter::new().eq("published", true);

    let (teams, players, matches, news) = (db.teams(), db.players(), db.matches(), db.news());

    let (total_teams, total_players, upcoming_matches, recent_news) = tokio::try_join!(
        teams.count(&all),
        players.count(&active_players),
        matches.count(&upcoming),
        news.count(&published),
    )?;

    Ok(Json(StatsResponse {
        total_teams,
        total_players,
        upcoming_matches,
        recent_news,
    }))
}
