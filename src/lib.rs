use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod schema;

use db::Database;

/// Build the HTTP application around an already connected database.
pub fn app(db: Database) -> Router {
    // Any origin, method and header is accepted
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and stats
        .route("/api/", get(routes::root::root))
        .route("/api/stats", get(routes::stats::get_stats))

        // Team endpoints
        .route("/api/teams", get(routes::teams::get_teams).post(routes::teams::create_team))
        .route(
            "/api/teams/{id}",
            get(routes::teams::get_team_by_id)
                .put(routes::teams::update_team)
                .delete(routes::teams::delete_team),
        )

        // Player endpoints
        .route("/api/players", get(routes::players::get_players).post(routes::players::create_player))
        .route(
            "/api/players/{id}",
            get(routes::players::get_player_by_id).put(routes::players::update_player),
        )

        // Match endpoints
        .route("/api/matches", get(routes::matches::get_matches).post(routes::matches::create_match))
        .route(
            "/api/matches/{id}",
            get(routes::matches::get_match_by_id).put(routes::matches::update_match),
        )

        // Events, news and sponsors
        .route("/api/events", get(routes::events::get_events).post(routes::events::create_event))
        .route("/api/news", get(routes::news::get_news).post(routes::news::create_news))
        .route("/api/sponsors", get(routes::sponsors::get_sponsors).post(routes::sponsors::create_sponsor))

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(db)
}
