use axum::{extract::State, response::Json};
use serde::Deserialize;

use crate::db::{Database, Filter, Sort};
use crate::error::ApiError;
use crate::models::NewsArticle;
use super::extract::{Params, Payload};
use super::{default_true, effective_limit, flag};

/// Query parameters for listing news
#[derive(Deserialize)]
pub struct ListNewsQuery {
    /// Only return published articles (default: true)
    #[serde(default = "default_true", deserialize_with = "flag")]
    published_only: bool,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    10
}

/// GET /api/news - Latest articles first
///
/// Query params:
/// - published_only: include drafts when false
/// - limit: maximum number of articles
pub async fn get_news(
    State(db): State<Database>,
    Params(params): Params<ListNewsQuery>,
) -> Result<Json<Vec<NewsArticle>>, ApiError> {
    let filter = if params.published_only {
        Filter::new().eq("published", true)
    } else {
        Filter::new()
    };

    let news = db
        .news()
        .find_many(&filter, Some(Sort::desc("created_at")), effective_limit(params.limit))
        .await?;

    Ok(Json(news))
}

/// POST /api/news - Create an article
pub async fn create_news(
    State(db): State<Database>,
    Payload(article): Payload<NewsArticle>,
) -> Result<Json<NewsArticle>, ApiError> {
    let article = db.news().insert(article).await?;
    tracing::info!("Created news article {} ({})", article.id, article.title);

    Ok(Json(article))
}
