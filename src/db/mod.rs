//! Document storage on SQLite.
//!
//! Every collection is a table of `(id, doc)` rows where `doc` holds the
//! record as JSON text. Filters and sorts reach into the document with
//! `json_extract`.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::models::{Document, Event, Match, NewsArticle, Player, Sponsor, Team};

mod collection;
mod query;

pub use collection::Collection;
pub use query::{Direction, Filter, Sort};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document with id '{0}' already exists")]
    DuplicateKey(String),

    #[error("invalid field name '{0}'")]
    InvalidField(String),

    #[error("unsupported filter value for field '{0}'")]
    UnsupportedValue(String),

    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("corrupt document in '{collection}': {source}")]
    Corrupt {
        collection: &'static str,
        source: serde_json::Error,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

/// Shared handle to the document store. Cloning is cheap; all clones use the
/// same connection pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `url`, creating the database file and any missing
    /// collections.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.ensure_collections().await?;
        Ok(db)
    }

    /// A private in-memory database, kept alive on a single connection.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.ensure_collections().await?;
        Ok(db)
    }

    async fn ensure_collections(&self) -> Result<(), StoreError> {
        let collections = [
            Team::COLLECTION,
            Player::COLLECTION,
            Match::COLLECTION,
            Event::COLLECTION,
            NewsArticle::COLLECTION,
            Sponsor::COLLECTION,
        ];

        for name in collections {
            let sql = format!(
                r#"CREATE TABLE IF NOT EXISTS {name} (
                       id TEXT PRIMARY KEY NOT NULL,
                       doc TEXT NOT NULL CHECK (json_valid(doc))
                   )"#
            );
            sqlx::query(&sql).execute(&self.pool).await?;
        }

        tracing::debug!("Collections ready: {}", collections.join(", "));
        Ok(())
    }

    pub fn collection<T: Document>(&self) -> Collection<T> {
        Collection::new(self.pool.clone())
    }

    pub fn teams(&self) -> Collection<Team> {
        self.collection()
    }

    pub fn players(&self) -> Collection<Player> {
        self.collection()
    }

    pub fn matches(&self) -> Collection<Match> {
        self.collection()
    }

    pub fn events(&self) -> Collection<Event> {
        self.collection()
    }

    pub fn news(&self) -> Collection<NewsArticle> {
        self.collection()
    }

    pub fn sponsors(&self) -> Collection<Sponsor> {
        self.collection()
    }

    /// Close every pooled connection. Waits for checked-out connections to
    /// be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
