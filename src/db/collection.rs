use std::marker::PhantomData;

use sqlx::sqlite::SqlitePool;
use sqlx::{QueryBuilder, Sqlite};

use super::{Filter, Sort, StoreError};
use crate::models::Document;

/// Gateway to the collection holding documents of type `T`.
pub struct Collection<T> {
    pool: SqlitePool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// Store a new document. Fails with [`StoreError::DuplicateKey`] if a
    /// document with the same id already exists.
    pub async fn insert(&self, record: T) -> Result<T, StoreError> {
        let doc = encode(&record)?;
        let sql = format!("INSERT INTO {} (id, doc) VALUES (?, ?)", T::COLLECTION);

        sqlx::query(&sql)
            .bind(record.id())
            .bind(doc.as_str())
            .execute(&self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    StoreError::DuplicateKey(record.id().to_string())
                }
                other => StoreError::Unavailable(other),
            })?;

        Ok(record)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let sql = format!("SELECT doc FROM {} WHERE id = ?", T::COLLECTION);

        let doc: Option<String> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        doc.as_deref().map(decode).transpose()
    }

    /// Documents matching `filter`, ordered by `sort` (insertion order when
    /// `None`) and capped at `limit`.
    pub async fn find_many(
        &self,
        filter: &Filter,
        sort: Option<Sort>,
        limit: Option<u32>,
    ) -> Result<Vec<T>, StoreError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT doc FROM {}", T::COLLECTION));
        filter.push_where(&mut builder)?;

        match sort {
            Some(sort) => sort.push_order_by(&mut builder)?,
            None => {
                builder.push(" ORDER BY rowid ASC");
            }
        }

        if let Some(limit) = limit {
            builder.push(" LIMIT ").push_bind(i64::from(limit));
        }

        let docs: Vec<String> = builder.build_query_scalar().fetch_all(&self.pool).await?;

        docs.iter().map(|doc| decode(doc)).collect()
    }

    /// Overwrite the document stored under `id` with `record`.
    ///
    /// The stored id is always `id`, whatever `record` carries, and the
    /// original `created_at` is kept. Returns `None` without writing anything
    /// when no document has that id.
    pub async fn replace(&self, id: &str, mut record: T) -> Result<Option<T>, StoreError> {
        record.set_id(id.to_string());
        let doc = encode(&record)?;
        let sql = format!(
            r#"UPDATE {}
               SET doc = json_set(?, '$.created_at', json_extract(doc, '$.created_at'))
               WHERE id = ?
               RETURNING doc"#,
            T::COLLECTION
        );

        let stored: Option<String> = sqlx::query_scalar(&sql)
            .bind(doc.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        stored.as_deref().map(decode).transpose()
    }

    /// Remove the document with `id`, returning how many were deleted (0 or 1).
    pub async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::COLLECTION);

        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    pub async fn count(&self, filter: &Filter) -> Result<i64, StoreError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) FROM {}", T::COLLECTION));
        filter.push_where(&mut builder)?;

        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }
}

fn encode<T: Document>(record: &T) -> Result<String, StoreError> {
    serde_json::to_string(record).map_err(StoreError::Encode)
}

fn decode<T: Document>(doc: &str) -> Result<T, StoreError> {
    serde_json::from_str(doc).map_err(|source| StoreError::Corrupt {
        collection: T::COLLECTION,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{Match, MatchStatus, NewsArticle, Player, Team};
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn team(name: &str) -> Team {
        serde_json::from_value(json!({
            "name": name,
            "sport": "football",
            "category": "Senior",
            "description": "First team",
        }))
        .unwrap()
    }

    fn player(name: &str, team_id: &str, is_active: bool) -> Player {
        serde_json::from_value(json!({
            "name": name,
            "team_id": team_id,
            "is_active": is_active,
        }))
        .unwrap()
    }

    fn fixture(days_from_now: i64, status: MatchStatus) -> Match {
        let mut m: Match = serde_json::from_value(json!({
            "home_team_id": "home",
            "away_team_id": "away",
            "home_team_name": "Home",
            "away_team_name": "Away",
            "match_date": "2026-01-01T00:00:00Z",
            "venue": "Stadium",
            "sport": "football",
        }))
        .unwrap();
        m.match_date = Utc::now() + Duration::days(days_from_now);
        m.status = status;
        m
    }

    #[tokio::test]
    async fn insert_then_find_by_id() {
        let db = Database::in_memory().await.unwrap();
        let teams = db.teams();

        let stored = teams.insert(team("Falcons")).await.unwrap();
        let found = teams.find_by_id(&stored.id).await.unwrap().unwrap();

        assert_eq!(found.name, "Falcons");
        assert_eq!(found.id, stored.id);
        assert!(teams.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let db = Database::in_memory().await.unwrap();
        let teams = db.teams();

        let first = teams.insert(team("Falcons")).await.unwrap();
        let mut second = team("Hawks");
        second.id = first.id.clone();

        match teams.insert(second).await {
            Err(StoreError::DuplicateKey(id)) => assert_eq!(id, first.id),
            other => panic!("expected duplicate key, got {other:?}"),
        }
        assert_eq!(teams.count(&Filter::new()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn replace_missing_id_does_not_insert() {
        let db = Database::in_memory().await.unwrap();
        let teams = db.teams();

        let replaced = teams.replace("nope", team("Ghosts")).await.unwrap();

        assert!(replaced.is_none());
        assert_eq!(teams.count(&Filter::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn replace_pins_id_and_created_at() {
        let db = Database::in_memory().await.unwrap();
        let teams = db.teams();
        let original = teams.insert(team("Falcons")).await.unwrap();

        let mut update = team("Falcons Reserve");
        update.created_at = original.created_at + Duration::days(30);
        let replaced = teams.replace(&original.id, update).await.unwrap().unwrap();

        assert_eq!(replaced.id, original.id);
        assert_eq!(replaced.name, "Falcons Reserve");
        assert_eq!(
            crate::models::timestamp::format(&replaced.created_at),
            crate::models::timestamp::format(&original.created_at)
        );
        let stored = teams.find_by_id(&original.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Falcons Reserve");
    }

    #[tokio::test]
    async fn delete_reports_count() {
        let db = Database::in_memory().await.unwrap();
        let teams = db.teams();
        let stored = teams.insert(team("Falcons")).await.unwrap();

        assert_eq!(teams.delete(&stored.id).await.unwrap(), 1);
        assert_eq!(teams.delete(&stored.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn deleting_a_team_leaves_its_players() {
        let db = Database::in_memory().await.unwrap();
        let stored = db.teams().insert(team("Falcons")).await.unwrap();
        db.players().insert(player("Sam", &stored.id, true)).await.unwrap();

        db.teams().delete(&stored.id).await.unwrap();

        let orphans = db
            .players()
            .find_many(&Filter::new().eq("team_id", stored.id.clone()), None, None)
            .await
            .unwrap();
        assert_eq!(orphans.len(), 1);
    }

    #[tokio::test]
    async fn find_many_filters_by_equality_in_insertion_order() {
        let db = Database::in_memory().await.unwrap();
        let players = db.players();
        for (name, team_id) in [("A", "t1"), ("B", "t2"), ("C", "t1"), ("D", "t1")] {
            players.insert(player(name, team_id, true)).await.unwrap();
        }

        let found = players
            .find_many(&Filter::new().eq("team_id", "t1"), None, None)
            .await
            .unwrap();

        let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "D"]);
    }

    #[tokio::test]
    async fn find_many_sorts_and_limits() {
        let db = Database::in_memory().await.unwrap();
        let matches = db.matches();
        for days in [3, -2, 10, 1] {
            matches.insert(fixture(days, MatchStatus::Scheduled)).await.unwrap();
        }

        let newest = matches
            .find_many(&Filter::new(), Some(Sort::desc("match_date")), Some(2))
            .await
            .unwrap();
        assert_eq!(newest.len(), 2);
        assert!(newest[0].match_date > newest[1].match_date);

        let soonest = matches
            .find_many(&Filter::new(), Some(Sort::asc("match_date")), None)
            .await
            .unwrap();
        assert_eq!(soonest.len(), 4);
        assert!(soonest.windows(2).all(|w| w[0].match_date <= w[1].match_date));
    }

    #[tokio::test]
    async fn count_with_boolean_and_range_filters() {
        let db = Database::in_memory().await.unwrap();
        db.players().insert(player("A", "t1", true)).await.unwrap();
        db.players().insert(player("B", "t1", false)).await.unwrap();
        db.matches().insert(fixture(7, MatchStatus::Scheduled)).await.unwrap();
        db.matches().insert(fixture(-7, MatchStatus::Scheduled)).await.unwrap();
        db.matches().insert(fixture(7, MatchStatus::Cancelled)).await.unwrap();

        let active = db.players().count(&Filter::new().eq("is_active", true)).await.unwrap();
        assert_eq!(active, 1);

        let now = crate::models::timestamp::format(&Utc::now());
        let upcoming = Filter::new()
            .eq("status", MatchStatus::Scheduled.as_str())
            .gte("match_date", now);
        assert_eq!(db.matches().count(&upcoming).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn descending_sort_puts_later_insert_first_on_ties() {
        let db = Database::in_memory().await.unwrap();
        let news = db.news();
        let created_at = Utc::now();
        for title in ["First", "Second"] {
            let mut article: NewsArticle = serde_json::from_value(json!({
                "title": title,
                "content": "...",
                "summary": "...",
                "author": "Press office",
                "category": "Club News",
                "published": true,
            }))
            .unwrap();
            article.created_at = created_at;
            news.insert(article).await.unwrap();
        }

        let newest = news
            .find_many(&Filter::new(), Some(Sort::desc("created_at")), None)
            .await
            .unwrap();

        let titles: Vec<_> = newest.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }
}
