use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::schema::{FieldKind, FieldSpec};

pub mod timestamp;

/// A record type stored in its own collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// Collection (table) name.
    const COLLECTION: &'static str;
    /// Human-readable name used in error messages.
    const LABEL: &'static str;
    /// Field table used to validate incoming payloads.
    const FIELDS: &'static [FieldSpec];

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Football,
    Basketball,
    Volleyball,
    Tennis,
    Hockey,
}

impl Sport {
    pub const VALUES: &'static [&'static str] =
        &["football", "basketball", "volleyball", "tennis", "hockey"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Completed,
    Cancelled,
}

impl MatchStatus {
    pub const VALUES: &'static [&'static str] = &["scheduled", "live", "completed", "cancelled"];

    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Live => "live",
            MatchStatus::Completed => "completed",
            MatchStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Match,
    Training,
    Tournament,
    Meeting,
    Social,
}

impl EventType {
    pub const VALUES: &'static [&'static str] =
        &["match", "training", "tournament", "meeting", "social"];
}

/// Value of a single entry in a player's free-form stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

/// A club team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    pub sport: Sport,
    /// e.g. "Senior", "Junior", "Youth"
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub coach: Option<String>,
    #[serde(default)]
    pub home_venue: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default = "Utc::now", with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Document for Team {
    const COLLECTION: &'static str = "teams";
    const LABEL: &'static str = "Team";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldKind::Text),
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::required("sport", FieldKind::OneOf(Sport::VALUES)),
        FieldSpec::required("category", FieldKind::Text),
        FieldSpec::required("description", FieldKind::Text),
        FieldSpec::optional("image", FieldKind::Text),
        FieldSpec::optional("founded_year", FieldKind::Integer),
        FieldSpec::optional("coach", FieldKind::Text),
        FieldSpec::optional("home_venue", FieldKind::Text),
        FieldSpec::optional("achievements", FieldKind::TextList),
        FieldSpec::optional("created_at", FieldKind::Timestamp),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// A player. `team_id` is a soft reference and is never checked against
/// existing teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    pub team_id: String,
    #[serde(default)]
    pub jersey_number: Option<u32>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub stats: BTreeMap<String, StatValue>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub joined_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "Utc::now", with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Document for Player {
    const COLLECTION: &'static str = "players";
    const LABEL: &'static str = "Player";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldKind::Text),
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::required("team_id", FieldKind::Text),
        FieldSpec::optional("jersey_number", FieldKind::Count),
        FieldSpec::optional("position", FieldKind::Text),
        FieldSpec::optional("age", FieldKind::Count),
        FieldSpec::optional("height", FieldKind::Text),
        FieldSpec::optional("weight", FieldKind::Text),
        FieldSpec::optional("bio", FieldKind::Text),
        FieldSpec::optional("image", FieldKind::Text),
        FieldSpec::optional("stats", FieldKind::ScalarMap),
        FieldSpec::optional("achievements", FieldKind::TextList),
        FieldSpec::optional("joined_date", FieldKind::Date),
        FieldSpec::optional("is_active", FieldKind::Boolean),
        FieldSpec::optional("created_at", FieldKind::Timestamp),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// A fixture between two teams. Team names are stored alongside the ids and
/// are not kept in sync with the teams collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(default = "new_id")]
    pub id: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub home_team_name: String,
    pub away_team_name: String,
    #[serde(with = "timestamp")]
    pub match_date: DateTime<Utc>,
    pub venue: String,
    pub sport: Sport,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub match_report: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub competition: Option<String>,
    #[serde(default = "Utc::now", with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Document for Match {
    const COLLECTION: &'static str = "matches";
    const LABEL: &'static str = "Match";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldKind::Text),
        FieldSpec::required("home_team_id", FieldKind::Text),
        FieldSpec::required("away_team_id", FieldKind::Text),
        FieldSpec::required("home_team_name", FieldKind::Text),
        FieldSpec::required("away_team_name", FieldKind::Text),
        FieldSpec::required("match_date", FieldKind::Timestamp),
        FieldSpec::required("venue", FieldKind::Text),
        FieldSpec::required("sport", FieldKind::OneOf(Sport::VALUES)),
        FieldSpec::optional("home_score", FieldKind::Count),
        FieldSpec::optional("away_score", FieldKind::Count),
        FieldSpec::optional("status", FieldKind::OneOf(MatchStatus::VALUES)),
        FieldSpec::optional("match_report", FieldKind::Text),
        FieldSpec::optional("season", FieldKind::Text),
        FieldSpec::optional("competition", FieldKind::Text),
        FieldSpec::optional("created_at", FieldKind::Timestamp),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// A club event. `current_participants` may exceed `max_participants`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default = "new_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub event_date: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub end_date: Option<DateTime<Utc>>,
    pub location: String,
    pub event_type: EventType,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub current_participants: u32,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "Utc::now", with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Document for Event {
    const COLLECTION: &'static str = "events";
    const LABEL: &'static str = "Event";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldKind::Text),
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::required("description", FieldKind::Text),
        FieldSpec::required("event_date", FieldKind::Timestamp),
        FieldSpec::optional("end_date", FieldKind::Timestamp),
        FieldSpec::required("location", FieldKind::Text),
        FieldSpec::required("event_type", FieldKind::OneOf(EventType::VALUES)),
        FieldSpec::optional("organizer", FieldKind::Text),
        FieldSpec::optional("max_participants", FieldKind::Count),
        FieldSpec::optional("current_participants", FieldKind::Count),
        FieldSpec::optional("is_public", FieldKind::Boolean),
        FieldSpec::optional("image", FieldKind::Text),
        FieldSpec::optional("created_at", FieldKind::Timestamp),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// A news article. `published` does not require `published_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default = "new_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub author: String,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default, with = "timestamp::option")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default = "Utc::now", with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Document for NewsArticle {
    const COLLECTION: &'static str = "news";
    const LABEL: &'static str = "News article";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldKind::Text),
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::required("content", FieldKind::Text),
        FieldSpec::required("summary", FieldKind::Text),
        FieldSpec::required("author", FieldKind::Text),
        FieldSpec::required("category", FieldKind::Text),
        FieldSpec::optional("image", FieldKind::Text),
        FieldSpec::optional("tags", FieldKind::TextList),
        FieldSpec::optional("published", FieldKind::Boolean),
        FieldSpec::optional("published_at", FieldKind::Timestamp),
        FieldSpec::optional("created_at", FieldKind::Timestamp),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sponsor {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    /// "Gold", "Silver", "Bronze", ...
    pub sponsorship_level: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "Utc::now", with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Document for Sponsor {
    const COLLECTION: &'static str = "sponsors";
    const LABEL: &'static str = "Sponsor";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldKind::Text),
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::optional("logo", FieldKind::Text),
        FieldSpec::optional("website", FieldKind::Text),
        FieldSpec::optional("contact_email", FieldKind::Text),
        FieldSpec::required("sponsorship_level", FieldKind::Text),
        FieldSpec::optional("description", FieldKind::Text),
        FieldSpec::optional("active", FieldKind::Boolean),
        FieldSpec::optional("start_date", FieldKind::Date),
        FieldSpec::optional("end_date", FieldKind::Date),
        FieldSpec::optional("created_at", FieldKind::Timestamp),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Response for the root endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

/// Aggregate counts for the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_teams: i64,
    /// Players with `is_active = true`
    pub total_players: i64,
    /// Scheduled matches whose date has not passed
    pub upcoming_matches: i64,
    /// Published news articles
    pub recent_news: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
