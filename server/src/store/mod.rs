//! Persistence for accounts and match results.
//!
//! Two tables back the game: `users` holds credentials and profile fields,
//! `scores` holds one row per player per finished match.

pub mod memory;
pub mod mysql;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use proto::{ScoreEntry, ScoreId, UserId, UserProfile};
use thiserror::Error;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Timestamp layout used when score rows leave the server
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("username `{0}` already exists")]
    DuplicateUsername(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("insert into `{0}` affected no rows")]
    NotInserted(&'static str),
    #[error("score {0} does not fit an INT column")]
    ScoreOutOfRange(u32),
}

/// Account fields as they are written. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Account as read back, without credentials
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.user_id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credentials {
    pub user_id: UserId,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewScore {
    pub user_id: UserId,
    pub score: i32,
    pub score_points: i32,
    pub opponent_score: i32,
    pub date_played: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ScoreRecord {
    pub score_id: ScoreId,
    pub user_id: UserId,
    pub score: i32,
    pub score_points: i32,
    pub date_played: NaiveDateTime,
    pub opponent_score: i32,
}

impl From<ScoreRecord> for ScoreEntry {
    fn from(record: ScoreRecord) -> Self {
        ScoreEntry {
            score_id: record.score_id,
            user_id: record.user_id,
            score: record.score,
            score_points: record.score_points,
            opponent_score: record.opponent_score,
            date_played: record.date_played.format(DATE_FORMAT).to_string(),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> Result<UserId>;
    async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>>;
    async fn get_user(&self, user_id: UserId) -> Result<Option<User>>;
}

#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Both rows of one match, committed together or not at all
    async fn insert_match(&self, left: NewScore, right: NewScore) -> Result<(ScoreId, ScoreId)>;
    /// Oldest first
    async fn scores_for_user(&self, user_id: UserId) -> Result<Vec<ScoreRecord>>;
}
