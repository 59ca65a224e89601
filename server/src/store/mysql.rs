use std::time::Duration;

use async_trait::async_trait;
use proto::{ScoreId, UserId};
use sqlx::{
    mysql::{MySqlPool, MySqlPoolOptions},
    MySql, Transaction,
};
use tracing::{debug, info, warn};

use super::{
    Credentials, NewScore, NewUser, Result, ScoreRecord, ScoreStore, StoreError, User, UserStore,
};

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id INT AUTO_INCREMENT PRIMARY KEY,
    username VARCHAR(64) NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    first_name VARCHAR(64) NULL,
    last_name VARCHAR(64) NULL
)"#;

const CREATE_SCORES: &str = r#"
CREATE TABLE IF NOT EXISTS scores (
    score_id INT AUTO_INCREMENT PRIMARY KEY,
    user_id INT NOT NULL,
    score INT NOT NULL,
    score_points INT NOT NULL DEFAULT 0,
    date_played DATETIME NOT NULL,
    opponent_score INT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(user_id)
)"#;

/// MySQL-backed store sharing one connection pool
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await?;
        info!(max_connections, "connected to MySQL");
        Ok(Self { pool })
    }

    /// Create the tables if this is a fresh database
    pub async fn bootstrap(&self) -> Result<()> {
        sqlx::query(CREATE_USERS).execute(&self.pool).await?;
        sqlx::query(CREATE_SCORES).execute(&self.pool).await?;
        debug!("schema ready");
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for MySqlStore {
    async fn insert_user(&self, user: NewUser) -> Result<UserId> {
        let mut tx = self.pool.begin().await?;
        let res = sqlx::query(
            "INSERT INTO users (username, password, email, first_name, last_name) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::DuplicateUsername(user.username.clone())
            }
            other => StoreError::Database(other),
        })?;

        if res.rows_affected() == 0 {
            tx.rollback().await?;
            warn!(username = %user.username, "user insert affected no rows");
            return Err(StoreError::NotInserted("users"));
        }
        tx.commit().await?;
        Ok(res.last_insert_id() as UserId)
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>> {
        let creds = sqlx::query_as::<_, Credentials>(
            "SELECT user_id, username, password AS password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(creds)
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, username, email, first_name, last_name FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

const INSERT_SCORE: &str = "INSERT INTO scores \
    (user_id, score, score_points, date_played, opponent_score) VALUES (?, ?, ?, ?, ?)";

async fn insert_score_row(tx: &mut Transaction<'_, MySql>, score: &NewScore) -> Result<ScoreId> {
    let res = sqlx::query(INSERT_SCORE)
        .bind(score.user_id)
        .bind(score.score)
        .bind(score.score_points)
        .bind(score.date_played)
        .bind(score.opponent_score)
        .execute(&mut **tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                StoreError::NotFound(format!("user {}", score.user_id))
            }
            other => StoreError::Database(other),
        })?;
    if res.rows_affected() == 0 {
        return Err(StoreError::NotInserted("scores"));
    }
    Ok(res.last_insert_id() as ScoreId)
}

#[async_trait]
impl ScoreStore for MySqlStore {
    async fn insert_match(&self, left: NewScore, right: NewScore) -> Result<(ScoreId, ScoreId)> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(2);
        for score in [&left, &right] {
            match insert_score_row(&mut tx, score).await {
                Ok(id) => ids.push(id),
                Err(err) => {
                    tx.rollback().await?;
                    warn!(user_id = score.user_id, error = %err, "match rolled back");
                    return Err(err);
                }
            }
        }
        tx.commit().await?;
        Ok((ids[0], ids[1]))
    }

    async fn scores_for_user(&self, user_id: UserId) -> Result<Vec<ScoreRecord>> {
        let rows = sqlx::query_as::<_, ScoreRecord>(
            "SELECT score_id, user_id, score, score_points, date_played, opponent_score \
             FROM scores WHERE user_id = ? ORDER BY score_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
