use async_trait::async_trait;
use proto::{ScoreId, UserId};
use tokio::sync::RwLock;

use super::{
    Credentials, NewScore, NewUser, Result, ScoreRecord, ScoreStore, StoreError, User, UserStore,
};

struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Default)]
struct Inner {
    users: Vec<StoredUser>,
    scores: Vec<ScoreRecord>,
}

/// In-process store for local play and tests. Ids start at 1 like
/// `AUTO_INCREMENT`.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<UserId> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.user.username == user.username) {
            return Err(StoreError::DuplicateUsername(user.username));
        }
        let user_id = inner.users.len() as UserId + 1;
        inner.users.push(StoredUser {
            user: User {
                user_id,
                username: user.username,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
            },
            password_hash: user.password_hash,
        });
        Ok(user_id)
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|u| u.user.username == username)
            .map(|u| Credentials {
                user_id: u.user.user_id,
                username: u.user.username.clone(),
                password_hash: u.password_hash.clone(),
            }))
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|u| u.user.user_id == user_id)
            .map(|u| u.user.clone()))
    }
}

#[async_trait]
impl ScoreStore for MemoryStore {
    async fn insert_match(&self, left: NewScore, right: NewScore) -> Result<(ScoreId, ScoreId)> {
        let mut inner = self.inner.write().await;
        for score in [&left, &right] {
            if !inner.users.iter().any(|u| u.user.user_id == score.user_id) {
                return Err(StoreError::NotFound(format!("user {}", score.user_id)));
            }
        }
        let first_id = inner.scores.len() as ScoreId + 1;
        for (score_id, score) in (first_id..).zip([left, right]) {
            inner.scores.push(ScoreRecord {
                score_id,
                user_id: score.user_id,
                score: score.score,
                score_points: score.score_points,
                date_played: score.date_played,
                opponent_score: score.opponent_score,
            });
        }
        Ok((first_id, first_id + 1))
    }

    async fn scores_for_user(&self, user_id: UserId) -> Result<Vec<ScoreRecord>> {
        let inner = self.inner.read().await;
        Ok(inner
            .scores
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }
}
