use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use derive_more::Constructor;
use proto::UserId;
use tracing::info;

use crate::store::{NewScore, Result, ScoreRecord, ScoreStore, StoreError};

/// Source of "now" for recorded matches
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// Both players' histories as they stood before the match was stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchHistories {
    pub left: Vec<ScoreRecord>,
    pub right: Vec<ScoreRecord>,
}

#[async_trait]
pub trait ScoreService: Send + Sync {
    async fn record_match(
        &self,
        left_user: UserId,
        right_user: UserId,
        left_score: u32,
        right_score: u32,
    ) -> Result<MatchHistories>;

    async fn history(&self, user_id: UserId) -> Result<Vec<ScoreRecord>>;
}

#[derive(Constructor)]
pub struct CoreScoreService {
    scores: Arc<dyn ScoreStore>,
    clock: Arc<dyn Clock>,
}

#[async_trait]
impl ScoreService for CoreScoreService {
    async fn record_match(
        &self,
        left_user: UserId,
        right_user: UserId,
        left_score: u32,
        right_score: u32,
    ) -> Result<MatchHistories> {
        let column =
            |score: u32| i32::try_from(score).map_err(|_| StoreError::ScoreOutOfRange(score));
        let (left_score, right_score) = (column(left_score)?, column(right_score)?);

        let histories = MatchHistories {
            left: self.scores.scores_for_user(left_user).await?,
            right: self.scores.scores_for_user(right_user).await?,
        };

        let played = self.clock.now();
        let row = |user_id, score, opponent_score| NewScore {
            user_id,
            score,
            score_points: 0,
            opponent_score,
            date_played: played,
        };
        self.scores
            .insert_match(
                row(left_user, left_score, right_score),
                row(right_user, right_score, left_score),
            )
            .await?;

        info!(left_user, right_user, left_score, right_score, "match recorded");
        Ok(histories)
    }

    async fn history(&self, user_id: UserId) -> Result<Vec<ScoreRecord>> {
        self.scores.scores_for_user(user_id).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::{MemoryStore, NewUser, UserStore};
    use chrono::NaiveDate;

    pub(crate) struct FixedClock(pub NaiveDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    pub(crate) fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    async fn seeded() -> (Arc<MemoryStore>, CoreScoreService, UserId, UserId) {
        let store = Arc::new(MemoryStore::new());
        let mut ids = Vec::new();
        for name in ["left", "right"] {
            let id = store
                .insert_user(NewUser {
                    username: name.into(),
                    password_hash: String::new(),
                    email: format!("{name}@example.com"),
                    first_name: None,
                    last_name: None,
                })
                .await
                .unwrap();
            ids.push(id);
        }
        let svc = CoreScoreService::new(store.clone(), Arc::new(FixedClock(noon())));
        (store, svc, ids[0], ids[1])
    }

    #[tokio::test]
    async fn test_record_match_writes_mirrored_rows() {
        let (_store, svc, left, right) = seeded().await;
        svc.record_match(left, right, 11, 7).await.unwrap();

        let l = svc.history(left).await.unwrap();
        let r = svc.history(right).await.unwrap();
        assert_eq!(l.len(), 1);
        assert_eq!(r.len(), 1);
        assert_eq!((l[0].score, l[0].opponent_score), (11, 7));
        assert_eq!((r[0].score, r[0].opponent_score), (7, 11));
        assert_eq!(l[0].score_points, 0);
        assert_eq!(l[0].date_played, noon());
    }

    #[tokio::test]
    async fn test_histories_exclude_current_match() {
        let (_store, svc, left, right) = seeded().await;
        let first = svc.record_match(left, right, 5, 2).await.unwrap();
        assert!(first.left.is_empty());
        assert!(first.right.is_empty());

        let second = svc.record_match(left, right, 3, 5).await.unwrap();
        assert_eq!(second.left.len(), 1);
        assert_eq!(second.left[0].score, 5);
        assert_eq!(second.right[0].score, 2);
        assert_eq!(svc.history(left).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_player_fails() {
        let (_store, svc, left, _right) = seeded().await;
        let err = svc.record_match(left, 99, 1, 0).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(svc.history(left).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_score_beyond_int_column_is_rejected() {
        let (_store, svc, left, right) = seeded().await;
        let err = svc.record_match(left, right, u32::MAX, 0).await.unwrap_err();
        assert!(matches!(err, StoreError::ScoreOutOfRange(u32::MAX)));
        assert!(svc.history(left).await.unwrap().is_empty());
        assert!(svc.history(right).await.unwrap().is_empty());

        let max = i32::MAX as u32;
        svc.record_match(left, right, max, 0).await.unwrap();
        assert_eq!(svc.history(left).await.unwrap()[0].score, i32::MAX);
    }
}
