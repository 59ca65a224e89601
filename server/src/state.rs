use std::sync::Arc;

use crate::{
    services::{
        AccountService, Clock, CoreAccountService, CoreScoreService, PasswordHasher, ScoreService,
    },
    store::{ScoreStore, UserStore},
};

pub type SharedState = Arc<AppState>;

/// Services shared by every connection
pub struct AppState {
    accounts: Arc<dyn AccountService>,
    scores: Arc<dyn ScoreService>,
}

impl AppState {
    pub fn new(accounts: Arc<dyn AccountService>, scores: Arc<dyn ScoreService>) -> SharedState {
        Arc::new(Self { accounts, scores })
    }

    /// Wire the core services over a pair of stores
    pub fn with_stores(
        users: Arc<dyn UserStore>,
        scores: Arc<dyn ScoreStore>,
        hasher: PasswordHasher,
        clock: Arc<dyn Clock>,
    ) -> SharedState {
        Self::new(
            Arc::new(CoreAccountService::new(users, hasher)),
            Arc::new(CoreScoreService::new(scores, clock)),
        )
    }

    pub fn accounts(&self) -> &dyn AccountService {
        self.accounts.as_ref()
    }

    pub fn scores(&self) -> &dyn ScoreService {
        self.scores.as_ref()
    }
}
