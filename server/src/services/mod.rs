pub mod accounts;
pub mod scores;

pub use accounts::{AccountError, AccountService, CoreAccountService, NewAccount, PasswordHasher};
pub use scores::{Clock, CoreScoreService, MatchHistories, ScoreService, SystemClock};
