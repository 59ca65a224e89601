//! Network protocol for Pong accounts and score history
//!
//! Uses postcard for efficient binary serialization

pub mod rules;

use postcard::{from_bytes, to_allocvec};
use serde::{Deserialize, Serialize};

pub type UserId = i32;
pub type ScoreId = i32;

/// Login slot on the shared keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Player1,
    Player2,
}

impl Slot {
    /// 1 or 2, as shown to players
    pub fn number(self) -> u8 {
        match self {
            Slot::Player1 => 1,
            Slot::Player2 => 2,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Slot::Player1 => Slot::Player2,
            Slot::Player2 => Slot::Player1,
        }
    }
}

/// Public view of an account. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// One player's side of a finished match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score_id: ScoreId,
    pub user_id: UserId,
    pub score: i32,
    pub score_points: i32,
    pub opponent_score: i32,
    /// UTC, formatted `YYYY-MM-DD HH:MM:SS`
    pub date_played: String,
}

// ============================================================================
// C2S Messages (Client to Server)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum C2S {
    /// Create an account
    SignUp {
        username: String,
        password: String,
        email: String,
        first_name: Option<String>,
        last_name: Option<String>,
    },

    /// Log a player into one of the two slots
    Login {
        slot: Slot,
        username: String,
        password: String,
    },

    /// Free a slot
    Logout { slot: Slot },

    /// Look up an account by id
    GetUser { user_id: UserId },

    /// All recorded games for a user
    History { user_id: UserId },

    /// Store a finished match for the two logged-in players
    RecordMatch { left_score: u32, right_score: u32 },

    /// Ping for latency measurement
    Ping { t_ms: u32 },
}

/// Which request an error answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    SignUp,
    Login,
    Logout,
    GetUser,
    History,
    RecordMatch,
    Ping,
    /// The frame could not be decoded
    Malformed,
}

impl C2S {
    pub fn kind(&self) -> RequestKind {
        match self {
            C2S::SignUp { .. } => RequestKind::SignUp,
            C2S::Login { .. } => RequestKind::Login,
            C2S::Logout { .. } => RequestKind::Logout,
            C2S::GetUser { .. } => RequestKind::GetUser,
            C2S::History { .. } => RequestKind::History,
            C2S::RecordMatch { .. } => RequestKind::RecordMatch,
            C2S::Ping { .. } => RequestKind::Ping,
        }
    }
}

// ============================================================================
// S2C Messages (Server to Client)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum S2C {
    /// Account created
    SignedUp { user_id: UserId },

    /// Slot now holds this user
    LoggedIn { slot: Slot, user: UserProfile },

    /// Slot was freed
    LoggedOut { slot: Slot },

    /// Result of a user lookup
    User { user: Option<UserProfile> },

    /// A user's recorded games, oldest first
    History {
        user_id: UserId,
        entries: Vec<ScoreEntry>,
    },

    /// Match stored. Histories are as they stood before this match.
    MatchRecorded {
        left_history: Vec<ScoreEntry>,
        right_history: Vec<ScoreEntry>,
    },

    /// Request failed with a message fit to show the player
    Error {
        request: RequestKind,
        message: String,
    },

    /// Pong response to ping
    Pong { t_ms: u32 },
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl C2S {
    /// Serialize C2S message to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize C2S message from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

impl S2C {
    /// Serialize S2C message to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize S2C message from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }

    pub fn error(request: RequestKind, message: impl Into<String>) -> Self {
        S2C::Error {
            request,
            message: message.into(),
        }
    }
}
