//! Per-connection request handling
//!
//! One browser tab drives both players on a shared keyboard, so a session
//! carries two login slots.

use axum::extract::ws::Message;
use proto::{rules, RequestKind, Slot, UserProfile, C2S, S2C};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::{error::ServiceError, services::NewAccount, state::SharedState};

#[derive(Debug, Error)]
#[error("connection closed")]
pub struct ConnectionClosed;

/// Outbound half of a connection
pub trait Outbox: Send + Sync {
    fn send_bytes(&self, bytes: Vec<u8>) -> Result<(), ConnectionClosed>;
}

impl Outbox for mpsc::UnboundedSender<Message> {
    fn send_bytes(&self, bytes: Vec<u8>) -> Result<(), ConnectionClosed> {
        self.send(Message::Binary(bytes.into()))
            .map_err(|_| ConnectionClosed)
    }
}

fn index(slot: Slot) -> usize {
    match slot {
        Slot::Player1 => 0,
        Slot::Player2 => 1,
    }
}

pub struct Session {
    state: SharedState,
    slots: [Option<UserProfile>; 2],
}

impl Session {
    pub fn new(state: SharedState) -> Self {
        Self {
            state,
            slots: [None, None],
        }
    }

    pub fn slot(&self, slot: Slot) -> Option<&UserProfile> {
        self.slots[index(slot)].as_ref()
    }

    /// Decode a binary frame, answer it, and queue the reply
    pub async fn on_frame(
        &mut self,
        bytes: &[u8],
        outbox: &dyn Outbox,
    ) -> Result<(), ConnectionClosed> {
        let reply = match C2S::from_bytes(bytes) {
            Ok(msg) => self.handle(msg).await,
            Err(err) => {
                let err = ServiceError::Malformed(err);
                warn!(error = ?err, len = bytes.len(), "undecodable frame");
                S2C::error(RequestKind::Malformed, err.to_string())
            }
        };

        match reply.to_bytes() {
            Ok(encoded) => outbox.send_bytes(encoded),
            Err(err) => {
                error!(error = %err, "failed to encode reply");
                Ok(())
            }
        }
    }

    pub async fn handle(&mut self, msg: C2S) -> S2C {
        let request = msg.kind();
        match self.dispatch(msg).await {
            Ok(reply) => reply,
            Err(err) => {
                if err.is_internal() {
                    error!(?request, error = ?err, "request failed");
                } else {
                    debug!(?request, error = %err, "request rejected");
                }
                S2C::error(request, err.to_string())
            }
        }
    }

    async fn dispatch(&mut self, msg: C2S) -> Result<S2C, ServiceError> {
        match msg {
            C2S::SignUp {
                username,
                password,
                email,
                first_name,
                last_name,
            } => {
                let user_id = self
                    .state
                    .accounts()
                    .sign_up(NewAccount {
                        username,
                        password,
                        email,
                        first_name,
                        last_name,
                    })
                    .await?;
                Ok(S2C::SignedUp { user_id })
            }
            C2S::Login {
                slot,
                username,
                password,
            } => self.login(slot, &username, &password).await,
            C2S::Logout { slot } => {
                if let Some(user) = self.slots[index(slot)].take() {
                    debug!(slot = slot.number(), username = %user.username, "logged out");
                }
                Ok(S2C::LoggedOut { slot })
            }
            C2S::GetUser { user_id } => {
                let user = self.state.accounts().get_user(user_id).await?;
                Ok(S2C::User {
                    user: user.map(Into::into),
                })
            }
            C2S::History { user_id } => {
                let entries = self.state.scores().history(user_id).await?;
                Ok(S2C::History {
                    user_id,
                    entries: entries.into_iter().map(Into::into).collect(),
                })
            }
            C2S::RecordMatch {
                left_score,
                right_score,
            } => {
                let (Some(left), Some(right)) = (&self.slots[0], &self.slots[1]) else {
                    return Err(ServiceError::PlayersMissing);
                };
                let histories = self
                    .state
                    .scores()
                    .record_match(left.id, right.id, left_score, right_score)
                    .await?;
                Ok(S2C::MatchRecorded {
                    left_history: histories.left.into_iter().map(Into::into).collect(),
                    right_history: histories.right.into_iter().map(Into::into).collect(),
                })
            }
            C2S::Ping { t_ms } => Ok(S2C::Pong { t_ms }),
        }
    }

    async fn login(
        &mut self,
        slot: Slot,
        username: &str,
        password: &str,
    ) -> Result<S2C, ServiceError> {
        if rules::is_blank(username) || password.is_empty() {
            return Err(ServiceError::MissingCredentials);
        }
        let other = slot.other();
        if self
            .slot(other)
            .is_some_and(|user| user.username == username)
        {
            return Err(ServiceError::AlreadyLoggedIn(other.number()));
        }

        let user: UserProfile = self
            .state
            .accounts()
            .authenticate(username, password)
            .await?
            .into();
        // The name check above misses usernames the database matches by collation
        if self.slot(other).is_some_and(|held| held.id == user.id) {
            return Err(ServiceError::AlreadyLoggedIn(other.number()));
        }
        debug!(slot = slot.number(), username = %user.username, "logged in");
        self.slots[index(slot)] = Some(user.clone());
        Ok(S2C::LoggedIn { slot, user })
    }
}
