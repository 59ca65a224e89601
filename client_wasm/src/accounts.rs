//! Login and sign-up forms for the two players sharing the keyboard

use proto::{rules, RequestKind, ScoreEntry, Slot, UserProfile, C2S, S2C};

use crate::network;

/// What the page should tell the player after a server reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    SignedUp,
    LoggedIn,
    LoggedOut,
    User,
    History,
    MatchRecorded,
    Pong,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// Which request failed, for `NoticeKind::Error`
    pub request: Option<RequestKind>,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            request: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Sign-up form contents
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

fn optional(value: String) -> Option<String> {
    if rules::is_blank(&value) {
        None
    } else {
        Some(value)
    }
}

#[derive(Debug, Default)]
pub struct Accounts {
    slots: [Option<UserProfile>; 2],
    histories: Option<(Vec<ScoreEntry>, Vec<ScoreEntry>)>,
}

fn index(slot: Slot) -> usize {
    match slot {
        Slot::Player1 => 0,
        Slot::Player2 => 1,
    }
}

impl Accounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(&self, slot: Slot) -> Option<&UserProfile> {
        self.slots[index(slot)].as_ref()
    }

    /// Display name, or "Player N" before anyone logs in
    pub fn player_name(&self, slot: Slot) -> String {
        self.player(slot)
            .map(|user| user.username.clone())
            .unwrap_or_else(|| format!("Player {}", slot.number()))
    }

    pub fn both_logged_in(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Histories from before the last recorded match, left then right
    pub fn histories(&self) -> Option<&(Vec<ScoreEntry>, Vec<ScoreEntry>)> {
        self.histories.as_ref()
    }

    /// Forget both players, as when returning to the main menu
    pub fn clear(&mut self) {
        self.slots = [None, None];
        self.histories = None;
    }

    pub fn prepare_login(
        &self,
        slot: Slot,
        username: &str,
        password: &str,
    ) -> Result<Vec<u8>, String> {
        if username.is_empty() || password.is_empty() {
            return Err("Please fill in both fields.".into());
        }
        let other = slot.other();
        if self
            .player(other)
            .is_some_and(|user| user.username.eq_ignore_ascii_case(username))
        {
            return Err(format!(
                "This user is already logged in as Player {}.",
                other.number()
            ));
        }
        network::encode(&C2S::Login {
            slot,
            username: username.into(),
            password: password.into(),
        })
    }

    pub fn prepare_sign_up(&self, form: SignUpForm) -> Result<Vec<u8>, String> {
        if form.username.is_empty() || form.password.is_empty() || form.email.is_empty() {
            return Err("All fields must be filled in.".into());
        }
        if !rules::is_valid_email(&form.email) {
            return Err("Please enter a valid email address.".into());
        }
        network::encode(&C2S::SignUp {
            username: form.username,
            password: form.password,
            email: form.email,
            first_name: optional(form.first_name),
            last_name: optional(form.last_name),
        })
    }

    /// Fold a server reply into local state
    pub fn apply(&mut self, msg: S2C) -> Notice {
        match msg {
            S2C::SignedUp { .. } => Notice::new(
                NoticeKind::SignedUp,
                "Account created successfully! You can now log in.",
            ),
            S2C::LoggedIn { slot, user } => {
                let message = format!("{} logged in successfully!", user.username);
                self.slots[index(slot)] = Some(user);
                Notice::new(NoticeKind::LoggedIn, message)
            }
            S2C::LoggedOut { slot } => {
                self.slots[index(slot)] = None;
                Notice::new(
                    NoticeKind::LoggedOut,
                    format!("Player {} logged out.", slot.number()),
                )
            }
            S2C::User { user } => Notice::new(
                NoticeKind::User,
                user.map(|u| u.username).unwrap_or_default(),
            ),
            S2C::History { user_id, entries } => {
                let name = self
                    .slots
                    .iter()
                    .flatten()
                    .find(|user| user.id == user_id)
                    .map(|user| user.username.clone())
                    .unwrap_or_else(|| format!("User {user_id}"));
                Notice::new(
                    NoticeKind::History,
                    crate::stats::history_text(&name, &entries),
                )
            }
            S2C::MatchRecorded {
                left_history,
                right_history,
            } => {
                self.histories = Some((left_history, right_history));
                Notice::new(NoticeKind::MatchRecorded, "")
            }
            S2C::Pong { .. } => Notice::new(NoticeKind::Pong, ""),
            S2C::Error { request, message } => Notice {
                kind: NoticeKind::Error,
                message,
                request: Some(request),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: i32, username: &str) -> UserProfile {
        UserProfile {
            id,
            username: username.into(),
            email: format!("{username}@example.com"),
            first_name: None,
            last_name: None,
        }
    }

    fn form(username: &str, password: &str, email: &str) -> SignUpForm {
        SignUpForm {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            ..SignUpForm::default()
        }
    }

    #[test]
    fn test_login_needs_both_fields() {
        let accounts = Accounts::new();
        assert_eq!(
            accounts.prepare_login(Slot::Player1, "", "pw").unwrap_err(),
            "Please fill in both fields."
        );
        assert_eq!(
            accounts.prepare_login(Slot::Player2, "ann", "").unwrap_err(),
            "Please fill in both fields."
        );
        assert!(accounts.prepare_login(Slot::Player1, "ann", "pw").is_ok());
    }

    #[test]
    fn test_login_rejects_user_in_other_slot() {
        let mut accounts = Accounts::new();
        accounts.apply(S2C::LoggedIn {
            slot: Slot::Player2,
            user: profile(4, "ann"),
        });
        assert_eq!(
            accounts
                .prepare_login(Slot::Player1, "ann", "pw")
                .unwrap_err(),
            "This user is already logged in as Player 2."
        );
        assert!(accounts.prepare_login(Slot::Player1, "Ann", "pw").is_err());
        assert!(accounts.prepare_login(Slot::Player1, "anna", "pw").is_ok());
    }

    #[test]
    fn test_logout_notice() {
        let mut accounts = Accounts::new();
        accounts.apply(S2C::LoggedIn {
            slot: Slot::Player1,
            user: profile(4, "ann"),
        });
        let notice = accounts.apply(S2C::LoggedOut { slot: Slot::Player1 });
        assert_eq!(notice.message, "Player 1 logged out.");
        assert!(accounts.player(Slot::Player1).is_none());
    }

    #[test]
    fn test_sign_up_validation() {
        let accounts = Accounts::new();
        assert_eq!(
            accounts.prepare_sign_up(form("ann", "pw", "")).unwrap_err(),
            "All fields must be filled in."
        );
        assert_eq!(
            accounts
                .prepare_sign_up(form("ann", "pw", "not-an-email"))
                .unwrap_err(),
            "Please enter a valid email address."
        );

        let bytes = accounts
            .prepare_sign_up(SignUpForm {
                first_name: "Ann".into(),
                last_name: " ".into(),
                ..form("ann", "pw", "ann@example.com")
            })
            .unwrap();
        match C2S::from_bytes(&bytes).unwrap() {
            C2S::SignUp {
                first_name,
                last_name,
                ..
            } => {
                assert_eq!(first_name.as_deref(), Some("Ann"));
                assert_eq!(last_name, None);
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_replies_update_slots() {
        let mut accounts = Accounts::new();
        assert_eq!(accounts.player_name(Slot::Player1), "Player 1");

        let notice = accounts.apply(S2C::LoggedIn {
            slot: Slot::Player1,
            user: profile(1, "ann"),
        });
        assert_eq!(notice.message, "ann logged in successfully!");
        assert!(!accounts.both_logged_in());

        accounts.apply(S2C::LoggedIn {
            slot: Slot::Player2,
            user: profile(2, "ben"),
        });
        assert!(accounts.both_logged_in());
        assert_eq!(accounts.player_name(Slot::Player2), "ben");

        accounts.apply(S2C::LoggedOut {
            slot: Slot::Player1,
        });
        assert!(accounts.player(Slot::Player1).is_none());
    }

    #[test]
    fn test_signed_up_and_error_notices() {
        let mut accounts = Accounts::new();
        let notice = accounts.apply(S2C::SignedUp { user_id: 3 });
        assert_eq!(
            notice.message,
            "Account created successfully! You can now log in."
        );

        let notice = accounts.apply(S2C::error(RequestKind::Login, "Invalid password."));
        assert!(notice.is_error());
        assert_eq!(notice.request, Some(RequestKind::Login));
        assert_eq!(notice.message, "Invalid password.");
    }

    #[test]
    fn test_match_recorded_keeps_histories() {
        let mut accounts = Accounts::new();
        accounts.apply(S2C::MatchRecorded {
            left_history: vec![],
            right_history: vec![],
        });
        let (left, right) = accounts.histories().unwrap();
        assert!(left.is_empty() && right.is_empty());
        accounts.clear();
        assert!(accounts.histories().is_none());
    }
}
