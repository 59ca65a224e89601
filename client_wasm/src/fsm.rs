//! Screen State Machine
//!
//! Tracks which screen the host page shows, from the welcome banner through
//! login, settings and play to the final statistics.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Screens
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Login,
    SignUp,
    Settings,
    Playing,
    GameOver,
}

/// Actions that trigger screen changes
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    StartGame,
    OpenSignUp,
    SignedUp,
    BackToLogin,
    BothLoggedIn,
    Play,
    GameOver,
    BackToMenu,
}

impl ScreenAction {
    /// Parse the SCREAMING_SNAKE names the host page uses
    pub fn from_name(name: &str) -> Option<Self> {
        let action = match name {
            "START_GAME" => ScreenAction::StartGame,
            "OPEN_SIGN_UP" => ScreenAction::OpenSignUp,
            "SIGNED_UP" => ScreenAction::SignedUp,
            "BACK_TO_LOGIN" => ScreenAction::BackToLogin,
            "BOTH_LOGGED_IN" => ScreenAction::BothLoggedIn,
            "PLAY" => ScreenAction::Play,
            "GAME_OVER" => ScreenAction::GameOver,
            "BACK_TO_MENU" => ScreenAction::BackToMenu,
            _ => return None,
        };
        Some(action)
    }
}

/// Result of a screen transition
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone)]
pub struct TransitionResult {
    success: bool,
    from_screen: Screen,
    to_screen: Screen,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl TransitionResult {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn success(&self) -> bool {
        self.success
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    #[allow(clippy::wrong_self_convention)]
    pub fn from_screen(&self) -> Screen {
        self.from_screen
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn to_screen(&self) -> Screen {
        self.to_screen
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct ScreenFsm {
    screen: Screen,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl ScreenFsm {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new() -> Self {
        Self {
            screen: Screen::Welcome,
        }
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Current screen as a string (for JS interop)
    pub fn screen_string(&self) -> String {
        format!("{:?}", self.screen)
    }

    /// Attempt a transition. A rejected action leaves the screen unchanged.
    pub fn transition(&mut self, action: ScreenAction) -> TransitionResult {
        let from_screen = self.screen;
        let to_screen = self.next_screen(action).unwrap_or(from_screen);
        self.screen = to_screen;
        TransitionResult {
            success: to_screen != from_screen,
            from_screen,
            to_screen,
        }
    }

    /// Transition using action string (for easier JS interop)
    pub fn transition_str(&mut self, action: &str) -> TransitionResult {
        match ScreenAction::from_name(action) {
            Some(action) => self.transition(action),
            None => TransitionResult {
                success: false,
                from_screen: self.screen,
                to_screen: self.screen,
            },
        }
    }

    fn next_screen(&self, action: ScreenAction) -> Option<Screen> {
        match (self.screen, action) {
            (Screen::Welcome, ScreenAction::StartGame) => Some(Screen::Login),

            (Screen::Login, ScreenAction::OpenSignUp) => Some(Screen::SignUp),
            (Screen::Login, ScreenAction::BothLoggedIn) => Some(Screen::Settings),

            (Screen::SignUp, ScreenAction::SignedUp) => Some(Screen::Login),
            (Screen::SignUp, ScreenAction::BackToLogin) => Some(Screen::Login),

            (Screen::Settings, ScreenAction::Play) => Some(Screen::Playing),

            (Screen::Playing, ScreenAction::GameOver) => Some(Screen::GameOver),
            (Screen::Playing, ScreenAction::BackToMenu) => Some(Screen::Welcome),

            (Screen::GameOver, ScreenAction::BackToMenu) => Some(Screen::Welcome),

            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.screen == Screen::Playing
    }
}

impl Default for ScreenFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_screen() {
        let fsm = ScreenFsm::new();
        assert_eq!(fsm.screen(), Screen::Welcome);
    }

    #[test]
    fn test_invalid_transition_keeps_screen() {
        let mut fsm = ScreenFsm::new();
        let result = fsm.transition(ScreenAction::Play);
        assert!(!result.success());
        assert_eq!(result.to_screen(), Screen::Welcome);
        assert_eq!(fsm.screen(), Screen::Welcome);
    }

    #[test]
    fn test_full_flow() {
        let mut fsm = ScreenFsm::new();
        for (action, expected) in [
            (ScreenAction::StartGame, Screen::Login),
            (ScreenAction::OpenSignUp, Screen::SignUp),
            (ScreenAction::SignedUp, Screen::Login),
            (ScreenAction::BothLoggedIn, Screen::Settings),
            (ScreenAction::Play, Screen::Playing),
            (ScreenAction::GameOver, Screen::GameOver),
            (ScreenAction::BackToMenu, Screen::Welcome),
        ] {
            assert!(fsm.transition(action).success(), "{action:?}");
            assert_eq!(fsm.screen(), expected);
        }
    }

    #[test]
    fn test_sign_up_can_go_back() {
        let mut fsm = ScreenFsm::new();
        fsm.transition(ScreenAction::StartGame);
        fsm.transition(ScreenAction::OpenSignUp);
        fsm.transition(ScreenAction::BackToLogin);
        assert_eq!(fsm.screen(), Screen::Login);
    }

    #[test]
    fn test_quit_mid_match() {
        let mut fsm = ScreenFsm::new();
        fsm.transition(ScreenAction::StartGame);
        fsm.transition(ScreenAction::BothLoggedIn);
        fsm.transition(ScreenAction::Play);
        assert!(fsm.is_playing());
        fsm.transition(ScreenAction::BackToMenu);
        assert_eq!(fsm.screen(), Screen::Welcome);
    }

    #[test]
    fn test_transition_str() {
        let mut fsm = ScreenFsm::new();
        assert!(fsm.transition_str("START_GAME").success());
        assert_eq!(fsm.screen(), Screen::Login);
        assert!(!fsm.transition_str("NOT_AN_ACTION").success());
        assert_eq!(fsm.screen_string(), "Login");
    }
}
