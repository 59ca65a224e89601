use game_core::{Config, Match, MatchSnapshot, Settings, Side};

use crate::input::{self, KeyAction};

/// What happened during one animation frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub ticks: u32,
    /// A paddle-hit sound should play
    pub play_hit_sound: bool,
    pub scored: bool,
    /// Set once, on the frame the match ends
    pub finished: bool,
}

/// A match played on this keyboard by both players
pub struct LocalGame {
    game: Match,
    finish_reported: bool,
}

impl LocalGame {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::with_config(Config::default(), settings, seed)
    }

    pub fn with_config(config: Config, settings: Settings, seed: u64) -> Self {
        Self {
            game: Match::with_config(config, settings, seed),
            finish_reported: false,
        }
    }

    pub fn config(&self) -> &Config {
        self.game.config()
    }

    pub fn settings(&self) -> &Settings {
        self.game.settings()
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        self.game.snapshot()
    }

    pub fn is_over(&self) -> bool {
        self.game.is_over()
    }

    /// Returns true if the key meant something to the match
    pub fn key_down(&mut self, key: &str) -> bool {
        match input::key_down(key) {
            Some(KeyAction::Paddle(side, control)) => self.game.press(side, control),
            Some(KeyAction::Restart) if !self.game.is_over() => self.game.restart(),
            Some(KeyAction::TogglePause) => self.game.toggle_pause(),
            _ => return false,
        }
        true
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match input::key_up(key) {
            Some((side, control)) => {
                self.game.release(side, control);
                true
            }
            None => false,
        }
    }

    /// Advance by `dt` seconds of wall time
    pub fn frame(&mut self, dt: f32) -> FrameReport {
        let outcome = self.game.advance(dt);
        let finished = self.game.is_over() && !self.finish_reported;
        if finished {
            self.finish_reported = true;
        }
        FrameReport {
            ticks: outcome.ticks,
            play_hit_sound: outcome.events.paddle_hit && self.settings().sound_enabled,
            scored: outcome.events.left_scored || outcome.events.right_scored,
            finished,
        }
    }

    /// (player 1, player 2) once the match is over
    pub fn final_scores(&self) -> Option<(u32, u32)> {
        self.game.is_over().then(|| {
            let snap = self.game.snapshot();
            (snap.score(Side::Left), snap.score(Side::Right))
        })
    }
}
