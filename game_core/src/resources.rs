use crate::{Control, Side};

/// Fixed-step clock for the match loop
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    pub ticks: u64,       // Ticks simulated so far
    pub accumulator: f32, // Unsimulated wall time carried between frames
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank elapsed frame time and return how many whole ticks are due.
    pub fn accumulate(&mut self, dt: f32, tick: f32, max_dt: f32) -> u32 {
        if dt.is_nan() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt.min(max_dt);
        let mut due = 0;
        while self.accumulator >= tick {
            self.accumulator -= tick;
            due += 1;
        }
        due
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy)]
pub struct Score {
    pub left: u32,  // Player 1
    pub right: u32, // Player 2
    pub limit: u32, // First to reach this wins
}

impl Score {
    pub fn new(limit: u32) -> Self {
        Self {
            left: 0,
            right: 0,
            limit,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn reset(&mut self) {
        self.left = 0;
        self.right = 0;
    }

    pub fn is_over(&self) -> bool {
        self.left >= self.limit || self.right >= self.limit
    }

    /// Left takes precedence when both sides are at the limit.
    pub fn has_winner(&self) -> Option<Side> {
        if self.left >= self.limit {
            Some(Side::Left)
        } else if self.right >= self.limit {
            Some(Side::Right)
        } else {
            None
        }
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new(crate::Params::DEFAULT_SCORE_LIMIT as u32)
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Events {
    pub paddle_hit: bool,
    pub wall_hit: bool,
    pub left_scored: bool,
    pub right_scored: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Fold another tick's events into this one
    pub fn merge(&mut self, other: &Events) {
        self.paddle_hit |= other.paddle_hit;
        self.wall_hit |= other.wall_hit;
        self.left_scored |= other.left_scored;
        self.right_scored |= other.right_scored;
    }

    pub fn any(&self) -> bool {
        self.paddle_hit || self.wall_hit || self.left_scored || self.right_scored
    }
}

/// Pending key changes waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pub inputs: Vec<(Side, Control, bool)>, // (side, control, pressed)
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, side: Side, control: Control, pressed: bool) {
        self.inputs.push((side, control, pressed));
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, (Side, Control, bool)> {
        self.inputs.drain(..)
    }
}
