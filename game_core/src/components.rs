use glam::{DVec2, IVec2};

/// Which half of the table a player defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Left,  // Player 1
    Right, // Player 2
}

/// A held paddle key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Up,
    Down,
}

/// Paddle component - represents a player's paddle
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub y: i32,     // Top edge
    pub speed: i32, // Vertical movement applied this tick (negative = up)
}

impl Paddle {
    pub fn new(side: Side, y: i32) -> Self {
        Self { side, y, speed: 0 }
    }
}

/// Which paddle keys are currently held
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleControls {
    pub up: bool,
    pub down: bool,
}

impl PaddleControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::Up => self.up = pressed,
            Control::Down => self.down = pressed,
        }
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: IVec2, // Top-left corner
    pub vel: DVec2,
    pub deformation_frames: u32,
}

impl Ball {
    pub fn new(pos: IVec2, vel: DVec2) -> Self {
        Self {
            pos,
            vel,
            deformation_frames: 0,
        }
    }

    /// Serve from the centre spot along one of the four diagonals
    pub fn reset(&mut self, center: IVec2, speed: f64, rng: &mut crate::GameRng) {
        use rand::Rng;
        self.pos = center;
        let sx = if rng.0.gen_bool(0.5) { 1.0 } else { -1.0 };
        let sy = if rng.0.gen_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = DVec2::new(speed * sx, speed * sy);
        self.deformation_frames = 0;
    }
}
