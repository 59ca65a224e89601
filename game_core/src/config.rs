use crate::params::Params;
use crate::rect::Rect;
use crate::Side;
use glam::IVec2;

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub arena_width: i32,
    pub arena_height: i32,
    pub paddle_width: i32,
    pub paddle_height: i32,
    pub paddle_margin: i32,
    pub paddle_speed: i32,
    pub paddle_influence: f64,
    pub ball_size: i32,
    pub ball_speed_initial: f64,
    pub max_bounce_angle: f64,
    pub max_deformation_frames: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_margin: Params::PADDLE_MARGIN,
            paddle_speed: Params::PADDLE_SPEED,
            paddle_influence: Params::PADDLE_INFLUENCE,
            ball_size: Params::BALL_SIZE,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            max_bounce_angle: Params::MAX_BOUNCE_ANGLE,
            max_deformation_frames: Params::MAX_DEFORMATION_FRAMES,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get X position (left edge) for a paddle
    pub fn paddle_x(&self, side: Side) -> i32 {
        match side {
            Side::Left => self.paddle_margin,
            Side::Right => self.arena_width - self.paddle_width - self.paddle_margin,
        }
    }

    /// Y position (top edge) of a vertically centred paddle
    pub fn paddle_start_y(&self) -> i32 {
        self.arena_height / 2 - self.paddle_height / 2
    }

    /// Top-left corner of a ball waiting at the centre spot
    pub fn ball_start(&self) -> IVec2 {
        IVec2::new(
            self.arena_width / 2 - self.ball_size / 2,
            self.arena_height / 2 - self.ball_size / 2,
        )
    }

    /// Clamp paddle Y so the whole paddle stays inside the arena
    pub fn clamp_paddle_y(&self, y: i32) -> i32 {
        y.clamp(0, self.arena_height - self.paddle_height)
    }

    pub fn paddle_rect(&self, side: Side, y: i32) -> Rect {
        Rect::new(
            self.paddle_x(side),
            y,
            self.paddle_width,
            self.paddle_height,
        )
    }

    pub fn ball_rect(&self, pos: IVec2) -> Rect {
        Rect::new(pos.x, pos.y, self.ball_size, self.ball_size)
    }
}
