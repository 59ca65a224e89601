/// Game tuning parameters for Pong.
///
/// All distances are arena pixels and all speeds are pixels per tick.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena
    pub const ARENA_WIDTH: i32 = 800;
    pub const ARENA_HEIGHT: i32 = 600;

    // Paddle
    pub const PADDLE_WIDTH: i32 = 10;
    pub const PADDLE_HEIGHT: i32 = 100;
    pub const PADDLE_MARGIN: i32 = 20;
    pub const PADDLE_SPEED: i32 = 8;
    pub const PADDLE_INFLUENCE: f64 = 0.35;

    // Ball
    pub const BALL_SIZE: i32 = 20;
    pub const BALL_SPEED_INITIAL: f64 = 5.0;
    pub const MAX_BOUNCE_ANGLE: f64 = std::f64::consts::FRAC_PI_4;
    pub const MAX_DEFORMATION_FRAMES: u32 = 5;

    // Score
    pub const DEFAULT_SCORE_LIMIT: u8 = 11;

    // Loop
    pub const TICK_SECONDS: f32 = 0.016; // 16 ms timer, ~60 Hz
    pub const MAX_FRAME_DT: f32 = 0.25; // Clamp to prevent tick storms after a stall
}
