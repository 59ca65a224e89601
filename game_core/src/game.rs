use glam::{DVec2, IVec2};
use hecs::{Entity, World};

use crate::rect::Rect;
use crate::{
    create_ball, create_paddle, step, Ball, Config, Control, Events, GameRng, InputQueue, Paddle,
    Params, Score, Settings, Side, Time,
};

/// What happened during one call to [`Match::tick`] or [`Match::advance`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub ticks: u32,
    pub events: Events,
    /// Set only on the tick that ends the match
    pub winner: Option<Side>,
}

/// Everything the renderer and the UI need to show the match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchSnapshot {
    pub left_y: i32,
    pub right_y: i32,
    pub ball_pos: IVec2,
    pub ball_vel: DVec2,
    pub deformation_frames: u32,
    pub left_score: u32,
    pub right_score: u32,
    pub score_limit: u32,
    pub paused: bool,
    pub winner: Option<Side>,
}

impl MatchSnapshot {
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_score,
            Side::Right => self.right_score,
        }
    }
}

/// A two-player match on one keyboard
pub struct Match {
    world: World,
    config: Config,
    settings: Settings,
    score: Score,
    queue: InputQueue,
    rng: GameRng,
    time: Time,
    paused: bool,
    winner: Option<Side>,
    left: Entity,
    right: Entity,
    ball: Entity,
}

impl Match {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::with_config(Config::default(), settings, seed)
    }

    pub fn with_config(config: Config, settings: Settings, seed: u64) -> Self {
        let mut world = World::new();
        let mut rng = GameRng::new(seed);
        let start_y = config.paddle_start_y();
        let left = create_paddle(&mut world, Side::Left, start_y);
        let right = create_paddle(&mut world, Side::Right, start_y);

        let mut serve = Ball::new(config.ball_start(), DVec2::ZERO);
        serve.reset(config.ball_start(), config.ball_speed_initial, &mut rng);
        let ball = create_ball(&mut world, serve.pos, serve.vel);

        Self {
            world,
            score: Score::new(settings.score_limit),
            config,
            settings,
            queue: InputQueue::new(),
            rng,
            time: Time::new(),
            paused: false,
            winner: None,
            left,
            right,
            ball,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn press(&mut self, side: Side, control: Control) {
        self.queue.push(side, control, true);
    }

    pub fn release(&mut self, side: Side, control: Control) {
        self.queue.push(side, control, false);
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn ticks(&self) -> u64 {
        self.time.ticks
    }

    /// Back to 0-0 with centred paddles and a fresh serve. Pause is kept.
    pub fn restart(&mut self) {
        let start_y = self.config.paddle_start_y();
        for entity in [self.left, self.right] {
            if let Ok(mut paddle) = self.world.get::<&mut Paddle>(entity) {
                paddle.y = start_y;
                paddle.speed = 0;
            }
        }
        if let Ok(mut ball) = self.world.get::<&mut Ball>(self.ball) {
            ball.reset(
                self.config.ball_start(),
                self.config.ball_speed_initial,
                &mut self.rng,
            );
        }
        self.score.reset();
        self.winner = None;
        self.time.accumulator = 0.0;
    }

    /// Run a single simulation tick unless paused or finished
    pub fn tick(&mut self) -> TickOutcome {
        if self.paused || self.winner.is_some() {
            return TickOutcome::default();
        }

        let mut events = Events::new();
        step(
            &mut self.world,
            &self.config,
            &mut self.score,
            &mut events,
            &mut self.queue,
            &mut self.rng,
        );
        self.time.ticks += 1;

        if self.score.is_over() {
            self.winner = self.score.has_winner();
        }

        TickOutcome {
            ticks: 1,
            events,
            winner: self.winner,
        }
    }

    /// Run as many fixed ticks as `dt` seconds of wall time cover
    pub fn advance(&mut self, dt: f32) -> TickOutcome {
        if self.paused || self.winner.is_some() {
            return TickOutcome::default();
        }

        let due = self
            .time
            .accumulate(dt, Params::TICK_SECONDS, Params::MAX_FRAME_DT);
        let mut outcome = TickOutcome::default();
        for _ in 0..due {
            let tick = self.tick();
            outcome.ticks += tick.ticks;
            outcome.events.merge(&tick.events);
            if tick.winner.is_some() {
                outcome.winner = tick.winner;
                self.time.accumulator = 0.0;
                break;
            }
        }
        outcome
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let paddle_y = |entity| {
            self.world
                .get::<&Paddle>(entity)
                .map(|p| p.y)
                .unwrap_or_else(|_| self.config.paddle_start_y())
        };
        let ball = self
            .world
            .get::<&Ball>(self.ball)
            .map(|b| *b)
            .unwrap_or_else(|_| Ball::new(self.config.ball_start(), DVec2::ZERO));

        MatchSnapshot {
            left_y: paddle_y(self.left),
            right_y: paddle_y(self.right),
            ball_pos: ball.pos,
            ball_vel: ball.vel,
            deformation_frames: ball.deformation_frames,
            left_score: self.score.left,
            right_score: self.score.right,
            score_limit: self.score.limit,
            paused: self.paused,
            winner: self.winner,
        }
    }
}

/// On-screen ball bounds, squashed along its direction of travel while a
/// paddle hit is still deforming it. Never smaller than the ball itself.
pub fn ball_draw_size(snapshot: &MatchSnapshot, config: &Config) -> Rect {
    const DEFORMATION_FACTOR: f64 = 0.3;
    const SPEED_SCALE: f64 = 10.0;

    let size = config.ball_size;
    let (mut w, mut h) = (size, size);

    if snapshot.deformation_frames > 0 {
        let stretch = snapshot.ball_vel.length() / SPEED_SCALE * DEFORMATION_FACTOR;
        let long = (size as f64 * (1.0 + stretch)) as i32;
        let short = (size as f64 * (1.0 - stretch)) as i32;
        if snapshot.ball_vel.x.abs() > snapshot.ball_vel.y.abs() {
            w = long;
            h = short;
        } else {
            w = short;
            h = long;
        }
        w = w.max(size);
        h = h.max(size);
    }

    Rect::new(
        snapshot.ball_pos.x - (w - size) / 2,
        snapshot.ball_pos.y - (h - size) / 2,
        w,
        h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_match() -> Match {
        Match::new(Settings::default(), 42)
    }

    /// Zero-height paddles never intersect, so every serve is a point
    fn open_goal_match(limit: u32, seed: u64) -> Match {
        let config = Config {
            paddle_height: 0,
            ..Config::default()
        };
        let settings = Settings::from_names("White", "White", "White", limit, true).unwrap();
        Match::with_config(config, settings, seed)
    }

    #[test]
    fn test_new_match_starts_centred() {
        let game = new_match();
        let snap = game.snapshot();
        assert_eq!(snap.left_y, 250);
        assert_eq!(snap.right_y, 250);
        assert_eq!(snap.ball_pos, IVec2::new(390, 290));
        assert_eq!(snap.ball_vel.x.abs(), 5.0);
        assert_eq!(snap.ball_vel.y.abs(), 5.0);
        assert_eq!((snap.left_score, snap.right_score), (0, 0));
        assert_eq!(snap.score_limit, 11);
        assert!(!snap.paused);
        assert_eq!(snap.winner, None);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut game = new_match();
        game.toggle_pause();
        let before = game.snapshot();

        let outcome = game.tick();
        assert_eq!(outcome.ticks, 0);
        assert_eq!(game.advance(1.0).ticks, 0);
        assert_eq!(game.snapshot().ball_pos, before.ball_pos);

        game.toggle_pause();
        assert_eq!(game.tick().ticks, 1);
        assert_ne!(game.snapshot().ball_pos, before.ball_pos);
    }

    #[test]
    fn test_press_and_release_move_paddle() {
        let mut game = new_match();
        game.press(Side::Left, Control::Up);
        game.tick();
        game.tick();
        assert_eq!(game.snapshot().left_y, 234);

        game.release(Side::Left, Control::Up);
        game.tick();
        assert_eq!(game.snapshot().left_y, 234);
        assert_eq!(game.snapshot().right_y, 250);
    }

    #[test]
    fn test_advance_runs_fixed_ticks() {
        let mut game = new_match();
        assert_eq!(game.advance(0.008).ticks, 0);
        assert_eq!(game.advance(0.008).ticks, 1);
        assert_eq!(game.advance(0.170).ticks, 10);
        assert_eq!(game.ticks(), 11);
    }

    #[test]
    fn test_restart_zeroes_scores() {
        let mut game = open_goal_match(21, 9);
        for _ in 0..400 {
            game.tick();
        }
        let snap = game.snapshot();
        assert!(snap.left_score + snap.right_score > 0, "Someone scored");

        game.restart();
        let snap = game.snapshot();
        assert_eq!((snap.left_score, snap.right_score), (0, 0));
        assert_eq!(snap.left_y, 300);
        assert_eq!(snap.right_y, 300);
        assert_eq!(snap.ball_pos, IVec2::new(390, 290));
        assert_eq!(snap.winner, None);
    }

    #[test]
    fn test_game_over_freezes_match() {
        let mut game = open_goal_match(5, 3);

        let mut ending = None;
        for _ in 0..2_000 {
            let outcome = game.tick();
            if outcome.winner.is_some() {
                ending = Some(outcome);
                break;
            }
        }
        let ending = ending.expect("match should end");
        let snap = game.snapshot();
        assert!(snap.left_score >= 5 || snap.right_score >= 5);
        assert_eq!(ending.winner, game.winner());

        let frozen = game.snapshot();
        assert_eq!(game.tick(), TickOutcome::default());
        assert_eq!(game.snapshot(), frozen);
    }

    #[test]
    fn test_ball_draw_size_plain() {
        let config = Config::new();
        let snap = new_match().snapshot();
        let rect = ball_draw_size(&snap, &config);
        assert_eq!(rect, Rect::new(390, 290, 20, 20));
    }

    #[test]
    fn test_ball_draw_size_stretches_along_travel() {
        let config = Config::new();
        let mut snap = new_match().snapshot();
        snap.deformation_frames = 5;
        snap.ball_vel = DVec2::new(10.0, 0.0);
        // ratio 1.0 -> 20 * 1.3 = 26 wide, short side clamped to 20
        let rect = ball_draw_size(&snap, &config);
        assert_eq!(rect, Rect::new(387, 290, 26, 20));

        snap.ball_vel = DVec2::new(0.0, -10.0);
        let rect = ball_draw_size(&snap, &config);
        assert_eq!(rect, Rect::new(390, 287, 20, 26));
    }
}
