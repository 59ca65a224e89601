use crate::{Ball, Config, Events, Paddle, Side};
use hecs::World;

/// Check ball collisions with walls and paddles
pub fn check_collisions(world: &mut World, config: &Config, events: &mut Events) {
    // Paddle data first so the ball can be borrowed mutably below
    let mut paddles: Vec<(Side, i32, i32)> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, p)| (p.side, p.y, p.speed))
        .collect();
    paddles.sort_by_key(|(side, _, _)| *side);

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        bounce_off_walls(ball, config, events);

        // Both paddles test against the ball as it was after the wall check
        let ball_rect = config.ball_rect(ball.pos);
        for &(side, paddle_y, paddle_speed) in &paddles {
            let paddle_rect = config.paddle_rect(side, paddle_y);
            if !ball_rect.intersects(&paddle_rect) {
                continue;
            }

            ball.pos.x = match side {
                Side::Left => paddle_rect.x + config.paddle_width,
                Side::Right => paddle_rect.x - config.ball_size,
            };
            bounce_off_paddle(ball, side, paddle_rect.mid_y(), paddle_speed, config);
            ball.deformation_frames = config.max_deformation_frames;
            events.paddle_hit = true;
        }
    }
}

fn bounce_off_walls(ball: &mut Ball, config: &Config, events: &mut Events) {
    if ball.pos.y <= 0 && ball.vel.y < 0.0 {
        ball.pos.y = 0;
        ball.vel.y = -ball.vel.y;
        events.wall_hit = true;
    } else if ball.pos.y + config.ball_size >= config.arena_height && ball.vel.y > 0.0 {
        ball.pos.y = config.arena_height - config.ball_size;
        ball.vel.y = -ball.vel.y;
        events.wall_hit = true;
    }
}

/// Redirect the ball by where it struck the paddle, keeping its speed.
/// Hits above the paddle centre send it upward.
fn bounce_off_paddle(
    ball: &mut Ball,
    side: Side,
    paddle_mid_y: f64,
    paddle_speed: i32,
    config: &Config,
) {
    let half_height = config.paddle_height as f64 / 2.0;
    let ball_mid_y = ball.pos.y as f64 + config.ball_size as f64 / 2.0;
    let relative = (paddle_mid_y - ball_mid_y) / half_height;
    let angle = relative * config.max_bounce_angle;

    let speed = ball.vel.length();
    ball.vel.x = speed * angle.cos();
    ball.vel.y = -speed * angle.sin();

    match side {
        Side::Left => ball.vel.x = ball.vel.x.abs(),
        Side::Right => ball.vel.x = -ball.vel.x.abs(),
    }

    ball.vel.y += paddle_speed as f64 * config.paddle_influence;
}
