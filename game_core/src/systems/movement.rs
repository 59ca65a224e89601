use crate::{Ball, Config, Paddle, PaddleControls};
use hecs::World;

/// Apply held controls to paddles. Up is applied before down, so holding
/// both nets out to zero movement but leaves speed at +step.
pub fn move_paddles(world: &mut World, config: &Config) {
    for (_entity, (paddle, controls)) in world.query_mut::<(&mut Paddle, &PaddleControls)>() {
        paddle.speed = 0;
        if controls.up {
            paddle.y = config.clamp_paddle_y(paddle.y - config.paddle_speed);
            paddle.speed = -config.paddle_speed;
        }
        if controls.down {
            paddle.y = config.clamp_paddle_y(paddle.y + config.paddle_speed);
            paddle.speed = config.paddle_speed;
        }
    }
}

/// Move ball by its velocity, truncated toward zero on each axis
pub fn move_ball(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos.x += ball.vel.x as i32;
        ball.pos.y += ball.vel.y as i32;
    }
}
