pub mod components;
pub mod config;
pub mod game;
pub mod params;
pub mod rect;
pub mod resources;
pub mod settings;
pub mod systems;

pub use components::*;
pub use config::*;
pub use game::*;
pub use params::*;
pub use rect::*;
pub use resources::*;
pub use settings::*;

use hecs::World;
use systems::*;

/// Run one tick of the deterministic Pong simulation
pub fn step(
    world: &mut World,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    queue: &mut InputQueue,
    rng: &mut GameRng,
) {
    // Clear events at start of tick
    events.clear();

    // 1. Ingest inputs (apply to held paddle controls)
    ingest_inputs(world, queue);

    // 2. Move paddles based on held controls
    move_paddles(world, config);

    // 3. Move ball
    move_ball(world);

    // 4. Check collisions (ball vs walls, then paddles)
    check_collisions(world, config, events);

    // 5. Check scoring (ball exited arena)
    check_scoring(world, config, score, events, rng);

    // 6. Wind down the paddle-hit squash
    decay_deformation(world);
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, side: Side, y: i32) -> hecs::Entity {
    world.spawn((Paddle::new(side, y), PaddleControls::new()))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::IVec2, vel: glam::DVec2) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel),))
}
