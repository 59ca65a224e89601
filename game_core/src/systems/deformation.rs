use crate::Ball;
use hecs::World;

/// Count down the squash effect started by a paddle hit
pub fn decay_deformation(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.deformation_frames = ball.deformation_frames.saturating_sub(1);
    }
}
