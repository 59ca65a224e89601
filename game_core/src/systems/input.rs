use hecs::World;

use crate::components::*;
use crate::resources::*;

/// Apply queued key changes to the matching paddle's held controls
pub fn ingest_inputs(world: &mut World, queue: &mut InputQueue) {
    for (side, control, pressed) in queue.drain() {
        for (_entity, (paddle, controls)) in world.query_mut::<(&Paddle, &mut PaddleControls)>() {
            if paddle.side == side {
                controls.set(control, pressed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_paddle;

    #[test]
    fn test_inputs_reach_only_their_paddle() {
        let mut world = World::new();
        let left = create_paddle(&mut world, Side::Left, 250);
        let right = create_paddle(&mut world, Side::Right, 250);
        let mut queue = InputQueue::new();
        queue.push(Side::Left, Control::Down, true);
        queue.push(Side::Right, Control::Up, true);
        queue.push(Side::Right, Control::Up, false);

        ingest_inputs(&mut world, &mut queue);

        let l = *world.get::<&PaddleControls>(left).unwrap();
        let r = *world.get::<&PaddleControls>(right).unwrap();
        assert!(l.down && !l.up);
        assert!(!r.up && !r.down, "Release after press leaves key up");
        assert!(queue.inputs.is_empty(), "Queue is drained");
    }
}
