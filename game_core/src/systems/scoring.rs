use crate::{Ball, Config, Events, GameRng, Score, Side};
use hecs::World;

/// Check if ball left the arena (scoring)
pub fn check_scoring(
    world: &mut World,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let scorer = if ball.pos.x < 0 {
            Side::Right
        } else if ball.pos.x > config.arena_width {
            Side::Left
        } else {
            continue;
        };

        score.increment(scorer);
        match scorer {
            Side::Left => events.left_scored = true,
            Side::Right => events.right_scored = true,
        }
        ball.reset(config.ball_start(), config.ball_speed_initial, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_ball;
    use glam::{DVec2, IVec2};

    fn setup_world() -> (hecs::World, Config, Score, Events, GameRng) {
        let world = hecs::World::new();
        let config = Config::new();
        let score = Score::new(11);
        let events = Events::new();
        let rng = GameRng::new(12345); // Fixed seed for deterministic tests
        (world, config, score, events, rng)
    }

    #[test]
    fn test_right_player_scores_when_ball_exits_left() {
        let (mut world, config, mut score, mut events, mut rng) = setup_world();
        let entity = create_ball(&mut world, IVec2::new(-1, 120), DVec2::new(-5.0, 2.0));

        check_scoring(&mut world, &config, &mut score, &mut events, &mut rng);

        assert_eq!(score.right, 1, "Right player should score");
        assert_eq!(score.left, 0, "Left player should not score");
        assert!(events.right_scored, "Should trigger right_scored event");

        let ball = *world.get::<&Ball>(entity).unwrap();
        assert_eq!(ball.pos, config.ball_start(), "Ball is re-served");
        assert_eq!(ball.vel.x.abs(), 5.0);
        assert_eq!(ball.vel.y.abs(), 5.0);
    }

    #[test]
    fn test_left_player_scores_when_ball_exits_right() {
        let (mut world, config, mut score, mut events, mut rng) = setup_world();
        let entity = create_ball(&mut world, IVec2::new(801, 300), DVec2::new(5.0, 0.0));
        world.get::<&mut Ball>(entity).unwrap().deformation_frames = 4;

        check_scoring(&mut world, &config, &mut score, &mut events, &mut rng);

        assert_eq!(score.left, 1);
        assert_eq!(score.right, 0);
        assert!(events.left_scored);
        assert_eq!(world.get::<&Ball>(entity).unwrap().deformation_frames, 0);
    }

    #[test]
    fn test_edges_are_still_in_play() {
        let (mut world, config, mut score, mut events, mut rng) = setup_world();
        create_ball(&mut world, IVec2::new(0, 300), DVec2::new(-5.0, 0.0));
        create_ball(&mut world, IVec2::new(800, 300), DVec2::new(5.0, 0.0));

        check_scoring(&mut world, &config, &mut score, &mut events, &mut rng);

        assert_eq!((score.left, score.right), (0, 0));
        assert!(!events.left_scored && !events.right_scored);
    }
}
