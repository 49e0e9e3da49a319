//! Property tests for the simulation's numeric invariants

use flap::SimConfig;
use flap::consts::MAX_SUBSTEPS;
use flap::platform::FrameClock;
use flap::sim::{Action, GameState, PipeManager, Rect, TickInput, rotation_for_velocity, tick};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn rect() -> impl Strategy<Value = Rect> {
    (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn rotation_stays_clamped(velocity in -1000.0f32..1000.0) {
        let rotation = rotation_for_velocity(velocity);
        prop_assert!((-30.0..=30.0).contains(&rotation));
    }

    #[test]
    fn gap_offsets_stay_in_range(seed in any::<u64>(), min in 0u32..300, span in 0u32..200) {
        let config = SimConfig {
            gap_range: [min, min + span],
            pipe_count: 3,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        let pipes = PipeManager::new(&config, &mut rng);
        for pipe in pipes.iter() {
            prop_assert!(pipe.height >= min as f32);
            prop_assert!(pipe.height <= (min + span) as f32);
            prop_assert_eq!(pipe.gap_bottom(), pipe.height + config.gap_height);
        }
    }

    #[test]
    fn overlap_is_symmetric(a in rect(), b in rect()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn clock_never_exceeds_substep_cap(frames in prop::collection::vec(-1.0f32..5.0, 1..50)) {
        let mut clock = FrameClock::new(60);
        for elapsed in frames {
            prop_assert!(clock.advance(elapsed) <= MAX_SUBSTEPS);
        }
    }

    #[test]
    fn pipe_queue_keeps_its_length(seed in any::<u64>(), flap_every in 5usize..40) {
        let config = SimConfig {
            pipe_count: 2,
            ..Default::default()
        };
        let mut state = GameState::new(config, seed).unwrap();
        tick(&mut state, &TickInput::with(Action::Start));
        for i in 0..600 {
            let input = if i % flap_every == 0 {
                TickInput::with(Action::Jump)
            } else {
                TickInput::default()
            };
            tick(&mut state, &input);
            prop_assert_eq!(state.pipes.len(), 2);
            prop_assert!(state.background_x > -state.config.world_width);
            prop_assert!(state.background_x <= 0.0);
            prop_assert!(state.ground_x > -state.config.world_width);
        }
    }
}
