// Randomized whole-round runs checking gameplay invariants across seeds.

use burrow_tap::{FrameOutcome, Game, GameConfig, NoHost, TapOutcome, Viewport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const VIEW: Viewport = Viewport {
    width: 720.0,
    height: 1280.0,
    dpr: 2.0,
};

fn expiries(game: &Game<StdRng>) -> Vec<Option<f64>> {
    game.holes()
        .iter()
        .map(|h| h.active().map(|_| h.expires_at()))
        .collect()
}

#[test]
fn random_rounds_hold_invariants() {
    for seed in 0..20u64 {
        let mut game = Game::new(GameConfig::default(), StdRng::seed_from_u64(seed)).unwrap();
        let mut input = StdRng::seed_from_u64(seed + 1_000);
        game.start(&NoHost);

        let mut ts = 0.0;
        let mut last_score = 0;
        loop {
            let before = expiries(&game);
            let outcome = game.frame(ts);
            let after = expiries(&game);
            for (b, a) in before.iter().zip(&after) {
                // a live target keeps its deadline; a different one only
                // replaces it once the old deadline has passed
                if let (Some(b), Some(a)) = (b, a) {
                    assert!(a == b || ts > *b, "seed {seed}: lifetime changed while active");
                }
            }
            if let FrameOutcome::Ended { score } = outcome {
                assert_eq!(score, last_score);
                break;
            }

            if input.gen_bool(0.3) {
                let point = (input.gen_range(0.0..720.0), input.gen_range(0.0..1280.0));
                let before = game.holes().clone();
                match game.tap(point, &VIEW, ts, &NoHost) {
                    TapOutcome::Hit { hole, points, .. } => {
                        assert!(points == 10 || points == 20 || points == 30 || points == 60);
                        assert_eq!(game.holes().get(hole).unwrap().active(), None);
                        assert!(before.get(hole).unwrap().active().is_some());
                    }
                    TapOutcome::Miss => {
                        assert_eq!(game.holes(), &before);
                        assert_eq!(game.scores().score(), last_score);
                    }
                    TapOutcome::Ignored => panic!("seed {seed}: tap ignored mid-round"),
                }
            }
            let score = game.scores().score();
            assert!(score >= last_score, "seed {seed}: score went down");
            last_score = score;
            let multiplier = game.scores().multiplier();
            assert!(multiplier == 1 || multiplier == 2);

            ts += input.gen_range(8.0..34.0);
        }
        assert!(!game.is_running());
        assert!(ts >= 29_999.0);
    }
}

#[test]
fn targets_appear_and_vanish_during_a_round() {
    let mut game = Game::new(GameConfig::default(), StdRng::seed_from_u64(77)).unwrap();
    game.start(&NoHost);
    let mut max_active = 0;
    let mut saw_bonus = false;
    let mut ts = 0.0;
    while game.frame(ts) == FrameOutcome::Continue {
        max_active = max_active.max(game.holes().active_count());
        saw_bonus |= game
            .holes()
            .iter()
            .any(|h| h.active() == Some(burrow_tap::TargetKind::Bonus));
        ts += 1000.0 / 60.0;
    }
    assert!(max_active >= 1 && max_active <= 7);
    assert!(saw_bonus, "no bonus target in a full round");
}
