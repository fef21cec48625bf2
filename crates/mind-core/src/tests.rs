//! Unit tests for mind-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ActionId, AgentId, NodeId, TemplateId};

    #[test]
    fn arena_index_matches_inner_value() {
        assert_eq!(NodeId(17).index(), 17);
        assert_eq!(AgentId::try_from(42usize).unwrap().index(), 42);
    }

    #[test]
    fn ids_sort_by_value() {
        let mut v = vec![AgentId(3), AgentId(0), AgentId(2)];
        v.sort();
        assert_eq!(v, vec![AgentId(0), AgentId(2), AgentId(3)]);
    }

    #[test]
    fn narrow_ids_accept_their_max() {
        assert_eq!(TemplateId::try_from(65_535usize).unwrap(), TemplateId(u16::MAX));
    }

    #[test]
    fn narrow_ids_reject_overflow() {
        assert!(ActionId::try_from(70_000usize).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Position;

    #[test]
    fn a_point_is_within_zero_of_itself() {
        let p = Position::new(3.0, -8.0);
        assert!(p.within(p, 0.0));
    }

    #[test]
    fn pythagorean_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_sq(b), 25.0);
    }

    #[test]
    fn within_is_inclusive() {
        let a = Position::ORIGIN;
        assert!(a.within(Position::new(5.0, 0.0), 5.0));
        assert!(!a.within(Position::new(5.1, 0.0), 5.0));
    }

    #[test]
    fn lerp_midpoint() {
        let m = Position::new(0.0, 0.0).lerp(Position::new(10.0, -4.0), 0.5);
        assert_eq!(m, Position::new(5.0, -2.0));
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn offsets_and_gaps() {
        assert_eq!(Tick(10) + 5, Tick(10).offset(5));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn since_saturates() {
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }

    #[test]
    fn within_window() {
        let now = Tick(12);
        assert!(now.within(Some(Tick(10)), 4));
        assert!(!now.within(Some(Tick(8)), 4));
        assert!(!now.within(None, 1_000));
    }

    #[test]
    fn display() {
        assert_eq!(Tick(9).to_string(), "T9");
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    fn gates(rng: &mut AgentRng, n: usize) -> Vec<bool> {
        (0..n).map(|_| rng.gen_bool(0.5)).collect()
    }

    #[test]
    fn same_seed_and_agent_replay() {
        let a = gates(&mut AgentRng::new(12345, AgentId(3)), 64);
        let b = gates(&mut AgentRng::new(12345, AgentId(3)), 64);
        assert_eq!(a, b);
    }

    #[test]
    fn neighbouring_agents_get_unrelated_streams() {
        let a = gates(&mut AgentRng::new(1, AgentId(0)), 64);
        let b = gates(&mut AgentRng::new(1, AgentId(1)), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn cloned_stream_continues_identically() {
        let mut rng = AgentRng::new(8, AgentId(2));
        rng.gen_bool(0.5);
        let mut copy = rng.clone();
        assert_eq!(gates(&mut rng, 16), gates(&mut copy, 16));
    }

    #[test]
    fn jitter_range_is_respected() {
        let mut rng = AgentRng::new(0, AgentId(9));
        for _ in 0..500 {
            let v = rng.gen_range(-2.5f32..=2.5);
            assert!((-2.5..=2.5).contains(&v));
        }
    }

    #[test]
    fn gate_probability_edges() {
        let mut rng = AgentRng::new(0, AgentId(0));
        assert!((0..32).all(|_| !rng.gen_bool(0.0)));
        assert!((0..32).all(|_| rng.gen_bool(1.0)));
        // Out-of-range probabilities are clamped; NaN never fires.
        assert!(rng.gen_bool(7.0));
        assert!(!rng.gen_bool(-1.0));
        assert!(!rng.gen_bool(f64::NAN));
    }

    #[test]
    fn world_children_are_independent_and_reproducible() {
        let mut root = SimRng::new(9);
        let (mut a, mut b) = (root.child(1), root.child(2));
        let (x, y): (u64, u64) = (a.random(), b.random());
        assert_ne!(x, y);

        let mut again = SimRng::new(9);
        let x2: u64 = again.child(1).random();
        assert_eq!(x, x2);
    }
}

#[cfg(test)]
mod env {
    use crate::{EmotionKind, Weather};

    #[test]
    fn severity_is_normalized() {
        for w in [Weather::Clear, Weather::Cloudy, Weather::Rain, Weather::Storm, Weather::Snow] {
            assert!((0.0..=1.0).contains(&w.severity()), "{w}");
        }
        assert_eq!(Weather::Storm.severity(), 1.0);
    }

    #[test]
    fn negative_emotions() {
        assert!(EmotionKind::Afraid.is_negative());
        assert!(!EmotionKind::Happy.is_negative());
    }

    #[test]
    fn display() {
        assert_eq!(Weather::Rain.to_string(), "rain");
        assert_eq!(EmotionKind::Curious.to_string(), "curious");
    }
}
