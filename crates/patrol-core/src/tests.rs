//! Unit tests for patrol-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(NodeId(100) > NodeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "uav 7");
        assert_eq!(NodeId(0).to_string(), "node 0");
        assert_eq!(EdgeId(3).to_string(), "edge 3");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point2;

    #[test]
    fn zero_distance() {
        let p = Point2::new(12.5, -3.0);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn step_clamps_to_target() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        // Step larger than the remaining distance lands exactly on the target.
        assert_eq!(a.step_toward(b, 10.0), b);
    }

    #[test]
    fn step_partial() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        let p = a.step_toward(b, 4.0);
        assert!((p.x - 4.0).abs() < 1e-12);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn step_from_coincident_point_is_stable() {
        let p = Point2::new(2.0, 2.0);
        let q = p.step_toward(p, 1.0);
        assert!(q.x.is_finite() && q.y.is_finite());
        assert_eq!(q, p);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick, TICKS_PER_DAY, TICKS_PER_YEAR};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::default(); // 1 tick = 1 minute
        assert_eq!(clock.elapsed_secs(), 0);
        clock.advance();
        assert_eq!(clock.elapsed_secs(), 60);
        clock.advance();
        assert_eq!(clock.elapsed_secs(), 120);
    }

    #[test]
    fn clock_dhm() {
        let mut clock = SimClock::default();
        // Advance 25 hours of minutes
        for _ in 0..(25 * 60) {
            clock.advance();
        }
        let (d, h, m) = clock.elapsed_dhm();
        assert_eq!(d, 1);
        assert_eq!(h, 1);
        assert_eq!(m, 0);
    }

    #[test]
    fn ticks_for_duration() {
        let clock = SimClock::default();
        assert_eq!(clock.ticks_for_minutes(90), 90);
        assert_eq!(clock.ticks_for_days(1), TICKS_PER_DAY);
        // partial tick rounds up
        assert_eq!(clock.ticks_for_secs(1), 1);
    }

    #[test]
    fn year_constant() {
        assert_eq!(TICKS_PER_YEAR, 525_600);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            let a: f32 = r1.random();
            let b: f32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = AgentRng::new(0, AgentId(0));
        for _ in 0..1000 {
            let v = rng.gen_range(0.0f32..1.0);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = AgentRng::new(0, AgentId(0));
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}
