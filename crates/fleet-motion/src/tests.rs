//! Unit tests for fleet-motion.

use fleet_core::{Coordinate, FacilityId, SeededRandom, Timestamp, VehicleId};

use crate::{DeliveryWaypoint, MotionConfig, MotionEngine, RolloverPolicy, VehicleSimBuilder, VehicleSimState};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Metres per degree of latitude on the haversine sphere.
const M_PER_DEG: f64 = 111_194.926_644_558_73;

const TICK_SECS: f64 = 10.0;

/// A point `metres` due north of (3.0, 6.0).
fn north(metres: f64) -> Coordinate {
    Coordinate::new(3.0, 6.0 + metres / M_PER_DEG)
}

/// A route running due north through the given distances from the origin.
fn straight_route(marks_m: &[f64]) -> Vec<Coordinate> {
    marks_m.iter().map(|&m| north(m)).collect()
}

/// 36 km/h = 10 m/s, so one 10 s tick covers 100 m.
fn vehicle(marks_m: &[f64], waypoints: Vec<DeliveryWaypoint>) -> VehicleSimState {
    VehicleSimBuilder::new(VehicleId(1), straight_route(marks_m))
        .waypoints(waypoints)
        .base_speed_kmh(36.0)
        .build()
        .unwrap()
}

fn stop(route_index: usize, dwell_minutes: f64, quantity: f64) -> DeliveryWaypoint {
    DeliveryWaypoint::new(route_index, FacilityId(route_index as u32), dwell_minutes, quantity)
}

/// Default engine: no zones, carry remainder, no jitter.
///
/// Runs start at the epoch (Thursday 00:00 UTC), where every time and day
/// factor is 1.0.
fn engine() -> MotionEngine {
    MotionEngine::default()
}

fn truncating_engine() -> MotionEngine {
    MotionEngine::default().with_config(MotionConfig {
        rollover: RolloverPolicy::Truncate,
        ..MotionConfig::default()
    })
}

/// Tick until complete; returns the final state and the number of ticks.
fn drive(engine: &MotionEngine, mut state: VehicleSimState, delta_secs: f64, max_ticks: u32) -> (VehicleSimState, u32) {
    let mut rng = SeededRandom::new(7);
    let mut now = Timestamp::EPOCH;
    for tick in 1..=max_ticks {
        now = now.plus_secs(delta_secs);
        state = engine.advance(&state, delta_secs, now, &mut rng);
        if state.is_complete() {
            return (state, tick);
        }
    }
    panic!("vehicle not complete after {max_ticks} ticks: {state:?}");
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;
    use crate::{MotionError, SimPhase};

    #[test]
    fn initial_state_at_first_point() {
        let s = vehicle(&[0.0, 500.0, 1_000.0], vec![stop(1, 5.0, 30.0), stop(2, 0.0, 20.0)]);
        assert_eq!(s.segment_index, 0);
        assert_eq!(s.progress, 0.0);
        assert_eq!(s.position, s.route[0]);
        assert_eq!(s.phase, SimPhase::Traveling);
        assert_eq!(s.current_speed_kmh, 0.0);
        assert_eq!(s.current_capacity, 50.0);
        assert_eq!(s.stops.len(), 2);
        assert!(s.stops.iter().all(|st| st.arrived_at.is_none() && st.delivered_quantity == 0.0));
        assert_eq!(s.stops[0].dwell_minutes, 5.0);
        assert!(s.bearing < 1e-6 || s.bearing > 360.0 - 1e-6, "due north, got {}", s.bearing);
    }

    #[test]
    fn no_waypoints_uses_default_capacity() {
        let s = VehicleSimBuilder::new(VehicleId(2), straight_route(&[0.0, 10.0]))
            .default_capacity(75.0)
            .build()
            .unwrap();
        assert_eq!(s.current_capacity, 75.0);
    }

    #[test]
    fn with_config_copies_speed_and_capacity() {
        let config = fleet_core::SimConfig { base_speed_kmh: 25.0, default_capacity: 12.0, ..Default::default() };
        let s = VehicleSimBuilder::new(VehicleId(3), straight_route(&[0.0, 10.0]))
            .with_config(&config)
            .build()
            .unwrap();
        assert_eq!(s.base_speed_kmh, 25.0);
        assert_eq!(s.current_capacity, 12.0);
    }

    #[test]
    fn route_too_short() {
        let err = VehicleSimBuilder::new(VehicleId(4), straight_route(&[0.0])).build().unwrap_err();
        assert_eq!(err, MotionError::RouteTooShort { vehicle: VehicleId(4), points: 1 });

        let err = VehicleSimBuilder::new(VehicleId(4), Vec::new()).build().unwrap_err();
        assert_eq!(err, MotionError::RouteTooShort { vehicle: VehicleId(4), points: 0 });
    }

    #[test]
    fn waypoint_past_route_end() {
        let err = VehicleSimBuilder::new(VehicleId(5), straight_route(&[0.0, 100.0]))
            .waypoints(vec![stop(2, 1.0, 1.0)])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            MotionError::WaypointOutOfRange { vehicle: VehicleId(5), waypoint: 0, route_index: 2, route_len: 2 }
        );
    }

    #[test]
    fn bad_waypoint_values() {
        let build = |w: DeliveryWaypoint| {
            VehicleSimBuilder::new(VehicleId(6), straight_route(&[0.0, 100.0, 200.0]))
                .waypoints(vec![w])
                .build()
        };
        assert!(matches!(build(stop(1, -1.0, 1.0)), Err(MotionError::InvalidWaypoint { .. })));
        assert!(matches!(build(stop(1, 1.0, f64::NAN)), Err(MotionError::InvalidWaypoint { .. })));
        assert!(build(stop(1, 0.0, 0.0)).is_ok());
    }

    #[test]
    fn waypoints_out_of_route_order() {
        let err = VehicleSimBuilder::new(VehicleId(7), straight_route(&[0.0, 100.0, 200.0]))
            .waypoints(vec![stop(2, 1.0, 1.0), stop(1, 1.0, 1.0)])
            .build()
            .unwrap_err();
        assert!(matches!(err, MotionError::InvalidWaypoint { waypoint: 1, .. }));
    }

    #[test]
    fn invalid_speed() {
        for speed in [f64::NAN, f64::INFINITY, -1.0] {
            let err = VehicleSimBuilder::new(VehicleId(8), straight_route(&[0.0, 100.0]))
                .base_speed_kmh(speed)
                .build()
                .unwrap_err();
            assert!(matches!(err, MotionError::InvalidSpeed { .. }), "{speed}");
        }
    }
}

// ── Travel ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod travel {
    use fleet_core::EARTH_RADIUS_M;

    use super::*;

    #[test]
    fn two_point_route_completes_on_tenth_tick() {
        // 999.9 m at 10 m/s: 10 ticks of 100 m are needed, 9 are not enough.
        let (done, ticks) = drive(&engine(), vehicle(&[0.0, 999.9], vec![]), TICK_SECS, 50);
        assert_eq!(ticks, 10);
        assert_eq!(done.position, done.route[1]);
        assert_eq!(done.current_speed_kmh, 0.0);
        assert_eq!(done.remaining_distance_m(), 0.0);
    }

    #[test]
    fn one_kilometre_at_36_kmh_takes_100_seconds() {
        let end = Coordinate::new(0.0, (1_000.0 / EARTH_RADIUS_M).to_degrees());
        let route = vec![Coordinate::new(0.0, 0.0), end];
        let s = VehicleSimBuilder::new(VehicleId(1), route).base_speed_kmh(36.0).build().unwrap();
        assert!((s.remaining_distance_m() - 1_000.0).abs() < 1e-9);

        let (done, ticks) = drive(&engine(), s, TICK_SECS, 50);
        assert_eq!(ticks, 10);
        assert_eq!(done.position, end);
    }

    #[test]
    fn speed_and_progress_after_one_tick() {
        let s = vehicle(&[0.0, 1_000.0], vec![]);
        let next = engine().advance(&s, TICK_SECS, Timestamp::EPOCH, &mut SeededRandom::new(1));
        assert_eq!(next.current_speed_kmh, 36.0);
        assert!((next.progress - 0.1).abs() < 1e-9);
        assert!((next.remaining_distance_m() - 900.0).abs() < 1e-6);
        // Input untouched.
        assert_eq!(s.progress, 0.0);
    }

    #[test]
    fn complete_is_terminal() {
        let (done, _) = drive(&engine(), vehicle(&[0.0, 250.0], vec![]), TICK_SECS, 10);
        let again = engine().advance(&done, TICK_SECS, Timestamp(1_000_000), &mut SeededRandom::new(1));
        assert_eq!(again, done);
    }

    #[test]
    fn negative_delta_does_not_move() {
        let s = vehicle(&[0.0, 1_000.0], vec![]);
        let next = engine().advance(&s, -30.0, Timestamp::EPOCH, &mut SeededRandom::new(1));
        assert_eq!(next.progress, 0.0);
        assert_eq!(next.position, s.position);
    }

    #[test]
    fn bearing_follows_segment() {
        let route = vec![Coordinate::new(3.0, 6.0), Coordinate::new(3.01, 6.0), Coordinate::new(3.01, 6.01)];
        let s = VehicleSimBuilder::new(VehicleId(1), route).base_speed_kmh(36.0).build().unwrap();
        assert!((s.bearing - 90.0).abs() < 0.01, "east, got {}", s.bearing);

        let mut rng = SeededRandom::new(1);
        let mut s = s;
        while s.segment_index == 0 {
            s = engine().advance(&s, TICK_SECS, Timestamp::EPOCH, &mut rng);
        }
        assert!(s.bearing < 0.01 || s.bearing > 359.99, "north, got {}", s.bearing);
    }

    #[test]
    fn zero_length_segment_is_crossed() {
        let s = vehicle(&[0.0, 100.0, 100.0, 300.0], vec![]);
        let (done, ticks) = drive(&engine(), s, TICK_SECS, 20);
        assert!(done.is_complete());
        assert!((2..=4).contains(&ticks), "{ticks}");
    }

    #[test]
    fn large_tick_carries_across_segments() {
        let s = vehicle(&[0.0, 100.0, 200.0, 300.0, 1_000.0], vec![]);
        // 35 s at 10 m/s: 350 m, inside the last segment.
        let next = engine().advance(&s, 35.0, Timestamp::EPOCH, &mut SeededRandom::new(1));
        assert_eq!(next.segment_index, 3);
        assert!((next.progress - 50.0 / 700.0).abs() < 1e-6, "{}", next.progress);
    }

    #[test]
    fn truncate_crosses_one_boundary_per_tick() {
        let s = vehicle(&[0.0, 100.0, 200.0, 300.0, 1_000.0], vec![]);
        let next = truncating_engine().advance(&s, 35.0, Timestamp::EPOCH, &mut SeededRandom::new(1));
        assert_eq!(next.segment_index, 1);
        assert_eq!(next.progress, 0.0);
        assert_eq!(next.position, next.route[1]);
    }

    #[test]
    fn jitter_off_leaves_rng_untouched() {
        let s = vehicle(&[0.0, 1_000.0], vec![]);
        let mut rng = SeededRandom::new(99);
        let before = rng.clone();
        engine().advance(&s, TICK_SECS, Timestamp::EPOCH, &mut rng);
        assert_eq!(rng, before);
    }

    #[test]
    fn jitter_stays_in_band_and_replays() {
        let jittery = MotionEngine::default().with_config(MotionConfig { speed_jitter: 0.1, ..Default::default() });
        let run = || {
            let mut rng = SeededRandom::new(5);
            let mut s = vehicle(&[0.0, 5_000.0], vec![]);
            let mut speeds = Vec::new();
            for _ in 0..20 {
                s = jittery.advance(&s, TICK_SECS, Timestamp::EPOCH, &mut rng);
                speeds.push(s.current_speed_kmh);
            }
            speeds
        };
        let speeds = run();
        assert!(speeds.iter().all(|&v| (32.39..=39.61).contains(&v)), "{speeds:?}");
        assert_eq!(speeds, run());
    }
}

// ── Waypoints, dwell and payload ──────────────────────────────────────────────

#[cfg(test)]
mod waypoints {
    use super::*;
    use crate::SimPhase;

    #[test]
    fn dwell_holds_position_then_unloads() {
        let eng = engine();
        let mut rng = SeededRandom::new(3);
        let mut s = vehicle(&[0.0, 500.0, 1_000.0], vec![stop(1, 5.0, 30.0), stop(2, 0.0, 20.0)]);
        let mut now = Timestamp::EPOCH;

        let mut guard = 0;
        while !s.is_dwelling() {
            now = now.plus_secs(TICK_SECS);
            s = eng.advance(&s, TICK_SECS, now, &mut rng);
            guard += 1;
            assert!(guard < 20, "never reached the first stop");
        }
        assert_eq!(s.stops[0].arrived_at, Some(now));
        assert_eq!(s.segment_index, 1);
        assert_eq!(s.position, s.route[1]);
        assert_eq!(s.current_speed_kmh, 0.0);

        // 5 min = 30 ticks; the first 29 keep it parked.
        let held = s.position;
        for _ in 0..29 {
            now = now.plus_secs(TICK_SECS);
            s = eng.advance(&s, TICK_SECS, now, &mut rng);
            assert_eq!(s.phase, SimPhase::Dwelling);
            assert_eq!(s.position, held);
            assert_eq!(s.current_capacity, 50.0);
        }

        now = now.plus_secs(TICK_SECS);
        s = eng.advance(&s, TICK_SECS, now, &mut rng);
        assert_eq!(s.phase, SimPhase::Traveling);
        assert_eq!(s.stops[0].departed_at, Some(now));
        assert_eq!(s.stops[0].delivered_quantity, 30.0);
        assert_eq!(s.current_capacity, 20.0);
        assert_ne!(s.position, held, "departure tick also moves");

        let (done, _) = drive(&eng, s, TICK_SECS, 100);
        assert_eq!(done.current_capacity, 0.0);
        assert_eq!(done.delivered_total(), 50.0);
        assert_eq!(done.completed_stops(), 2);
    }

    #[test]
    fn large_tick_halts_at_waypoint() {
        let s = vehicle(&[0.0, 100.0, 200.0, 300.0], vec![stop(1, 1.0, 5.0)]);
        let next = engine().advance(&s, 1_000.0, Timestamp::EPOCH, &mut SeededRandom::new(1));
        assert!(!next.is_complete());
        assert_eq!(next.segment_index, 1);
        assert_eq!(next.progress, 0.0);
        assert_eq!(next.position, next.route[1]);

        let arrived = engine().advance(&next, 1_000.0, Timestamp(1_000), &mut SeededRandom::new(1));
        assert!(arrived.is_dwelling());
        assert_eq!(arrived.position, next.position);
    }

    #[test]
    fn waypoint_at_start_dwells_before_moving() {
        let s = vehicle(&[0.0, 1_000.0], vec![stop(0, 1.0, 10.0)]);
        let first = engine().advance(&s, TICK_SECS, Timestamp::EPOCH, &mut SeededRandom::new(1));
        assert!(first.is_dwelling());
        assert_eq!(first.position, s.route[0]);
        assert_eq!(first.stops[0].arrived_at, Some(Timestamp::EPOCH));
    }

    #[test]
    fn waypoint_at_end_delays_completion() {
        let eng = engine();
        let mut rng = SeededRandom::new(1);
        let s = vehicle(&[0.0, 100.0], vec![stop(1, 2.0, 10.0)]);

        let at_end = eng.advance(&s, 60.0, Timestamp(60_000), &mut rng);
        assert!(!at_end.is_complete());
        assert_eq!(at_end.position, at_end.route[1]);

        let dwelling = eng.advance(&at_end, 60.0, Timestamp(120_000), &mut rng);
        assert!(dwelling.is_dwelling());

        let still = eng.advance(&dwelling, 60.0, Timestamp(180_000), &mut rng);
        assert!(still.is_dwelling());

        let done = eng.advance(&still, 60.0, Timestamp(240_000), &mut rng);
        assert!(done.is_complete());
        assert_eq!(done.current_capacity, 0.0);
        assert_eq!(done.stops[0].departed_at, Some(Timestamp(240_000)));
    }

    #[test]
    fn shared_point_stops_served_in_turn() {
        let eng = engine();
        let mut rng = SeededRandom::new(1);
        let s = vehicle(&[0.0, 1_000.0], vec![stop(0, 0.0, 4.0), stop(0, 0.0, 6.0)]);

        let s = eng.advance(&s, TICK_SECS, Timestamp(0), &mut rng);
        assert_eq!(s.stops[0].arrived_at, Some(Timestamp(0)));
        let s = eng.advance(&s, TICK_SECS, Timestamp(10_000), &mut rng);
        assert!(s.stops[0].is_departed());
        assert_eq!(s.stops[1].arrived_at, Some(Timestamp(10_000)));
        assert!(s.is_dwelling());
        assert_eq!(s.position, s.route[0]);
        let s = eng.advance(&s, TICK_SECS, Timestamp(20_000), &mut rng);
        assert_eq!(s.current_capacity, 0.0);
        assert!(s.progress > 0.0);
    }

    #[test]
    fn reset_restores_initial_state() {
        let fresh = vehicle(&[0.0, 500.0, 1_000.0], vec![stop(1, 0.0, 30.0), stop(2, 0.0, 20.0)]);
        let (done, _) = drive(&engine(), fresh.clone(), TICK_SECS, 100);
        assert_eq!(done.current_capacity, 0.0);
        assert_eq!(done.reset(), fresh);

        let empty = VehicleSimBuilder::new(VehicleId(9), straight_route(&[0.0, 100.0]))
            .default_capacity(40.0)
            .build()
            .unwrap();
        let (done, _) = drive(&engine(), empty, TICK_SECS, 10);
        assert_eq!(done.reset().current_capacity, 40.0);
    }
}

// ── Delay events ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod events {
    use super::*;
    use crate::{ActiveEvent, DelayReason};

    #[test]
    fn reason_multipliers() {
        assert_eq!(DelayReason::TrafficJam.speed_multiplier(), 0.4);
        assert_eq!(DelayReason::RoadObstruction.speed_multiplier(), 0.0);
        assert_eq!(DelayReason::VehicleBreakdown.speed_multiplier(), 0.0);
        assert_eq!(DelayReason::FuelStop.speed_multiplier(), 0.0);
        assert_eq!(DelayReason::Other("protest".into()).speed_multiplier(), 0.5);
    }

    #[test]
    fn reason_codes_parse() {
        assert_eq!(DelayReason::from("fuel_stop"), DelayReason::FuelStop);
        assert_eq!(DelayReason::from("traffic_jam"), DelayReason::TrafficJam);
        let other: DelayReason = "landslide".parse().unwrap();
        assert_eq!(other, DelayReason::Other("landslide".to_owned()));
        assert_eq!(other.to_string(), "landslide");
        for known in DelayReason::KNOWN {
            assert_eq!(DelayReason::from(known.as_str()), known);
        }
    }

    #[test]
    fn event_window() {
        let e = ActiveEvent::new(DelayReason::TrafficJam, 1.5, Timestamp(1_000));
        assert_eq!(e.ends_at, Timestamp(91_000));
        assert!(!e.has_expired(Timestamp(90_999)));
        assert!(e.has_expired(Timestamp(91_000)));
    }

    #[test]
    fn adding_event_is_non_blocking_and_pure() {
        let s = vehicle(&[0.0, 1_000.0], vec![]);
        let delayed = s.with_delay_event(DelayReason::VehicleBreakdown, 10.0, Timestamp::EPOCH);
        assert!(s.active_events.is_empty());
        assert_eq!(delayed.active_events.len(), 1);
        assert_eq!(delayed.position, s.position);
        assert_eq!(delayed.progress, s.progress);
    }

    #[test]
    fn concurrent_events_take_minimum() {
        let mut s = vehicle(&[0.0, 1_000.0], vec![]);
        s = s.with_delay_event(DelayReason::TrafficJam, 10.0, Timestamp::EPOCH);
        s.active_events.push(ActiveEvent {
            reason:           DelayReason::Other("roadworks".into()),
            started_at:       Timestamp::EPOCH,
            ends_at:          Timestamp::EPOCH.plus_minutes(10.0),
            speed_multiplier: 0.6,
        });
        assert_eq!(s.event_multiplier(), 0.4);

        let next = engine().advance(&s, TICK_SECS, Timestamp::EPOCH, &mut SeededRandom::new(1));
        assert!((next.current_speed_kmh - 14.4).abs() < 1e-9, "{}", next.current_speed_kmh);
    }

    #[test]
    fn breakdown_stops_vehicle() {
        let s = vehicle(&[0.0, 1_000.0], vec![])
            .with_delay_event(DelayReason::VehicleBreakdown, 5.0, Timestamp::EPOCH);
        let next = engine().advance(&s, TICK_SECS, Timestamp(10_000), &mut SeededRandom::new(1));
        assert_eq!(next.current_speed_kmh, 0.0);
        assert_eq!(next.progress, 0.0);
        assert_eq!(next.position, s.position);
    }

    #[test]
    fn expired_events_dropped() {
        let s = vehicle(&[0.0, 5_000.0], vec![])
            .with_delay_event(DelayReason::TrafficJam, 1.0, Timestamp::EPOCH);
        let eng = engine();
        let mut rng = SeededRandom::new(1);

        let slowed = eng.advance(&s, TICK_SECS, Timestamp(30_000), &mut rng);
        assert_eq!(slowed.active_events.len(), 1);
        assert!((slowed.current_speed_kmh - 14.4).abs() < 1e-9);

        let free = eng.advance(&slowed, TICK_SECS, Timestamp(60_000), &mut rng);
        assert!(free.active_events.is_empty());
        assert_eq!(free.current_speed_kmh, 36.0);
    }
}

// ── Hazard generator ──────────────────────────────────────────────────────────

#[cfg(test)]
mod hazard {
    use super::*;
    use crate::{DelayReason, HazardGenerator};

    fn busy() -> HazardGenerator {
        HazardGenerator { events_per_hour: 60.0, ..HazardGenerator::default() }
    }

    fn inject_many(generator: &HazardGenerator, seed: u64) -> VehicleSimState {
        let mut rng = SeededRandom::new(seed);
        let mut s = vehicle(&[0.0, 1_000.0], vec![]);
        for tick in 0..500 {
            s = generator.maybe_inject(&s, TICK_SECS, Timestamp(tick * 10_000), &mut rng);
        }
        s
    }

    #[test]
    fn same_seed_same_events() {
        let a = inject_many(&busy(), 11);
        let b = inject_many(&busy(), 11);
        assert!(!a.active_events.is_empty());
        assert_eq!(a.active_events, b.active_events);
    }

    #[test]
    fn durations_and_reasons_in_range() {
        let g = busy();
        let s = inject_many(&g, 4);
        for e in &s.active_events {
            let minutes = e.ends_at.minutes_since(e.started_at);
            assert!((5.0..=30.0).contains(&minutes), "{minutes}");
            assert!(DelayReason::KNOWN.contains(&e.reason));
        }
    }

    #[test]
    fn disabled_never_fires() {
        let mut rng = SeededRandom::new(1);
        let before = rng.clone();
        let s = vehicle(&[0.0, 1_000.0], vec![]);
        let out = HazardGenerator::disabled().maybe_inject(&s, 3_600.0, Timestamp::EPOCH, &mut rng);
        assert_eq!(out, s);
        assert_eq!(rng, before);
    }

    #[test]
    fn complete_vehicle_untouched() {
        let (done, _) = drive(&engine(), vehicle(&[0.0, 100.0], vec![]), TICK_SECS, 5);
        let certain = HazardGenerator { events_per_hour: 1e9, ..HazardGenerator::default() };
        let out = certain.maybe_inject(&done, TICK_SECS, Timestamp::EPOCH, &mut SeededRandom::new(1));
        assert_eq!(out, done);
    }

    #[test]
    fn probability_clamped() {
        let g = busy();
        assert_eq!(g.probability(0.0), 0.0);
        assert_eq!(g.probability(30.0), 0.5);
        assert_eq!(g.probability(1e9), 1.0);
        assert_eq!(g.probability(-5.0), 0.0);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    fn marks() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(10.0f64..800.0, 1..6).prop_map(|gaps| {
            let mut total = 0.0;
            let mut marks = vec![0.0];
            for g in gaps {
                total += g;
                marks.push(total);
            }
            marks
        })
    }

    proptest! {
        #[test]
        fn two_point_route_never_completes_early(
            length in 50.0f64..5_000.0,
            kmh in 5.0f64..120.0,
            delta in 1.0f64..60.0,
        ) {
            let s = VehicleSimBuilder::new(VehicleId(1), straight_route(&[0.0, length]))
                .base_speed_kmh(kmh)
                .build()
                .unwrap();
            let true_length = s.segment_length_m(0);
            let per_tick = kmh * 1_000.0 / 3_600.0 * delta;

            let (_, ticks) = drive(&engine(), s, delta, 100_000);
            prop_assert!(ticks as f64 * per_tick >= true_length - 1e-6);
            prop_assert!((ticks - 1) as f64 * per_tick < true_length + 1e-6);
        }

        #[test]
        fn truncate_is_never_faster(route in marks(), delta in 5.0f64..200.0) {
            let s = vehicle(&route, vec![]);
            let (_, carry) = drive(&engine(), s.clone(), delta, 100_000);
            let (_, truncate) = drive(&truncating_engine(), s, delta, 100_000);
            prop_assert!(truncate >= carry, "truncate {} < carry {}", truncate, carry);
        }

        #[test]
        fn progress_stays_in_unit_interval(route in marks(), delta in 1.0f64..120.0) {
            let eng = engine();
            let mut rng = SeededRandom::new(3);
            let mut s = vehicle(&route, vec![]);
            for tick in 1..2_000i64 {
                s = eng.advance(&s, delta, Timestamp(tick), &mut rng);
                prop_assert!((0.0..=1.0).contains(&s.progress));
                prop_assert!(s.segment_index < s.route.len());
                if s.is_complete() {
                    break;
                }
            }
        }
    }
}
