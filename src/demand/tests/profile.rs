use crate::demand::profile::build_profile;
use crate::demand::tests::utils::{TRANSIT, hm, profile, record, rules};
use crate::diagnostics::Field::{AnchorTime, PassengerCount, TransitTime};
use crate::diagnostics::Issue::{InvalidField, MissingField};
use crate::flight::Category::{Arrival, Departure, Domestic};
use crate::time::Time;

#[test]
fn test_odd_trips_split_window() {
    let p = profile("EK0001", 600, 121.0, Arrival);

    assert_eq!(3, p.trips_needed);
    assert_eq!(2, p.max_trips_per_window);
    assert_eq!(2, p.buses_needed);
    assert!(p.is_odd());
    assert_eq!(1, p.full_level());
    assert_eq!(1, p.half_level());
    assert_eq!(hm(10, 0), p.window_start);
    assert_eq!(hm(10, 45), p.window_end);
    assert_eq!(hm(10, 23), p.midpoint);
    assert!(!p.capacity_clamped);
}

#[test]
fn test_even_trips_hold_level_for_whole_window() {
    let p = profile("EK0002", 600, 240.0, Departure);

    assert_eq!(4, p.trips_needed);
    assert_eq!(2, p.buses_needed);
    assert_eq!(2, p.full_level());
    assert_eq!(0, p.half_level());
    assert_eq!(2, p.level_at(hm(10, 45)));
    assert_eq!(0, p.level_at(hm(10, 46)));
    assert_eq!(0, p.level_at(hm(9, 59)));
}

#[test]
fn test_single_trip_takes_odd_path() {
    let p = profile("EK0003", 600, 60.0, Departure);

    assert_eq!(1, p.trips_needed);
    assert_eq!(1, p.buses_needed);
    assert_eq!(0, p.full_level());
    assert_eq!(1, p.level_at(hm(10, 23)));
    assert_eq!(0, p.level_at(hm(10, 24)));
}

#[test]
fn test_fractional_passengers_round_up() {
    let p = profile("EK0004", 600, 60.4, Arrival);
    assert_eq!(2, p.trips_needed);
    assert_eq!(1, p.buses_needed);
}

#[test]
fn test_zero_passengers_contribute_nothing() {
    let p = profile("EK0005", 600, 0.0, Arrival);
    assert_eq!(0, p.trips_needed);
    assert_eq!(0, p.buses_needed);
    assert_eq!(0, p.level_at(hm(10, 0)));
}

#[test]
fn test_transit_longer_than_time_frame_is_clamped() {
    let p = build_profile(
        &record("EK0006", Some(600), Some(200.0), Some(50.0)),
        &rules(Arrival),
    )
    .unwrap();
    assert!(p.capacity_clamped);
    assert_eq!(1, p.max_trips_per_window);
    assert_eq!(4, p.buses_needed);

    let domestic = build_profile(
        &record("DOM01", Some(600), Some(30.0), Some(TRANSIT)),
        &rules(Domestic),
    )
    .unwrap();
    assert!(domestic.capacity_clamped);
    assert_eq!(Time(615), domestic.window_end);
    assert_eq!(Time(608), domestic.midpoint);
}

#[test]
fn test_missing_and_invalid_fields_skip() {
    let arrival = rules(Arrival);
    let cases = [
        (record("A", None, Some(10.0), Some(TRANSIT)), MissingField(AnchorTime)),
        (record("B", Some(600), None, Some(TRANSIT)), MissingField(PassengerCount)),
        (record("C", Some(600), Some(10.0), None), MissingField(TransitTime)),
        (record("D", Some(600), Some(-1.0), Some(TRANSIT)), InvalidField(PassengerCount)),
        (record("E", Some(600), Some(f64::NAN), Some(TRANSIT)), InvalidField(PassengerCount)),
        (record("F", Some(600), Some(10.0), Some(0.0)), InvalidField(TransitTime)),
        (record("G", Some(600), Some(10.0), Some(-5.0)), InvalidField(TransitTime)),
        (record("H", Some(u64::MAX), Some(10.0), Some(TRANSIT)), InvalidField(AnchorTime)),
        (record("I", Some(u64::MAX - 100), Some(10.0), Some(TRANSIT)), InvalidField(AnchorTime)),
    ];

    for (rec, expected) in cases {
        assert_eq!(Err(expected), build_profile(&rec, &arrival), "flight {}", rec.flight_id);
    }
}
