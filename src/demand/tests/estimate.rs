use crate::config::BusConfig;
use crate::demand::estimate;
use crate::demand::tests::utils::{TRANSIT, add_flight, hm, id, record};
use crate::diagnostics::Field::{AnchorTime, PassengerCount};
use crate::diagnostics::Issue::{DegenerateCapacity, InvalidField, MissingField, OutOfGridRange};
use crate::diagnostics::Diagnostic;
use crate::error::DemandError;
use crate::flight::Category::{self, Arrival, Departure, Domestic};
use crate::flight::FlightRecord;
use std::collections::BTreeMap;

fn inputs<'a>(
    arrivals: &'a [FlightRecord],
    departures: &'a [FlightRecord],
) -> BTreeMap<Category, &'a [FlightRecord]> {
    BTreeMap::from([(Arrival, arrivals), (Departure, departures)])
}

#[test]
fn test_total_sums_categories() {
    let mut arrivals = vec![];
    let mut departures = vec![];
    add_flight(&mut arrivals, "A1", 600, 240.0);
    add_flight(&mut arrivals, "A2", 630, 120.0);
    add_flight(&mut departures, "D1", 620, 121.0);

    let result = estimate(&BusConfig::default(), &inputs(&arrivals, &departures)).unwrap();

    assert_eq!(Some(3.0), result.series(Arrival).at(hm(10, 35)));
    assert_eq!(Some(2.0), result.series(Departure).at(hm(10, 35)));
    assert_eq!(Some(5.0), result.total.at(hm(10, 35)));
    for (i, total) in result.total.values().iter().enumerate() {
        let sum: f64 = Category::ALL
            .iter()
            .map(|c| result.series(*c).values()[i])
            .sum();
        assert_eq!(sum, *total);
    }
    assert_eq!(5, result.peak);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_missing_passengers_excluded() {
    let mut arrivals = vec![];
    add_flight(&mut arrivals, "A1", 600, 120.0);
    let baseline = estimate(&BusConfig::default(), &inputs(&arrivals, &[])).unwrap();

    arrivals.push(record("A2", Some(610), None, Some(TRANSIT)));
    let result = estimate(&BusConfig::default(), &inputs(&arrivals, &[])).unwrap();

    assert_eq!(baseline.total, result.total);
    assert_eq!(
        vec![Diagnostic::flight(Arrival, &id("A2"), MissingField(PassengerCount))],
        result.diagnostics
    );
    assert_eq!(1, result.skipped());
}

#[test]
fn test_domestic_left_out_is_all_zero() {
    let mut arrivals = vec![];
    let mut domestic = vec![];
    add_flight(&mut arrivals, "A1", 600, 120.0);
    add_flight(&mut domestic, "DOM1", 600, 120.0);

    let without = estimate(&BusConfig::default(), &inputs(&arrivals, &[])).unwrap();
    assert!(without.series(Domestic).values().iter().all(|v| *v == 0.0));
    assert_eq!(without.grid.len(), without.series(Domestic).values().len());

    let mut with_inputs = inputs(&arrivals, &[]);
    with_inputs.insert(Domestic, &domestic);
    let with = estimate(&BusConfig::default(), &with_inputs).unwrap();
    assert_eq!(Some(2.0), with.series(Domestic).at(hm(10, 0)));
    assert_eq!(Some(0.0), with.series(Domestic).at(hm(10, 20)));
    assert_eq!(3, with.peak);
    assert!(matches!(with.diagnostics[0].issue, DegenerateCapacity { .. }));
}

#[test]
fn test_grid_follows_valid_flights_only() {
    let mut arrivals = vec![];
    add_flight(&mut arrivals, "A1", 1440 + 600, 120.0);
    arrivals.push(record("BROKEN", Some(30), None, Some(TRANSIT)));

    let result = estimate(&BusConfig::default(), &inputs(&arrivals, &[])).unwrap();
    assert_eq!(crate::time::Time(1440), result.grid.start);
    assert_eq!(288, result.grid.len());
}

#[test]
fn test_nothing_usable_is_fatal() {
    let arrivals = vec![record("A1", None, Some(100.0), Some(TRANSIT))];
    let departures = vec![record("D1", Some(600), None, Some(TRANSIT))];
    assert!(matches!(
        estimate(&BusConfig::default(), &inputs(&arrivals, &departures)),
        Err(DemandError::EmptyInput)
    ));
    assert!(matches!(
        estimate(&BusConfig::default(), &BTreeMap::new()),
        Err(DemandError::EmptyInput)
    ));
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut arrivals = vec![];
    add_flight(&mut arrivals, "A1", 600, 120.0);
    let config = BusConfig {
        step_minutes: 0,
        ..BusConfig::default()
    };
    assert!(matches!(
        estimate(&config, &inputs(&arrivals, &[])),
        Err(DemandError::InvalidConfig(_))
    ));
}

#[test]
fn test_far_future_anchor_does_not_stretch_grid() {
    let mut arrivals = vec![];
    add_flight(&mut arrivals, "A1", 600, 120.0);
    add_flight(&mut arrivals, "TYPO", 999_999 * 1440 + 600, 120.0);
    let mut departures = vec![];
    add_flight(&mut departures, "D1", 6 * 1440 + 600, 120.0);

    let result = estimate(&BusConfig::default(), &inputs(&arrivals, &departures)).unwrap();

    assert_eq!(7 * 288, result.grid.len());
    assert_eq!(Some(1.0), result.series(Departure).at(crate::time::Time(6 * 1440 + 600)));
    assert_eq!(
        vec![Diagnostic::flight(
            Arrival,
            &id("TYPO"),
            OutOfGridRange {
                window_start: crate::time::Time(999_999 * 1440 + 600),
            }
        )],
        result.diagnostics
    );
    assert_eq!(1, result.skipped());
}

#[test]
fn test_horizon_follows_config() {
    let mut arrivals = vec![];
    add_flight(&mut arrivals, "A1", 600, 120.0);
    add_flight(&mut arrivals, "A2", 1440 + 600, 120.0);
    let config = BusConfig {
        max_horizon_days: 1,
        ..BusConfig::default()
    };

    let result = estimate(&config, &inputs(&arrivals, &[])).unwrap();
    assert_eq!(288, result.grid.len());
    assert_eq!(1, result.skipped());
}

#[test]
fn test_overflowing_anchor_is_invalid() {
    let mut arrivals = vec![];
    add_flight(&mut arrivals, "A1", 600, 120.0);
    arrivals.push(record("HUGE", Some(u64::MAX), Some(120.0), Some(TRANSIT)));

    let result = estimate(&BusConfig::default(), &inputs(&arrivals, &[])).unwrap();
    assert_eq!(
        vec![Diagnostic::flight(Arrival, &id("HUGE"), InvalidField(AnchorTime))],
        result.diagnostics
    );
    assert_eq!(1.0, result.total.max());
}
