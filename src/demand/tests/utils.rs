use crate::config::{BusConfig, WindowRules};
use crate::demand::grid::TimeGrid;
use crate::demand::profile::{FlightDemandProfile, build_profile};
use crate::flight::{Category, FlightRecord};
use crate::time::Time;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::sync::Arc;

pub const TRANSIT: f64 = 21.7;

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

pub fn rules(category: Category) -> WindowRules {
    BusConfig::default().rules(category)
}

pub fn record(flight_id: &str, anchor: Option<u64>, pax: Option<f64>, transit: Option<f64>) -> FlightRecord {
    FlightRecord {
        flight_id: id(flight_id),
        anchor_time: anchor.map(Time),
        passenger_count: pax,
        transit_time_minutes: transit,
    }
}

pub fn add_flight(flights: &mut Vec<FlightRecord>, flight_id: &str, anchor: u64, pax: f64) {
    flights.push(record(flight_id, Some(anchor), Some(pax), Some(TRANSIT)));
}

pub fn profile(flight_id: &str, anchor: u64, pax: f64, category: Category) -> FlightDemandProfile {
    build_profile(
        &record(flight_id, Some(anchor), Some(pax), Some(TRANSIT)),
        &rules(category),
    )
    .unwrap()
}

/// Grid covering the given day (0 based) at 5 minute steps.
pub fn day_grid(day: u64) -> TimeGrid {
    TimeGrid::build([Time(day * 1440)], 5).unwrap()
}

pub fn hm(hours: u64, mins: u64) -> Time {
    Time(hours * 60 + mins)
}

pub fn arb_id(prefix: &'static str) -> impl Strategy<Value = Arc<str>> {
    prop_oneof![
        Just(Arc::from(format!("{}_1", prefix))),
        Just(Arc::from(format!("{}_2", prefix))),
        Just(Arc::from(format!("{}_3", prefix))),
    ]
}

pub fn arb_record() -> impl Strategy<Value = FlightRecord> {
    (
        arb_id("FL"),
        0..2 * 1440u64,
        0..400u32,
        prop_oneof![Just(TRANSIT), Just(10.0), Just(50.0)],
    )
        .prop_map(|(fid, anchor, pax, transit)| FlightRecord {
            flight_id: fid,
            anchor_time: Some(Time(anchor)),
            passenger_count: Some(pax as f64),
            transit_time_minutes: Some(transit),
        })
}
