use crate::config::WindowRules;
use crate::diagnostics::{Field, Issue};
use crate::flight::{FlightId, FlightRecord};
use crate::time::{MINUTES_PER_DAY, Time};

/// Bus occupancy one flight generates around its anchor time.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightDemandProfile {
    pub flight_id: FlightId,
    pub trips_needed: u32,
    pub max_trips_per_window: u32,
    pub buses_needed: u32,
    /// Set when transit time exceeded the time frame and max trips was forced to 1.
    pub capacity_clamped: bool,
    pub window_start: Time,
    pub window_end: Time,
    /// Half window, rounded up to the minute.
    pub midpoint: Time,
}

impl FlightDemandProfile {
    pub fn is_odd(&self) -> bool {
        self.trips_needed % 2 == 1
    }

    /// Buses busy for the whole window.
    pub fn full_level(&self) -> u32 {
        if self.is_odd() {
            self.buses_needed - 1
        } else {
            self.buses_needed
        }
    }

    /// Extra bus busy from the window start up to the midpoint only.
    pub fn half_level(&self) -> u32 {
        if self.is_odd() { 1 } else { 0 }
    }

    /// Contribution at minute `t`, ignoring grid snapping.
    #[cfg(test)]
    pub fn level_at(&self, t: Time) -> u32 {
        let mut level = 0;
        if t >= self.window_start && t <= self.window_end {
            level += self.full_level();
        }
        if t >= self.window_start && t <= self.midpoint {
            level += self.half_level();
        }
        level
    }
}

/// Turns a flight record into its demand profile, or the reason it cannot contribute.
pub fn build_profile(
    record: &FlightRecord,
    rules: &WindowRules,
) -> Result<FlightDemandProfile, Issue> {
    let anchor = record
        .anchor_time
        .ok_or(Issue::MissingField(Field::AnchorTime))?;
    // The window and the anchor's whole day must stay representable.
    anchor
        .checked_add(rules.rollover_minutes.max(MINUTES_PER_DAY))
        .ok_or(Issue::InvalidField(Field::AnchorTime))?;
    let passengers = record
        .passenger_count
        .ok_or(Issue::MissingField(Field::PassengerCount))?;
    if !passengers.is_finite() || passengers < 0.0 {
        return Err(Issue::InvalidField(Field::PassengerCount));
    }
    let transit = record
        .transit_time_minutes
        .ok_or(Issue::MissingField(Field::TransitTime))?;
    if !transit.is_finite() || transit <= 0.0 {
        return Err(Issue::InvalidField(Field::TransitTime));
    }

    let trips_needed = (passengers / rules.bus_capacity as f64).ceil() as u32;
    let raw_max_trips = (rules.time_frame_minutes as f64 / transit).floor() as u32;
    let capacity_clamped = raw_max_trips == 0;
    let max_trips_per_window = raw_max_trips.max(1);
    let buses_needed = trips_needed.div_ceil(max_trips_per_window);

    Ok(FlightDemandProfile {
        flight_id: record.flight_id.clone(),
        trips_needed,
        max_trips_per_window,
        buses_needed,
        capacity_clamped,
        window_start: anchor,
        window_end: anchor + rules.rollover_minutes,
        midpoint: anchor + rules.rollover_minutes.div_ceil(2),
    })
}
