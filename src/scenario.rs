use crate::config::BusConfig;
use crate::demand::{self, DemandEstimate};
use crate::diagnostics::{Diagnostic, Issue};
use crate::error::DemandError;
use crate::flight::{Category, FlightRecord};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Flights per category as handed over by the ingestion layer, plus the run configuration.
pub struct Scenario {
    pub config: BusConfig,
    pub arrivals: Vec<FlightRecord>,
    pub departures: Vec<FlightRecord>,
    pub domestic: Option<Vec<FlightRecord>>,
}

impl Scenario {
    pub fn new(
        config: BusConfig,
        mut arrivals: Vec<FlightRecord>,
        mut departures: Vec<FlightRecord>,
        mut domestic: Option<Vec<FlightRecord>>,
    ) -> Scenario {
        Self::fill_transit(&mut arrivals, config.arrival.transit_time_minutes);
        Self::fill_transit(&mut departures, config.departure.transit_time_minutes);
        if let Some(flights) = domestic.as_mut() {
            Self::fill_transit(flights, config.domestic.transit_time_minutes);
        }
        Scenario {
            config,
            arrivals,
            departures,
            domestic,
        }
    }

    fn fill_transit(flights: &mut [FlightRecord], default: f64) {
        flights
            .iter_mut()
            .filter(|f| f.transit_time_minutes.is_none())
            .for_each(|f| f.transit_time_minutes = Some(default));
    }

    pub fn load_from_file(path: &str) -> Result<Self, DemandError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, DemandError> {
        #[derive(Deserialize)]
        struct RawData {
            #[serde(default)]
            config: Option<BusConfig>,
            #[serde(default)]
            arrivals: Vec<FlightRecord>,
            #[serde(default)]
            departures: Vec<FlightRecord>,
            #[serde(default)]
            domestic: Option<Vec<FlightRecord>>,
        }
        let raw: RawData = serde_json::from_str(data)?;

        Ok(Scenario::new(
            raw.config.unwrap_or_default(),
            raw.arrivals,
            raw.departures,
            raw.domestic,
        ))
    }

    /// Domestic flights are only looked at when `include_domestic` is set.
    pub fn estimate(&self, include_domestic: bool) -> Result<DemandEstimate, DemandError> {
        let mut inputs: BTreeMap<Category, &[FlightRecord]> = BTreeMap::new();
        inputs.insert(Category::Arrival, &self.arrivals);
        inputs.insert(Category::Departure, &self.departures);

        let mut absent = None;
        if include_domestic {
            match &self.domestic {
                Some(flights) => {
                    inputs.insert(Category::Domestic, flights);
                }
                None => absent = Some(Diagnostic::category(Category::Domestic, Issue::CategoryAbsent)),
            }
        }

        let mut estimate = demand::estimate(&self.config, &inputs)?;
        if let Some(diagnostic) = absent {
            diagnostic.log();
            estimate.diagnostics.push(diagnostic);
        }
        Ok(estimate)
    }
}
