use crate::time::{self, Time};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub type FlightId = Arc<str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Arrival,
    Departure,
    Domestic,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Arrival, Category::Departure, Category::Domestic];

    /// Gate event the bus window opens at.
    pub fn anchor_event(&self) -> &'static str {
        match self {
            Category::Arrival | Category::Domestic => "gate start",
            Category::Departure => "gate end",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Arrival => "Arrival",
            Category::Departure => "Departure",
            Category::Domestic => "Domestic",
        };
        write!(f, "{}", name)
    }
}

/// A flight already filtered to remote international stands and joined with its passenger count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub flight_id: FlightId,
    #[serde(default, deserialize_with = "time::deserialize_lenient")]
    pub anchor_time: Option<Time>,
    #[serde(default)]
    pub passenger_count: Option<f64>,
    #[serde(default)]
    pub transit_time_minutes: Option<f64>,
}
