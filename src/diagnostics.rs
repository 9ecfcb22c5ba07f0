use crate::flight::{Category, FlightId};
use crate::time::Time;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    AnchorTime,
    PassengerCount,
    TransitTime,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::AnchorTime => "anchor time",
            Field::PassengerCount => "passenger count",
            Field::TransitTime => "transit time",
        };
        write!(f, "{}", name)
    }
}

/// Why a flight was left out of (or only partly counted in) a demand series.
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    MissingField(Field),
    InvalidField(Field),
    /// Transit time exceeds the whole time frame; max trips clamped to 1.
    DegenerateCapacity { transit_minutes: f64, time_frame_minutes: u64 },
    OutOfGridRange { window_start: Time },
    /// Window runs past the grid end; the overflow is dropped.
    WindowClipped { window_end: Time, grid_end: Time },
    CategoryAbsent,
}

impl Issue {
    /// Whether the flight contributed nothing at all.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            Issue::MissingField(_) | Issue::InvalidField(_) | Issue::OutOfGridRange { .. }
        )
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingField(field) => write!(f, "missing {}", field),
            Issue::InvalidField(field) => write!(f, "invalid {}", field),
            Issue::DegenerateCapacity {
                transit_minutes,
                time_frame_minutes,
            } => write!(
                f,
                "transit of {}m exceeds {}m time frame, max trips clamped to 1",
                transit_minutes, time_frame_minutes
            ),
            Issue::OutOfGridRange { window_start } => {
                write!(f, "window start {} outside time grid", window_start)
            }
            Issue::WindowClipped {
                window_end,
                grid_end,
            } => write!(f, "window end {} clipped to {}", window_end, grid_end),
            Issue::CategoryAbsent => write!(f, "no data for category"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub category: Category,
    pub flight_id: Option<FlightId>,
    pub issue: Issue,
}

impl Diagnostic {
    pub fn flight(category: Category, flight_id: &FlightId, issue: Issue) -> Diagnostic {
        Diagnostic {
            category,
            flight_id: Some(flight_id.clone()),
            issue,
        }
    }

    pub fn category(category: Category, issue: Issue) -> Diagnostic {
        Diagnostic {
            category,
            flight_id: None,
            issue,
        }
    }

    pub(crate) fn log(&self) {
        match &self.flight_id {
            Some(id) => log::warn!("{} flight {}: {}", self.category, id, self.issue),
            None => log::warn!("{}: {}", self.category, self.issue),
        }
    }
}
