use crate::error::DemandError;
use crate::flight::Category;
use crate::time::MINUTES_PER_DAY;
use serde::Deserialize;

pub const DEFAULT_TRANSIT_MINUTES: f64 = 21.7;
const MAX_HORIZON_DAYS: u64 = 31;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryConfig {
    /// Budget one bus has to cycle through its trips.
    pub time_frame_minutes: u64,
    /// How long a flight keeps buses busy after its anchor time.
    pub rollover_minutes: u64,
    /// Used for records that carry no transit time of their own.
    pub transit_time_minutes: f64,
}

impl CategoryConfig {
    pub fn with_window(minutes: u64) -> CategoryConfig {
        CategoryConfig {
            time_frame_minutes: minutes,
            rollover_minutes: minutes,
            transit_time_minutes: DEFAULT_TRANSIT_MINUTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawBusConfig")]
pub struct BusConfig {
    pub bus_capacity: u32,
    pub step_minutes: u64,
    /// Days after the earliest flight's day that may still hold flights.
    pub max_horizon_days: u64,
    pub arrival: CategoryConfig,
    pub departure: CategoryConfig,
    pub domestic: CategoryConfig,
}

impl Default for BusConfig {
    fn default() -> Self {
        BusConfig {
            bus_capacity: 60,
            step_minutes: 5,
            max_horizon_days: 7,
            arrival: CategoryConfig::with_window(45),
            departure: CategoryConfig::with_window(45),
            domestic: CategoryConfig::with_window(15),
        }
    }
}

/// Sections given partially in a scenario are completed from the category's own defaults.
#[derive(Deserialize)]
struct RawCategoryConfig {
    time_frame_minutes: Option<u64>,
    rollover_minutes: Option<u64>,
    transit_time_minutes: Option<f64>,
}

#[derive(Deserialize)]
struct RawBusConfig {
    bus_capacity: Option<u32>,
    step_minutes: Option<u64>,
    max_horizon_days: Option<u64>,
    arrival: Option<RawCategoryConfig>,
    departure: Option<RawCategoryConfig>,
    domestic: Option<RawCategoryConfig>,
}

fn merge(base: CategoryConfig, raw: Option<RawCategoryConfig>) -> CategoryConfig {
    match raw {
        Some(raw) => CategoryConfig {
            time_frame_minutes: raw.time_frame_minutes.unwrap_or(base.time_frame_minutes),
            rollover_minutes: raw.rollover_minutes.unwrap_or(base.rollover_minutes),
            transit_time_minutes: raw.transit_time_minutes.unwrap_or(base.transit_time_minutes),
        },
        None => base,
    }
}

impl From<RawBusConfig> for BusConfig {
    fn from(raw: RawBusConfig) -> Self {
        let defaults = BusConfig::default();
        BusConfig {
            bus_capacity: raw.bus_capacity.unwrap_or(defaults.bus_capacity),
            step_minutes: raw.step_minutes.unwrap_or(defaults.step_minutes),
            max_horizon_days: raw.max_horizon_days.unwrap_or(defaults.max_horizon_days),
            arrival: merge(defaults.arrival, raw.arrival),
            departure: merge(defaults.departure, raw.departure),
            domestic: merge(defaults.domestic, raw.domestic),
        }
    }
}

/// Everything the profile builder needs to know about one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowRules {
    pub time_frame_minutes: u64,
    pub rollover_minutes: u64,
    pub bus_capacity: u32,
}

impl BusConfig {
    pub fn category(&self, category: Category) -> &CategoryConfig {
        match category {
            Category::Arrival => &self.arrival,
            Category::Departure => &self.departure,
            Category::Domestic => &self.domestic,
        }
    }

    pub fn rules(&self, category: Category) -> WindowRules {
        let c = self.category(category);
        WindowRules {
            time_frame_minutes: c.time_frame_minutes,
            rollover_minutes: c.rollover_minutes,
            bus_capacity: self.bus_capacity,
        }
    }

    pub fn validate(&self) -> Result<(), DemandError> {
        let invalid = |msg: String| Err(DemandError::InvalidConfig(msg));
        if self.bus_capacity == 0 {
            return invalid("bus capacity must be positive".to_string());
        }
        if self.step_minutes == 0 || MINUTES_PER_DAY % self.step_minutes != 0 {
            return invalid(format!(
                "grid step of {} minutes does not divide a day",
                self.step_minutes
            ));
        }
        if self.max_horizon_days == 0 || self.max_horizon_days > MAX_HORIZON_DAYS {
            return invalid(format!(
                "horizon of {} days must be between 1 and {}",
                self.max_horizon_days, MAX_HORIZON_DAYS
            ));
        }
        for category in Category::ALL {
            let c = self.category(category);
            if c.time_frame_minutes == 0 || c.rollover_minutes == 0 {
                return invalid(format!("{} time frame and rollover must be positive", category));
            }
            if !(c.transit_time_minutes.is_finite() && c.transit_time_minutes > 0.0) {
                return invalid(format!("{} default transit time must be positive", category));
            }
        }
        Ok(())
    }
}
