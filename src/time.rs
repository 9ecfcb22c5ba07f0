use serde::{Deserialize, Deserializer, Serialize};
use std::ops::{Add, Sub};
use std::str::FromStr;
use thiserror::Error;

pub const MINUTES_PER_DAY: u64 = 1440;

/// Minutes since the start of the first schedule day.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Serialize, Deserialize, PartialOrd)]
pub struct Time(pub u64);

impl Time {
    pub fn day(&self) -> u64 {
        self.0 / MINUTES_PER_DAY
    }

    pub fn floor_to_day(&self) -> Time {
        Time(self.day() * MINUTES_PER_DAY)
    }

    /// Last `step` slot of this time's calendar day, 23:55 for a 5 minute step.
    pub fn last_slot_of_day(&self, step: u64) -> Time {
        self.floor_to_day() + (MINUTES_PER_DAY - step)
    }

    pub fn floor_to_step(&self, step: u64) -> Time {
        Time(self.0 - self.0 % step)
    }

    pub fn ceil_to_step(&self, step: u64) -> Time {
        Time(self.0.div_ceil(step) * step)
    }

    pub fn checked_add(&self, minutes: u64) -> Option<Time> {
        self.0.checked_add(minutes).map(Time)
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid time `{0}`, expected minutes, HH:MM or DAY<n> HH:MM")]
pub struct ParseTimeError(String);

impl FromStr for Time {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeError(s.to_string());
        let trimmed = s.trim();
        if let Ok(minutes) = trimmed.parse::<u64>() {
            return Ok(Time(minutes));
        }

        let (day, clock) = match trimmed.split_once(char::is_whitespace) {
            Some((day, clock)) => {
                let day = day
                    .strip_prefix("DAY")
                    .and_then(|d| d.parse::<u64>().ok())
                    .filter(|d| *d >= 1)
                    .ok_or_else(err)?;
                (day - 1, clock.trim())
            }
            None => (0, trimmed),
        };

        let (hours, mins) = clock.split_once(':').ok_or_else(err)?;
        let hours = hours.parse::<u64>().ok().filter(|h| *h < 24).ok_or_else(err)?;
        let mins = mins.parse::<u64>().ok().filter(|m| *m < 60).ok_or_else(err)?;
        day.checked_mul(MINUTES_PER_DAY)
            .and_then(|m| m.checked_add(hours * 60 + mins))
            .map(Time)
            .ok_or_else(err)
    }
}

/// Accepts minutes, `HH:MM` or `DAY<n> HH:MM`; anything unreadable becomes `None`.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Time>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTime {
        Minutes(u64),
        Fractional(f64),
        Text(String),
    }

    let raw = Option::<RawTime>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| match r {
        RawTime::Minutes(m) => Some(Time(m)),
        RawTime::Fractional(m) if m.is_finite() && m >= 0.0 => Some(Time(m.floor() as u64)),
        RawTime::Fractional(m) => {
            log::debug!("Coercing unreadable time {} to missing", m);
            None
        }
        RawTime::Text(text) => text
            .parse::<Time>()
            .map_err(|e| log::debug!("Coercing to missing: {}", e))
            .ok(),
    }))
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let days = self.0 / MINUTES_PER_DAY;
        let remaining = self.0 % MINUTES_PER_DAY;
        let hours = remaining / 60;
        let mins = remaining % 60;
        write!(f, "DAY{} {:02}:{:02}", days + 1, hours, mins)
    }
}

impl Add<u64> for Time {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Time(self.0 + rhs)
    }
}

impl Sub<Time> for Time {
    type Output = u64;

    fn sub(self, rhs: Time) -> Self::Output {
        self.0 - rhs.0
    }
}
