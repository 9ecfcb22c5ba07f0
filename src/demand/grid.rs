use crate::error::DemandError;
use crate::time::Time;

/// Closed, fixed-step time axis shared by every demand series of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    pub start: Time,
    pub end: Time,
    pub step: u64,
}

impl TimeGrid {
    /// Spans from the first anchor's midnight to the last step slot of the final anchor's day.
    pub fn build(
        anchors: impl IntoIterator<Item = Time>,
        step: u64,
    ) -> Result<TimeGrid, DemandError> {
        let (min, max) = anchors
            .into_iter()
            .fold(None, |acc: Option<(Time, Time)>, t| match acc {
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
                None => Some((t, t)),
            })
            .ok_or(DemandError::EmptyInput)?;

        Ok(TimeGrid {
            start: min.floor_to_day(),
            end: max.last_slot_of_day(step),
            step,
        })
    }

    pub fn len(&self) -> usize {
        ((self.end - self.start) / self.step) as usize + 1
    }

    pub fn contains(&self, t: Time) -> bool {
        t >= self.start && t <= self.end
    }

    /// Position of an exact grid point.
    pub fn index_of(&self, t: Time) -> Option<usize> {
        if !self.contains(t) || (t - self.start) % self.step != 0 {
            return None;
        }
        Some(((t - self.start) / self.step) as usize)
    }

    pub fn time_at(&self, index: usize) -> Time {
        self.start + index as u64 * self.step
    }

    pub fn times(&self) -> impl Iterator<Item = Time> + '_ {
        (0..self.len()).map(|i| self.time_at(i))
    }
}
