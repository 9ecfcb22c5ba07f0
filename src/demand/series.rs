use crate::demand::grid::TimeGrid;
use crate::time::Time;

/// Concurrent buses required at every point of a time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandSeries {
    grid: TimeGrid,
    values: Vec<f64>,
}

impl DemandSeries {
    pub fn zeros(grid: TimeGrid) -> DemandSeries {
        DemandSeries {
            grid,
            values: vec![0.0; grid.len()],
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at an exact grid point.
    pub fn at(&self, t: Time) -> Option<f64> {
        self.grid.index_of(t).map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Time, f64)> + '_ {
        self.grid.times().zip(self.values.iter().copied())
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Adds `amount` to every point between the two indices, both included.
    pub(crate) fn add_range(&mut self, first: usize, last: usize, amount: f64) {
        self.values[first..=last]
            .iter_mut()
            .for_each(|v| *v += amount);
    }

    pub(crate) fn add_series(&mut self, other: &DemandSeries) {
        debug_assert_eq!(self.grid, other.grid, "Series grids differ");
        self.values
            .iter_mut()
            .zip(other.values.iter())
            .for_each(|(v, o)| *v += o);
    }
}
