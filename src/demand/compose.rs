use crate::demand::grid::TimeGrid;
use crate::demand::series::DemandSeries;
use crate::flight::Category;
use std::collections::BTreeMap;

pub struct Composition {
    /// Always holds every category; absent ones as all-zero series.
    pub by_category: BTreeMap<Category, DemandSeries>,
    pub total: DemandSeries,
    /// Maximum of the total, rounded up to whole buses.
    pub peak: u32,
}

pub fn compose(mut series: BTreeMap<Category, DemandSeries>, grid: &TimeGrid) -> Composition {
    for category in Category::ALL {
        series
            .entry(category)
            .or_insert_with(|| DemandSeries::zeros(*grid));
    }

    let total = series
        .values()
        .fold(DemandSeries::zeros(*grid), |mut acc, s| {
            acc.add_series(s);
            acc
        });
    let peak = total.max().ceil() as u32;

    Composition {
        by_category: series,
        total,
        peak,
    }
}
