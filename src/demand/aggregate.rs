use crate::demand::grid::TimeGrid;
use crate::demand::profile::FlightDemandProfile;
use crate::demand::series::DemandSeries;
use crate::diagnostics::{Diagnostic, Issue};
use crate::flight::Category;

pub struct Aggregation {
    pub series: DemandSeries,
    pub diagnostics: Vec<Diagnostic>,
}

/// Overlays every profile of one category onto a fresh series.
///
/// Window starts are floored and window ends and midpoints ceiled to the grid step, so
/// unaligned anchor times always land on real grid points. Both interval ends are included.
/// A window whose start falls outside the grid is skipped; one running past the grid end is
/// cut at the end. Either case is reported.
pub fn aggregate(
    category: Category,
    profiles: &[FlightDemandProfile],
    grid: &TimeGrid,
) -> Aggregation {
    let mut series = DemandSeries::zeros(*grid);
    let mut diagnostics = vec![];

    for profile in profiles.iter().filter(|p| p.buses_needed > 0) {
        let start = profile.window_start.floor_to_step(grid.step);
        let Some(first) = grid.index_of(start) else {
            diagnostics.push(Diagnostic::flight(
                category,
                &profile.flight_id,
                Issue::OutOfGridRange {
                    window_start: profile.window_start,
                },
            ));
            continue;
        };

        let end = profile.window_end.ceil_to_step(grid.step);
        let last = match grid.index_of(end) {
            Some(i) => i,
            None => {
                diagnostics.push(Diagnostic::flight(
                    category,
                    &profile.flight_id,
                    Issue::WindowClipped {
                        window_end: profile.window_end,
                        grid_end: grid.end,
                    },
                ));
                grid.len() - 1
            }
        };

        series.add_range(first, last, profile.full_level() as f64);
        if profile.half_level() > 0 {
            let midpoint = profile.midpoint.ceil_to_step(grid.step);
            let mid = grid.index_of(midpoint).unwrap_or(last);
            series.add_range(first, mid, profile.half_level() as f64);
        }
    }

    log::debug!(
        "{}: {} profiles aggregated, peak {}",
        category,
        profiles.len(),
        series.max()
    );
    Aggregation {
        series,
        diagnostics,
    }
}
