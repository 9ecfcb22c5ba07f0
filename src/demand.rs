use crate::config::BusConfig;
use crate::demand::aggregate::aggregate;
use crate::demand::compose::compose;
use crate::demand::grid::TimeGrid;
use crate::demand::profile::{FlightDemandProfile, build_profile};
use crate::demand::series::DemandSeries;
use crate::diagnostics::{Diagnostic, Issue};
use crate::error::DemandError;
use crate::flight::{Category, FlightRecord};
use crate::time::{MINUTES_PER_DAY, Time};
use std::collections::BTreeMap;

pub mod aggregate;
pub mod compose;
pub mod grid;
pub mod profile;
pub mod series;


pub struct DemandEstimate {
    pub grid: TimeGrid,
    pub profiles: BTreeMap<Category, Vec<FlightDemandProfile>>,
    pub by_category: BTreeMap<Category, DemandSeries>,
    pub total: DemandSeries,
    pub peak: u32,
    pub diagnostics: Vec<Diagnostic>,
}

impl DemandEstimate {
    pub fn series(&self, category: Category) -> &DemandSeries {
        &self.by_category[&category]
    }

    pub fn skipped(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.flight_id.is_some() && d.issue.is_skip())
            .count()
    }
}

/// Runs profile building, aggregation and composition over the given categories.
///
/// Categories missing from `inputs` come out as all-zero series. Only the absence of any
/// usable flight stops the run; everything else ends up in the diagnostics.
pub fn estimate(
    config: &BusConfig,
    inputs: &BTreeMap<Category, &[FlightRecord]>,
) -> Result<DemandEstimate, DemandError> {
    config.validate()?;
    let mut diagnostics = vec![];

    let mut profiles = inputs
        .iter()
        .map(|(&category, records)| {
            let rules = config.rules(category);
            let built = records
                .iter()
                .filter_map(|record| match build_profile(record, &rules) {
                    Ok(profile) => {
                        if profile.capacity_clamped {
                            diagnostics.push(Diagnostic::flight(
                                category,
                                &record.flight_id,
                                Issue::DegenerateCapacity {
                                    transit_minutes: record.transit_time_minutes.unwrap_or_default(),
                                    time_frame_minutes: rules.time_frame_minutes,
                                },
                            ));
                        }
                        Some(profile)
                    }
                    Err(issue) => {
                        diagnostics.push(Diagnostic::flight(category, &record.flight_id, issue));
                        None
                    }
                })
                .collect::<Vec<_>>();
            log::info!(
                "{}: {} of {} flights usable",
                category,
                built.len(),
                records.len()
            );
            (category, built)
        })
        .collect::<BTreeMap<_, _>>();

    limit_horizon(&mut profiles, config.max_horizon_days, &mut diagnostics);
    let grid = TimeGrid::build(
        profiles.values().flatten().map(|p| p.window_start),
        config.step_minutes,
    )?;
    log::info!("Time grid {} - {} ({} steps)", grid.start, grid.end, grid.len());

    let series = profiles
        .iter()
        .map(|(&category, profiles)| {
            let aggregation = aggregate(category, profiles, &grid);
            diagnostics.extend(aggregation.diagnostics);
            (category, aggregation.series)
        })
        .collect::<BTreeMap<_, _>>();

    let composition = compose(series, &grid);
    diagnostics.iter().for_each(Diagnostic::log);
    log::info!("Peak buses required: {}", composition.peak);

    Ok(DemandEstimate {
        grid,
        profiles,
        by_category: composition.by_category,
        total: composition.total,
        peak: composition.peak,
        diagnostics,
    })
}

/// Drops flights anchored more than `days` calendar days after the earliest one, so one
/// mistyped date cannot stretch the grid.
fn limit_horizon(
    profiles: &mut BTreeMap<Category, Vec<FlightDemandProfile>>,
    days: u64,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(earliest) = profiles.values().flatten().map(|p| p.window_start).min() else {
        return;
    };
    let limit = Time((earliest.day() + days).saturating_mul(MINUTES_PER_DAY));

    for (&category, built) in profiles.iter_mut() {
        built.retain(|p| {
            let keep = p.window_start < limit;
            if !keep {
                diagnostics.push(Diagnostic::flight(
                    category,
                    &p.flight_id,
                    Issue::OutOfGridRange {
                        window_start: p.window_start,
                    },
                ));
            }
            keep
        });
    }
}
