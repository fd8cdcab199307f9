//! Tenure survival and drop-off.
//!
//! [`survival_curve`] counts, for each tenure value, the current employees
//! who have reached at least that tenure. The decrease between consecutive
//! tenures is the drop-off; the tenures with the largest drop-off are the
//! critical retention windows.
//!
//! Because the curve only sees current employees it describes the shape of
//! today's workforce, not departures. [`tenure_kaplan_meier`] complements it
//! with a Kaplan-Meier estimate where departures are events and current
//! employees are censored at their tenure.

use std::cmp::Reverse;

use attrition_stats::survival::{KaplanMeierCurve, Observation};
use serde::Serialize;

use crate::store::RecordStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalPoint {
    pub tenure: u32,
    /// Current employees with exactly this tenure.
    pub cohort_size: usize,
    /// Current employees with at least this tenure.
    pub surviving_at_or_above: usize,
    /// Decrease from the previous tenure; `None` at tenure 0.
    pub dropoff: Option<usize>,
    /// Drop-off relative to the previous tenure's survivors; `None` at tenure
    /// 0 or when nobody survived to the previous tenure.
    pub dropoff_rate: Option<f64>,
}

/// Survival points for tenures `0..=max_tenure`, ascending.
///
/// Employees with a tenure above `max_tenure` still count as surviving at
/// every listed tenure.
///
/// # Examples
///
/// ```
/// # use attrition_analysis::{store::RecordStore, survival::survival_curve};
/// let store = RecordStore::new(vec![]).unwrap();
/// let points = survival_curve(&store, 2);
/// assert_eq!(points.len(), 3);
/// assert!(points.iter().all(|p| p.surviving_at_or_above == 0));
/// assert_eq!(points[1].dropoff, Some(0));
/// assert_eq!(points[1].dropoff_rate, None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn survival_curve(store: &RecordStore, max_tenure: u32) -> Vec<SurvivalPoint> {
    let len = max_tenure as usize + 1;
    let mut cohorts = vec![0; len];
    let mut beyond = 0;
    for employee in store.current() {
        match cohorts.get_mut(employee.years_at_company as usize) {
            Some(count) => *count += 1,
            None => beyond += 1,
        }
    }

    let mut surviving = vec![0; len];
    let mut running = beyond;
    for (t, &count) in cohorts.iter().enumerate().rev() {
        running += count;
        surviving[t] = running;
    }

    let points = (0..=max_tenure)
        .zip(cohorts.iter().zip(&surviving))
        .enumerate()
        .map(|(i, (tenure, (&cohort_size, &surviving_at_or_above)))| {
            let previous = i.checked_sub(1).map(|p| surviving[p]);
            let dropoff = previous.map(|prev| prev - surviving_at_or_above);
            let dropoff_rate = previous
                .zip(dropoff)
                .filter(|&(prev, _)| prev > 0)
                .map(|(prev, drop)| drop as f64 / prev as f64);
            SurvivalPoint {
                tenure,
                cohort_size,
                surviving_at_or_above,
                dropoff,
                dropoff_rate,
            }
        })
        .collect::<Vec<_>>();
    tracing::debug!(max_tenure, beyond, "computed tenure survival curve");
    points
}

/// The `limit` points with the largest drop-off, largest first; ties keep
/// ascending tenure.
#[must_use]
pub fn critical_windows(points: &[SurvivalPoint], limit: usize) -> Vec<SurvivalPoint> {
    let mut windows = points
        .iter()
        .filter(|point| point.dropoff.is_some())
        .cloned()
        .collect::<Vec<_>>();
    windows.sort_by_key(|point| Reverse(point.dropoff));
    windows.truncate(limit);
    windows
}

/// Kaplan-Meier estimate of staying beyond each tenure.
///
/// Departed employees are events at their tenure; current employees are
/// censored at theirs.
#[must_use]
pub fn tenure_kaplan_meier(store: &RecordStore) -> KaplanMeierCurve {
    KaplanMeierCurve::from_observations(store.employees().iter().map(|employee| Observation {
        time: employee.years_at_company as usize,
        censored: employee.is_current(),
    }))
}
