use std::path::PathBuf;

use attrition_analysis::survival::{self, SurvivalPoint};
use attrition_stats::survival::KaplanMeierCurve;
use serde::Serialize;

use crate::{
    command::GlobalArg,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SurvivalArg {
    /// Path to the employee snapshot JSON file
    data: PathBuf,
    /// Largest tenure in the curve (overrides the configuration file)
    #[arg(long)]
    max_tenure: Option<u32>,
    /// Number of critical retention windows (overrides the configuration file)
    #[arg(long)]
    critical: Option<usize>,
    /// Add a Kaplan-Meier estimate that counts departures as events
    #[arg(long)]
    kaplan_meier: bool,
}

/// Tenures at which the Kaplan-Meier retention is reported.
const RETENTION_YEARS: [usize; 2] = [1, 3];

#[derive(Debug, Serialize)]
pub(crate) struct TenureRetention {
    pub years: usize,
    /// Estimated probability of staying beyond `years`
    pub probability: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct KaplanMeierView {
    pub median_tenure: Option<f64>,
    pub retention: Vec<TenureRetention>,
    pub curve: KaplanMeierCurve,
}

impl KaplanMeierView {
    pub fn new(curve: KaplanMeierCurve) -> Self {
        Self {
            median_tenure: curve.median_survival(),
            retention: RETENTION_YEARS
                .iter()
                .map(|&years| TenureRetention {
                    years,
                    probability: curve.survival_at(years),
                })
                .collect(),
            curve,
        }
    }
}

#[derive(Debug, Serialize)]
struct SurvivalReport {
    points: Vec<SurvivalPoint>,
    critical_windows: Vec<SurvivalPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kaplan_meier: Option<KaplanMeierView>,
}

pub(crate) fn run(arg: &SurvivalArg, global: &GlobalArg) -> anyhow::Result<()> {
    let config = util::load_config(global.config.as_deref())?.survival;
    let max_tenure = arg.max_tenure.unwrap_or(config.max_tenure);
    let critical = arg.critical.unwrap_or(config.critical_windows);

    let store = util::read_snapshot_file(&arg.data)?;
    let points = survival::survival_curve(&store, max_tenure);
    let report = SurvivalReport {
        critical_windows: survival::critical_windows(&points, critical),
        points,
        kaplan_meier: arg
            .kaplan_meier
            .then(|| KaplanMeierView::new(survival::tenure_kaplan_meier(&store))),
    };
    Output::save_json(&report, global.output.as_deref())
}
