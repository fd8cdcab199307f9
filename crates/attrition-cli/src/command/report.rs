use std::{panic, path::PathBuf, thread};

use attrition_analysis::{
    aggregate::{self, GroupOrder, GroupRow, Metric},
    association::{self, DEFAULT_TESTS, TestResult},
    attribute::{Attribute, CategoricalAttribute, NumericAttribute},
    config::AnalysisConfig,
    risk::HighRiskEmployee,
    store::RecordStore,
    summary::RetentionSummary,
    survival::{self, SurvivalPoint},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    command::{GlobalArg, survival::KaplanMeierView},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Path to the employee snapshot JSON file
    data: PathBuf,
}

const BREAKDOWNS: [CategoricalAttribute; 6] = [
    CategoricalAttribute::Department,
    CategoricalAttribute::JobRole,
    CategoricalAttribute::Overtime,
    CategoricalAttribute::AgeBand,
    CategoricalAttribute::TenureBand,
    CategoricalAttribute::SalaryBand,
];

const BREAKDOWN_METRICS: [Metric; 4] = [
    Metric::Count,
    Metric::Rate,
    Metric::Mean(NumericAttribute::JobSatisfaction),
    Metric::Mean(NumericAttribute::MonthlyIncome),
];

#[derive(Debug, Serialize)]
struct Breakdown {
    group_by: CategoricalAttribute,
    rows: Vec<GroupRow>,
}

/// One entry of the default test battery; a rejected test keeps its reason.
#[derive(Debug, Serialize)]
struct TestEntry {
    attribute: Attribute,
    test: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<TestResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct FullReport {
    generated_at: DateTime<Utc>,
    config: AnalysisConfig,
    summary: RetentionSummary,
    breakdowns: Vec<Breakdown>,
    tests: Vec<TestEntry>,
    high_risk_employees: Vec<HighRiskEmployee>,
    survival: Vec<SurvivalPoint>,
    critical_windows: Vec<SurvivalPoint>,
    kaplan_meier: KaplanMeierView,
}

pub(crate) fn run(arg: &ReportArg, global: &GlobalArg) -> anyhow::Result<()> {
    let config = util::load_config(global.config.as_deref())?;
    let store = util::read_snapshot_file(&arg.data)?;
    let report = build_report(&store, config);
    tracing::info!(
        high_risk = report.high_risk_employees.len(),
        significant = report
            .tests
            .iter()
            .filter(|entry| entry.result.as_ref().is_some_and(|r| r.significant))
            .count(),
        "report assembled"
    );
    Output::save_json(&report, global.output.as_deref())
}

fn build_report(store: &RecordStore, config: AnalysisConfig) -> FullReport {
    let scorer = config.risk.scorer();
    let (summary, breakdowns, tests, high_risk) = thread::scope(|s| {
        let summary = s.spawn(|| RetentionSummary::from_store(store, &scorer));
        let breakdowns = s.spawn(|| {
            BREAKDOWNS
                .iter()
                .map(|&group_by| Breakdown {
                    group_by,
                    rows: aggregate::aggregate(
                        store,
                        &[group_by],
                        &BREAKDOWN_METRICS,
                        GroupOrder::AttritionRateDescending,
                    ),
                })
                .collect::<Vec<_>>()
        });
        let tests = s.spawn(|| {
            DEFAULT_TESTS
                .iter()
                .map(|&(attribute, kind)| {
                    let (result, error) =
                        match association::test_association(store, attribute, kind, &config.tests)
                        {
                            Ok(result) => (Some(result), None),
                            Err(err) => (None, Some(err.to_string())),
                        };
                    TestEntry {
                        attribute,
                        test: kind.to_string(),
                        result,
                        error,
                    }
                })
                .collect::<Vec<_>>()
        });
        let high_risk = s.spawn(|| scorer.high_risk(store));
        (
            join(summary),
            join(breakdowns),
            join(tests),
            join(high_risk),
        )
    });

    let points = survival::survival_curve(store, config.survival.max_tenure);
    FullReport {
        generated_at: Utc::now(),
        summary,
        breakdowns,
        tests,
        high_risk_employees: high_risk,
        critical_windows: survival::critical_windows(&points, config.survival.critical_windows),
        survival: points,
        kaplan_meier: KaplanMeierView::new(survival::tenure_kaplan_meier(store)),
        config,
    }
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| panic::resume_unwind(payload))
}
