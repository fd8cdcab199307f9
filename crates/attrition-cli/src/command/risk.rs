use std::path::PathBuf;

use attrition_analysis::risk::{DepartmentRisk, HighRiskEmployee};
use serde::Serialize;

use crate::{
    command::GlobalArg,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RiskArg {
    /// Path to the employee snapshot JSON file
    data: PathBuf,
    /// Minimum score of a high-risk employee (overrides the configuration file)
    #[arg(long)]
    threshold: Option<u32>,
    /// List at most this many employees
    #[arg(long)]
    limit: Option<usize>,
    /// Also summarize risk per department
    #[arg(long)]
    departments: bool,
}

#[derive(Debug, Serialize)]
struct RiskReport {
    threshold: u32,
    high_risk_count: usize,
    employees: Vec<HighRiskEmployee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    departments: Option<Vec<DepartmentRisk>>,
}

pub(crate) fn run(arg: &RiskArg, global: &GlobalArg) -> anyhow::Result<()> {
    let mut risk_config = util::load_config(global.config.as_deref())?.risk;
    if let Some(threshold) = arg.threshold {
        risk_config.threshold = threshold;
    }
    let scorer = risk_config.scorer();

    let store = util::read_snapshot_file(&arg.data)?;
    let mut employees = scorer.high_risk(&store);
    let high_risk_count = employees.len();
    if let Some(limit) = arg.limit {
        employees.truncate(limit);
    }
    let report = RiskReport {
        threshold: scorer.threshold(),
        high_risk_count,
        employees,
        departments: arg.departments.then(|| scorer.department_risk(&store)),
    };
    Output::save_json(&report, global.output.as_deref())
}
