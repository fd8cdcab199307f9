use std::path::PathBuf;

use attrition_analysis::{
    aggregate::{self, GroupOrder, GroupRow, Metric},
    attribute::CategoricalAttribute,
};
use serde::Serialize;

use crate::{
    command::GlobalArg,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AggregateArg {
    /// Path to the employee snapshot JSON file
    data: PathBuf,
    /// Attributes to group by, in key order (comma-separated)
    #[arg(long, value_delimiter = ',', default_values = ["department"])]
    group_by: Vec<CategoricalAttribute>,
    /// Metrics per group: count, rate, mean:<attr>, median:<attr>,
    /// mean_departed:<attr>, mean_stayed:<attr> (comma-separated)
    #[arg(long, value_delimiter = ',', default_values = ["count", "rate"])]
    metrics: Vec<Metric>,
    /// Row order: first-seen, rate, total or key
    #[arg(long, default_value = "first-seen")]
    order: GroupOrder,
    /// Only aggregate employees who are still with the organization
    #[arg(long)]
    current_only: bool,
}

#[derive(Debug, Serialize)]
struct AggregateReport<'a> {
    group_by: &'a [CategoricalAttribute],
    rows: Vec<GroupRow>,
}

pub(crate) fn run(arg: &AggregateArg, global: &GlobalArg) -> anyhow::Result<()> {
    let store = util::read_snapshot_file(&arg.data)?;
    let rows = if arg.current_only {
        aggregate::aggregate_records(store.current(), &arg.group_by, &arg.metrics, arg.order)
    } else {
        aggregate::aggregate(&store, &arg.group_by, &arg.metrics, arg.order)
    };
    let report = AggregateReport {
        group_by: &arg.group_by,
        rows,
    };
    Output::save_json(&report, global.output.as_deref())
}
