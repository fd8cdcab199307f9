use std::path::PathBuf;

use anyhow::Context as _;
use attrition_analysis::{
    association::{self, Response, TestKind},
    attribute::{Attribute, NumericAttribute},
};

use crate::{
    command::GlobalArg,
    util::{self, Output},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum KindArg {
    /// Chi-square test of independence (categorical attribute)
    ChiSquare,
    /// Welch two-sample t-test, departed vs. current (numeric attribute)
    TTest,
    /// One-way ANOVA of the response across the attribute's categories
    Anova,
    /// Pearson correlation with attrition, or with --response
    Correlation,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AssociationArg {
    /// Path to the employee snapshot JSON file
    data: PathBuf,
    /// Attribute to test
    #[arg(long)]
    attribute: Attribute,
    /// Test to run
    #[arg(long, value_enum)]
    kind: KindArg,
    /// Numeric response for ANOVA and correlation (attrition when omitted)
    #[arg(long)]
    response: Option<NumericAttribute>,
    /// Significance level (overrides the configuration file)
    #[arg(long)]
    alpha: Option<f64>,
    /// Minimum expected chi-square cell count (overrides the configuration file)
    #[arg(long)]
    min_expected_count: Option<f64>,
    /// Run chi-square tests even when expected counts are too small
    #[arg(long)]
    allow_low_counts: bool,
}

pub(crate) fn run(arg: &AssociationArg, global: &GlobalArg) -> anyhow::Result<()> {
    let mut config = util::load_config(global.config.as_deref())?.tests;
    if let Some(alpha) = arg.alpha {
        config.alpha = alpha;
    }
    if let Some(min_expected_count) = arg.min_expected_count {
        config.min_expected_count = min_expected_count;
    }
    config.allow_low_counts |= arg.allow_low_counts;

    let store = util::read_snapshot_file(&arg.data)?;
    let result = match (arg.kind, arg.response) {
        (KindArg::Correlation, Some(response)) => {
            let attribute = arg.attribute.as_numeric().with_context(|| {
                format!("correlation with {response} needs a numeric attribute, got {}", arg.attribute)
            })?;
            association::correlate(&store, attribute, response, &config)?
        }
        (kind, response) => {
            let kind = match kind {
                KindArg::ChiSquare => TestKind::ChiSquare,
                KindArg::TTest => TestKind::WelchT,
                KindArg::Anova => TestKind::Anova(response.map_or(Response::Attrition, Response::Numeric)),
                KindArg::Correlation => TestKind::Correlation,
            };
            association::test_association(&store, arg.attribute, kind, &config)?
        }
    };
    tracing::info!(
        attribute = %result.attribute,
        test = %result.test,
        p_value = result.p_value,
        significant = result.significant,
        "association test finished"
    );
    Output::save_json(&result, global.output.as_deref())
}
