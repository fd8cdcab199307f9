//! Headline retention figures.
//!
//! [`RetentionSummary`] condenses the output of the other analyses into the
//! numbers an executive summary leads with. It holds no formatting.

use attrition_stats::descriptive;
use serde::Serialize;

use crate::{
    aggregate::{self, GroupOrder, aggregate},
    attribute::CategoricalAttribute,
    risk::{DepartmentRisk, RiskScorer},
    store::RecordStore,
};

/// Tenures up to this many years count as early tenure.
pub const EARLY_TENURE_YEARS: u32 = 3;
/// Performance rating from which an employee is a high performer.
pub const HIGH_PERFORMER_RATING: u8 = 4;
/// Replacing an employee costs this share of an annual salary.
pub const REPLACEMENT_COST_FRACTION: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExitReasonShare {
    pub reason: String,
    pub count: usize,
    /// Share of all exits.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnoverCost {
    /// Annual salary at the mean monthly income, times [`REPLACEMENT_COST_FRACTION`].
    pub replacement_cost_per_employee: f64,
    /// `departed × replacement_cost_per_employee`.
    pub estimated_annual_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetentionSummary {
    pub total_employees: usize,
    pub departed: usize,
    pub attrition_rate: Option<f64>,
    /// Attrition rate among employees with at most [`EARLY_TENURE_YEARS`] of tenure.
    pub early_tenure_attrition_rate: Option<f64>,
    /// Department with the highest attrition rate.
    pub highest_attrition_department: Option<String>,
    /// Exit reasons by count descending; ties keep first-seen order.
    pub exit_reasons: Vec<ExitReasonShare>,
    /// Ids of departed employees rated at least [`HIGH_PERFORMER_RATING`].
    pub departed_high_performers: Vec<String>,
    pub high_risk_employees: usize,
    pub department_risk: Vec<DepartmentRisk>,
    /// `None` for an empty store.
    pub turnover_cost: Option<TurnoverCost>,
}

impl RetentionSummary {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_store(store: &RecordStore, scorer: &RiskScorer) -> Self {
        let employees = store.employees().iter().collect::<Vec<_>>();
        let departed = store.departed().count();

        let early = employees
            .iter()
            .copied()
            .filter(|e| e.years_at_company <= EARLY_TENURE_YEARS)
            .collect::<Vec<_>>();

        let highest_attrition_department = aggregate(
            store,
            &[CategoricalAttribute::Department],
            &[],
            GroupOrder::AttritionRateDescending,
        )
        .into_iter()
        .next()
        .map(|row| row.key.to_string());

        let mut exit_reasons = aggregate::partition(store.departed(), |e| e.exit_reason.clone())
            .into_iter()
            .map(|(reason, members)| ExitReasonShare {
                reason,
                count: members.len(),
                share: members.len() as f64 / departed as f64,
            })
            .collect::<Vec<_>>();
        exit_reasons.sort_by(|a, b| b.count.cmp(&a.count));

        let departed_high_performers = store
            .departed()
            .filter(|e| e.performance_rating.is_some_and(|r| r >= HIGH_PERFORMER_RATING))
            .map(|e| e.employee_id.clone())
            .collect();

        let incomes = employees.iter().map(|e| e.monthly_income).collect::<Vec<_>>();
        let turnover_cost = descriptive::mean(&incomes).map(|mean_monthly| {
            let replacement_cost_per_employee = mean_monthly * 12.0 * REPLACEMENT_COST_FRACTION;
            TurnoverCost {
                replacement_cost_per_employee,
                estimated_annual_cost: departed as f64 * replacement_cost_per_employee,
            }
        });

        let summary = Self {
            total_employees: store.len(),
            departed,
            attrition_rate: aggregate::attrition_rate(&employees),
            early_tenure_attrition_rate: aggregate::attrition_rate(&early),
            highest_attrition_department,
            exit_reasons,
            departed_high_performers,
            high_risk_employees: scorer.high_risk(store).len(),
            department_risk: scorer.department_risk(store),
            turnover_cost,
        };
        tracing::info!(
            total = summary.total_employees,
            departed = summary.departed,
            high_risk = summary.high_risk_employees,
            "summarized retention"
        );
        summary
    }
}
