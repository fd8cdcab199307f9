//! Grouped attrition metrics.
//!
//! [`aggregate`] partitions the store by a tuple of categorical attributes and
//! computes a fixed set of counts plus any requested [`Metric`]s per group.
//! Groups appear in first-seen order unless a [`GroupOrder`] says otherwise;
//! every reordering is a stable sort, so ties keep first-seen order.
//!
//! # Examples
//!
//! ```
//! use attrition_analysis::{
//!     aggregate::{GroupOrder, Metric, aggregate},
//!     attribute::{CategoricalAttribute, NumericAttribute},
//!     employee::Employee,
//!     store::RecordStore,
//! };
//!
//! let employees: Vec<Employee> = serde_json::from_str(r#"[
//!   {"employee_id": "E1", "department": "HR", "job_role": "Manager", "gender": "Male",
//!    "marital_status": "Married", "education_level": "Master", "overtime": false,
//!    "attrition": false, "age": 40, "years_at_company": 8, "monthly_income": 7000.0,
//!    "job_satisfaction": 4, "work_life_balance": 3},
//!   {"employee_id": "E2", "department": "IT", "job_role": "Analyst", "gender": "Female",
//!    "marital_status": "Single", "education_level": "Bachelor", "overtime": true,
//!    "attrition": true, "exit_reason": "Compensation", "age": 27, "years_at_company": 1,
//!    "monthly_income": 4100.0, "job_satisfaction": 2, "work_life_balance": 2}
//! ]"#).unwrap();
//! let store = RecordStore::new(employees).unwrap();
//!
//! let rows = aggregate(
//!     &store,
//!     &[CategoricalAttribute::Department],
//!     &[Metric::Mean(NumericAttribute::MonthlyIncome)],
//!     GroupOrder::AttritionRateDescending,
//! );
//! assert_eq!(rows[0].key.to_string(), "IT");
//! assert_eq!(rows[0].metrics.attrition_rate, Some(1.0));
//! assert_eq!(rows[1].metrics.values[0].value, Some(7000.0));
//! ```

use std::{cmp::Reverse, collections::HashMap, fmt, hash::Hash, str::FromStr};

use attrition_stats::descriptive;
use serde::{Serialize, Serializer};

use crate::{
    attribute::{CategoricalAttribute, GroupValue, NumericAttribute, ParseAttributeError},
    employee::Employee,
    store::RecordStore,
};

/// A per-group metric beyond the always-present counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Group size.
    Count,
    /// Attrition rate.
    Rate,
    Mean(NumericAttribute),
    Median(NumericAttribute),
    /// Mean of `attribute` over departed (`departed: true`) or current members only.
    ConditionalMean {
        attribute: NumericAttribute,
        departed: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseMetricError {
    #[display(
        "unknown metric '{name}', expected count, rate, mean:<attribute>, median:<attribute>, \
         mean_departed:<attribute> or mean_stayed:<attribute>"
    )]
    UnknownMetric { name: String },
    #[display("invalid metric '{metric}': {source}")]
    InvalidAttribute {
        metric: String,
        source: ParseAttributeError,
    },
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => f.write_str("count"),
            Self::Rate => f.write_str("rate"),
            Self::Mean(attribute) => write!(f, "mean:{attribute}"),
            Self::Median(attribute) => write!(f, "median:{attribute}"),
            Self::ConditionalMean {
                attribute,
                departed: true,
            } => write!(f, "mean_departed:{attribute}"),
            Self::ConditionalMean {
                attribute,
                departed: false,
            } => write!(f, "mean_stayed:{attribute}"),
        }
    }
}

impl FromStr for Metric {
    type Err = ParseMetricError;

    /// Parses `count`, `rate`, `mean:<attr>`, `median:<attr>`,
    /// `mean_departed:<attr>` or `mean_stayed:<attr>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ParseMetricError::UnknownMetric { name: s.to_owned() };
        let Some((kind, attribute)) = s.split_once(':') else {
            return match s {
                "count" => Ok(Self::Count),
                "rate" => Ok(Self::Rate),
                _ => Err(unknown()),
            };
        };
        let attribute =
            attribute
                .parse::<NumericAttribute>()
                .map_err(|source| ParseMetricError::InvalidAttribute {
                    metric: s.to_owned(),
                    source,
                })?;
        match kind {
            "mean" => Ok(Self::Mean(attribute)),
            "median" => Ok(Self::Median(attribute)),
            "mean_departed" => Ok(Self::ConditionalMean {
                attribute,
                departed: true,
            }),
            "mean_stayed" => Ok(Self::ConditionalMean {
                attribute,
                departed: false,
            }),
            _ => Err(unknown()),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Order of the rows returned by [`aggregate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupOrder {
    /// Order in which each key first appears in the store.
    #[default]
    FirstSeen,
    AttritionRateDescending,
    TotalDescending,
    /// Natural order of the key values, compared selector by selector.
    KeyAscending,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown group order '{name}', expected first-seen, rate, total or key")]
pub struct ParseGroupOrderError {
    pub name: String,
}

impl FromStr for GroupOrder {
    type Err = ParseGroupOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-seen" => Ok(Self::FirstSeen),
            "rate" => Ok(Self::AttritionRateDescending),
            "total" => Ok(Self::TotalDescending),
            "key" => Ok(Self::KeyAscending),
            _ => Err(ParseGroupOrderError { name: s.to_owned() }),
        }
    }
}

/// Key of one group: one value per grouping selector, in declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupKey(pub Vec<GroupValue>);

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" / ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricValue {
    pub metric: Metric,
    /// `None` when the metric has no data in this group.
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMetrics {
    pub total: usize,
    pub departed: usize,
    /// `departed / total`; `None` for an empty group.
    pub attrition_rate: Option<f64>,
    /// Requested metrics, in request order.
    pub values: Vec<MetricValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub key: GroupKey,
    pub metrics: GroupMetrics,
}

/// Aggregates the whole store.
///
/// Employees whose value for any grouping selector is null are left out of
/// every group. An empty `group_by` yields one group with an empty key.
#[must_use]
pub fn aggregate(
    store: &RecordStore,
    group_by: &[CategoricalAttribute],
    metrics: &[Metric],
    order: GroupOrder,
) -> Vec<GroupRow> {
    aggregate_records(store.employees(), group_by, metrics, order)
}

/// Aggregates an arbitrary subset of employees, e.g. only current ones.
#[must_use]
pub fn aggregate_records<'a, I>(
    records: I,
    group_by: &[CategoricalAttribute],
    metrics: &[Metric],
    order: GroupOrder,
) -> Vec<GroupRow>
where
    I: IntoIterator<Item = &'a Employee>,
{
    let groups = partition(records, |employee| {
        group_by
            .iter()
            .map(|attribute| attribute.value(employee))
            .collect::<Option<Vec<_>>>()
            .map(GroupKey)
    });

    let mut rows = groups
        .into_iter()
        .map(|(key, members)| GroupRow {
            key,
            metrics: group_metrics(&members, metrics),
        })
        .collect::<Vec<_>>();

    match order {
        GroupOrder::FirstSeen => {}
        GroupOrder::AttritionRateDescending => rows.sort_by(|a, b| {
            let rate = |row: &GroupRow| row.metrics.attrition_rate.unwrap_or(f64::NEG_INFINITY);
            rate(b).total_cmp(&rate(a))
        }),
        GroupOrder::TotalDescending => rows.sort_by_key(|row| Reverse(row.metrics.total)),
        GroupOrder::KeyAscending => rows.sort_by(|a, b| a.key.cmp(&b.key)),
    }

    tracing::debug!(
        group_by = ?group_by,
        groups = rows.len(),
        "aggregated attrition metrics"
    );
    rows
}

/// Splits `records` by `key_fn`, keeping keys in first-seen order and members
/// in input order. Records for which `key_fn` returns `None` are dropped.
pub(crate) fn partition<'a, K, I, F>(records: I, mut key_fn: F) -> Vec<(K, Vec<&'a Employee>)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = &'a Employee>,
    F: FnMut(&Employee) -> Option<K>,
{
    let mut positions = HashMap::new();
    let mut groups: Vec<(K, Vec<&Employee>)> = vec![];
    for employee in records {
        let Some(key) = key_fn(employee) else {
            continue;
        };
        let i = *positions.entry(key.clone()).or_insert_with(|| {
            groups.push((key, vec![]));
            groups.len() - 1
        });
        groups[i].1.push(employee);
    }
    groups
}

/// Departed share of `members`; `None` when empty.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn attrition_rate(members: &[&Employee]) -> Option<f64> {
    if members.is_empty() {
        return None;
    }
    let departed = members.iter().filter(|e| e.attrition).count();
    Some(departed as f64 / members.len() as f64)
}

fn values_of<'a, I>(members: I, attribute: NumericAttribute) -> Vec<f64>
where
    I: IntoIterator<Item = &'a Employee>,
{
    members
        .into_iter()
        .filter_map(|employee| attribute.value(employee))
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn group_metrics(members: &[&Employee], metrics: &[Metric]) -> GroupMetrics {
    let total = members.len();
    let departed = members.iter().filter(|e| e.attrition).count();
    let attrition_rate = attrition_rate(members);
    let values = metrics
        .iter()
        .map(|&metric| {
            let value = match metric {
                Metric::Count => Some(total as f64),
                Metric::Rate => attrition_rate,
                Metric::Mean(attribute) => descriptive::mean(&values_of(members.iter().copied(), attribute)),
                Metric::Median(attribute) => descriptive::median(&values_of(members.iter().copied(), attribute)),
                Metric::ConditionalMean {
                    attribute,
                    departed,
                } => descriptive::mean(&values_of(
                    members.iter().copied().filter(|e| e.attrition == departed),
                    attribute,
                )),
            };
            MetricValue { metric, value }
        })
        .collect();
    GroupMetrics {
        total,
        departed,
        attrition_rate,
        values,
    }
}
