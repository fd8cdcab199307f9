//! Statistical association between an attribute and the attrition outcome.
//!
//! [`test_association`] binds an [`Attribute`] to one of the kernels in
//! [`attrition_stats::hypothesis`], enforces the minimum sample sizes of
//! [`TestConfig`] and attaches attribute context to every failure.
//!
//! | kind | attribute reading | compares |
//! |---|---|---|
//! | [`TestKind::ChiSquare`] | categorical | category × attrition contingency table |
//! | [`TestKind::WelchT`] | numeric | departed vs. current means |
//! | [`TestKind::Anova`] | categorical (grouping) | response means across categories |
//! | [`TestKind::Correlation`] | numeric, or categorical with two levels | attribute vs. 0/1 attrition indicator |
//!
//! Samples are collected per category into ordered maps, so results do not
//! depend on the order of the snapshot beyond floating-point rounding.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use attrition_stats::hypothesis::{self, StatsError, Variable};
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    attribute::{Attribute, CategoricalAttribute, GroupValue, NumericAttribute},
    store::RecordStore,
};

/// Response variable of an ANOVA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Response {
    /// The 0/1 attrition indicator.
    Attrition,
    Numeric(NumericAttribute),
}

impl Response {
    fn attribute(self) -> Attribute {
        match self {
            Self::Attrition => Attribute::Attrition,
            Self::Numeric(attribute) => attribute.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestKind {
    ChiSquare,
    WelchT,
    Anova(Response),
    Correlation,
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChiSquare => f.write_str("chi-square"),
            Self::WelchT => f.write_str("t-test"),
            Self::Anova(_) => f.write_str("anova"),
            Self::Correlation => f.write_str("correlation"),
        }
    }
}

impl Serialize for TestKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Tests run by the full report: every grouping dimension against attrition
/// with chi-square, every continuous driver with a t-test.
pub const DEFAULT_TESTS: [(Attribute, TestKind); 14] = [
    (Attribute::Department, TestKind::ChiSquare),
    (Attribute::Gender, TestKind::ChiSquare),
    (Attribute::MaritalStatus, TestKind::ChiSquare),
    (Attribute::EducationLevel, TestKind::ChiSquare),
    (Attribute::Overtime, TestKind::ChiSquare),
    (Attribute::AgeBand, TestKind::ChiSquare),
    (Attribute::TenureBand, TestKind::ChiSquare),
    (Attribute::SalaryBand, TestKind::ChiSquare),
    (Attribute::JobSatisfaction, TestKind::WelchT),
    (Attribute::WorkLifeBalance, TestKind::WelchT),
    (Attribute::MonthlyIncome, TestKind::WelchT),
    (Attribute::YearsAtCompany, TestKind::WelchT),
    (Attribute::JobSatisfaction, TestKind::Correlation),
    (Attribute::Department, TestKind::Anova(Response::Attrition)),
];

/// Significance level and minimum-sample rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestConfig {
    /// A result is significant when its p-value is below this level.
    pub alpha: f64,
    /// Smallest acceptable expected cell count of a chi-square table.
    pub min_expected_count: f64,
    /// Smallest acceptable group for t-tests and ANOVA (never below 2).
    pub min_group_size: usize,
    /// Run chi-square tests even when an expected count is too small.
    pub allow_low_counts: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            min_expected_count: 5.0,
            min_group_size: 2,
            allow_low_counts: false,
        }
    }
}

impl TestConfig {
    fn min_group_size(&self) -> usize {
        self.min_group_size.max(2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub attribute: Attribute,
    pub test: TestKind,
    /// What the attribute was tested against.
    pub against: Attribute,
    /// χ², t, F or r depending on the test.
    pub statistic: f64,
    pub p_value: f64,
    /// Degrees of freedom; the numerator (between-groups) ones for ANOVA.
    pub degrees_of_freedom: Option<f64>,
    /// Within-groups degrees of freedom of an ANOVA.
    pub denominator_degrees_of_freedom: Option<f64>,
    /// Observations the statistic was computed from.
    pub sample_size: usize,
    pub significant: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::IsVariant)]
pub enum TestError {
    /// The sample (or one of its groups) is below the configured minimum.
    InsufficientData {
        attribute: Attribute,
        test: TestKind,
        /// Offending group, when one group is to blame.
        group: Option<String>,
        detail: String,
    },
    /// A variable is constant, so the statistic is undefined.
    DegenerateInput {
        attribute: Attribute,
        test: TestKind,
        variable: String,
    },
    /// The attribute has no reading the test can use.
    UnsupportedAttribute { attribute: Attribute, test: TestKind },
}

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientData {
                attribute,
                test,
                group: Some(group),
                detail,
            } => write!(f, "{test} on {attribute}: insufficient data in group '{group}': {detail}"),
            Self::InsufficientData {
                attribute,
                test,
                group: None,
                detail,
            } => write!(f, "{test} on {attribute}: insufficient data: {detail}"),
            Self::DegenerateInput {
                attribute,
                test,
                variable,
            } => write!(f, "{test} on {attribute}: {variable} has zero variance"),
            Self::UnsupportedAttribute { attribute, test } => {
                write!(f, "{test} cannot be applied to {attribute}")
            }
        }
    }
}

/// Binds kernel failures and result fields to one attribute and test.
#[derive(Clone, Copy)]
struct Context<'a> {
    attribute: Attribute,
    test: TestKind,
    against: Attribute,
    config: &'a TestConfig,
}

impl Context<'_> {
    fn insufficient(self, group: Option<String>, detail: impl Into<String>) -> TestError {
        TestError::InsufficientData {
            attribute: self.attribute,
            test: self.test,
            group,
            detail: detail.into(),
        }
    }

    fn degenerate(self, variable: impl fmt::Display) -> TestError {
        TestError::DegenerateInput {
            attribute: self.attribute,
            test: self.test,
            variable: variable.to_string(),
        }
    }

    fn unsupported(self) -> TestError {
        TestError::UnsupportedAttribute {
            attribute: self.attribute,
            test: self.test,
        }
    }

    /// `variables` names the x, y and within-group variables of the kernel.
    fn map_stats_error(self, err: StatsError, variables: [&str; 3]) -> TestError {
        match err {
            StatsError::InsufficientData { detail } => self.insufficient(None, detail),
            StatsError::ZeroVariance { variable } => self.degenerate(match variable {
                Variable::X => variables[0],
                Variable::Y => variables[1],
                Variable::Within => variables[2],
            }),
        }
    }

    fn result(
        self,
        statistic: f64,
        p_value: f64,
        degrees_of_freedom: Option<f64>,
        sample_size: usize,
    ) -> TestResult {
        TestResult {
            attribute: self.attribute,
            test: self.test,
            against: self.against,
            statistic,
            p_value,
            degrees_of_freedom,
            denominator_degrees_of_freedom: None,
            sample_size,
            significant: p_value < self.config.alpha,
        }
    }
}

/// Tests the association between `attribute` and attrition.
///
/// # Errors
///
/// - [`TestError::UnsupportedAttribute`] if `attribute` has no reading `kind`
///   accepts.
/// - [`TestError::InsufficientData`] below the minimum sizes in `config`.
/// - [`TestError::DegenerateInput`] when a variable is constant.
///
/// # Examples
///
/// ```
/// use attrition_analysis::{
///     association::{TestConfig, TestError, TestKind, test_association},
///     attribute::Attribute,
///     store::RecordStore,
/// };
///
/// let store = RecordStore::new(vec![]).unwrap();
/// let err = test_association(&store, Attribute::MonthlyIncome, TestKind::ChiSquare, &TestConfig::default())
///     .unwrap_err();
/// assert!(err.is_unsupported_attribute());
/// ```
pub fn test_association(
    store: &RecordStore,
    attribute: Attribute,
    kind: TestKind,
    config: &TestConfig,
) -> Result<TestResult, TestError> {
    let against = match kind {
        TestKind::Anova(response) => response.attribute(),
        _ => Attribute::Attrition,
    };
    let cx = Context {
        attribute,
        test: kind,
        against,
        config,
    };
    let result = match kind {
        TestKind::ChiSquare => {
            chi_square(store, attribute.as_categorical().ok_or_else(|| cx.unsupported())?, cx)
        }
        TestKind::WelchT => welch(store, attribute.as_numeric().ok_or_else(|| cx.unsupported())?, cx),
        TestKind::Anova(response) => anova(
            store,
            attribute.as_categorical().ok_or_else(|| cx.unsupported())?,
            response,
            cx,
        ),
        TestKind::Correlation => correlation(store, attribute, cx),
    };
    match &result {
        Ok(result) => tracing::debug!(
            %attribute,
            test = %kind,
            statistic = result.statistic,
            p_value = result.p_value,
            "association test completed"
        ),
        Err(err) => tracing::debug!(%err, "association test rejected"),
    }
    result
}

/// Pearson correlation between two numeric attributes over employees with
/// both values present.
///
/// # Errors
///
/// [`TestError::InsufficientData`] under three pairs and
/// [`TestError::DegenerateInput`] when either attribute is constant.
pub fn correlate(
    store: &RecordStore,
    x: NumericAttribute,
    y: NumericAttribute,
    config: &TestConfig,
) -> Result<TestResult, TestError> {
    let cx = Context {
        attribute: x.into(),
        test: TestKind::Correlation,
        against: y.into(),
        config,
    };
    let (xs, ys): (Vec<f64>, Vec<f64>) = store
        .employees()
        .iter()
        .filter_map(|e| Some((x.value(e)?, y.value(e)?)))
        .unzip();
    pearson(&xs, &ys, [&x.to_string(), &y.to_string()], cx)
}

fn chi_square(
    store: &RecordStore,
    attribute: CategoricalAttribute,
    cx: Context<'_>,
) -> Result<TestResult, TestError> {
    let mut counts = BTreeMap::<GroupValue, [f64; 2]>::new();
    for employee in store.employees() {
        if let Some(value) = attribute.value(employee) {
            counts.entry(value).or_default()[usize::from(employee.attrition)] += 1.0;
        }
    }
    let table = counts.values().map(|row| row.to_vec()).collect::<Vec<_>>();
    let test =
        hypothesis::chi_square_independence(&table).map_err(|err| cx.map_stats_error(err, ["", "", ""]))?;

    if !cx.config.allow_low_counts && test.min_expected < cx.config.min_expected_count {
        // The smallest expected cell lies in the smallest row.
        let smallest = counts
            .iter()
            .min_by(|(_, a), (_, b)| (a[0] + a[1]).total_cmp(&(b[0] + b[1])))
            .map(|(value, _)| value.to_string());
        return Err(cx.insufficient(
            smallest,
            format!(
                "expected count {:.2} is below {}",
                test.min_expected, cx.config.min_expected_count
            ),
        ));
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let sample_size = test.total as usize;
    #[expect(clippy::cast_precision_loss)]
    let dof = test.degrees_of_freedom as f64;
    Ok(cx.result(test.statistic, test.p_value, Some(dof), sample_size))
}

fn welch(
    store: &RecordStore,
    attribute: NumericAttribute,
    cx: Context<'_>,
) -> Result<TestResult, TestError> {
    let values = |departed: bool| {
        store
            .employees()
            .iter()
            .filter(|e| e.attrition == departed)
            .filter_map(|e| attribute.value(e))
            .collect::<Vec<_>>()
    };
    let departed = values(true);
    let stayed = values(false);

    let min = cx.config.min_group_size();
    for (group, sample) in [("departed", &departed), ("stayed", &stayed)] {
        if sample.len() < min {
            return Err(cx.insufficient(
                Some(group.to_owned()),
                format!("{} observations, need at least {min}", sample.len()),
            ));
        }
    }

    let test = hypothesis::welch_t_test(&departed, &stayed)
        .map_err(|err| cx.map_stats_error(err, ["", "", &attribute.to_string()]))?;
    Ok(cx.result(
        test.statistic,
        test.p_value,
        Some(test.degrees_of_freedom),
        departed.len() + stayed.len(),
    ))
}

fn anova(
    store: &RecordStore,
    grouping: CategoricalAttribute,
    response: Response,
    cx: Context<'_>,
) -> Result<TestResult, TestError> {
    let mut groups = BTreeMap::<GroupValue, Vec<f64>>::new();
    for employee in store.employees() {
        let value = match response {
            Response::Attrition => Some(employee.attrition_indicator()),
            Response::Numeric(attribute) => attribute.value(employee),
        };
        if let (Some(key), Some(value)) = (grouping.value(employee), value) {
            groups.entry(key).or_default().push(value);
        }
    }

    if groups.len() < 2 {
        return Err(cx.insufficient(None, format!("{} group(s), need at least 2", groups.len())));
    }
    let min = cx.config.min_group_size();
    if let Some((key, sample)) = groups.iter().find(|(_, sample)| sample.len() < min) {
        return Err(cx.insufficient(
            Some(key.to_string()),
            format!("{} observations, need at least {min}", sample.len()),
        ));
    }

    let samples = groups.into_values().collect::<Vec<_>>();
    let response_name = response.attribute().to_string();
    let test = hypothesis::one_way_anova(&samples)
        .map_err(|err| cx.map_stats_error(err, ["", "", &response_name]))?;

    #[expect(clippy::cast_precision_loss)]
    let result = TestResult {
        denominator_degrees_of_freedom: Some(test.within_dof as f64),
        ..cx.result(
            test.statistic,
            test.p_value,
            Some(test.between_dof as f64),
            samples.iter().map(Vec::len).sum(),
        )
    };
    Ok(result)
}

fn correlation(store: &RecordStore, attribute: Attribute, cx: Context<'_>) -> Result<TestResult, TestError> {
    let employees = store.employees();
    if let Some(numeric) = attribute.as_numeric() {
        let (xs, ys): (Vec<f64>, Vec<f64>) = employees
            .iter()
            .filter_map(|e| Some((numeric.value(e)?, e.attrition_indicator())))
            .unzip();
        return pearson(&xs, &ys, [&attribute.to_string(), "attrition"], cx);
    }

    let categorical = attribute.as_categorical().ok_or_else(|| cx.unsupported())?;
    let observed = employees
        .iter()
        .filter_map(|e| Some((categorical.value(e)?, e.attrition_indicator())))
        .collect::<Vec<_>>();
    let levels = observed.iter().map(|(value, _)| value).collect::<BTreeSet<_>>();
    match levels.len() {
        2 => {}
        0 | 1 => return Err(cx.degenerate(attribute)),
        _ => return Err(cx.unsupported()),
    }
    let Some(&lower) = levels.first() else {
        unreachable!("two levels observed");
    };
    let xs = observed
        .iter()
        .map(|(value, _)| if value == lower { 0.0 } else { 1.0 })
        .collect::<Vec<_>>();
    let ys = observed.iter().map(|&(_, y)| y).collect::<Vec<_>>();
    pearson(&xs, &ys, [&attribute.to_string(), "attrition"], cx)
}

fn pearson(xs: &[f64], ys: &[f64], names: [&str; 2], cx: Context<'_>) -> Result<TestResult, TestError> {
    let correlation = hypothesis::pearson_correlation(xs, ys)
        .map_err(|err| cx.map_stats_error(err, [names[0], names[1], ""]))?;
    #[expect(clippy::cast_precision_loss)]
    let dof = correlation.degrees_of_freedom as f64;
    Ok(cx.result(correlation.coefficient, correlation.p_value, Some(dof), xs.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::{
        Employee,
        fixtures::{departed, employee},
    };

    fn config() -> TestConfig {
        TestConfig::default()
    }

    /// Overtime workers leave far more often: 40 of 50 vs. 5 of 50.
    fn overtime_store() -> RecordStore {
        let employees = (0..100)
            .map(|i| {
                let id = format!("E{i:03}");
                let overtime = i < 50;
                let left = if overtime { i < 40 } else { i >= 95 };
                let base = if left { departed(&id) } else { employee(&id) };
                Employee { overtime, ..base }
            })
            .collect();
        RecordStore::new(employees).unwrap()
    }

    #[test]
    fn test_chi_square_detects_association() {
        let store = overtime_store();
        let result = test_association(&store, Attribute::Overtime, TestKind::ChiSquare, &config()).unwrap();
        assert_eq!(result.degrees_of_freedom, Some(1.0));
        assert_eq!(result.sample_size, 100);
        assert_eq!(result.against, Attribute::Attrition);
        assert!(result.statistic > 40.0);
        assert!(result.significant);
    }

    #[test]
    fn test_chi_square_rejects_low_expected_counts() {
        let employees = vec![
            Employee { overtime: true, ..employee("A") },
            Employee { overtime: false, ..departed("B") },
            Employee { overtime: true, ..employee("C") },
            Employee { overtime: false, ..departed("D") },
        ];
        let store = RecordStore::new(employees).unwrap();
        let err = test_association(&store, Attribute::Overtime, TestKind::ChiSquare, &config()).unwrap_err();
        assert!(err.is_insufficient_data(), "{err}");

        let lenient = TestConfig {
            allow_low_counts: true,
            ..config()
        };
        assert!(test_association(&store, Attribute::Overtime, TestKind::ChiSquare, &lenient).is_ok());
    }

    #[test]
    fn test_chi_square_accepts_expected_count_at_minimum() {
        // 10 overtime, 10 not, 5 departures in each: every expected cell is 5
        let employees = (0..20)
            .map(|i| {
                let id = format!("E{i:02}");
                let base = if i % 2 == 0 { departed(&id) } else { employee(&id) };
                Employee { overtime: i < 10, ..base }
            })
            .collect();
        let store = RecordStore::new(employees).unwrap();
        let result = test_association(&store, Attribute::Overtime, TestKind::ChiSquare, &config()).unwrap();
        assert_eq!(result.sample_size, 20);

        let stricter = TestConfig {
            min_expected_count: 5.5,
            ..config()
        };
        let err = test_association(&store, Attribute::Overtime, TestKind::ChiSquare, &stricter).unwrap_err();
        assert!(err.is_insufficient_data(), "{err}");
    }

    #[test]
    fn test_chi_square_needs_two_categories() {
        let store = RecordStore::new(vec![employee("A"), departed("B")]).unwrap();
        let err = test_association(&store, Attribute::Department, TestKind::ChiSquare, &config()).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_welch_splits_by_attrition() {
        let employees = [1, 2, 2, 1, 2]
            .into_iter()
            .enumerate()
            .map(|(i, sat)| Employee {
                job_satisfaction: sat,
                ..departed(&format!("D{i}"))
            })
            .chain([4, 5, 4, 5, 3, 4].into_iter().enumerate().map(|(i, sat)| Employee {
                job_satisfaction: sat,
                ..employee(&format!("S{i}"))
            }))
            .collect();
        let store = RecordStore::new(employees).unwrap();
        let result = test_association(&store, Attribute::JobSatisfaction, TestKind::WelchT, &config()).unwrap();
        assert!(result.statistic < 0.0);
        assert!(result.p_value < 0.001);
        assert_eq!(result.sample_size, 11);
    }

    #[test]
    fn test_welch_minimum_group_size() {
        let store = RecordStore::new(vec![employee("A"), employee("B"), departed("C")]).unwrap();
        let err = test_association(&store, Attribute::Age, TestKind::WelchT, &config()).unwrap_err();
        match err {
            TestError::InsufficientData { group, .. } => assert_eq!(group.as_deref(), Some("departed")),
            _ => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn test_welch_accepts_two_per_group() {
        let employees = vec![
            Employee { job_satisfaction: 1, ..departed("A") },
            Employee { job_satisfaction: 2, ..departed("B") },
            Employee { job_satisfaction: 4, ..employee("C") },
            Employee { job_satisfaction: 5, ..employee("D") },
        ];
        let store = RecordStore::new(employees).unwrap();
        let result = test_association(&store, Attribute::JobSatisfaction, TestKind::WelchT, &config()).unwrap();
        assert_eq!(result.sample_size, 4);
        assert!(result.statistic < 0.0);
    }

    #[test]
    fn test_welch_degenerate_when_both_groups_constant() {
        let store = RecordStore::new(vec![employee("A"), employee("B"), departed("C"), departed("D")]).unwrap();
        let err = test_association(&store, Attribute::MonthlyIncome, TestKind::WelchT, &config()).unwrap_err();
        assert!(err.is_degenerate_input(), "{err}");
    }

    #[test]
    fn test_unsupported_combinations() {
        let store = overtime_store();
        for (attribute, kind) in [
            (Attribute::Department, TestKind::WelchT),
            (Attribute::MonthlyIncome, TestKind::ChiSquare),
            (Attribute::Age, TestKind::Anova(Response::Attrition)),
        ] {
            let err = test_association(&store, attribute, kind, &config()).unwrap_err();
            assert!(err.is_unsupported_attribute(), "{attribute} {kind}: {err}");
        }
    }

    #[test]
    fn test_anova_reports_both_dofs() {
        let departments = ["IT", "HR", "Sales"];
        let employees = (0..30)
            .map(|i| {
                let id = format!("E{i}");
                Employee {
                    department: departments[i % 3].to_owned(),
                    monthly_income: 3000.0 + 1000.0 * (i % 3) as f64 + (i / 3) as f64,
                    ..employee(&id)
                }
            })
            .collect();
        let store = RecordStore::new(employees).unwrap();
        let result = test_association(
            &store,
            Attribute::Department,
            TestKind::Anova(Response::Numeric(NumericAttribute::MonthlyIncome)),
            &config(),
        )
        .unwrap();
        assert_eq!(result.degrees_of_freedom, Some(2.0));
        assert_eq!(result.denominator_degrees_of_freedom, Some(27.0));
        assert_eq!(result.against, Attribute::MonthlyIncome);
        assert!(result.significant);

        // three departments cannot be coded as a 0/1 variable
        let err = test_association(&store, Attribute::Department, TestKind::Correlation, &config()).unwrap_err();
        assert!(err.is_unsupported_attribute());
    }

    #[test]
    fn test_anova_accepts_two_per_group() {
        let at = |id: &str, department: &str, sat| Employee {
            department: department.to_owned(),
            job_satisfaction: sat,
            ..employee(id)
        };
        let store = RecordStore::new(vec![at("A", "IT", 1), at("B", "IT", 2), at("C", "HR", 4), at("D", "HR", 5)]).unwrap();
        let result = test_association(
            &store,
            Attribute::Department,
            TestKind::Anova(Response::Numeric(NumericAttribute::JobSatisfaction)),
            &config(),
        )
        .unwrap();
        assert_eq!(result.sample_size, 4);
        assert_eq!(result.degrees_of_freedom, Some(1.0));
        assert_eq!(result.denominator_degrees_of_freedom, Some(2.0));
    }

    #[test]
    fn test_anova_small_group_is_named() {
        let employees = vec![
            employee("A"),
            employee("B"),
            Employee {
                department: "HR".to_owned(),
                ..departed("C")
            },
        ];
        let store = RecordStore::new(employees).unwrap();
        let err = test_association(
            &store,
            Attribute::Department,
            TestKind::Anova(Response::Attrition),
            &config(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "anova on department: insufficient data in group 'HR': 1 observations, need at least 2"
        );
    }

    #[test]
    fn test_point_biserial_correlation() {
        let store = overtime_store();
        let numeric = test_association(&store, Attribute::JobSatisfaction, TestKind::Correlation, &config());
        // every fixture has the same satisfaction
        assert!(numeric.unwrap_err().is_degenerate_input());

        let binary = test_association(&store, Attribute::Overtime, TestKind::Correlation, &config()).unwrap();
        assert!(binary.statistic > 0.5);
        assert_eq!(binary.degrees_of_freedom, Some(98.0));
    }

    #[test]
    fn test_correlate_two_numeric_attributes() {
        let employees = (0..10)
            .map(|i| Employee {
                age: 25 + i,
                monthly_income: 3000.0 + 250.0 * f64::from(i),
                ..employee(&format!("E{i}"))
            })
            .collect();
        let store = RecordStore::new(employees).unwrap();
        let result = correlate(&store, NumericAttribute::Age, NumericAttribute::MonthlyIncome, &config()).unwrap();
        assert!((result.statistic - 1.0).abs() < 1e-12);
        assert!(result.p_value < 1e-10);
        assert_eq!(result.against, Attribute::MonthlyIncome);
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        assert!(toml::from_str::<TestConfig>("alhpa = 0.01\n").is_err());
        let config: TestConfig = toml::from_str("alpha = 0.01\n").unwrap();
        assert_eq!(config.min_group_size, 2);
    }

    #[test]
    fn test_results_ignore_snapshot_order() {
        let store = overtime_store();
        let mut reversed = store.employees().to_vec();
        reversed.reverse();
        let reversed = RecordStore::new(reversed).unwrap();
        for kind in [TestKind::ChiSquare, TestKind::Anova(Response::Attrition)] {
            let a = test_association(&store, Attribute::Overtime, kind, &config()).unwrap();
            let b = test_association(&reversed, Attribute::Overtime, kind, &config()).unwrap();
            assert!((a.statistic - b.statistic).abs() < 1e-9);
            assert!((a.p_value - b.p_value).abs() < 1e-12);
        }
    }
}
