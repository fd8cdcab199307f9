//! Classical hypothesis tests on plain numeric samples.
//!
//! These kernels know nothing about employees or attributes; they take
//! contingency tables and value slices and return the test statistic, its
//! degrees of freedom and a p-value. Callers attach domain context to the
//! [`StatsError`] values they return.
//!
//! | test | function | null distribution |
//! |---|---|---|
//! | Pearson chi-square of independence | [`chi_square_independence`] | χ²((r-1)(c-1)) |
//! | Welch two-sample t-test | [`welch_t_test`] | t(Welch–Satterthwaite) |
//! | One-way ANOVA | [`one_way_anova`] | F(k-1, N-k) |
//! | Pearson correlation | [`pearson_correlation`] | t(n-2) |

use crate::{
    descriptive::{self, DescriptiveStats},
    distribution,
};

/// Errors returned by the hypothesis test kernels.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    /// The sample does not meet the minimum size the test is defined for.
    #[display("insufficient data: {detail}")]
    InsufficientData { detail: String },
    /// A variable has zero variance, so the statistic is undefined.
    #[display("variable {variable} has zero variance")]
    ZeroVariance { variable: Variable },
}

/// Identifies an input variable of a two-variable kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Variable {
    #[display("x")]
    X,
    #[display("y")]
    Y,
    /// The pooled within-group (or within-sample) spread.
    #[display("within-group")]
    Within,
}

impl StatsError {
    fn insufficient(detail: impl Into<String>) -> Self {
        Self::InsufficientData {
            detail: detail.into(),
        }
    }
}

/// Result of a Pearson chi-square test of independence.
#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquareTest {
    pub statistic: f64,
    pub degrees_of_freedom: usize,
    pub p_value: f64,
    /// Smallest expected cell count under independence.
    ///
    /// The usual validity rule requires this to be at least 5; the kernel
    /// reports it and leaves enforcement to the caller.
    pub min_expected: f64,
    /// Grand total of the table.
    pub total: f64,
}

/// Runs a Pearson chi-square test of independence on an `r × c` table of observed counts.
///
/// # Errors
///
/// Returns [`StatsError::InsufficientData`] when the table has fewer than two
/// rows or columns, or when any row or column sums to zero.
///
/// # Panics
///
/// Panics if the rows have different lengths.
///
/// # Examples
///
/// ```
/// # use attrition_stats::hypothesis::chi_square_independence;
/// let table = [vec![10.0, 20.0], vec![30.0, 40.0]];
/// let test = chi_square_independence(&table).unwrap();
/// assert_eq!(test.degrees_of_freedom, 1);
/// assert!((test.statistic - 0.793_650_793_650_793_6).abs() < 1e-12);
/// ```
pub fn chi_square_independence(observed: &[Vec<f64>]) -> Result<ChiSquareTest, StatsError> {
    let rows = observed.len();
    let cols = observed.first().map_or(0, Vec::len);
    assert!(
        observed.iter().all(|row| row.len() == cols),
        "contingency table rows must have equal length"
    );
    if rows < 2 || cols < 2 {
        return Err(StatsError::insufficient(format!(
            "contingency table is {rows}x{cols}, need at least 2x2"
        )));
    }

    let row_totals = observed.iter().map(|row| row.iter().sum()).collect::<Vec<f64>>();
    let col_totals = (0..cols)
        .map(|j| observed.iter().map(|row| row[j]).sum())
        .collect::<Vec<f64>>();
    let total = row_totals.iter().sum::<f64>();
    if row_totals.contains(&0.0) || col_totals.contains(&0.0) {
        return Err(StatsError::insufficient(
            "contingency table has an empty row or column",
        ));
    }

    let mut statistic = 0.0;
    let mut min_expected = f64::INFINITY;
    for (row, row_total) in observed.iter().zip(&row_totals) {
        for (count, col_total) in row.iter().zip(&col_totals) {
            let expected = row_total * col_total / total;
            min_expected = min_expected.min(expected);
            statistic += (count - expected).powi(2) / expected;
        }
    }

    let degrees_of_freedom = (rows - 1) * (cols - 1);
    #[expect(clippy::cast_precision_loss)]
    let p_value = distribution::chi_square_sf(statistic, degrees_of_freedom as f64);
    Ok(ChiSquareTest {
        statistic,
        degrees_of_freedom,
        p_value,
        min_expected,
        total,
    })
}

/// Result of Welch's unequal-variance two-sample t-test.
#[derive(Debug, Clone, PartialEq)]
pub struct WelchTTest {
    pub statistic: f64,
    /// Welch–Satterthwaite degrees of freedom (generally non-integer).
    pub degrees_of_freedom: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    /// `mean(a) - mean(b)`.
    pub mean_difference: f64,
}

/// Runs Welch's two-sample t-test of equal means without assuming equal variances.
///
/// # Errors
///
/// - [`StatsError::InsufficientData`] if either sample has fewer than two values.
/// - [`StatsError::ZeroVariance`] if both samples are constant.
///
/// # Examples
///
/// ```
/// # use attrition_stats::hypothesis::welch_t_test;
/// let test = welch_t_test(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0, 12.0]).unwrap();
/// assert!((test.statistic + 2.376_354_103_144_018).abs() < 1e-9);
/// assert!(test.p_value < 0.05);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<WelchTTest, StatsError> {
    if a.len() < 2 || b.len() < 2 {
        return Err(StatsError::insufficient(format!(
            "samples have {} and {} values, need at least 2 each",
            a.len(),
            b.len()
        )));
    }
    let (Some(stats_a), Some(stats_b)) = (
        DescriptiveStats::new(a.iter().copied()),
        DescriptiveStats::new(b.iter().copied()),
    ) else {
        unreachable!("samples are non-empty");
    };

    let se_a = stats_a.variance / a.len() as f64;
    let se_b = stats_b.variance / b.len() as f64;
    let se = se_a + se_b;
    if se == 0.0 {
        return Err(StatsError::ZeroVariance {
            variable: Variable::Within,
        });
    }

    let mean_difference = stats_a.mean - stats_b.mean;
    let statistic = mean_difference / se.sqrt();
    let degrees_of_freedom = se.powi(2)
        / (se_a.powi(2) / (a.len() - 1) as f64 + se_b.powi(2) / (b.len() - 1) as f64);
    let p_value = distribution::student_t_two_sided(statistic, degrees_of_freedom);

    Ok(WelchTTest {
        statistic,
        degrees_of_freedom,
        p_value,
        mean_difference,
    })
}

/// Result of a one-way analysis of variance.
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaTest {
    /// The F statistic.
    pub statistic: f64,
    /// `k - 1` for `k` groups.
    pub between_dof: usize,
    /// `N - k` for `N` observations.
    pub within_dof: usize,
    pub p_value: f64,
}

/// Runs a one-way ANOVA across `groups`.
///
/// # Errors
///
/// - [`StatsError::InsufficientData`] with fewer than two groups, an empty
///   group, or no residual degrees of freedom.
/// - [`StatsError::ZeroVariance`] when every group is constant.
///
/// # Examples
///
/// ```
/// # use attrition_stats::hypothesis::one_way_anova;
/// let groups: [&[f64]; 3] = [&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]];
/// let test = one_way_anova(&groups).unwrap();
/// assert!((test.statistic - 27.0).abs() < 1e-10);
/// assert!((test.p_value - 0.001).abs() < 1e-9);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn one_way_anova<G>(groups: &[G]) -> Result<AnovaTest, StatsError>
where
    G: AsRef<[f64]>,
{
    let k = groups.len();
    if k < 2 {
        return Err(StatsError::insufficient(format!(
            "{k} group(s), need at least 2"
        )));
    }
    if groups.iter().any(|g| g.as_ref().is_empty()) {
        return Err(StatsError::insufficient("a group has no observations"));
    }
    let n = groups.iter().map(|g| g.as_ref().len()).sum::<usize>();
    if n <= k {
        return Err(StatsError::insufficient(format!(
            "{n} observations across {k} groups leave no residual degrees of freedom"
        )));
    }

    let grand_mean = groups
        .iter()
        .flat_map(|g| g.as_ref().iter())
        .sum::<f64>()
        / n as f64;
    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in groups {
        let values = group.as_ref();
        let Some(group_mean) = descriptive::mean(values) else {
            unreachable!("groups are non-empty");
        };
        ss_between += values.len() as f64 * (group_mean - grand_mean).powi(2);
        ss_within += descriptive::sum_of_squared_deviations(values, group_mean);
    }
    if ss_within == 0.0 {
        return Err(StatsError::ZeroVariance {
            variable: Variable::Within,
        });
    }

    let between_dof = k - 1;
    let within_dof = n - k;
    let statistic = (ss_between / between_dof as f64) / (ss_within / within_dof as f64);
    let p_value = distribution::f_sf(statistic, between_dof as f64, within_dof as f64);
    Ok(AnovaTest {
        statistic,
        between_dof,
        within_dof,
        p_value,
    })
}

/// Result of a Pearson product-moment correlation.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    /// Correlation coefficient in `[-1, 1]`.
    pub coefficient: f64,
    /// `n - 2`.
    pub degrees_of_freedom: usize,
    /// Two-sided p-value of `H0: ρ = 0`.
    pub p_value: f64,
}

/// Computes the Pearson correlation between paired samples.
///
/// When one variable is a 0/1 indicator this is the point-biserial correlation.
///
/// # Errors
///
/// - [`StatsError::InsufficientData`] with fewer than three pairs.
/// - [`StatsError::ZeroVariance`] when either variable is constant.
///
/// # Panics
///
/// Panics if `x` and `y` have different lengths.
///
/// # Examples
///
/// ```
/// # use attrition_stats::hypothesis::pearson_correlation;
/// let r = pearson_correlation(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 5.0, 4.0, 5.0]).unwrap();
/// assert!((r.coefficient - 0.774_596_669_241_483_4).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<Correlation, StatsError> {
    assert_eq!(x.len(), y.len(), "paired samples must have equal length");
    let n = x.len();
    if n < 3 {
        return Err(StatsError::insufficient(format!(
            "{n} paired observations, need at least 3"
        )));
    }
    let (Some(mean_x), Some(mean_y)) = (descriptive::mean(x), descriptive::mean(y)) else {
        unreachable!("samples are non-empty");
    };
    let sxx = descriptive::sum_of_squared_deviations(x, mean_x);
    let syy = descriptive::sum_of_squared_deviations(y, mean_y);
    if sxx == 0.0 {
        return Err(StatsError::ZeroVariance {
            variable: Variable::X,
        });
    }
    if syy == 0.0 {
        return Err(StatsError::ZeroVariance {
            variable: Variable::Y,
        });
    }
    let sxy = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (xi - mean_x) * (yi - mean_y))
        .sum::<f64>();

    let coefficient = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    let degrees_of_freedom = n - 2;
    let df = degrees_of_freedom as f64;
    let p_value = if coefficient.abs() == 1.0 {
        0.0
    } else {
        let t = coefficient * (df / (1.0 - coefficient.powi(2))).sqrt();
        distribution::student_t_two_sided(t, df)
    };
    Ok(Correlation {
        coefficient,
        degrees_of_freedom,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chi_square_p_value() {
        let table = [vec![10.0, 20.0], vec![30.0, 40.0]];
        let test = chi_square_independence(&table).unwrap();
        assert!((test.p_value - 0.372_998_483_613_487).abs() < 1e-9);
        assert!((test.min_expected - 12.0).abs() < 1e-12);
        assert_eq!(test.total, 100.0);
    }

    #[test]
    fn test_chi_square_independent_table_is_zero() {
        let table = [vec![5.0, 10.0], vec![10.0, 20.0], vec![15.0, 30.0]];
        let test = chi_square_independence(&table).unwrap();
        assert_eq!(test.degrees_of_freedom, 2);
        assert!(test.statistic.abs() < 1e-12);
        assert!((test.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_chi_square_rejects_degenerate_tables() {
        assert!(matches!(
            chi_square_independence(&[vec![1.0, 2.0]]),
            Err(StatsError::InsufficientData { .. })
        ));
        assert!(matches!(
            chi_square_independence(&[vec![3.0, 0.0], vec![4.0, 0.0]]),
            Err(StatsError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_welch_degrees_of_freedom() {
        let test = welch_t_test(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0, 12.0])
            .unwrap();
        assert!((test.degrees_of_freedom - 6.972_255_729_794_934).abs() < 1e-9);
        assert!((test.p_value - 0.049_284_338_206_730_52).abs() < 1e-9);
        assert!((test.mean_difference + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_welch_small_and_constant_samples() {
        assert!(matches!(
            welch_t_test(&[1.0], &[1.0, 2.0]),
            Err(StatsError::InsufficientData { .. })
        ));
        assert_eq!(
            welch_t_test(&[2.0, 2.0], &[3.0, 3.0, 3.0]),
            Err(StatsError::ZeroVariance {
                variable: Variable::Within
            })
        );
        // One constant group is still a valid test
        assert!(welch_t_test(&[2.0, 2.0, 2.0], &[1.0, 3.0, 5.0]).is_ok());
    }

    #[test]
    fn test_anova_is_order_independent() {
        let a: [&[f64]; 3] = [&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.5]];
        let b: [&[f64]; 3] = [&[9.5, 8.0, 7.0], &[3.0, 1.0, 2.0], &[6.0, 4.0, 5.0]];
        let ta = one_way_anova(&a).unwrap();
        let tb = one_way_anova(&b).unwrap();
        assert!((ta.statistic - tb.statistic).abs() < 1e-9);
        assert_eq!((ta.between_dof, ta.within_dof), (2, 6));
    }

    #[test]
    fn test_anova_errors() {
        let single: [&[f64]; 1] = [&[1.0, 2.0]];
        assert!(matches!(
            one_way_anova(&single),
            Err(StatsError::InsufficientData { .. })
        ));
        let no_residual: [&[f64]; 2] = [&[1.0], &[2.0]];
        assert!(matches!(
            one_way_anova(&no_residual),
            Err(StatsError::InsufficientData { .. })
        ));
        let constant: [&[f64]; 2] = [&[1.0, 1.0], &[2.0, 2.0]];
        assert!(matches!(
            one_way_anova(&constant),
            Err(StatsError::ZeroVariance { .. })
        ));
    }

    #[test]
    fn test_pearson_p_value() {
        let r = pearson_correlation(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 5.0, 4.0, 5.0]).unwrap();
        assert_eq!(r.degrees_of_freedom, 3);
        assert!((r.p_value - 0.124_027_062_657_554_6).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_perfect_and_degenerate() {
        let r = pearson_correlation(&[1.0, 2.0, 3.0], &[6.0, 4.0, 2.0]).unwrap();
        assert!((r.coefficient + 1.0).abs() < 1e-12);
        assert_eq!(r.p_value, 0.0);

        assert_eq!(
            pearson_correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]),
            Err(StatsError::ZeroVariance {
                variable: Variable::X
            })
        );
        assert_eq!(
            pearson_correlation(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]),
            Err(StatsError::ZeroVariance {
                variable: Variable::Y
            })
        );
    }
}
