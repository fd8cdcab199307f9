//! Deterministic attrition risk scoring for current employees.
//!
//! The score is driven by a rule table ([`DEFAULT_RULES`]) rather than inline
//! conditionals. Each rule awards points when one [`RiskFactor`] falls in an
//! inclusive range. Within a factor only the highest-scoring matching rule
//! counts; factors add up, and the total is capped at [`MAX_SCORE`].
//!
//! | factor | condition | points |
//! |---|---|---|
//! | job satisfaction | ≤ 2 | 30 |
//! | job satisfaction | = 3 | 15 |
//! | work-life balance | ≤ 2 | 25 |
//! | work-life balance | = 3 | 12 |
//! | tenure | < 1 year | 15 |
//! | tenure | 1–3 years | 25 |
//! | performance | ≥ 4 | 20 |

use attrition_stats::descriptive;
use serde::Serialize;

use crate::{aggregate, employee::Employee, store::RecordStore};

pub const MAX_SCORE: u32 = 100;
pub const DEFAULT_THRESHOLD: u32 = 60;

/// Mean score at or above which a department is [`RiskLevel::High`].
pub const HIGH_DEPARTMENT_RISK: f64 = 40.0;
/// Mean score at or above which a department is [`RiskLevel::Medium`].
pub const MEDIUM_DEPARTMENT_RISK: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    JobSatisfaction,
    WorkLifeBalance,
    Tenure,
    Performance,
}

impl RiskFactor {
    /// Value of the factor for `employee`, `None` if unknown.
    #[must_use]
    pub fn value(self, employee: &Employee) -> Option<u32> {
        match self {
            Self::JobSatisfaction => Some(employee.job_satisfaction.into()),
            Self::WorkLifeBalance => Some(employee.work_life_balance.into()),
            Self::Tenure => Some(employee.years_at_company),
            Self::Performance => employee.performance_rating.map(u32::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskRule {
    pub factor: RiskFactor,
    /// Inclusive lower bound of the factor value.
    pub min: u32,
    /// Inclusive upper bound of the factor value.
    pub max: u32,
    pub points: u32,
    /// Human-readable condition, reported in triggers.
    pub condition: &'static str,
}

impl RiskRule {
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        self.factor
            .value(employee)
            .is_some_and(|value| (self.min..=self.max).contains(&value))
    }
}

pub const DEFAULT_RULES: [RiskRule; 7] = [
    RiskRule {
        factor: RiskFactor::JobSatisfaction,
        min: 0,
        max: 2,
        points: 30,
        condition: "job_satisfaction <= 2",
    },
    RiskRule {
        factor: RiskFactor::JobSatisfaction,
        min: 3,
        max: 3,
        points: 15,
        condition: "job_satisfaction == 3",
    },
    RiskRule {
        factor: RiskFactor::WorkLifeBalance,
        min: 0,
        max: 2,
        points: 25,
        condition: "work_life_balance <= 2",
    },
    RiskRule {
        factor: RiskFactor::WorkLifeBalance,
        min: 3,
        max: 3,
        points: 12,
        condition: "work_life_balance == 3",
    },
    RiskRule {
        factor: RiskFactor::Tenure,
        min: 0,
        max: 0,
        points: 15,
        condition: "years_at_company < 1",
    },
    RiskRule {
        factor: RiskFactor::Tenure,
        min: 1,
        max: 3,
        points: 25,
        condition: "1 <= years_at_company <= 3",
    },
    RiskRule {
        factor: RiskFactor::Performance,
        min: 4,
        max: u32::MAX,
        points: 20,
        condition: "performance_rating >= 4",
    },
];

/// A rule that contributed to a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskTrigger {
    pub factor: RiskFactor,
    pub condition: &'static str,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskScore {
    /// Capped total in `0..=100`.
    pub score: u32,
    /// Contributing rules, one per factor, in rule-table order.
    pub triggers: Vec<RiskTrigger>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("employee '{employee_id}' has left the organization and cannot be risk-scored")]
pub struct InvalidStateError {
    pub employee_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighRiskEmployee {
    pub employee_id: String,
    pub department: String,
    pub performance_rating: Option<u8>,
    #[serde(flatten)]
    pub risk: RiskScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    #[must_use]
    pub fn from_mean_score(mean_score: f64) -> Self {
        if mean_score >= HIGH_DEPARTMENT_RISK {
            Self::High
        } else if mean_score >= MEDIUM_DEPARTMENT_RISK {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Risk profile of the current staff of one department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentRisk {
    pub department: String,
    pub headcount: usize,
    pub mean_risk_score: f64,
    pub mean_job_satisfaction: f64,
    pub mean_work_life_balance: f64,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskScorer {
    rules: Vec<RiskRule>,
    threshold: u32,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl RiskScorer {
    /// A scorer over [`DEFAULT_RULES`] flagging scores at or above `threshold`.
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self {
            rules: DEFAULT_RULES.to_vec(),
            threshold,
        }
    }

    #[must_use]
    pub fn with_rules(rules: Vec<RiskRule>, threshold: u32) -> Self {
        Self { rules, threshold }
    }

    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Scores a current employee.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError`] if the employee has already left.
    ///
    /// # Examples
    ///
    /// ```
    /// # use attrition_analysis::{employee::Employee, risk::RiskScorer};
    /// # let json = r#"{"employee_id": "A", "department": "IT", "job_role": "Analyst",
    /// #   "gender": "Male", "marital_status": "Single", "education_level": "Bachelor",
    /// #   "overtime": false, "attrition": false, "age": 28, "years_at_company": 2,
    /// #   "monthly_income": 4000.0, "job_satisfaction": 1, "work_life_balance": 4,
    /// #   "performance_rating": 5}"#;
    /// let employee: Employee = serde_json::from_str(json).unwrap();
    /// let risk = RiskScorer::default().score(&employee).unwrap();
    /// assert_eq!(risk.score, 75);
    /// assert_eq!(risk.triggers.len(), 3);
    /// ```
    pub fn score(&self, employee: &Employee) -> Result<RiskScore, InvalidStateError> {
        if employee.attrition {
            return Err(InvalidStateError {
                employee_id: employee.employee_id.clone(),
            });
        }
        Ok(self.tally(employee))
    }

    fn tally(&self, employee: &Employee) -> RiskScore {
        let mut best: Vec<&RiskRule> = vec![];
        for rule in self.rules.iter().filter(|rule| rule.matches(employee)) {
            match best.iter_mut().find(|chosen| chosen.factor == rule.factor) {
                Some(chosen) if chosen.points < rule.points => *chosen = rule,
                Some(_) => {}
                None => best.push(rule),
            }
        }
        let total = best.iter().map(|rule| rule.points).sum::<u32>();
        RiskScore {
            score: total.min(MAX_SCORE),
            triggers: best
                .into_iter()
                .map(|rule| RiskTrigger {
                    factor: rule.factor,
                    condition: rule.condition,
                    points: rule.points,
                })
                .collect(),
        }
    }

    /// Current employees scoring at or above the threshold.
    ///
    /// Sorted by score descending, then performance rating descending (unrated
    /// last), then employee id ascending.
    #[must_use]
    pub fn high_risk(&self, store: &RecordStore) -> Vec<HighRiskEmployee> {
        let mut flagged = store
            .current()
            .map(|employee| (employee, self.tally(employee)))
            .filter(|(_, risk)| risk.score >= self.threshold)
            .map(|(employee, risk)| HighRiskEmployee {
                employee_id: employee.employee_id.clone(),
                department: employee.department.clone(),
                performance_rating: employee.performance_rating,
                risk,
            })
            .collect::<Vec<_>>();
        flagged.sort_by(|a, b| {
            b.risk
                .score
                .cmp(&a.risk.score)
                .then_with(|| b.performance_rating.cmp(&a.performance_rating))
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
        tracing::info!(
            threshold = self.threshold,
            flagged = flagged.len(),
            "identified high-risk employees"
        );
        flagged
    }

    /// Risk profile per department over current employees, highest mean
    /// score first (ties keep first-seen order).
    #[must_use]
    pub fn department_risk(&self, store: &RecordStore) -> Vec<DepartmentRisk> {
        let departments = aggregate::partition(store.current(), |e| Some(e.department.clone()));
        let mut summaries = departments
            .into_iter()
            .map(|(department, members)| {
                let mean_of = |f: &dyn Fn(&Employee) -> f64| {
                    let values = members.iter().map(|&e| f(e)).collect::<Vec<_>>();
                    descriptive::mean(&values).unwrap_or_default()
                };
                let mean_risk_score = mean_of(&|e| f64::from(self.tally(e).score));
                DepartmentRisk {
                    department,
                    headcount: members.len(),
                    mean_risk_score,
                    mean_job_satisfaction: mean_of(&|e| f64::from(e.job_satisfaction)),
                    mean_work_life_balance: mean_of(&|e| f64::from(e.work_life_balance)),
                    level: RiskLevel::from_mean_score(mean_risk_score),
                }
            })
            .collect::<Vec<_>>();
        summaries.sort_by(|a, b| b.mean_risk_score.total_cmp(&a.mean_risk_score));
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::fixtures::{departed, employee};

    fn scenario_a() -> Employee {
        Employee {
            job_satisfaction: 1,
            years_at_company: 2,
            performance_rating: Some(5),
            ..employee("A")
        }
    }

    fn scenario_b() -> Employee {
        Employee {
            job_satisfaction: 3,
            years_at_company: 1,
            performance_rating: Some(3),
            ..employee("B")
        }
    }

    #[test]
    fn test_scenario_scores() {
        let scorer = RiskScorer::default();
        assert_eq!(scorer.score(&scenario_a()).unwrap().score, 75);
        let b = scorer.score(&scenario_b()).unwrap();
        assert_eq!(b.score, 40);
        assert_eq!(
            b.triggers.iter().map(|t| t.condition).collect::<Vec<_>>(),
            ["job_satisfaction == 3", "1 <= years_at_company <= 3"]
        );

        let store = RecordStore::new(vec![scenario_b(), scenario_a()]).unwrap();
        let flagged = scorer.high_risk(&store);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].employee_id, "A");
    }

    #[test]
    fn test_neutral_employee_scores_zero() {
        let risk = RiskScorer::default().score(&employee("A")).unwrap();
        assert_eq!(risk.score, 0);
        assert!(risk.triggers.is_empty());
    }

    #[test]
    fn test_departed_employee_is_invalid_state() {
        let err = RiskScorer::default().score(&departed("Z")).unwrap_err();
        assert_eq!(err.employee_id, "Z");
    }

    #[test]
    fn test_missing_rating_triggers_nothing() {
        let e = Employee {
            performance_rating: None,
            ..scenario_a()
        };
        assert_eq!(RiskScorer::default().score(&e).unwrap().score, 55);
    }

    #[test]
    fn test_worst_case_reaches_maximum() {
        let e = Employee {
            job_satisfaction: 1,
            work_life_balance: 1,
            years_at_company: 3,
            performance_rating: Some(4),
            ..employee("A")
        };
        assert_eq!(RiskScorer::default().score(&e).unwrap().score, MAX_SCORE);
    }

    #[test]
    fn test_highest_tier_per_factor_and_cap() {
        let rule = |min, max, points| RiskRule {
            factor: RiskFactor::Tenure,
            min,
            max,
            points,
            condition: "tenure",
        };
        let scorer = RiskScorer::with_rules(vec![rule(0, 10, 10), rule(5, 5, 70), rule(0, 40, 50)], 0);
        let risk = scorer.score(&employee("A")).unwrap();
        assert_eq!(risk.score, 70);
        assert_eq!(risk.triggers.len(), 1);

        let mut rules = DEFAULT_RULES.to_vec();
        rules.push(RiskRule {
            factor: RiskFactor::Performance,
            min: 0,
            max: 5,
            points: 90,
            condition: "any rating",
        });
        let scorer = RiskScorer::with_rules(rules, 60);
        assert_eq!(scorer.score(&scenario_a()).unwrap().score, MAX_SCORE);
    }

    #[test]
    fn test_high_risk_ordering() {
        let at = |id: &str, perf| Employee {
            job_satisfaction: 1,
            work_life_balance: 3,
            years_at_company: 2,
            performance_rating: perf,
            ..employee(id)
        };
        let store = RecordStore::new(vec![
            at("D", None),
            at("C", Some(3)),
            at("B", Some(3)),
            at("E", Some(4)),
            departed("X"),
        ])
        .unwrap();
        let ids = RiskScorer::default()
            .high_risk(&store)
            .into_iter()
            .map(|e| e.employee_id)
            .collect::<Vec<_>>();
        assert_eq!(ids, ["E", "B", "C", "D"]);
    }

    #[test]
    fn test_department_risk_levels() {
        let store = RecordStore::new(vec![
            Employee {
                department: "HR".to_owned(),
                ..employee("H")
            },
            Employee {
                department: "Sales".to_owned(),
                ..scenario_b()
            },
            Employee {
                department: "Sales".to_owned(),
                ..scenario_a()
            },
            Employee {
                department: "Sales".to_owned(),
                ..departed("C")
            },
        ])
        .unwrap();
        let summaries = RiskScorer::default().department_risk(&store);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].department, "Sales");
        assert_eq!(summaries[0].headcount, 2);
        assert_eq!(summaries[0].mean_risk_score, 57.5);
        assert_eq!(summaries[0].level, RiskLevel::High);
        assert_eq!(summaries[1].level, RiskLevel::Low);
        assert_eq!(RiskLevel::from_mean_score(25.0), RiskLevel::Medium);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // 30 (satisfaction) + 25 (tenure), no rating
        let e = Employee {
            performance_rating: None,
            ..scenario_a()
        };
        let store = RecordStore::new(vec![e]).unwrap();
        assert_eq!(RiskScorer::new(55).high_risk(&store).len(), 1);
        assert!(RiskScorer::new(56).high_risk(&store).is_empty());
    }
}
