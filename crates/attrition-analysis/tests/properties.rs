//! Property-based tests over arbitrary valid snapshots.
//!
//! Properties covered:
//! 1. Partitions are exhaustive and attrition rates stay in [0, 1]
//! 2. Risk scores stay in [0, 100] and depend only on the employee
//! 3. The survival curve is non-increasing
//! 4. Chi-square results do not depend on snapshot order

use attrition_analysis::{
    aggregate::{GroupOrder, Metric, aggregate},
    association::{TestConfig, TestKind, test_association},
    attribute::{Attribute, CategoricalAttribute, NumericAttribute},
    employee::Employee,
    risk::{MAX_SCORE, RiskScorer},
    store::RecordStore,
    survival::survival_curve,
};
use proptest::prelude::*;

const DEPARTMENTS: [&str; 4] = ["IT", "HR", "Sales", "Finance"];

prop_compose! {
    fn arb_employee()(
        department in prop::sample::select(DEPARTMENTS.to_vec()),
        overtime in any::<bool>(),
        attrition in any::<bool>(),
        age in 22u32..=65,
        years_at_company in 0u32..=40,
        monthly_income in 2500.0f64..15_000.0,
        job_satisfaction in 1u8..=5,
        work_life_balance in 1u8..=5,
        performance_rating in prop::option::of(1u8..=5),
        distance_from_home in prop::option::of(0.0f64..50.0),
    ) -> Employee {
        Employee {
            employee_id: String::new(),
            department: department.to_owned(),
            job_role: "Analyst".to_owned(),
            gender: "Female".to_owned(),
            marital_status: "Single".to_owned(),
            education_level: "Bachelor".to_owned(),
            overtime,
            attrition,
            exit_reason: attrition.then(|| "Compensation".to_owned()),
            age,
            years_at_company,
            monthly_income,
            job_satisfaction,
            work_life_balance,
            performance_rating,
            distance_from_home,
        }
    }
}

fn arb_store(max_len: usize) -> impl Strategy<Value = RecordStore> {
    prop::collection::vec(arb_employee(), 0..max_len).prop_map(|employees| {
        let employees = employees
            .into_iter()
            .enumerate()
            .map(|(i, e)| Employee {
                employee_id: format!("E{i}"),
                ..e
            })
            .collect();
        RecordStore::new(employees).expect("generated employees are valid")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_partitions_are_exhaustive(store in arb_store(60)) {
        for group_by in [
            vec![CategoricalAttribute::Department],
            vec![CategoricalAttribute::AgeBand, CategoricalAttribute::Overtime],
            vec![CategoricalAttribute::TenureBand, CategoricalAttribute::SalaryBand],
        ] {
            let rows = aggregate(
                &store,
                &group_by,
                &[Metric::Mean(NumericAttribute::MonthlyIncome)],
                GroupOrder::AttritionRateDescending,
            );
            let total = rows.iter().map(|row| row.metrics.total).sum::<usize>();
            prop_assert_eq!(total, store.len());
            for row in &rows {
                let rate = row.metrics.attrition_rate.unwrap();
                prop_assert!((0.0..=1.0).contains(&rate));
                prop_assert!(row.metrics.departed <= row.metrics.total);
            }
            for pair in rows.windows(2) {
                prop_assert!(pair[0].metrics.attrition_rate >= pair[1].metrics.attrition_rate);
            }
        }
    }

    #[test]
    fn prop_risk_scores_are_bounded_and_deterministic(employee in arb_employee()) {
        let scorer = RiskScorer::default();
        let result = scorer.score(&employee);
        if employee.attrition {
            prop_assert!(result.is_err());
        } else {
            let risk = result.unwrap();
            prop_assert!(risk.score <= MAX_SCORE);
            prop_assert_eq!(scorer.score(&employee).unwrap(), risk);
        }
    }

    #[test]
    fn prop_survival_is_non_increasing(store in arb_store(60), max_tenure in 0u32..45) {
        let points = survival_curve(&store, max_tenure);
        prop_assert_eq!(points.len(), max_tenure as usize + 1);
        prop_assert_eq!(points[0].surviving_at_or_above, store.current().count());
        prop_assert!(points[0].dropoff.is_none());
        for pair in points.windows(2) {
            prop_assert!(pair[0].surviving_at_or_above >= pair[1].surviving_at_or_above);
            prop_assert_eq!(
                pair[1].dropoff,
                Some(pair[0].surviving_at_or_above - pair[1].surviving_at_or_above)
            );
        }
    }

    #[test]
    fn prop_chi_square_ignores_order(store in arb_store(80)) {
        let config = TestConfig { allow_low_counts: true, ..TestConfig::default() };
        let mut reversed = store.employees().to_vec();
        reversed.reverse();
        let reversed = RecordStore::new(reversed).unwrap();

        let forward = test_association(&store, Attribute::Department, TestKind::ChiSquare, &config);
        let backward = test_association(&reversed, Attribute::Department, TestKind::ChiSquare, &config);
        match (forward, backward) {
            (Ok(a), Ok(b)) => {
                prop_assert!((a.statistic - b.statistic).abs() < 1e-9);
                prop_assert_eq!(a.sample_size, b.sample_size);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "results differ: {:?} vs {:?}", a, b),
        }
    }
}
