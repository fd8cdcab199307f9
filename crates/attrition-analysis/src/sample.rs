//! Synthetic employee snapshots for demos and tests.
//!
//! Field distributions:
//!
//! | field | distribution |
//! |---|---|
//! | department | uniform over [`DEPARTMENTS`] |
//! | age | N(35, 8), truncated to whole years, clipped to 22–65 |
//! | years at company | Exp(mean 3), truncated, clipped to 0–40 |
//! | monthly income | N(5500, 1500), clipped to 2500–15000 |
//! | satisfaction, work-life balance | uniform 1–5 |
//! | performance rating | 2, 3, 4, 5 with p = 0.1, 0.3, 0.4, 0.2 |
//! | attrition | p = 0.18 |
//! | distance from home | Exp(mean 12), clipped to 1–50 |
//! | overtime | p = 0.3 |
//!
//! Every generated snapshot passes [`RecordStore`](crate::store::RecordStore)
//! validation. Use a seeded generator (e.g. `rand_pcg::Pcg32`) for
//! reproducible output.

use rand::Rng;
use rand_distr::{Exp1, StandardNormal};

use crate::employee::Employee;

pub const DEPARTMENTS: [&str; 6] = ["IT", "Sales", "Marketing", "Finance", "HR", "Operations"];
pub const JOB_ROLES: [&str; 5] = ["Analyst", "Engineer", "Specialist", "Coordinator", "Manager"];
pub const GENDERS: [&str; 2] = ["Male", "Female"];
pub const MARITAL_STATUSES: [&str; 3] = ["Single", "Married", "Divorced"];
pub const EDUCATION_LEVELS: [&str; 4] = ["High School", "Bachelor", "Master", "PhD"];
pub const EXIT_REASONS: [&str; 6] = [
    "Career Growth",
    "Compensation",
    "Work-Life Balance",
    "Management",
    "Relocation",
    "Personal",
];

const PERFORMANCE_RATINGS: [(u8, f64); 4] = [(2, 0.1), (3, 0.3), (4, 0.4), (5, 0.2)];
const ATTRITION_PROBABILITY: f64 = 0.18;
const OVERTIME_PROBABILITY: f64 = 0.3;

/// Generates `count` employees with ids `EMP0001`, `EMP0002`, ...
///
/// # Examples
///
/// ```
/// use attrition_analysis::{sample, store::RecordStore};
/// use rand::SeedableRng as _;
///
/// let mut rng = rand_pcg::Pcg32::seed_from_u64(42);
/// let employees = sample::generate(&mut rng, 100);
/// assert_eq!(employees[0].employee_id, "EMP0001");
/// assert!(RecordStore::new(employees).is_ok());
/// ```
pub fn generate<R>(rng: &mut R, count: usize) -> Vec<Employee>
where
    R: Rng + ?Sized,
{
    let employees = (1..=count).map(|i| generate_one(rng, i)).collect::<Vec<_>>();
    tracing::debug!(count, "generated synthetic employees");
    employees
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn generate_one<R>(rng: &mut R, index: usize) -> Employee
where
    R: Rng + ?Sized,
{
    let attrition = rng.random_bool(ATTRITION_PROBABILITY);
    let age = normal(rng, 35.0, 8.0).trunc().clamp(22.0, 65.0) as u32;
    let years_at_company = exponential(rng, 3.0).trunc().clamp(0.0, 40.0) as u32;
    let monthly_income = normal(rng, 5500.0, 1500.0).clamp(2500.0, 15_000.0).round();
    let distance_from_home = (exponential(rng, 12.0).clamp(1.0, 50.0) * 10.0).round() / 10.0;

    Employee {
        employee_id: format!("EMP{index:04}"),
        department: pick(rng, &DEPARTMENTS).to_owned(),
        job_role: pick(rng, &JOB_ROLES).to_owned(),
        gender: pick(rng, &GENDERS).to_owned(),
        marital_status: pick(rng, &MARITAL_STATUSES).to_owned(),
        education_level: pick(rng, &EDUCATION_LEVELS).to_owned(),
        overtime: rng.random_bool(OVERTIME_PROBABILITY),
        attrition,
        exit_reason: attrition.then(|| pick(rng, &EXIT_REASONS).to_owned()),
        age,
        years_at_company,
        monthly_income,
        job_satisfaction: rng.random_range(1..=5),
        work_life_balance: rng.random_range(1..=5),
        performance_rating: Some(weighted(rng, &PERFORMANCE_RATINGS)),
        distance_from_home: Some(distance_from_home),
    }
}

fn normal<R>(rng: &mut R, mean: f64, std_dev: f64) -> f64
where
    R: Rng + ?Sized,
{
    let z: f64 = rng.sample(StandardNormal);
    mean + std_dev * z
}

fn exponential<R>(rng: &mut R, mean: f64) -> f64
where
    R: Rng + ?Sized,
{
    let e: f64 = rng.sample(Exp1);
    mean * e
}

fn pick<'a, R>(rng: &mut R, choices: &[&'a str]) -> &'a str
where
    R: Rng + ?Sized,
{
    choices[rng.random_range(0..choices.len())]
}

/// Draws a value from `(value, probability)` pairs whose probabilities sum to 1.
fn weighted<R, T>(rng: &mut R, choices: &[(T, f64)]) -> T
where
    R: Rng + ?Sized,
    T: Copy,
{
    let mut u = rng.random::<f64>();
    for &(value, p) in choices {
        if u < p {
            return value;
        }
        u -= p;
    }
    choices[choices.len() - 1].0
}
