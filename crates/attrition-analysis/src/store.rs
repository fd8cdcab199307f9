//! Validated, read-only employee snapshot.
//!
//! [`RecordStore`] is the single owner of the employee collection for an
//! analysis run. Every analysis takes it by shared reference, so one store can
//! be analyzed from several threads at once.
//!
//! Construction validates the whole snapshot and rejects it on the first
//! violating row; rows are never silently dropped or coerced.

use std::{collections::HashMap, ops::RangeInclusive};

use crate::employee::Employee;

/// Valid age range in years.
pub const AGE_RANGE: RangeInclusive<u32> = 22..=65;
/// Valid tenure range in whole years.
pub const TENURE_RANGE: RangeInclusive<u32> = 0..=40;
/// Valid range of survey scores and performance ratings.
pub const RATING_RANGE: RangeInclusive<u8> = 1..=5;

/// A row of the snapshot violates the record invariants.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid record at row {row} (employee '{employee_id}'): {field} {reason}")]
pub struct InvalidRecordError {
    /// Zero-based position of the row in the snapshot
    pub row: usize,
    pub employee_id: String,
    /// Name of the offending field
    pub field: &'static str,
    pub reason: String,
}

/// Immutable collection of validated employees.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    employees: Vec<Employee>,
    index: HashMap<String, usize>,
}

impl RecordStore {
    /// Validates `employees` and builds the store.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRecordError`] for the first row that has an empty or
    /// duplicate id, an out-of-range field, or an exit reason inconsistent
    /// with its attrition flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use attrition_analysis::{employee::Employee, store::RecordStore};
    ///
    /// let employees: Vec<Employee> = serde_json::from_str(r#"[{
    ///     "employee_id": "E1", "department": "IT", "job_role": "Analyst",
    ///     "gender": "Female", "marital_status": "Single", "education_level": "Bachelor",
    ///     "overtime": false, "attrition": false, "age": 30, "years_at_company": 2,
    ///     "monthly_income": 4200.0, "job_satisfaction": 4, "work_life_balance": 3
    /// }]"#).unwrap();
    /// let store = RecordStore::new(employees).unwrap();
    /// assert_eq!(store.len(), 1);
    /// assert!(store.get("E1").is_some());
    /// ```
    pub fn new(employees: Vec<Employee>) -> Result<Self, InvalidRecordError> {
        let mut index = HashMap::with_capacity(employees.len());
        for (row, employee) in employees.iter().enumerate() {
            validate(row, employee)?;
            if index.insert(employee.employee_id.clone(), row).is_some() {
                return Err(invalid(row, employee, "employee_id", "is not unique"));
            }
        }
        tracing::debug!(records = employees.len(), "validated employee snapshot");
        Ok(Self { employees, index })
    }

    /// All employees in snapshot order.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Looks up an employee by id.
    #[must_use]
    pub fn get(&self, employee_id: &str) -> Option<&Employee> {
        self.index.get(employee_id).map(|&i| &self.employees[i])
    }

    /// Employees still with the organization, in snapshot order.
    pub fn current(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter().filter(|e| e.is_current())
    }

    /// Employees who have left, in snapshot order.
    pub fn departed(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter().filter(|e| e.attrition)
    }
}

fn invalid(row: usize, employee: &Employee, field: &'static str, reason: impl Into<String>) -> InvalidRecordError {
    InvalidRecordError {
        row,
        employee_id: employee.employee_id.clone(),
        field,
        reason: reason.into(),
    }
}

fn validate(row: usize, e: &Employee) -> Result<(), InvalidRecordError> {
    if e.employee_id.trim().is_empty() {
        return Err(invalid(row, e, "employee_id", "is empty"));
    }
    if !AGE_RANGE.contains(&e.age) {
        return Err(invalid(row, e, "age", format!("{} is outside {AGE_RANGE:?}", e.age)));
    }
    if !TENURE_RANGE.contains(&e.years_at_company) {
        return Err(invalid(
            row,
            e,
            "years_at_company",
            format!("{} is outside {TENURE_RANGE:?}", e.years_at_company),
        ));
    }
    if !(e.monthly_income.is_finite() && e.monthly_income > 0.0) {
        return Err(invalid(
            row,
            e,
            "monthly_income",
            format!("{} is not a positive amount", e.monthly_income),
        ));
    }
    let ratings = [
        ("job_satisfaction", Some(e.job_satisfaction)),
        ("work_life_balance", Some(e.work_life_balance)),
        ("performance_rating", e.performance_rating),
    ];
    for (field, value) in ratings {
        if let Some(value) = value
            && !RATING_RANGE.contains(&value)
        {
            return Err(invalid(row, e, field, format!("{value} is outside {RATING_RANGE:?}")));
        }
    }
    if let Some(distance) = e.distance_from_home
        && !(distance.is_finite() && distance >= 0.0)
    {
        return Err(invalid(
            row,
            e,
            "distance_from_home",
            format!("{distance} is not a non-negative distance"),
        ));
    }
    match (e.attrition, &e.exit_reason) {
        (true, None) => Err(invalid(row, e, "exit_reason", "is missing for a departed employee")),
        (false, Some(_)) => Err(invalid(row, e, "exit_reason", "is set for a current employee")),
        _ => Ok(()),
    }
}
