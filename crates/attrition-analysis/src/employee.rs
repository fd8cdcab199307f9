//! Employee records as produced by the cleaning pipeline.
//!
//! A snapshot is a JSON array of [`Employee`] objects:
//!
//! ```json
//! [
//!   {
//!     "employee_id": "EMP0001",
//!     "department": "IT",
//!     "job_role": "Analyst",
//!     "gender": "Female",
//!     "marital_status": "Single",
//!     "education_level": "Bachelor",
//!     "overtime": false,
//!     "attrition": true,
//!     "exit_reason": "Career Growth",
//!     "age": 29,
//!     "years_at_company": 2,
//!     "monthly_income": 4800.0,
//!     "job_satisfaction": 2,
//!     "work_life_balance": 3,
//!     "performance_rating": 4,
//!     "distance_from_home": 12.5
//!   }
//! ]
//! ```
//!
//! `exit_reason`, `performance_rating` and `distance_from_home` may be omitted.

use serde::{Deserialize, Serialize};

/// One employee, immutable once loaded into a [`RecordStore`](crate::store::RecordStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier within a snapshot
    pub employee_id: String,
    pub department: String,
    pub job_role: String,
    pub gender: String,
    pub marital_status: String,
    pub education_level: String,
    /// Whether the employee regularly works overtime
    pub overtime: bool,
    /// Whether the employee has left the organization
    pub attrition: bool,
    /// Primary exit reason; present exactly when `attrition` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_reason: Option<String>,
    /// Age in years (22–65)
    pub age: u32,
    /// Whole years at the company (0–40)
    pub years_at_company: u32,
    /// Monthly income, strictly positive
    pub monthly_income: f64,
    /// Job satisfaction survey score (1–5)
    pub job_satisfaction: u8,
    /// Work-life balance survey score (1–5)
    pub work_life_balance: u8,
    /// Latest performance rating (1–5), missing when no review was joined
    #[serde(default)]
    pub performance_rating: Option<u8>,
    /// Commute distance, non-negative
    #[serde(default)]
    pub distance_from_home: Option<f64>,
}

impl Employee {
    /// Returns `true` if the employee is still with the organization.
    #[must_use]
    pub fn is_current(&self) -> bool {
        !self.attrition
    }

    /// Returns the attrition outcome as a 0/1 indicator.
    #[must_use]
    pub fn attrition_indicator(&self) -> f64 {
        if self.attrition { 1.0 } else { 0.0 }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Employee;

    /// A valid current employee with neutral survey scores.
    pub(crate) fn employee(id: &str) -> Employee {
        Employee {
            employee_id: id.to_owned(),
            department: "IT".to_owned(),
            job_role: "Analyst".to_owned(),
            gender: "Female".to_owned(),
            marital_status: "Single".to_owned(),
            education_level: "Bachelor".to_owned(),
            overtime: false,
            attrition: false,
            exit_reason: None,
            age: 30,
            years_at_company: 5,
            monthly_income: 5000.0,
            job_satisfaction: 4,
            work_life_balance: 4,
            performance_rating: Some(3),
            distance_from_home: Some(10.0),
        }
    }

    /// A valid departed employee.
    pub(crate) fn departed(id: &str) -> Employee {
        Employee {
            attrition: true,
            exit_reason: Some("Career Growth".to_owned()),
            ..employee(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fixtures::employee, *};

    #[test]
    fn test_optional_fields_default_to_none() {
        let json = r#"{
            "employee_id": "E1",
            "department": "HR",
            "job_role": "Manager",
            "gender": "Male",
            "marital_status": "Married",
            "education_level": "Master",
            "overtime": true,
            "attrition": false,
            "age": 41,
            "years_at_company": 9,
            "monthly_income": 7200.0,
            "job_satisfaction": 3,
            "work_life_balance": 2
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.exit_reason, None);
        assert_eq!(employee.performance_rating, None);
        assert_eq!(employee.distance_from_home, None);
        assert!(employee.is_current());
    }

    #[test]
    fn test_attrition_indicator() {
        let mut e = employee("E1");
        assert_eq!(e.attrition_indicator(), 0.0);
        e.attrition = true;
        assert_eq!(e.attrition_indicator(), 1.0);
    }
}
