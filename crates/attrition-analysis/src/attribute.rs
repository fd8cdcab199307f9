//! Attribute selectors shared by every analysis.
//!
//! [`Attribute`] names every field (and derived band) that an analysis can
//! refer to. Depending on its role an attribute is read either as a number
//! ([`NumericAttribute`]) or as a category ([`CategoricalAttribute`]); ordinal
//! survey scores can be read both ways:
//!
//! | attribute | numeric | categorical |
//! |---|---|---|
//! | `department`, `job_role`, `gender`, `marital_status`, `education_level` | | ✓ |
//! | `overtime`, `attrition`, `exit_reason` | | ✓ |
//! | `age`, `monthly_income`, `distance_from_home` | ✓ | |
//! | `years_at_company`, `job_satisfaction`, `work_life_balance`, `performance_rating` | ✓ | ✓ |
//! | `age_band`, `tenure_band`, `salary_band` | | ✓ |
//!
//! All selectors display as, serialize as and parse from their snake_case name.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

use crate::{
    band::{AgeBand, SalaryBand, TenureBand},
    employee::Employee,
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown attribute '{name}'")]
pub struct ParseAttributeError {
    pub name: String,
}

/// Any attribute an analysis can refer to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Department,
    JobRole,
    Gender,
    MaritalStatus,
    EducationLevel,
    Overtime,
    Attrition,
    ExitReason,
    Age,
    YearsAtCompany,
    MonthlyIncome,
    JobSatisfaction,
    WorkLifeBalance,
    PerformanceRating,
    DistanceFromHome,
    AgeBand,
    TenureBand,
    SalaryBand,
}

impl Attribute {
    pub const ALL: [Self; 18] = [
        Self::Department,
        Self::JobRole,
        Self::Gender,
        Self::MaritalStatus,
        Self::EducationLevel,
        Self::Overtime,
        Self::Attrition,
        Self::ExitReason,
        Self::Age,
        Self::YearsAtCompany,
        Self::MonthlyIncome,
        Self::JobSatisfaction,
        Self::WorkLifeBalance,
        Self::PerformanceRating,
        Self::DistanceFromHome,
        Self::AgeBand,
        Self::TenureBand,
        Self::SalaryBand,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::JobRole => "job_role",
            Self::Gender => "gender",
            Self::MaritalStatus => "marital_status",
            Self::EducationLevel => "education_level",
            Self::Overtime => "overtime",
            Self::Attrition => "attrition",
            Self::ExitReason => "exit_reason",
            Self::Age => "age",
            Self::YearsAtCompany => "years_at_company",
            Self::MonthlyIncome => "monthly_income",
            Self::JobSatisfaction => "job_satisfaction",
            Self::WorkLifeBalance => "work_life_balance",
            Self::PerformanceRating => "performance_rating",
            Self::DistanceFromHome => "distance_from_home",
            Self::AgeBand => "age_band",
            Self::TenureBand => "tenure_band",
            Self::SalaryBand => "salary_band",
        }
    }

    /// The attribute read as a number, if it has a numeric reading.
    #[must_use]
    pub fn as_numeric(self) -> Option<NumericAttribute> {
        let numeric = match self {
            Self::Age => NumericAttribute::Age,
            Self::YearsAtCompany => NumericAttribute::YearsAtCompany,
            Self::MonthlyIncome => NumericAttribute::MonthlyIncome,
            Self::JobSatisfaction => NumericAttribute::JobSatisfaction,
            Self::WorkLifeBalance => NumericAttribute::WorkLifeBalance,
            Self::PerformanceRating => NumericAttribute::PerformanceRating,
            Self::DistanceFromHome => NumericAttribute::DistanceFromHome,
            _ => return None,
        };
        Some(numeric)
    }

    /// The attribute read as a category, if it has a categorical reading.
    #[must_use]
    pub fn as_categorical(self) -> Option<CategoricalAttribute> {
        let categorical = match self {
            Self::Department => CategoricalAttribute::Department,
            Self::JobRole => CategoricalAttribute::JobRole,
            Self::Gender => CategoricalAttribute::Gender,
            Self::MaritalStatus => CategoricalAttribute::MaritalStatus,
            Self::EducationLevel => CategoricalAttribute::EducationLevel,
            Self::Overtime => CategoricalAttribute::Overtime,
            Self::Attrition => CategoricalAttribute::Attrition,
            Self::ExitReason => CategoricalAttribute::ExitReason,
            Self::YearsAtCompany => CategoricalAttribute::YearsAtCompany,
            Self::JobSatisfaction => CategoricalAttribute::JobSatisfaction,
            Self::WorkLifeBalance => CategoricalAttribute::WorkLifeBalance,
            Self::PerformanceRating => CategoricalAttribute::PerformanceRating,
            Self::AgeBand => CategoricalAttribute::AgeBand,
            Self::TenureBand => CategoricalAttribute::TenureBand,
            Self::SalaryBand => CategoricalAttribute::SalaryBand,
            Self::Age | Self::MonthlyIncome | Self::DistanceFromHome => return None,
        };
        Some(categorical)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = ParseAttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.name() == s)
            .ok_or_else(|| ParseAttributeError { name: s.to_owned() })
    }
}

/// An attribute read as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericAttribute {
    Age,
    YearsAtCompany,
    MonthlyIncome,
    JobSatisfaction,
    WorkLifeBalance,
    PerformanceRating,
    DistanceFromHome,
}

impl NumericAttribute {
    /// Reads the attribute; `None` when the field is null for this employee.
    #[must_use]
    pub fn value(self, employee: &Employee) -> Option<f64> {
        match self {
            Self::Age => Some(f64::from(employee.age)),
            Self::YearsAtCompany => Some(f64::from(employee.years_at_company)),
            Self::MonthlyIncome => Some(employee.monthly_income),
            Self::JobSatisfaction => Some(f64::from(employee.job_satisfaction)),
            Self::WorkLifeBalance => Some(f64::from(employee.work_life_balance)),
            Self::PerformanceRating => employee.performance_rating.map(f64::from),
            Self::DistanceFromHome => employee.distance_from_home,
        }
    }
}

impl From<NumericAttribute> for Attribute {
    fn from(attribute: NumericAttribute) -> Self {
        match attribute {
            NumericAttribute::Age => Self::Age,
            NumericAttribute::YearsAtCompany => Self::YearsAtCompany,
            NumericAttribute::MonthlyIncome => Self::MonthlyIncome,
            NumericAttribute::JobSatisfaction => Self::JobSatisfaction,
            NumericAttribute::WorkLifeBalance => Self::WorkLifeBalance,
            NumericAttribute::PerformanceRating => Self::PerformanceRating,
            NumericAttribute::DistanceFromHome => Self::DistanceFromHome,
        }
    }
}

/// An attribute read as a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalAttribute {
    Department,
    JobRole,
    Gender,
    MaritalStatus,
    EducationLevel,
    Overtime,
    Attrition,
    ExitReason,
    YearsAtCompany,
    JobSatisfaction,
    WorkLifeBalance,
    PerformanceRating,
    AgeBand,
    TenureBand,
    SalaryBand,
}

impl CategoricalAttribute {
    /// Reads the category; `None` when the field is null for this employee.
    #[must_use]
    pub fn value(self, employee: &Employee) -> Option<GroupValue> {
        let value = match self {
            Self::Department => GroupValue::Text(employee.department.clone()),
            Self::JobRole => GroupValue::Text(employee.job_role.clone()),
            Self::Gender => GroupValue::Text(employee.gender.clone()),
            Self::MaritalStatus => GroupValue::Text(employee.marital_status.clone()),
            Self::EducationLevel => GroupValue::Text(employee.education_level.clone()),
            Self::Overtime => GroupValue::Flag(employee.overtime),
            Self::Attrition => GroupValue::Flag(employee.attrition),
            Self::ExitReason => GroupValue::Text(employee.exit_reason.clone()?),
            Self::YearsAtCompany => GroupValue::Ordinal(employee.years_at_company),
            Self::JobSatisfaction => GroupValue::Ordinal(employee.job_satisfaction.into()),
            Self::WorkLifeBalance => GroupValue::Ordinal(employee.work_life_balance.into()),
            Self::PerformanceRating => GroupValue::Ordinal(employee.performance_rating?.into()),
            Self::AgeBand => GroupValue::Age(AgeBand::from_age(employee.age)),
            Self::TenureBand => GroupValue::Tenure(TenureBand::from_years(employee.years_at_company)),
            Self::SalaryBand => GroupValue::Salary(SalaryBand::from_income(employee.monthly_income)),
        };
        Some(value)
    }
}

impl From<CategoricalAttribute> for Attribute {
    fn from(attribute: CategoricalAttribute) -> Self {
        match attribute {
            CategoricalAttribute::Department => Self::Department,
            CategoricalAttribute::JobRole => Self::JobRole,
            CategoricalAttribute::Gender => Self::Gender,
            CategoricalAttribute::MaritalStatus => Self::MaritalStatus,
            CategoricalAttribute::EducationLevel => Self::EducationLevel,
            CategoricalAttribute::Overtime => Self::Overtime,
            CategoricalAttribute::Attrition => Self::Attrition,
            CategoricalAttribute::ExitReason => Self::ExitReason,
            CategoricalAttribute::YearsAtCompany => Self::YearsAtCompany,
            CategoricalAttribute::JobSatisfaction => Self::JobSatisfaction,
            CategoricalAttribute::WorkLifeBalance => Self::WorkLifeBalance,
            CategoricalAttribute::PerformanceRating => Self::PerformanceRating,
            CategoricalAttribute::AgeBand => Self::AgeBand,
            CategoricalAttribute::TenureBand => Self::TenureBand,
            CategoricalAttribute::SalaryBand => Self::SalaryBand,
        }
    }
}

macro_rules! impl_selector_traits {
    ($ty:ident, $as_fn:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(Attribute::from(*self).name())
            }
        }

        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(Attribute::from(*self).name())
            }
        }

        impl FromStr for $ty {
            type Err = ParseAttributeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<Attribute>()?
                    .$as_fn()
                    .ok_or_else(|| ParseAttributeError { name: s.to_owned() })
            }
        }
    };
}

impl_selector_traits!(NumericAttribute, as_numeric);
impl_selector_traits!(CategoricalAttribute, as_categorical);

/// One component of a group key.
///
/// Values of one attribute always share a variant, so the derived ordering is
/// the natural order of that attribute: flags `No` before `Yes`, ordinals
/// numerically, bands from lowest to highest, text lexically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupValue {
    Flag(bool),
    Ordinal(u32),
    Age(AgeBand),
    Tenure(TenureBand),
    Salary(SalaryBand),
    Text(String),
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(true) => f.write_str("Yes"),
            Self::Flag(false) => f.write_str("No"),
            Self::Ordinal(value) => write!(f, "{value}"),
            Self::Age(band) => write!(f, "{band}"),
            Self::Tenure(band) => write!(f, "{band}"),
            Self::Salary(band) => write!(f, "{band}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl Serialize for GroupValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::fixtures::{departed, employee};

    #[test]
    fn test_every_name_round_trips() {
        for attribute in Attribute::ALL {
            assert_eq!(attribute.name().parse::<Attribute>(), Ok(attribute));
            assert!(
                attribute.as_numeric().is_some() || attribute.as_categorical().is_some(),
                "{attribute} has no reading"
            );
        }
    }

    #[test]
    fn test_typed_parsing_respects_reading() {
        assert_eq!("age".parse::<NumericAttribute>(), Ok(NumericAttribute::Age));
        assert!("age".parse::<CategoricalAttribute>().is_err());
        assert!("age_band".parse::<NumericAttribute>().is_err());
        assert_eq!(
            "job_satisfaction".parse::<CategoricalAttribute>(),
            Ok(CategoricalAttribute::JobSatisfaction)
        );
        assert_eq!(
            "salary".parse::<Attribute>(),
            Err(ParseAttributeError {
                name: "salary".to_owned()
            })
        );
    }

    #[test]
    fn test_null_fields_read_as_none() {
        let mut e = employee("A");
        e.performance_rating = None;
        e.distance_from_home = None;
        assert_eq!(NumericAttribute::PerformanceRating.value(&e), None);
        assert_eq!(NumericAttribute::DistanceFromHome.value(&e), None);
        assert_eq!(CategoricalAttribute::PerformanceRating.value(&e), None);
        assert_eq!(CategoricalAttribute::ExitReason.value(&e), None);
        assert_eq!(
            CategoricalAttribute::ExitReason.value(&departed("B")),
            Some(GroupValue::Text("Career Growth".to_owned()))
        );
    }

    #[test]
    fn test_group_value_display_and_order() {
        assert_eq!(GroupValue::Flag(true).to_string(), "Yes");
        assert_eq!(GroupValue::Salary(SalaryBand::Over7K).to_string(), ">$7K");
        assert!(GroupValue::Ordinal(2) < GroupValue::Ordinal(10));
        assert!(GroupValue::Flag(false) < GroupValue::Flag(true));
    }

    #[test]
    fn test_selectors_serialize_as_names() {
        let json = serde_json::to_string(&(
            Attribute::WorkLifeBalance,
            NumericAttribute::MonthlyIncome,
            CategoricalAttribute::TenureBand,
        ))
        .unwrap();
        assert_eq!(json, r#"["work_life_balance","monthly_income","tenure_band"]"#);
    }
}
