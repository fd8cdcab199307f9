//! Labelled bands over numeric fields.
//!
//! Bands are right-closed intervals: an age of exactly 25 falls in
//! `Under 25`, a tenure of exactly 3 years in `1-3 years`. The lowest band
//! of each kind is open below, so a tenure of 0 is `<1 year`, and the highest
//! is open above.

/// Index of the right-closed band containing `value`, given ascending upper bounds.
fn band_index(value: f64, upper_bounds: &[f64]) -> usize {
    upper_bounds.iter().take_while(|&&bound| value > bound).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum AgeBand {
    #[display("Under 25")]
    Under25,
    #[display("25-30")]
    From25To30,
    #[display("31-35")]
    From31To35,
    #[display("36-40")]
    From36To40,
    #[display("Over 40")]
    Over40,
}

impl AgeBand {
    pub const ALL: [Self; 5] = [
        Self::Under25,
        Self::From25To30,
        Self::From31To35,
        Self::From36To40,
        Self::Over40,
    ];
    const UPPER_BOUNDS: [f64; 4] = [25.0, 30.0, 35.0, 40.0];

    /// # Examples
    ///
    /// ```
    /// # use attrition_analysis::band::AgeBand;
    /// assert_eq!(AgeBand::from_age(25), AgeBand::Under25);
    /// assert_eq!(AgeBand::from_age(26), AgeBand::From25To30);
    /// assert_eq!(AgeBand::from_age(41), AgeBand::Over40);
    /// ```
    #[must_use]
    pub fn from_age(age: u32) -> Self {
        Self::ALL[band_index(f64::from(age), &Self::UPPER_BOUNDS)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum TenureBand {
    #[display("<1 year")]
    UnderOne,
    #[display("1-3 years")]
    OneToThree,
    #[display("4-7 years")]
    FourToSeven,
    #[display("8-12 years")]
    EightToTwelve,
    #[display(">12 years")]
    OverTwelve,
}

impl TenureBand {
    pub const ALL: [Self; 5] = [
        Self::UnderOne,
        Self::OneToThree,
        Self::FourToSeven,
        Self::EightToTwelve,
        Self::OverTwelve,
    ];
    const UPPER_BOUNDS: [f64; 4] = [1.0, 3.0, 7.0, 12.0];

    /// # Examples
    ///
    /// ```
    /// # use attrition_analysis::band::TenureBand;
    /// assert_eq!(TenureBand::from_years(0), TenureBand::UnderOne);
    /// assert_eq!(TenureBand::from_years(1), TenureBand::UnderOne);
    /// assert_eq!(TenureBand::from_years(3), TenureBand::OneToThree);
    /// assert_eq!(TenureBand::from_years(13), TenureBand::OverTwelve);
    /// ```
    #[must_use]
    pub fn from_years(years: u32) -> Self {
        Self::ALL[band_index(f64::from(years), &Self::UPPER_BOUNDS)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum SalaryBand {
    #[display("<$4K")]
    Under4K,
    #[display("$4K-$5.5K")]
    Between4KAnd5500,
    #[display("$5.5K-$7K")]
    Between5500And7K,
    #[display(">$7K")]
    Over7K,
}

impl SalaryBand {
    pub const ALL: [Self; 4] = [
        Self::Under4K,
        Self::Between4KAnd5500,
        Self::Between5500And7K,
        Self::Over7K,
    ];
    const UPPER_BOUNDS: [f64; 3] = [4000.0, 5500.0, 7000.0];

    /// # Examples
    ///
    /// ```
    /// # use attrition_analysis::band::SalaryBand;
    /// assert_eq!(SalaryBand::from_income(4000.0), SalaryBand::Under4K);
    /// assert_eq!(SalaryBand::from_income(4000.01), SalaryBand::Between4KAnd5500);
    /// assert_eq!(SalaryBand::from_income(12_000.0), SalaryBand::Over7K);
    /// ```
    #[must_use]
    pub fn from_income(monthly_income: f64) -> Self {
        Self::ALL[band_index(monthly_income, &Self::UPPER_BOUNDS)]
    }
}
