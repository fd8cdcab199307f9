//! Statistical kernels for the attrition analytics engine.
//!
//! This crate works on plain numbers and knows nothing about employees:
//!
//! - **Descriptive statistics**: mean, median, sample variance
//! - **Distributions**: chi-square, Student t and F tail probabilities built on
//!   the incomplete gamma and beta functions
//! - **Hypothesis tests**: chi-square independence, Welch t-test, one-way ANOVA,
//!   Pearson correlation
//! - **Survival analysis**: Kaplan-Meier estimator for right-censored data
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing samples
//! - [`distribution`]: Special functions and distribution tails
//! - [`hypothesis`]: Test statistics and p-values
//! - [`survival`]: Kaplan-Meier survival curves
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use attrition_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 2.5);
//! assert_eq!(stats.median, 2.5);
//! ```
//!
//! ## Testing independence
//!
//! ```
//! use attrition_stats::hypothesis::chi_square_independence;
//!
//! // Rows: categories, columns: (stayed, departed)
//! let table = [vec![40.0, 10.0], vec![45.0, 5.0]];
//! let test = chi_square_independence(&table).unwrap();
//! assert_eq!(test.degrees_of_freedom, 1);
//! assert!(test.p_value > 0.05);
//! ```
//!
//! ## Analyzing survival data
//!
//! ```
//! use attrition_stats::survival::{KaplanMeierCurve, Observation};
//!
//! let curve = KaplanMeierCurve::from_observations([
//!     Observation::event(10),
//!     Observation::censored(20),
//!     Observation::event(30),
//! ]);
//! assert_eq!(curve.times, vec![10, 30]);
//! ```

pub mod descriptive;
pub mod distribution;
pub mod hypothesis;
pub mod survival;
