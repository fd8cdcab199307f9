//! Employee attrition analytics over a static snapshot.
//!
//! This crate turns a validated snapshot of employee records into grouped
//! attrition metrics, association tests, risk scores and a tenure survival
//! view. All analyses are pure functions of a shared [`store::RecordStore`].
//!
//! # Overview
//!
//! 1. **Load** ([`employee::Employee`], [`store::RecordStore`]): deserialize
//!    records and validate the whole snapshot
//! 2. **Select** ([`attribute`], [`band`]): name the fields and derived bands
//!    an analysis works on
//! 3. **Analyze**:
//!    - [`aggregate`]: attrition rate and metrics per group
//!    - [`association`]: chi-square, Welch t-test, ANOVA and correlation
//!      against the attrition outcome
//!    - [`risk`]: rule-based risk score of current employees
//!    - [`survival`]: tenure survival curve and critical retention windows
//! 4. **Summarize** ([`summary::RetentionSummary`]): headline figures
//!
//! [`config::AnalysisConfig`] bundles the tunable parameters, and [`sample`]
//! generates synthetic snapshots.
//!
//! # Examples
//!
//! ```
//! use attrition_analysis::{
//!     aggregate::{GroupOrder, Metric, aggregate},
//!     association::{TestConfig, TestKind, test_association},
//!     attribute::{Attribute, CategoricalAttribute},
//!     risk::RiskScorer,
//!     sample,
//!     store::RecordStore,
//!     survival::survival_curve,
//! };
//! use rand::SeedableRng as _;
//!
//! let mut rng = rand_pcg::Pcg32::seed_from_u64(1);
//! let store = RecordStore::new(sample::generate(&mut rng, 300)).unwrap();
//!
//! let by_department = aggregate(
//!     &store,
//!     &[CategoricalAttribute::Department],
//!     &[Metric::Count, Metric::Rate],
//!     GroupOrder::AttritionRateDescending,
//! );
//! assert_eq!(by_department.iter().map(|row| row.metrics.total).sum::<usize>(), 300);
//!
//! let test = test_association(
//!     &store,
//!     Attribute::MonthlyIncome,
//!     TestKind::WelchT,
//!     &TestConfig::default(),
//! )
//! .unwrap();
//! assert!((0.0..=1.0).contains(&test.p_value));
//!
//! let flagged = RiskScorer::default().high_risk(&store);
//! assert!(flagged.iter().all(|e| e.risk.score >= 60));
//!
//! let curve = survival_curve(&store, 10);
//! assert!(curve.windows(2).all(|w| w[0].surviving_at_or_above >= w[1].surviving_at_or_above));
//! ```

pub mod aggregate;
pub mod association;
pub mod attribute;
pub mod band;
pub mod config;
pub mod employee;
pub mod risk;
pub mod sample;
pub mod store;
pub mod summary;
pub mod survival;
