use serde::Serialize;

/// A single time-to-event observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Time at which the event or censoring happened.
    pub time: usize,
    /// `true` if the event was not observed (the subject left the study still "alive").
    pub censored: bool,
}

impl Observation {
    #[must_use]
    pub fn event(time: usize) -> Self {
        Self {
            time,
            censored: false,
        }
    }

    #[must_use]
    pub fn censored(time: usize) -> Self {
        Self {
            time,
            censored: true,
        }
    }
}

/// Kaplan-Meier survival curve.
///
/// A non-parametric estimate of the survival function from right-censored
/// observations. The curve has one step per distinct time at which at least
/// one event occurred.
///
/// The parallel vectors hold, for each step:
/// - the event time
/// - the survival probability just after that time
/// - the number of subjects at risk at that time
/// - the number of events at that time
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KaplanMeierCurve {
    pub times: Vec<usize>,
    pub survival_prob: Vec<f64>,
    pub at_risk: Vec<usize>,
    pub events: Vec<usize>,
}

impl KaplanMeierCurve {
    /// Estimates the survival curve from observations in any order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use attrition_stats::survival::{KaplanMeierCurve, Observation};
    /// let curve = KaplanMeierCurve::from_observations([
    ///     Observation::event(1),
    ///     Observation::censored(2),
    ///     Observation::event(3),
    ///     Observation::censored(3),
    /// ]);
    /// assert_eq!(curve.times, vec![1, 3]);
    /// assert_eq!(curve.at_risk, vec![4, 2]);
    /// assert_eq!(curve.survival_prob, vec![0.75, 0.375]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut observations = observations.into_iter().collect::<Vec<_>>();
        observations.sort_by_key(|obs| obs.time);

        let mut curve = Self::default();
        let mut at_risk = observations.len();
        let mut survival = 1.0;
        for same_time in observations.chunk_by(|a, b| a.time == b.time) {
            let events = same_time.iter().filter(|obs| !obs.censored).count();
            if events > 0 {
                survival *= 1.0 - events as f64 / at_risk as f64;
                curve.times.push(same_time[0].time);
                curve.survival_prob.push(survival);
                curve.at_risk.push(at_risk);
                curve.events.push(events);
            }
            at_risk -= same_time.len();
        }
        curve
    }

    /// Returns the median survival time.
    ///
    /// This is the first time at which the survival probability drops to or
    /// below 50%, linearly interpolated between steps. `None` if the curve
    /// never reaches 50%.
    ///
    /// ```
    /// # use attrition_stats::survival::{KaplanMeierCurve, Observation};
    /// let curve = KaplanMeierCurve::from_observations((1..=4).map(Observation::event));
    /// assert_eq!(curve.median_survival(), Some(2.0));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn median_survival(&self) -> Option<f64> {
        let i = self.survival_prob.iter().position(|&p| p <= 0.5)?;
        if i == 0 {
            return Some(self.times[0] as f64);
        }
        let (t0, t1) = (self.times[i - 1] as f64, self.times[i] as f64);
        let (s0, s1) = (self.survival_prob[i - 1], self.survival_prob[i]);
        Some(t0 + (0.5 - s0) / (s1 - s0) * (t1 - t0))
    }

    /// Survival probability at `time` (step function, 1.0 before the first event).
    #[must_use]
    pub fn survival_at(&self, time: usize) -> f64 {
        let steps = self.times.partition_point(|&t| t <= time);
        if steps == 0 {
            1.0
        } else {
            self.survival_prob[steps - 1]
        }
    }
}
