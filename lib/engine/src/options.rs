use std::time::{Duration, Instant};

/// Options for evaluating algebra.
///
/// ```
/// use rdf_paths_engine::EvaluationOptions;
/// use std::time::Duration;
///
/// let options = EvaluationOptions::default()
///     .with_timeout(Duration::from_secs(5))
///     .with_max_rounds(1_000);
/// assert_eq!(options.max_rounds(), Some(1_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationOptions {
    timeout: Option<Duration>,
    max_rounds: Option<usize>,
}

impl EvaluationOptions {
    /// Aborts the evaluation with [QueryEvaluationError::Timeout](crate::QueryEvaluationError)
    /// once `timeout` has elapsed.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Limits the number of expansion rounds of a single unbounded path operator.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn max_rounds(&self) -> Option<usize> {
        self.max_rounds
    }

    /// The instant at which an evaluation started now must stop.
    pub(crate) fn deadline(&self) -> Option<Deadline> {
        self.timeout.map(|timeout| Deadline {
            at: Instant::now() + timeout,
            timeout,
        })
    }
}

/// A point in time after which the evaluation fails.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    at: Instant,
    timeout: Duration,
}

impl Deadline {
    pub(crate) fn check(self) -> Result<(), crate::QueryEvaluationError> {
        if Instant::now() >= self.at {
            return Err(crate::QueryEvaluationError::Timeout(self.timeout));
        }
        Ok(())
    }
}
