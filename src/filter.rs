//! Minimum-change filtering for the heading stream

/// Default minimum heading change before a value is emitted
const DEFAULT_THRESHOLD: f64 = 1.0; // degrees

/// Heading change gate
///
/// Suppresses sensor jitter by dropping headings closer than the
/// threshold to the last accepted value. The comparison is inclusive:
/// a change of exactly the threshold is accepted.
///
/// The filter starts from a 0° baseline, so the first heading of a
/// stream is only emitted once it differs from 0° by at least the
/// threshold.
#[derive(Debug, Clone, Copy)]
pub struct ChangeFilter {
    /// Minimum absolute change in degrees required to accept
    threshold: f64,
    /// Last accepted heading in degrees
    current: f64,
}

impl ChangeFilter {
    /// Initialize a filter with the given threshold
    ///
    /// # Arguments
    /// * `threshold` - Minimum absolute heading change in degrees
    ///
    /// # Example
    /// ```
    /// use compass_stream::ChangeFilter;
    ///
    /// let mut filter = ChangeFilter::new(1.0);
    /// assert_eq!(filter.update(90.0), Some(90.0));
    /// assert_eq!(filter.update(90.5), None); // jitter, dropped
    /// ```
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            current: 0.0,
        }
    }

    /// Feed a candidate heading, returning it when accepted
    ///
    /// Accepts when `|current - candidate| >= threshold` and updates the
    /// stored value; otherwise the candidate is dropped.
    ///
    /// The comparison is linear, not circular: a swing across north
    /// (359° to 1°) measures as a large change and always emits.
    ///
    /// # Arguments
    /// * `candidate` - Heading in degrees, in [0, 360)
    ///
    /// # Returns
    /// The accepted heading, or `None` when the change was too small
    pub fn update(&mut self, candidate: f64) -> Option<f64> {
        if (self.current - candidate).abs() >= self.threshold {
            self.current = candidate;
            Some(candidate)
        } else {
            None
        }
    }

    /// Get the last accepted heading
    ///
    /// # Returns
    /// Last accepted heading in degrees, 0° before anything is accepted
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Get the acceptance threshold
    ///
    /// # Returns
    /// Minimum absolute change in degrees required to accept
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Reset the filter to its initial state
    ///
    /// Returns the baseline to 0°, as if no heading had been accepted.
    pub fn reset(&mut self) {
        self.current = 0.0;
    }
}

impl Default for ChangeFilter {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
