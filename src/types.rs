//! Core types and settings for the compass heading stream

use std::time::Duration;

/// Sensor delivery rate hint
///
/// Requested sampling cadence passed to the sensor service when a
/// listener registers. The service treats it as a hint: delivery is
/// periodic and best-effort, not a real-time guarantee.
///
/// # Example
/// ```
/// use compass_stream::{CompassSettings, DeliveryRate};
///
/// let settings = CompassSettings {
///     rate: DeliveryRate::Game,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryRate {
    /// Roughly 5 Hz, enough for slow-changing displays
    Normal,
    /// Roughly 15 Hz, the usual rate for an on-screen compass needle
    #[default]
    Ui,
    /// Roughly 50 Hz, for responsive interaction
    Game,
    /// As fast as the sensor can produce samples
    Fastest,
}

impl DeliveryRate {
    /// Suggested interval between deliveries at this rate
    ///
    /// `Fastest` maps to a zero interval, meaning no artificial delay.
    ///
    /// # Example
    /// ```
    /// use compass_stream::DeliveryRate;
    ///
    /// let interval = DeliveryRate::Ui.interval();
    /// assert_eq!(interval.as_micros(), 66_667);
    /// ```
    pub fn interval(&self) -> Duration {
        match self {
            DeliveryRate::Normal => Duration::from_micros(200_000),
            DeliveryRate::Ui => Duration::from_micros(66_667),
            DeliveryRate::Game => Duration::from_micros(20_000),
            DeliveryRate::Fastest => Duration::ZERO,
        }
    }
}

/// Heading stream settings
///
/// Configuration for a heading stream: how much the heading must move
/// before subscribers hear about it, and how often the sensor is asked
/// to report.
///
/// # Example
/// ```
/// use compass_stream::{CompassSettings, DeliveryRate};
///
/// let settings = CompassSettings {
///     filter_threshold: 0.5,    // emit on half-degree changes
///     rate: DeliveryRate::Ui,
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CompassSettings {
    /// Minimum absolute heading change in degrees required to emit (typically 1.0)
    ///
    /// Consecutive headings closer than this to the last emitted value
    /// are dropped to suppress sensor jitter. The comparison is
    /// inclusive: a change of exactly the threshold emits.
    pub filter_threshold: f64,
    /// Delivery rate requested from the sensor service
    pub rate: DeliveryRate,
}

impl Default for CompassSettings {
    fn default() -> Self {
        Self {
            filter_threshold: 1.0,
            rate: DeliveryRate::default(),
        }
    }
}
