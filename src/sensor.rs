//! Rotation-vector sensor service interface
//!
//! Platform backends and test doubles implement [`RotationSensor`] to
//! feed the heading stream. The contract mirrors mobile sensor
//! managers: listeners register for best-effort periodic delivery and
//! are identified by an opaque handle until unregistered.

use crate::orientation::RotationSample;
use crate::types::DeliveryRate;

/// Callback receiving rotation-vector samples from the sensor service
///
/// Invoked once per delivered sample, on the service's delivery thread,
/// which need not be the thread that registered it.
pub type SampleCallback = Box<dyn FnMut(RotationSample) + Send>;

/// Handle for one live listener registration
///
/// Wraps the backend-assigned identifier. Handles are only meaningful
/// to the service that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

impl RegistrationId {
    /// Wrap a backend-assigned raw identifier
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the backend-assigned raw identifier
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Rotation-vector sensor service
///
/// Samples for one registration are delivered sequentially, never
/// concurrently with themselves, though possibly from a dedicated
/// service thread.
pub trait RotationSensor {
    /// Register a listener for periodic rotation-vector delivery
    ///
    /// The rate is a hint; the service delivers best-effort. Returns
    /// `None` when the device has no rotation-vector-capable sensor, in
    /// which case nothing was registered and the callback is dropped.
    /// Sensor absence is an expected condition, not an error.
    ///
    /// # Arguments
    /// * `callback` - Invoked with each delivered sample
    /// * `rate` - Requested delivery cadence
    ///
    /// # Returns
    /// Handle identifying the registration, or `None` without a sensor
    fn register(&self, callback: SampleCallback, rate: DeliveryRate) -> Option<RegistrationId>;

    /// Stop delivery for a registration
    ///
    /// Once this returns, the callback is not invoked again. Handles
    /// that are unknown or already cleared are ignored, so callers can
    /// unregister unconditionally.
    ///
    /// # Arguments
    /// * `id` - Handle returned by [`RotationSensor::register`]
    fn unregister(&self, id: RegistrationId);
}
