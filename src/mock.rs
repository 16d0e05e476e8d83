//! In-memory sensor service for tests, demos, and simulation

use std::sync::{Arc, Mutex};

use log::debug;

use crate::orientation::RotationSample;
use crate::sensor::{RegistrationId, RotationSensor, SampleCallback};
use crate::types::DeliveryRate;

/// Sensor service event, recorded for test verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorEvent {
    /// A listener was registered at the given rate
    Registered {
        id: RegistrationId,
        rate: DeliveryRate,
    },
    /// A live listener was unregistered
    Unregistered { id: RegistrationId },
    /// Unregister was called with no matching live listener
    StaleUnregister { id: RegistrationId },
}

/// In-memory rotation-vector sensor service
///
/// Stands in for a platform sensor backend: holds at most one listener,
/// delivers samples only when told to, and records every registration
/// event for later inspection. Clones share state, so a test can keep a
/// handle for driving samples while the stream owns another.
///
/// # Example
/// ```
/// use compass_stream::{MockSensor, RotationSample, RotationSensor, DeliveryRate};
///
/// let sensor = MockSensor::new();
/// let id = sensor.register(Box::new(|_sample| {}), DeliveryRate::Ui);
/// assert!(id.is_some());
///
/// // A raw four-component event: a quarter turn west of north
/// sensor.deliver(RotationSample::new(0.0, 0.0, 0.383, 0.924));
/// ```
#[derive(Clone)]
pub struct MockSensor {
    inner: Arc<Mutex<MockState>>,
}

struct MockState {
    available: bool,
    next_id: u64,
    listener: Option<(RegistrationId, SampleCallback)>,
    events: Vec<SensorEvent>,
}

impl MockSensor {
    /// Create a service backed by a working rotation-vector sensor
    pub fn new() -> Self {
        Self::with_availability(true)
    }

    /// Create a service on a device without a rotation-vector sensor
    ///
    /// Registration returns `None` and nothing is ever delivered,
    /// matching hardware where the fused orientation sensor is missing.
    pub fn unavailable() -> Self {
        Self::with_availability(false)
    }

    fn with_availability(available: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState {
                available,
                next_id: 0,
                listener: None,
                events: Vec::new(),
            })),
        }
    }

    /// Deliver one sample to the live listener, if any
    ///
    /// Runs the callback on the calling thread, while the service lock
    /// is held; callbacks must not call back into this service.
    ///
    /// # Returns
    /// Whether a listener consumed the sample
    pub fn deliver(&self, sample: RotationSample) -> bool {
        let Ok(mut state) = self.inner.lock() else {
            return false;
        };
        match state.listener.as_mut() {
            Some((_, callback)) => {
                callback(sample);
                true
            }
            None => false,
        }
    }

    /// Get the number of live listeners (0 or 1)
    pub fn live_listeners(&self) -> usize {
        self.inner
            .lock()
            .map(|state| usize::from(state.listener.is_some()))
            .unwrap_or(0)
    }

    /// Get the recorded registration events, oldest first
    pub fn events(&self) -> Vec<SensorEvent> {
        self.inner
            .lock()
            .map(|state| state.events.clone())
            .unwrap_or_default()
    }
}

impl Default for MockSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl RotationSensor for MockSensor {
    fn register(&self, callback: SampleCallback, rate: DeliveryRate) -> Option<RegistrationId> {
        let Ok(mut state) = self.inner.lock() else {
            return None;
        };
        if !state.available {
            debug!("mock sensor: registration refused, no rotation-vector sensor");
            return None;
        }

        state.next_id += 1;
        let id = RegistrationId::new(state.next_id);

        // At most one listener; a second registration replaces the first
        state.listener = Some((id, callback));
        state.events.push(SensorEvent::Registered { id, rate });
        debug!("mock sensor: listener {} registered at {:?}", id.raw(), rate);

        Some(id)
    }

    fn unregister(&self, id: RegistrationId) {
        let Ok(mut state) = self.inner.lock() else {
            return;
        };
        match state.listener {
            Some((live, _)) if live == id => {
                state.listener = None;
                state.events.push(SensorEvent::Unregistered { id });
                debug!("mock sensor: listener {} unregistered", id.raw());
            }
            _ => {
                state.events.push(SensorEvent::StaleUnregister { id });
                debug!("mock sensor: stale unregister for listener {}", id.raw());
            }
        }
    }
}
