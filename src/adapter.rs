//! Heading stream adapter
//!
//! Bridges a rotation-vector sensor registration to a single heading
//! subscriber. Each raw sample is decomposed into orientation angles,
//! corrected into a flat-compass heading, change-filtered, and
//! forwarded to the subscriber.

use std::sync::{Arc, Mutex};

use log::{debug, warn};

use crate::filter::ChangeFilter;
use crate::heading::sample_heading;
use crate::orientation::RotationSample;
use crate::sensor::{RegistrationId, RotationSensor};
use crate::types::CompassSettings;

/// Receiver for accepted heading values
///
/// The subscriber side of the stream. [`HeadingSink::emit`] is called
/// synchronously on the sensor's delivery thread, so a sink that blocks
/// delays further delivery. Any `FnMut(f64) + Send` closure is a sink.
pub trait HeadingSink: Send {
    /// Receive one accepted heading in degrees, in [0, 360)
    fn emit(&mut self, heading: f64);
}

impl<F> HeadingSink for F
where
    F: FnMut(f64) + Send,
{
    fn emit(&mut self, heading: f64) {
        self(heading);
    }
}

/// State shared between the adapter and the in-flight sample callback
struct Shared {
    filter: ChangeFilter,
    sink: Option<Box<dyn HeadingSink>>,
}

impl Shared {
    fn on_sample(&mut self, sample: RotationSample) {
        // A straggler sample delivered around unsubscribe finds the
        // sink already detached and is dropped
        let Some(sink) = self.sink.as_mut() else {
            return;
        };

        let heading = sample_heading(&sample);
        if let Some(accepted) = self.filter.update(heading) {
            sink.emit(accepted);
        }
    }
}

/// Compass heading stream over a rotation-vector sensor
///
/// Owns the sensor registration lifecycle for one subscriber at a time:
/// [`subscribe`](HeadingAdapter::subscribe) registers a sample listener
/// and starts forwarding filtered headings,
/// [`unsubscribe`](HeadingAdapter::unsubscribe) stops delivery and
/// detaches the subscriber. On devices without a rotation-vector sensor
/// the stream stays silently empty rather than failing.
///
/// The change filter persists across subscriptions: a new subscriber is
/// filtered against the last heading emitted to the previous one, so
/// reattaching while the device is still does not replay a stale value.
///
/// # Example
/// ```
/// use std::sync::mpsc;
/// use compass_stream::{CompassSettings, DeliveryRate, HeadingAdapter, MockSensor, RotationSample};
///
/// let sensor = MockSensor::new();
/// let settings = CompassSettings {
///     filter_threshold: 1.0,
///     rate: DeliveryRate::Ui,
/// };
/// let mut adapter = HeadingAdapter::with_settings(sensor.clone(), settings);
///
/// let (tx, rx) = mpsc::channel();
/// adapter.subscribe(move |heading| {
///     let _ = tx.send(heading);
/// });
///
/// sensor.deliver(RotationSample::from_angles(90f32.to_radians(), 0.0, 0.0));
/// let heading = rx.recv().unwrap();
/// assert!((heading - 90.0).abs() < 0.01);
/// ```
pub struct HeadingAdapter<S: RotationSensor> {
    /// Sensor service backing the stream
    sensor: S,
    /// Stream configuration
    settings: CompassSettings,
    /// State shared with the registered sample callback
    shared: Arc<Mutex<Shared>>,
    /// Live sensor registration, when subscribed on a device with a sensor
    registration: Option<RegistrationId>,
}

impl<S: RotationSensor> HeadingAdapter<S> {
    /// Create an adapter with default settings (1° threshold, UI rate)
    pub fn new(sensor: S) -> Self {
        Self::with_settings(sensor, CompassSettings::default())
    }

    /// Create an adapter with the given settings
    pub fn with_settings(sensor: S, settings: CompassSettings) -> Self {
        Self {
            sensor,
            settings,
            shared: Arc::new(Mutex::new(Shared {
                filter: ChangeFilter::new(settings.filter_threshold),
                sink: None,
            })),
            registration: None,
        }
    }

    /// Begin streaming headings to a subscriber
    ///
    /// Attaches the sink and registers a sample listener with the sensor
    /// service at the configured rate. The stream carries at most one
    /// subscriber; with one already attached the call is ignored. On
    /// devices without a rotation-vector sensor the sink is attached but
    /// never called, so a missing sensor reads as a stream that never
    /// fires.
    pub fn subscribe<K>(&mut self, sink: K)
    where
        K: HeadingSink + 'static,
    {
        {
            let Ok(mut state) = self.shared.lock() else {
                return;
            };
            if state.sink.is_some() {
                warn!("subscribe ignored: a heading subscriber is already attached");
                return;
            }
            state.sink = Some(Box::new(sink));
        }

        // The callback holds the shared state, not the adapter, so
        // delivery can outlive this stack frame. The state lock is not
        // held across the registration call.
        let shared = Arc::clone(&self.shared);
        let callback = Box::new(move |sample: RotationSample| {
            if let Ok(mut state) = shared.lock() {
                state.on_sample(sample);
            }
        });

        match self.sensor.register(callback, self.settings.rate) {
            Some(id) => {
                debug!(
                    "heading stream started: registration {}, rate {:?}",
                    id.raw(),
                    self.settings.rate
                );
                self.registration = Some(id);
            }
            None => {
                debug!("no rotation-vector sensor, heading stream stays silent");
            }
        }
    }

    /// Stop streaming and detach the subscriber
    ///
    /// Unregisters the sensor listener first so the service stops
    /// delivering, then detaches the sink. Safe to call repeatedly or
    /// with no subscriber attached.
    pub fn unsubscribe(&mut self) {
        if let Some(id) = self.registration.take() {
            self.sensor.unregister(id);
            debug!("heading stream stopped: registration {}", id.raw());
        }
        if let Ok(mut state) = self.shared.lock() {
            state.sink = None;
        }
    }

    /// Whether a subscriber is currently attached
    pub fn is_subscribed(&self) -> bool {
        self.shared
            .lock()
            .map(|state| state.sink.is_some())
            .unwrap_or(false)
    }

    /// Get the last heading accepted by the change filter
    ///
    /// Starts at 0° and is deliberately not reset by
    /// [`unsubscribe`](HeadingAdapter::unsubscribe); it carries across
    /// subscriptions as the filter baseline.
    ///
    /// # Returns
    /// Last accepted heading in degrees, in [0, 360)
    pub fn heading(&self) -> f64 {
        self.shared
            .lock()
            .map(|state| state.filter.current())
            .unwrap_or(0.0)
    }

    /// Get the stream settings
    pub fn settings(&self) -> CompassSettings {
        self.settings
    }
}

impl<S: RotationSensor> Drop for HeadingAdapter<S> {
    // Release the sensor registration if the stream is dropped while
    // subscribed
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
