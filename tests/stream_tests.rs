use std::sync::{Arc, Mutex, mpsc};
use std::thread;

use compass_stream::{
    ChangeFilter, CompassSettings, DeliveryRate, HeadingAdapter, MockSensor, RegistrationId,
    RotationSample, RotationSensor, SampleCallback, SensorEvent, sample_heading, wrap_heading,
};

/// Build the sample a sensor would report for the given pose (degrees)
fn pose(azimuth_deg: f32, pitch_deg: f32, roll_deg: f32) -> RotationSample {
    RotationSample::from_angles(
        azimuth_deg.to_radians(),
        pitch_deg.to_radians(),
        roll_deg.to_radians(),
    )
}

/// Subscribe a channel-backed sink and return the receiving end
fn subscribe_channel<S: RotationSensor>(adapter: &mut HeadingAdapter<S>) -> mpsc::Receiver<f64> {
    let (tx, rx) = mpsc::channel();
    adapter.subscribe(move |heading| {
        let _ = tx.send(heading);
    });
    rx
}

/// Sensor service that holds onto its callback after unregister,
/// modeling a backend that keeps delivering past deregistration
#[derive(Clone)]
struct LingeringSensor {
    callback: Arc<Mutex<Option<SampleCallback>>>,
}

impl LingeringSensor {
    fn new() -> Self {
        Self {
            callback: Arc::new(Mutex::new(None)),
        }
    }

    /// Push a sample through whatever callback is still held
    fn deliver(&self, sample: RotationSample) -> bool {
        match self.callback.lock().unwrap().as_mut() {
            Some(callback) => {
                callback(sample);
                true
            }
            None => false,
        }
    }
}

impl RotationSensor for LingeringSensor {
    fn register(&self, callback: SampleCallback, _rate: DeliveryRate) -> Option<RegistrationId> {
        *self.callback.lock().unwrap() = Some(callback);
        Some(RegistrationId::new(1))
    }

    // Keeps the callback, so deliveries continue after deregistration
    fn unregister(&self, _id: RegistrationId) {}
}

/// Test that the heading stays in compass range for arbitrary poses
#[test]
fn test_heading_stays_in_compass_range() {
    for azimuth in (-180..=180).step_by(30) {
        for pitch in (-90..=90).step_by(30) {
            for roll in (-150..=150).step_by(30) {
                let sample = pose(azimuth as f32, pitch as f32, roll as f32);
                let heading = sample_heading(&sample);

                assert!(
                    (0.0..360.0).contains(&heading),
                    "heading {:.3}° out of range for azimuth {}°, pitch {}°, roll {}°",
                    heading,
                    azimuth,
                    pitch,
                    roll
                );
            }
        }
    }
}

/// Test the published worked examples of the heading formula
#[test]
fn test_worked_heading_examples() {
    // Level device facing east
    assert_eq!(wrap_heading(90.0, 0.0), 90.0);

    // 10° east of north with 20° of roll swings past north to 350°
    assert_eq!(wrap_heading(10.0, 20.0), 350.0);

    // Same poses through the full sample pipeline
    assert!((sample_heading(&pose(90.0, 0.0, 0.0)) - 90.0).abs() < 0.01);
    assert!((sample_heading(&pose(10.0, 0.0, 20.0)) - 350.0).abs() < 0.01);
}

/// Test that pitch alone does not move the heading
#[test]
fn test_pitched_device_keeps_heading() {
    let level = sample_heading(&pose(30.0, 0.0, 0.0));
    let pitched = sample_heading(&pose(30.0, 40.0, 0.0));

    assert!(
        (level - pitched).abs() < 0.01,
        "pitch shifted the heading from {:.3}° to {:.3}°",
        level,
        pitched
    );
}

/// Test that sub-threshold jitter produces a single emission
#[test]
fn test_small_changes_produce_single_emission() {
    let sensor = MockSensor::new();
    let mut adapter = HeadingAdapter::new(sensor.clone());
    let rx = subscribe_channel(&mut adapter);

    sensor.deliver(pose(90.0, 0.0, 0.0));
    sensor.deliver(pose(90.5, 0.0, 0.0));

    let first = rx.try_recv().expect("first heading should be emitted");
    assert!((first - 90.0).abs() < 0.01);
    assert!(
        rx.try_recv().is_err(),
        "a 0.5° change should not produce a second emission"
    );
}

/// Test that a change of exactly the threshold is emitted
#[test]
fn test_exact_threshold_change_emits() {
    let mut filter = ChangeFilter::new(1.0);

    assert_eq!(filter.update(90.0), Some(90.0));
    assert_eq!(
        filter.update(91.0),
        Some(91.0),
        "a change of exactly 1.0° must pass the filter"
    );
}

/// Test that an unsubscribed stream goes and stays silent
#[test]
fn test_unsubscribed_stream_is_silent() {
    let sensor = MockSensor::new();
    let mut adapter = HeadingAdapter::new(sensor.clone());
    let rx = subscribe_channel(&mut adapter);

    sensor.deliver(pose(45.0, 0.0, 0.0));
    assert!(rx.try_recv().is_ok());

    adapter.unsubscribe();
    assert!(!adapter.is_subscribed());

    // The service dropped the listener, so delivery finds nobody
    assert!(!sensor.deliver(pose(180.0, 0.0, 0.0)));
    assert!(rx.try_recv().is_err(), "no emissions after unsubscribe");
}

/// Test that a backend still delivering after unregister cannot reach
/// a detached subscriber
#[test]
fn test_detached_sink_silences_lingering_backend() {
    let sensor = LingeringSensor::new();
    let mut adapter = HeadingAdapter::new(sensor.clone());
    let rx = subscribe_channel(&mut adapter);

    assert!(sensor.deliver(pose(90.0, 0.0, 0.0)));
    let heading = rx.try_recv().expect("live stream should emit");
    assert!((heading - 90.0).abs() < 0.01);

    adapter.unsubscribe();
    assert!(!adapter.is_subscribed());

    // The stale callback still runs, but the sink is gone, so every
    // sample must be dropped
    assert!(sensor.deliver(pose(180.0, 0.0, 0.0)));
    assert!(sensor.deliver(pose(270.0, 0.0, 0.0)));
    assert!(
        rx.try_recv().is_err(),
        "no emissions may reach a detached subscriber"
    );
}

/// Test that unsubscribing twice, or with nothing active, is harmless
#[test]
fn test_unsubscribe_is_idempotent() {
    let sensor = MockSensor::new();
    let mut adapter = HeadingAdapter::new(sensor.clone());

    // Nothing active yet
    adapter.unsubscribe();

    let _rx = subscribe_channel(&mut adapter);
    adapter.unsubscribe();
    adapter.unsubscribe();

    let events = sensor.events();
    let unregistered = events
        .iter()
        .filter(|event| matches!(event, SensorEvent::Unregistered { .. }))
        .count();
    assert_eq!(unregistered, 1, "only one unregistration should reach the service");
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, SensorEvent::StaleUnregister { .. })),
        "idempotent unsubscribe must not hit the service with stale handles"
    );
}

/// Test that the filter baseline carries across subscriptions
#[test]
fn test_filter_baseline_carries_across_subscriptions() {
    let sensor = MockSensor::new();
    let mut adapter = HeadingAdapter::new(sensor.clone());

    let rx = subscribe_channel(&mut adapter);
    sensor.deliver(pose(90.0, 0.0, 0.0));
    assert!(rx.try_recv().is_ok());
    adapter.unsubscribe();

    // New subscriber, device barely moved: the 90° baseline holds, so
    // the near-identical heading is suppressed
    let rx = subscribe_channel(&mut adapter);
    sensor.deliver(pose(90.4, 0.0, 0.0));
    assert!(
        rx.try_recv().is_err(),
        "carry-over baseline should suppress a stale reading"
    );

    sensor.deliver(pose(92.0, 0.0, 0.0));
    let heading = rx.try_recv().expect("a real turn should be emitted");
    assert!((heading - 92.0).abs() < 0.01);
}

/// Test that only the first of two subscribers receives headings
#[test]
fn test_second_subscriber_is_rejected() {
    let sensor = MockSensor::new();
    let mut adapter = HeadingAdapter::new(sensor.clone());

    let first_rx = subscribe_channel(&mut adapter);
    let second_rx = subscribe_channel(&mut adapter);

    sensor.deliver(pose(120.0, 0.0, 0.0));

    assert!(first_rx.try_recv().is_ok(), "first subscriber should receive");
    assert!(second_rx.try_recv().is_err(), "second subscriber should not");

    let registrations = sensor
        .events()
        .iter()
        .filter(|event| matches!(event, SensorEvent::Registered { .. }))
        .count();
    assert_eq!(registrations, 1, "second subscribe must not register again");
}

/// Test that a device without the sensor yields an empty stream
#[test]
fn test_missing_sensor_yields_empty_stream() {
    let sensor = MockSensor::unavailable();
    let mut adapter = HeadingAdapter::new(sensor.clone());

    let rx = subscribe_channel(&mut adapter);

    // Subscriber is attached, but no registration ever reached a sensor
    assert!(adapter.is_subscribed());
    assert!(sensor.events().is_empty());
    assert!(!sensor.deliver(pose(90.0, 0.0, 0.0)));
    assert!(rx.try_recv().is_err());

    // Tear-down is just as quiet
    adapter.unsubscribe();
    assert!(!adapter.is_subscribed());
    assert!(sensor.events().is_empty());
}

/// Test delivery from a dedicated sensor thread
#[test]
fn test_delivery_from_sensor_thread() {
    let sensor = MockSensor::new();
    let mut adapter = HeadingAdapter::new(sensor.clone());
    let rx = subscribe_channel(&mut adapter);

    let service = sensor.clone();
    let feeder = thread::spawn(move || {
        for azimuth in [10.0, 50.0, 120.0] {
            service.deliver(pose(azimuth, 0.0, 0.0));
        }
    });
    feeder.join().expect("feeder thread panicked");

    let received: Vec<f64> = rx.try_iter().collect();
    assert_eq!(received.len(), 3, "each 40°+ turn should be emitted");
    assert!((received[0] - 10.0).abs() < 0.01);
    assert!((received[2] - 120.0).abs() < 0.01);
}

/// Test that the heading accessor tracks the filter baseline
#[test]
fn test_heading_accessor_tracks_emissions() {
    let sensor = MockSensor::new();
    let mut adapter = HeadingAdapter::new(sensor.clone());
    assert_eq!(adapter.heading(), 0.0);

    let _rx = subscribe_channel(&mut adapter);
    sensor.deliver(pose(135.0, 0.0, 0.0));
    assert!((adapter.heading() - 135.0).abs() < 0.01);

    // Suppressed samples leave the baseline untouched
    sensor.deliver(pose(135.3, 0.0, 0.0));
    assert!((adapter.heading() - 135.0).abs() < 0.01);

    adapter.unsubscribe();
    assert!(
        (adapter.heading() - 135.0).abs() < 0.01,
        "unsubscribe must not reset the heading"
    );
}

/// Test a full sweep of a slowly turning device
#[test]
fn test_stream_follows_a_turning_device() {
    let sensor = MockSensor::new();
    let settings = CompassSettings {
        filter_threshold: 1.0,
        rate: DeliveryRate::Ui,
    };
    let mut adapter = HeadingAdapter::with_settings(sensor.clone(), settings);
    let rx = subscribe_channel(&mut adapter);

    // 0° to 180° in 10° steps; the 0° reading matches the initial
    // baseline and is suppressed, every later step clears the threshold
    for step in 0..=18 {
        sensor.deliver(pose(step as f32 * 10.0, 0.0, 0.0));
    }

    let emitted: Vec<f64> = rx.try_iter().collect();
    assert_eq!(emitted.len(), 18, "expected one emission per 10° step");
    assert!((emitted[0] - 10.0).abs() < 0.01);
    assert!((emitted[17] - 180.0).abs() < 0.01);
    assert!(
        emitted.windows(2).all(|pair| pair[0] < pair[1]),
        "emissions should be monotonically increasing on this sweep"
    );

    // Hand shake around the final pose stays below the threshold
    sensor.deliver(pose(180.2, 0.0, 0.0));
    sensor.deliver(pose(179.9, 0.0, 0.0));
    assert!(rx.try_recv().is_err(), "jitter after the sweep should be silent");
}
