//! Live heading stream demo
//!
//! Simulates a handheld device turning on the spot and prints each
//! heading the stream emits. Samples are delivered from a feeder
//! thread at the configured rate, the way a platform sensor service
//! would drive the stream.
//!
//! Run with: cargo run --example live_stream

use std::sync::mpsc;
use std::thread;

use compass_stream::{CompassSettings, DeliveryRate, HeadingAdapter, MockSensor, RotationSample};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let sensor = MockSensor::new();
    let settings = CompassSettings {
        filter_threshold: 1.0,
        rate: DeliveryRate::Game,
    };
    let mut adapter = HeadingAdapter::with_settings(sensor.clone(), settings);

    let (tx, rx) = mpsc::channel();
    adapter.subscribe(move |heading| {
        let _ = tx.send(heading);
    });

    let interval = adapter.settings().rate.interval();
    let device = sensor.clone();
    let feeder = thread::spawn(move || {
        for step in 0..120 {
            let azimuth = simulated_azimuth(step);
            device.deliver(RotationSample::from_angles(azimuth.to_radians(), 0.0, 0.0));
            thread::sleep(interval);
        }
    });

    let printer = thread::spawn(move || {
        for heading in rx {
            println!("heading {heading:6.1}°  {}", cardinal(heading));
        }
    });

    feeder.join().expect("feeder thread panicked");

    // Detaching the sink closes the channel and ends the printer
    adapter.unsubscribe();
    printer.join().expect("printer thread panicked");
}

/// Azimuth in degrees for one step of the simulated turn
fn simulated_azimuth(step: u32) -> f32 {
    let t = step as f32;

    // Quarter turn toward east, then a swing back past north
    let base = if t < 60.0 {
        t * 1.5
    } else {
        90.0 - (t - 60.0) * 2.0
    };

    base + 0.3 * (t * 1.7).sin() // hand shake
}

/// Compass point for a heading in degrees
fn cardinal(heading: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    POINTS[(((heading + 22.5) / 45.0) as usize) % 8]
}
