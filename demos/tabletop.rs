//! Table-top walkthrough of the heading pipeline
//!
//! Feeds a scripted sequence of device poses through the stream and
//! shows which ones make it past the change filter. Poses that only
//! jitter, or that change pitch alone, produce no emission.
//!
//! Run with: cargo run --example tabletop

use compass_stream::{HeadingAdapter, MockSensor, RotationSample};

fn main() {
    env_logger::init();

    let sensor = MockSensor::new();
    let mut adapter = HeadingAdapter::new(sensor.clone());
    adapter.subscribe(|heading| println!("    -> emitted {heading:.1}°"));

    let poses = [
        ("flat, facing north", 0.0f32, 0.0f32, 0.0f32),
        ("turned east", 90.0, 0.0, 0.0),
        ("nudged slightly", 90.4, 0.0, 0.0),
        ("turned south-east", 135.0, 0.0, 0.0),
        ("rolled 20° in the hand", 135.0, 0.0, 20.0),
        ("tipped up 30°", 135.0, 30.0, 20.0),
        ("back near north, still rolled", 10.0, 0.0, 20.0),
    ];

    for (label, azimuth, pitch, roll) in poses {
        println!("{label} (azimuth {azimuth}°, pitch {pitch}°, roll {roll}°)");
        sensor.deliver(RotationSample::from_angles(
            azimuth.to_radians(),
            pitch.to_radians(),
            roll.to_radians(),
        ));
    }

    adapter.unsubscribe();

    // A device without the sensor produces an empty stream, not an error
    let missing = MockSensor::unavailable();
    let mut silent = HeadingAdapter::new(missing.clone());
    silent.subscribe(|heading| println!("unexpected emission: {heading:.1}°"));
    missing.deliver(RotationSample::default());
    silent.unsubscribe();
    println!("device without a rotation-vector sensor: stream stayed empty");
}
