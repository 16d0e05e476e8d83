//! [![github]](https://github.com/wboayue/compass-stream)&ensp;[![crates-io]](https://crates.io/crates/compass-stream)&ensp;[![license]](https://opensource.org/licenses/MIT)
//!
//! [github]: https://img.shields.io/badge/github-8da0cb?style=for-the-badge&labelColor=555555&logo=github
//! [crates-io]: https://img.shields.io/badge/crates.io-fc8d62?style=for-the-badge&labelColor=555555&logo=rust
//! [license]: https://img.shields.io/badge/License-MIT-blue.svg?style=for-the-badge&labelColor=555555
//!
//! compass-stream - a change-filtered compass heading stream over a device rotation-vector sensor
//!
//! This library turns raw rotation-vector samples, as reported by the fused
//! orientation sensors on mobile devices, into a stream of compass headings.
//! Each sample is decomposed into azimuth, pitch, and roll following the
//! Android `SensorManager` conventions, corrected for device roll so the
//! value reads like a handheld compass, and filtered so subscribers only
//! hear about changes large enough to matter.
//!
//! # Features
//!
//! - Rotation matrix reconstruction from three- or four-component
//!   rotation vectors
//! - Angle decomposition matching mobile sensor stacks, so headings agree
//!   with platform compass apps
//! - Tilt-corrected flat-compass heading normalized into [0, 360)
//! - Change filtering with a configurable threshold (1° by default)
//! - Single-subscriber stream with idempotent unsubscribe and a filter
//!   baseline that carries across subscriptions
//! - Silent no-op on devices without a rotation-vector sensor
//! - In-memory mock sensor service for tests and simulation
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::mpsc;
//! use compass_stream::{HeadingAdapter, MockSensor, RotationSample};
//!
//! // A mock sensor here; a platform backend implements RotationSensor
//! // the same way in production.
//! let sensor = MockSensor::new();
//! let mut adapter = HeadingAdapter::new(sensor.clone());
//!
//! let (tx, rx) = mpsc::channel();
//! adapter.subscribe(move |heading| {
//!     let _ = tx.send(heading);
//! });
//!
//! // Device flat on the table, pointing 90° east of north
//! sensor.deliver(RotationSample::from_angles(90f32.to_radians(), 0.0, 0.0));
//!
//! let heading = rx.recv().unwrap();
//! assert!((heading - 90.0).abs() < 0.01);
//!
//! adapter.unsubscribe();
//! ```
//!
//! For more documentation and examples, see: <https://github.com/wboayue/compass-stream>

mod adapter;
pub mod filter;
pub mod heading;
mod mock;
pub mod orientation;
mod sensor;
mod types;

// Re-export all public types and functions
pub use adapter::{HeadingAdapter, HeadingSink};
pub use filter::ChangeFilter;
pub use heading::{flat_heading, sample_heading, wrap_heading};
pub use mock::{MockSensor, SensorEvent};
pub use orientation::{OrientationAngles, RotationSample, orientation_angles};
pub use sensor::{RegistrationId, RotationSensor, SampleCallback};
pub use types::*;
