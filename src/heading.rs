//! Flat-compass heading computation
//!
//! A compass needle shows the horizontal direction the top of the device
//! points, so the raw azimuth needs a roll correction before it reads
//! like a handheld compass. This module applies that correction and
//! normalizes the result into compass range.

use crate::orientation::{RotationSample, orientation_angles};

/// Combine azimuth and roll into a compass heading in degrees
///
/// Applies the roll correction and wraps the result into [0, 360),
/// with 0° = north, 90° = east:
///
/// ```text
/// heading = ((azimuth + 360) mod 360 - roll + 360) mod 360
/// ```
///
/// # Arguments
/// * `azimuth_deg` - Azimuth angle in degrees, as produced by the
///   orientation decomposition (within ±180°)
/// * `roll_deg` - Roll angle in degrees (within ±180°)
///
/// # Returns
/// Compass heading in degrees, in [0, 360)
///
/// # Example
/// ```
/// use compass_stream::wrap_heading;
///
/// assert_eq!(wrap_heading(90.0, 0.0), 90.0);   // facing east, level
/// assert_eq!(wrap_heading(10.0, 20.0), 350.0); // roll pulls past north
/// ```
pub fn wrap_heading(azimuth_deg: f64, roll_deg: f64) -> f64 {
    ((azimuth_deg + 360.0) % 360.0 - roll_deg + 360.0) % 360.0
}

/// Compute the flat-compass heading for decomposed orientation angles
///
/// Converts the radian angles to degrees in double precision, then
/// applies [`wrap_heading`].
///
/// # Arguments
/// * `azimuth_rad` - Azimuth in radians
/// * `roll_rad` - Roll in radians
///
/// # Returns
/// Compass heading in degrees, in [0, 360)
pub fn flat_heading(azimuth_rad: f32, roll_rad: f32) -> f64 {
    wrap_heading((azimuth_rad as f64).to_degrees(), (roll_rad as f64).to_degrees())
}

/// Compute the compass heading for a raw rotation-vector sample
///
/// Runs the full pipeline: rotation matrix, angle decomposition, roll
/// correction, and compass-range wrap.
///
/// # Example
/// ```
/// use compass_stream::{RotationSample, sample_heading};
///
/// let west = RotationSample::from_angles(-90f32.to_radians(), 0.0, 0.0);
/// assert!((sample_heading(&west) - 270.0).abs() < 0.01);
/// ```
pub fn sample_heading(sample: &RotationSample) -> f64 {
    let angles = orientation_angles(&sample.rotation_matrix());
    flat_heading(angles.azimuth, angles.roll)
}
