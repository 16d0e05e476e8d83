//! Rotation-vector samples and orientation angle decomposition
//!
//! Mobile sensor stacks report fused device orientation as a rotation
//! vector: the imaginary part of a unit quaternion rotating the device
//! frame into the world frame (x east, y north, z up). This module
//! reconstructs the rotation matrix from such a sample and decomposes it
//! into azimuth, pitch, and roll the same way Android's `SensorManager`
//! does, so headings computed here agree with platform compass apps.

use nalgebra::{Matrix3, UnitQuaternion, Vector3};

/// A single rotation-vector sensor reading
///
/// `vector` holds the quaternion components (x sin θ/2, y sin θ/2,
/// z sin θ/2). Older sensor revisions report only these three values;
/// `scalar` is `None` in that case and the real part is reconstructed
/// from the unit constraint when the matrix is built.
///
/// # Example
/// ```
/// use compass_stream::RotationSample;
///
/// // Device flat on a table, facing 90° east of north
/// let sample = RotationSample::from_angles(90f32.to_radians(), 0.0, 0.0);
/// let angles = compass_stream::orientation_angles(&sample.rotation_matrix());
/// assert!((angles.azimuth.to_degrees() - 90.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSample {
    /// Imaginary quaternion components reported by the sensor
    pub vector: Vector3<f32>,
    /// Real quaternion component, when the sensor reports one
    pub scalar: Option<f32>,
}

impl Default for RotationSample {
    fn default() -> Self {
        // Identity orientation: device flat, facing north
        Self {
            vector: Vector3::zeros(),
            scalar: Some(1.0),
        }
    }
}

impl RotationSample {
    /// Create a sample from all four quaternion components
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            vector: Vector3::new(x, y, z),
            scalar: Some(w),
        }
    }

    /// Create a sample from the three imaginary components only
    ///
    /// Mirrors sensors that omit the scalar part. The real component is
    /// recovered as `sqrt(1 - |v|²)` when the rotation matrix is built.
    pub fn three_component(x: f32, y: f32, z: f32) -> Self {
        Self {
            vector: Vector3::new(x, y, z),
            scalar: None,
        }
    }

    /// Create a sample from a unit quaternion
    ///
    /// The quaternion is stored as given. Sensors report the hemisphere
    /// with a non-negative scalar part; callers synthesizing samples
    /// should do the same.
    pub fn from_quaternion(quaternion: &UnitQuaternion<f32>) -> Self {
        Self {
            vector: Vector3::new(quaternion.i, quaternion.j, quaternion.k),
            scalar: Some(quaternion.w),
        }
    }

    /// Create the sample a sensor would report for the given orientation
    ///
    /// Useful for tests and simulation. All angles are in radians:
    /// `azimuth` is the rotation about the vertical axis (0 = north,
    /// positive turns the device toward east), `pitch` the rotation about
    /// the device x axis, and `roll` the rotation about the device y
    /// axis, following the same conventions [`orientation_angles`]
    /// recovers.
    ///
    /// # Example
    /// ```
    /// use compass_stream::{RotationSample, orientation_angles};
    ///
    /// let sample = RotationSample::from_angles(1.0, -0.4, 0.7);
    /// let angles = orientation_angles(&sample.rotation_matrix());
    /// assert!((angles.azimuth - 1.0).abs() < 1e-4);
    /// assert!((angles.pitch - (-0.4)).abs() < 1e-4);
    /// assert!((angles.roll - 0.7).abs() < 1e-4);
    /// ```
    pub fn from_angles(azimuth: f32, pitch: f32, roll: f32) -> Self {
        let quaternion = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -azimuth)
            * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -pitch)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), roll);
        Self::from_quaternion(&quaternion)
    }

    /// Build the device-to-world rotation matrix for this sample
    ///
    /// Expanded entry by entry to match the matrix mobile sensor stacks
    /// construct from a rotation vector, so decomposed angles agree with
    /// what a device would report for the same sample.
    ///
    /// # Returns
    /// Rotation matrix transforming device coordinates into world
    /// coordinates (x east, y north, z up)
    pub fn rotation_matrix(&self) -> Matrix3<f32> {
        let q1 = self.vector.x;
        let q2 = self.vector.y;
        let q3 = self.vector.z;
        let q0 = match self.scalar {
            Some(scalar) => scalar,
            None => {
                // Unit-quaternion residual, clamped so float drift in the
                // vector part cannot produce a NaN scalar
                let residual = 1.0 - q1 * q1 - q2 * q2 - q3 * q3;
                if residual > 0.0 { residual.sqrt() } else { 0.0 }
            }
        };

        let sq_q1 = 2.0 * q1 * q1;
        let sq_q2 = 2.0 * q2 * q2;
        let sq_q3 = 2.0 * q3 * q3;
        let q1_q2 = 2.0 * q1 * q2;
        let q3_q0 = 2.0 * q3 * q0;
        let q1_q3 = 2.0 * q1 * q3;
        let q2_q0 = 2.0 * q2 * q0;
        let q2_q3 = 2.0 * q2 * q3;
        let q1_q0 = 2.0 * q1 * q0;

        Matrix3::new(
            1.0 - sq_q2 - sq_q3,
            q1_q2 - q3_q0,
            q1_q3 + q2_q0,
            q1_q2 + q3_q0,
            1.0 - sq_q1 - sq_q3,
            q2_q3 - q1_q0,
            q1_q3 - q2_q0,
            q2_q3 + q1_q0,
            1.0 - sq_q1 - sq_q2,
        )
    }
}

/// Device orientation decomposed into compass angles
///
/// All angles are in radians. Azimuth and roll are in (-π, π],
/// pitch in [-π/2, π/2].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationAngles {
    /// Rotation about the vertical axis (0 = north, positive toward east)
    pub azimuth: f32,
    /// Rotation about the device x axis
    pub pitch: f32,
    /// Rotation about the device y axis
    pub roll: f32,
}

/// Decompose a device-to-world rotation matrix into orientation angles
///
/// Uses the azimuth/pitch/roll extraction mobile sensor stacks apply to
/// rotation-vector matrices:
///
/// - azimuth = atan2(m01, m11)
/// - pitch = asin(-m21)
/// - roll = atan2(-m20, m22)
///
/// The asin argument is clamped to [-1, 1] so numerical drift in the
/// matrix cannot produce a NaN pitch.
///
/// # Arguments
/// * `rotation` - Device-to-world rotation matrix, as built by
///   [`RotationSample::rotation_matrix`]
///
/// # Returns
/// Orientation angles in radians
///
/// # Example
/// ```
/// use compass_stream::{RotationSample, orientation_angles};
///
/// let sample = RotationSample::from_angles(45f32.to_radians(), 0.0, 0.0);
/// let angles = orientation_angles(&sample.rotation_matrix());
/// assert!((angles.azimuth.to_degrees() - 45.0).abs() < 0.01);
/// ```
pub fn orientation_angles(rotation: &Matrix3<f32>) -> OrientationAngles {
    OrientationAngles {
        azimuth: rotation[(0, 1)].atan2(rotation[(1, 1)]),
        pitch: (-rotation[(2, 1)]).clamp(-1.0, 1.0).asin(),
        roll: (-rotation[(2, 0)]).atan2(rotation[(2, 2)]),
    }
}
