use crate::geometry::euler::{extrinsic_zyx_angles, extrinsic_zyx_rotation, homogeneous};
use nalgebra::{Matrix4, Vector3};
use std::fmt;

/// Rigid pose handed to the ray-cast transform
///
/// `rotation_deg` holds `(x, y, z)` angles in degrees, in the order the
/// consuming Euler transform takes them. [`RigidTransform::from_matrix`] and
/// [`RigidTransform::to_matrix`] are exact inverses of each other: the matrix
/// carries the negated translation in its last column and its rotation block
/// is `Rx(x) · Ry(y) · Rz(z)`.
///
/// # Example
///
/// ```
/// use snsim_core::RigidTransform;
///
/// let pose = RigidTransform::from_arrays([75.0, 50.0, 0.0], [180.0, -90.0, 0.0]);
/// assert_eq!(pose.translation.x, 75.0);
/// assert_eq!(pose.rotation_deg.y, -90.0);
/// assert!(RigidTransform::identity().is_identity(1e-12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct RigidTransform {
    /// Translation in millimetres
    pub translation: Vector3<f64>,
    /// Euler angles `(x, y, z)` in degrees
    pub rotation_deg: Vector3<f64>,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    /// Creates a new RigidTransform
    pub fn new(translation: Vector3<f64>, rotation_deg: Vector3<f64>) -> Self {
        Self {
            translation,
            rotation_deg,
        }
    }

    /// Creates a RigidTransform from plain arrays
    pub fn from_arrays(translation: [f64; 3], rotation_deg: [f64; 3]) -> Self {
        Self::new(Vector3::from(translation), Vector3::from(rotation_deg))
    }

    /// Identity transform (no translation, no rotation)
    pub fn identity() -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros())
    }

    /// Decomposes a homogeneous matrix
    ///
    /// Translation is the negated last column. Rotation comes from the
    /// extrinsic Z-Y-X angles of the upper-left block, exposed reversed so
    /// the tuple reads `(x, y, z)`.
    pub fn from_matrix(matrix: &Matrix4<f64>) -> Self {
        let translation = -matrix.fixed_view::<3, 1>(0, 3).into_owned();
        let zyx = extrinsic_zyx_angles(&matrix.fixed_view::<3, 3>(0, 0).into_owned());
        Self::new(translation, Vector3::new(zyx.z, zyx.y, zyx.x))
    }

    /// Composes the homogeneous matrix that [`RigidTransform::from_matrix`] decomposes
    pub fn to_matrix(&self) -> Matrix4<f64> {
        let rotation =
            extrinsic_zyx_rotation(self.rotation_deg.z, self.rotation_deg.y, self.rotation_deg.x);
        homogeneous(&rotation, &(-self.translation))
    }

    /// Returns true if both translation and rotation are within `epsilon` of zero
    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.translation.amax() < epsilon && self.rotation_deg.amax() < epsilon
    }
}

impl fmt::Display for RigidTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t=({:.3}, {:.3}, {:.3}) mm, r=({:.3}, {:.3}, {:.3}) deg",
            self.translation.x,
            self.translation.y,
            self.translation.z,
            self.rotation_deg.x,
            self.rotation_deg.y,
            self.rotation_deg.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matrix_roundtrip() {
        let pose = RigidTransform::from_arrays([12.5, -40.0, 220.0], [25.0, -35.0, 140.0]);
        let decoded = RigidTransform::from_matrix(&pose.to_matrix());
        assert_relative_eq!(decoded.translation, pose.translation, epsilon = 1e-9);
        assert_relative_eq!(decoded.rotation_deg, pose.rotation_deg, epsilon = 1e-9);
    }

    #[test]
    fn test_from_matrix_negates_translation() {
        let mut m = Matrix4::identity();
        m[(0, 3)] = 5.0;
        m[(1, 3)] = -6.0;
        m[(2, 3)] = 7.0;
        let pose = RigidTransform::from_matrix(&m);
        assert_relative_eq!(pose.translation, Vector3::new(-5.0, 6.0, -7.0));
        assert!(pose.rotation_deg.amax() < 1e-12);
    }

    #[test]
    fn test_identity() {
        let pose = RigidTransform::default();
        assert!(pose.is_identity(1e-12));
        assert_relative_eq!(pose.to_matrix(), Matrix4::identity(), epsilon = 1e-12);
        assert!(!RigidTransform::from_arrays([0.0, 0.1, 0.0], [0.0; 3]).is_identity(1e-3));
    }

    #[test]
    fn test_display() {
        let pose = RigidTransform::from_arrays([75.0, 50.0, 0.0], [180.0, -90.0, 0.0]);
        assert_eq!(
            pose.to_string(),
            "t=(75.000, 50.000, 0.000) mm, r=(180.000, -90.000, 0.000) deg"
        );
    }
}
