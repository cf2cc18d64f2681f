//! Euler-angle conventions shared by the projection pose paths
//!
//! Two conventions meet here and must not be mixed up:
//!
//! - **Construction** ([`pose_matrix`]): rotations applied as `RotateZ`,
//!   `RotateY`, `RotateX` on a pre-multiplying transform, giving
//!   `R = Rz · Ry · Rx`, with the translation written straight into the last
//!   column.
//! - **Decomposition** ([`extrinsic_zyx_angles`]): angles of an extrinsic
//!   Z-Y-X sequence, `R = Rx(γ) · Ry(β) · Rz(α)`, returned as `(α, β, γ)`.
//!   Callers expose them reversed as `(x, y, z) = (γ, β, α)`.
//!
//! The two agree for single-axis rotations only. The consuming ray-cast
//! transform receives the decomposed angles, so both paths stay exactly as
//! written.

use nalgebra::{Matrix3, Matrix4, Rotation3, Vector3};
use std::f64::consts::PI;

/// Below this cosine of the middle angle the decomposition is in gimbal lock
const GIMBAL_EPSILON: f64 = 1e-9;

/// Converts degrees to radians as `degrees * (π / 180)`
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

/// Converts radians to degrees
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// Rotation about X by `degrees`
pub fn rotation_x(degrees: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), deg_to_rad(degrees)).into_inner()
}

/// Rotation about Y by `degrees`
pub fn rotation_y(degrees: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), deg_to_rad(degrees)).into_inner()
}

/// Rotation about Z by `degrees`
pub fn rotation_z(degrees: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), deg_to_rad(degrees)).into_inner()
}

/// Builds a homogeneous matrix from a 3x3 block and a last column
pub fn homogeneous(rotation: &Matrix3<f64>, column: &Vector3<f64>) -> Matrix4<f64> {
    let mut mat = Matrix4::identity();
    mat.fixed_view_mut::<3, 3>(0, 0).copy_from(rotation);
    mat.fixed_view_mut::<3, 1>(0, 3).copy_from(column);
    mat
}

/// Builds a pose with the construction convention
///
/// `rotation_deg` holds `(x, y, z)` angles. The rotation block is
/// `Rz(z) · Ry(y) · Rx(x)` and `translation` is placed in the last column
/// without being rotated.
pub fn pose_matrix(translation: &Vector3<f64>, rotation_deg: &Vector3<f64>) -> Matrix4<f64> {
    let rotation =
        rotation_z(rotation_deg.z) * rotation_y(rotation_deg.y) * rotation_x(rotation_deg.x);
    homogeneous(&rotation, translation)
}

/// Rotation matching [`extrinsic_zyx_angles`]: `Rx(x) · Ry(y) · Rz(z)`
pub fn extrinsic_zyx_rotation(z_deg: f64, y_deg: f64, x_deg: f64) -> Matrix3<f64> {
    rotation_x(x_deg) * rotation_y(y_deg) * rotation_z(z_deg)
}

/// Extracts extrinsic Z-Y-X Euler angles in degrees
///
/// Returns `(z, y, x)` such that `r ≈ Rx(x) · Ry(y) · Rz(z)`. The middle
/// angle lies in `[-90, 90]`, the others in `(-180, 180]`. In gimbal lock the
/// X angle is set to zero and the remaining rotation is attributed to Z.
pub fn extrinsic_zyx_angles(r: &Matrix3<f64>) -> Vector3<f64> {
    let sin_y = r[(0, 2)].clamp(-1.0, 1.0);
    let y = sin_y.asin();
    let cos_y = r[(0, 0)].hypot(r[(0, 1)]);

    let (z, x) = if cos_y > GIMBAL_EPSILON {
        (
            (-r[(0, 1)]).atan2(r[(0, 0)]),
            (-r[(1, 2)]).atan2(r[(2, 2)]),
        )
    } else {
        (r[(1, 0)].atan2(r[(1, 1)]), 0.0)
    };

    Vector3::new(rad_to_deg(z), rad_to_deg(y), rad_to_deg(x))
}
