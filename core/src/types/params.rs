use super::RigidTransform;
use nalgebra::Vector3;

/// Lower bound of the CT intensity clamp applied before the transfer function
pub const INTENSITY_CLAMP_MIN: f64 = -1024.0;

/// Upper bound of the CT intensity clamp
pub const INTENSITY_CLAMP_MAX: f64 = 1500.0;

/// Attenuation coefficient of the X-ray transfer function
pub const TRANSFER_BETA: f64 = 0.8;

/// Complete parameter set for one DRR
///
/// This is everything the external ray-cast/resample pipeline needs. It owns
/// no resources and is freely copied.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectionParameters {
    pub transform: RigidTransform,
    /// Offset of the rotation centre from the volume centre
    pub center: Vector3<f64>,
    pub threshold: f64,
    pub source_image_distance: f64,
    pub output_width: u32,
    pub output_height: u32,
    pub intensity_clamp_min: f64,
    pub intensity_clamp_max: f64,
    pub transfer_beta: f64,
}

impl ProjectionParameters {
    /// Creates parameters with the fixed clamp and transfer constants
    pub fn new(
        transform: RigidTransform,
        threshold: f64,
        source_image_distance: f64,
        output_width: u32,
        output_height: u32,
    ) -> Self {
        Self {
            transform,
            center: Vector3::zeros(),
            threshold,
            source_image_distance,
            output_width,
            output_height,
            intensity_clamp_min: INTENSITY_CLAMP_MIN,
            intensity_clamp_max: INTENSITY_CLAMP_MAX,
            transfer_beta: TRANSFER_BETA,
        }
    }

    /// Number of pixels in the output image
    pub fn output_area(&self) -> u64 {
        u64::from(self.output_width) * u64::from(self.output_height)
    }
}
