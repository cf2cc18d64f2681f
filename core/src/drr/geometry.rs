use crate::geometry::euler::deg_to_rad;
use crate::types::{ProjectionParameters, VolumeGeometry};
use nalgebra::{Point3, Vector3};

/// Resolved inputs for the ray-cast interpolator and resample filter
///
/// Everything here is derived from [`ProjectionParameters`] and the CT
/// layout. The rotation centre sits in the middle of the volume, the focal
/// point half the source-to-image distance in front of it and the detector
/// plane half the distance behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct DrrGeometry {
    /// Translation of the Euler transform
    pub translation: Vector3<f64>,
    /// Rotation `(x, y, z)` in radians, applied Z-Y-X
    pub rotation_rad: Vector3<f64>,
    /// Rotation centre of the Euler transform
    pub center: Point3<f64>,
    /// Virtual X-ray source position
    pub focal_point: Point3<f64>,
    /// Ray-cast intensity threshold
    pub threshold: f64,
    /// Resampled image size, one slice deep
    pub output_size: [usize; 3],
    pub output_spacing: Vector3<f64>,
    pub output_origin: Point3<f64>,
}

impl DrrGeometry {
    /// Resolves the pipeline inputs for `params` over `volume`
    pub fn new(params: &ProjectionParameters, volume: &VolumeGeometry) -> Self {
        let image_center = volume.center();
        let half_sid = params.source_image_distance / 2.0;
        let width = params.output_width as f64;
        let height = params.output_height as f64;

        let rotation = params.transform.rotation_deg;

        Self {
            translation: params.transform.translation,
            rotation_rad: Vector3::new(
                deg_to_rad(rotation.x),
                deg_to_rad(rotation.y),
                deg_to_rad(rotation.z),
            ),
            center: image_center + params.center,
            focal_point: Point3::new(image_center.x, image_center.y, image_center.z - half_sid),
            threshold: params.threshold,
            output_size: [
                params.output_width as usize,
                params.output_height as usize,
                1,
            ],
            output_spacing: Vector3::new(1.0, 1.0, 1.0),
            output_origin: Point3::new(
                image_center.x - (width - 1.0) / 2.0,
                image_center.y - (height - 1.0) / 2.0,
                image_center.z + half_sid,
            ),
        }
    }

    /// Distance between the focal point and the detector plane
    pub fn source_to_detector(&self) -> f64 {
        self.output_origin.z - self.focal_point.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RigidTransform;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn volume() -> VolumeGeometry {
        VolumeGeometry::new(
            Point3::new(-100.0, -100.0, 0.0),
            Vector3::new(0.5, 0.5, 1.0),
            [400, 400, 200],
        )
    }

    fn params() -> ProjectionParameters {
        ProjectionParameters::new(
            RigidTransform::from_arrays([75.0, 50.0, 0.0], [180.0, -90.0, 0.0]),
            50.0,
            400.0,
            512,
            256,
        )
    }

    #[test]
    fn test_focal_point_and_detector() {
        let geometry = DrrGeometry::new(&params(), &volume());

        assert_eq!(geometry.center, Point3::new(0.0, 0.0, 100.0));
        assert_eq!(geometry.focal_point, Point3::new(0.0, 0.0, -100.0));
        assert_relative_eq!(geometry.output_origin.x, -255.5);
        assert_relative_eq!(geometry.output_origin.y, -127.5);
        assert_relative_eq!(geometry.output_origin.z, 300.0);
        assert_relative_eq!(geometry.source_to_detector(), 400.0);
    }

    #[test]
    fn test_rotation_in_radians() {
        let geometry = DrrGeometry::new(&params(), &volume());
        assert_relative_eq!(geometry.rotation_rad.x, PI);
        assert_relative_eq!(geometry.rotation_rad.y, -PI / 2.0);
        assert_relative_eq!(geometry.rotation_rad.z, 0.0);
        assert_eq!(geometry.translation, Vector3::new(75.0, 50.0, 0.0));
    }

    #[test]
    fn test_output_layout() {
        let geometry = DrrGeometry::new(&params(), &volume());
        assert_eq!(geometry.output_size, [512, 256, 1]);
        assert_eq!(geometry.output_spacing, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(geometry.threshold, 50.0);
    }

    #[test]
    fn test_center_offset() {
        let mut p = params();
        p.center = Vector3::new(1.0, -2.0, 3.0);
        let geometry = DrrGeometry::new(&p, &volume());
        assert_eq!(geometry.center, Point3::new(1.0, -2.0, 103.0));
        // Focal point stays on the image centre
        assert_eq!(geometry.focal_point, Point3::new(0.0, 0.0, -100.0));
    }
}
