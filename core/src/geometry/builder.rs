use super::euler::pose_matrix;
use super::tracking::Calibration;
use crate::error::{Result, SnsimError};
use crate::types::{
    ProjectionMode, ProjectionParameters, ProjectionRequest, RigidTransform,
    DEFAULT_FOCAL_DISTANCE, DEFAULT_OUTPUT_SIZE,
};
use log::{debug, warn};
use nalgebra::{Matrix4, Point3, Vector3};

/// Determinants below this magnitude are treated as singular
const SINGULAR_EPSILON: f64 = 1e-12;

/// Builds the DRR parameters for one projection request
///
/// Preset modes return their fixed pose. [`ProjectionMode::Mode2`] composes
/// `inverse(C) · T · inverse(F)` from the volume centre `C`, one snapshot of
/// the tracked source `T` and the focal offset `F`, then decomposes the
/// product with [`RigidTransform::from_matrix`].
///
/// Unknown modes and requests with a non-positive focal distance or a zero
/// output dimension fall back to the identity pose. Offending scalars are
/// replaced with their defaults so the returned parameters always have a
/// positive source-to-image distance and non-zero size.
///
/// # Errors
///
/// - [`SnsimError::CalibrationUnavailable`] if a tracked projection has no
///   calibration inputs
/// - [`SnsimError::SingularMatrix`] if the tracked transform cannot be
///   inverted
///
/// # Example
///
/// ```
/// use snsim_core::{build_parameters, ProjectionMode, ProjectionRequest};
///
/// let request = ProjectionRequest::new(ProjectionMode::Mode1Lateral, 400.0, 50.0, 512, 512);
/// let params = build_parameters(&request, None).unwrap();
///
/// assert_eq!(params.transform.translation.x, 75.0);
/// assert_eq!(params.transform.rotation_deg.y, -90.0);
/// assert_eq!(params.source_image_distance, 400.0);
/// assert_eq!(params.intensity_clamp_max, 1500.0);
/// ```
pub fn build_parameters(
    request: &ProjectionRequest,
    calibration: Option<&Calibration<'_>>,
) -> Result<ProjectionParameters> {
    if !request.is_valid() {
        warn!(
            "Invalid projection request (focal {}, size {}x{}), using identity pose",
            request.focal_distance, request.output_width, request.output_height
        );
        return Ok(fallback_parameters(request));
    }

    let transform = match request.mode {
        ProjectionMode::Mode2 => {
            let calibration = calibration.ok_or_else(|| {
                SnsimError::CalibrationUnavailable(
                    "tracked projection needs a volume centre and tracking source".to_string(),
                )
            })?;
            tracked_transform(calibration, request.focal_distance)?
        }
        ProjectionMode::Unknown => {
            warn!("Unknown projection mode, using identity pose");
            RigidTransform::identity()
        }
        mode => preset_transform(mode).unwrap_or_default(),
    };

    debug!("Projection {} -> {}", request.mode, transform);

    Ok(ProjectionParameters::new(
        transform,
        request.intensity_threshold,
        request.focal_distance,
        request.output_width,
        request.output_height,
    ))
}

/// Fixed pose of a preset view, `None` for non-preset modes
pub fn preset_transform(mode: ProjectionMode) -> Option<RigidTransform> {
    match mode {
        ProjectionMode::Mode1Lateral => Some(RigidTransform::from_arrays(
            [75.0, 50.0, 0.0],
            [180.0, -90.0, 0.0],
        )),
        ProjectionMode::Mode1Anterior => Some(RigidTransform::from_arrays(
            [10.0, 85.0, 0.0],
            [90.0, 0.0, 180.0],
        )),
        ProjectionMode::Mode1Default => Some(RigidTransform::from_arrays(
            [0.0, 100.0, 0.0],
            [90.0, 180.0, 0.0],
        )),
        ProjectionMode::Mode2 | ProjectionMode::Unknown => None,
    }
}

/// Focal point offset pose: half the focal distance back along Z, flipped about X
pub fn focal_offset_matrix(focal_distance: f64) -> Matrix4<f64> {
    pose_matrix(
        &Vector3::new(0.0, 0.0, -focal_distance / 2.0),
        &Vector3::new(180.0, 0.0, 0.0),
    )
}

/// Translation from the world origin to the volume centre
pub fn volume_center_matrix(center: &Point3<f64>) -> Matrix4<f64> {
    Matrix4::new_translation(&center.coords)
}

/// Composes `inverse(C) · T · inverse(F)` for a tracked projection
///
/// # Errors
///
/// Returns [`SnsimError::SingularMatrix`] if any factor is singular
pub fn compose_tracked(
    volume_center: &Point3<f64>,
    tracked: &Matrix4<f64>,
    focal_distance: f64,
) -> Result<Matrix4<f64>> {
    let tracked_inv = invert(tracked, "tracked source transform")?;
    debug!("Tracked source determinant ok, inverse norm {:.3}", tracked_inv.norm());

    let c_inv = invert(&volume_center_matrix(volume_center), "volume centre transform")?;
    let f_inv = invert(&focal_offset_matrix(focal_distance), "focal offset transform")?;

    Ok(c_inv * tracked * f_inv)
}

fn tracked_transform(calibration: &Calibration<'_>, focal_distance: f64) -> Result<RigidTransform> {
    // Single read per call; everything below works on this copy
    let tracked = calibration.tracking.snapshot()?;
    let matrix = compose_tracked(&calibration.volume_center, &tracked, focal_distance)?;
    Ok(RigidTransform::from_matrix(&matrix))
}

fn invert(matrix: &Matrix4<f64>, what: &str) -> Result<Matrix4<f64>> {
    let det = matrix.determinant();
    if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
        return Err(SnsimError::SingularMatrix(format!(
            "{} (determinant {})",
            what, det
        )));
    }
    matrix
        .try_inverse()
        .ok_or_else(|| SnsimError::SingularMatrix(what.to_string()))
}

fn fallback_parameters(request: &ProjectionRequest) -> ProjectionParameters {
    let sid = if request.has_valid_focal_distance() {
        request.focal_distance
    } else {
        DEFAULT_FOCAL_DISTANCE
    };
    let non_zero = |v: u32| if v == 0 { DEFAULT_OUTPUT_SIZE } else { v };

    ProjectionParameters::new(
        RigidTransform::identity(),
        request.intensity_threshold,
        sid,
        non_zero(request.output_width),
        non_zero(request.output_height),
    )
}
