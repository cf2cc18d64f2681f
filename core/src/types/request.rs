use super::ProjectionMode;

/// Default source-to-image distance in millimetres
pub const DEFAULT_FOCAL_DISTANCE: f64 = 400.0;

/// Default ray-cast intensity threshold
pub const DEFAULT_THRESHOLD: f64 = 100.0;

/// Default DRR width and height in pixels
pub const DEFAULT_OUTPUT_SIZE: u32 = 512;

/// One "generate projection" action
///
/// Built per user action and consumed once by
/// [`build_parameters`](crate::geometry::build_parameters).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectionRequest {
    pub mode: ProjectionMode,
    /// Source-to-image distance, must be positive
    pub focal_distance: f64,
    pub intensity_threshold: f64,
    pub output_width: u32,
    pub output_height: u32,
}

impl ProjectionRequest {
    /// Creates a new ProjectionRequest
    pub fn new(
        mode: ProjectionMode,
        focal_distance: f64,
        intensity_threshold: f64,
        output_width: u32,
        output_height: u32,
    ) -> Self {
        Self {
            mode,
            focal_distance,
            intensity_threshold,
            output_width,
            output_height,
        }
    }

    /// Returns whether the focal distance is a positive finite number
    pub fn has_valid_focal_distance(&self) -> bool {
        self.focal_distance.is_finite() && self.focal_distance > 0.0
    }

    /// Returns whether both output dimensions are non-zero
    pub fn has_valid_dimensions(&self) -> bool {
        self.output_width > 0 && self.output_height > 0
    }

    /// Returns whether the scalar inputs satisfy the projection invariants
    pub fn is_valid(&self) -> bool {
        self.has_valid_focal_distance() && self.has_valid_dimensions()
    }
}

impl Default for ProjectionRequest {
    fn default() -> Self {
        Self::new(
            ProjectionMode::Mode1Default,
            DEFAULT_FOCAL_DISTANCE,
            DEFAULT_THRESHOLD,
            DEFAULT_OUTPUT_SIZE,
            DEFAULT_OUTPUT_SIZE,
        )
    }
}
