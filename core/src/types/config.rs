use super::request::{DEFAULT_FOCAL_DISTANCE, DEFAULT_OUTPUT_SIZE, DEFAULT_THRESHOLD};
use super::{ProjectionMode, ProjectionRequest};

/// Real-world time one fluoroscopy shot is assumed to take, in seconds
pub const DEFAULT_SECONDS_PER_PROJECTION: f64 = 5.0;

/// Settings for a simulation session
///
/// Holds the DRR controls the trainee can adjust between projections, along
/// with the session-level constants used for timing estimates.
///
/// # Example
///
/// ```
/// use snsim_core::{ProjectionMode, SimulationConfig};
///
/// let config = SimulationConfig::default()
///     .with_focal_distance(350.0)
///     .with_output_size(256, 256);
///
/// let request = config.request(ProjectionMode::Mode1Lateral);
/// assert_eq!(request.focal_distance, 350.0);
/// assert_eq!(request.output_width, 256);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Source-to-image distance in millimetres
    pub focal_distance: f64,

    /// Ray-cast intensity threshold
    pub threshold: f64,

    /// DRR width in pixels
    pub output_width: u32,

    /// DRR height in pixels
    pub output_height: u32,

    /// Phantom identifier used in export paths
    pub phantom_id: String,

    /// Seconds of real procedure time charged per projection
    pub seconds_per_projection: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            focal_distance: DEFAULT_FOCAL_DISTANCE,
            threshold: DEFAULT_THRESHOLD,
            output_width: DEFAULT_OUTPUT_SIZE,
            output_height: DEFAULT_OUTPUT_SIZE,
            phantom_id: "Phantom01".to_string(),
            seconds_per_projection: DEFAULT_SECONDS_PER_PROJECTION,
        }
    }
}

impl SimulationConfig {
    /// Builder: Set focal distance
    pub fn with_focal_distance(mut self, focal_distance: f64) -> Self {
        self.focal_distance = focal_distance;
        self
    }

    /// Builder: Set intensity threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Builder: Set output size
    pub fn with_output_size(mut self, width: u32, height: u32) -> Self {
        self.output_width = width;
        self.output_height = height;
        self
    }

    /// Builder: Set phantom identifier
    pub fn with_phantom_id(mut self, phantom_id: impl Into<String>) -> Self {
        self.phantom_id = phantom_id.into();
        self
    }

    /// Builder: Set acquisition time charged per projection
    pub fn with_seconds_per_projection(mut self, seconds: f64) -> Self {
        self.seconds_per_projection = seconds;
        self
    }

    /// Snapshot of the current controls as a request for `mode`
    pub fn request(&self, mode: ProjectionMode) -> ProjectionRequest {
        ProjectionRequest::new(
            mode,
            self.focal_distance,
            self.threshold,
            self.output_width,
            self.output_height,
        )
    }
}
