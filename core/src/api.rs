use crate::drr::DrrGeometry;
use crate::error::Result;
use crate::geometry::{build_parameters, Calibration, TrackingSource};
use crate::scene::{SceneRepository, SceneTracking, PHANTOM_VOLUME};
use crate::types::{ProjectionMode, ProjectionParameters, SimulationConfig, VolumeGeometry};
use log::info;
use nalgebra::Point3;

/// Plans projections for a simulation session
///
/// Combines the session's DRR controls with a projection mode and, for the
/// tracked mode, the current X-ray tube pose.
///
/// # Example
///
/// ```
/// use snsim_core::{ProjectionMode, ProjectionPlanner, SimulationConfig};
///
/// let planner = ProjectionPlanner::new(SimulationConfig::default().with_focal_distance(500.0));
/// let params = planner.plan(ProjectionMode::Mode1Anterior).unwrap();
///
/// assert_eq!(params.transform.translation.y, 85.0);
/// assert_eq!(params.transform.rotation_deg.z, 180.0);
/// assert_eq!(params.source_image_distance, 500.0);
///
/// // The tracked mode needs a tube pose
/// assert!(planner.plan(ProjectionMode::Mode2).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProjectionPlanner {
    config: SimulationConfig,
}

impl ProjectionPlanner {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Parameters for a preset view
    ///
    /// # Errors
    ///
    /// Returns `CalibrationUnavailable` for the tracked mode
    pub fn plan(&self, mode: ProjectionMode) -> Result<ProjectionParameters> {
        build_parameters(&self.config.request(mode), None)
    }

    /// Parameters for any mode, given the volume centre and tube tracking
    pub fn plan_tracked(
        &self,
        mode: ProjectionMode,
        volume_center: Point3<f64>,
        tracking: &dyn TrackingSource,
    ) -> Result<ProjectionParameters> {
        let calibration = Calibration::new(volume_center, tracking);
        build_parameters(&self.config.request(mode), Some(&calibration))
    }

    /// Plans against the phantom CT and tube transform of a scene
    ///
    /// # Errors
    ///
    /// Fails if the phantom volume is missing or, in the tracked mode, the
    /// tube transform cannot be resolved
    pub fn plan_in_scene<R: SceneRepository + ?Sized>(
        &self,
        mode: ProjectionMode,
        scene: &R,
    ) -> Result<ProjectionPlan> {
        let volume = scene.volume_geometry(PHANTOM_VOLUME)?;
        let tracking = SceneTracking::xray_tube(scene);
        let parameters = self.plan_tracked(mode, volume.center(), &tracking)?;

        info!("Planned {} projection over {}", mode, volume);
        Ok(ProjectionPlan::new(parameters, Some(&volume)))
    }
}

/// Projection parameters with the resolved ray-cast geometry
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ProjectionPlan {
    pub parameters: ProjectionParameters,

    /// Present when the CT layout is known
    pub drr: Option<DrrGeometry>,
}

impl ProjectionPlan {
    pub fn new(parameters: ProjectionParameters, volume: Option<&VolumeGeometry>) -> Self {
        Self {
            parameters,
            drr: volume.map(|v| DrrGeometry::new(&parameters, v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SnsimError;
    use crate::geometry::{compose_tracked, focal_offset_matrix, volume_center_matrix};
    use crate::scene::{InMemoryScene, NodeKind, SceneNode, XRAY_TUBE_TO_REFERENCE};
    use crate::types::RigidTransform;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix4, Vector3};

    fn scene_with_volume() -> InMemoryScene {
        let mut scene = InMemoryScene::new();
        scene.insert(SceneNode::new(
            PHANTOM_VOLUME,
            NodeKind::Volume {
                geometry: VolumeGeometry::new(
                    Point3::new(-100.0, -50.0, 0.0),
                    Vector3::new(0.5, 0.5, 1.0),
                    [400, 200, 120],
                ),
            },
        ));
        scene
    }

    #[test]
    fn test_plan_uses_config() {
        let planner = ProjectionPlanner::new(
            SimulationConfig::default()
                .with_threshold(-50.0)
                .with_output_size(256, 128),
        );
        let params = planner.plan(ProjectionMode::Mode1Lateral).unwrap();

        assert_eq!(params.threshold, -50.0);
        assert_eq!(params.output_width, 256);
        assert_eq!(params.output_height, 128);
        assert_eq!(params.source_image_distance, 400.0);
        assert_eq!(
            params.transform,
            RigidTransform::from_arrays([75.0, 50.0, 0.0], [180.0, -90.0, 0.0])
        );
    }

    #[test]
    fn test_plan_tracked_without_tube_in_scene() {
        let planner = ProjectionPlanner::default();
        let scene = scene_with_volume();
        let result = planner.plan_in_scene(ProjectionMode::Mode2, &scene);
        assert!(matches!(result, Err(SnsimError::NodeNotFound(_))));
    }

    #[test]
    fn test_plan_in_scene_missing_volume() {
        let planner = ProjectionPlanner::default();
        let scene = InMemoryScene::new();
        let result = planner.plan_in_scene(ProjectionMode::Mode1Default, &scene);
        assert!(matches!(result, Err(SnsimError::NodeNotFound(_))));
    }

    #[test]
    fn test_plan_in_scene_preset_has_drr_geometry() {
        let planner = ProjectionPlanner::default();
        let scene = scene_with_volume();
        let plan = planner
            .plan_in_scene(ProjectionMode::Mode1Default, &scene)
            .unwrap();

        let drr = plan.drr.unwrap();
        assert_eq!(drr.center, Point3::new(0.0, 0.0, 60.0));
        assert_eq!(drr.focal_point, Point3::new(0.0, 0.0, -140.0));
        assert_eq!(drr.output_size, [512, 512, 1]);
    }

    #[test]
    fn test_plan_in_scene_tracked_roundtrip() {
        let planner = ProjectionPlanner::default();
        let mut scene = scene_with_volume();
        let volume_center = Point3::new(0.0, 0.0, 60.0);

        let expected = RigidTransform::from_arrays([12.0, -8.0, 30.0], [10.0, 20.0, 30.0]);
        let tube = volume_center_matrix(&volume_center)
            * expected.to_matrix()
            * focal_offset_matrix(400.0);
        scene.get_or_create_transform(XRAY_TUBE_TO_REFERENCE);
        scene.set_matrix(XRAY_TUBE_TO_REFERENCE, tube).unwrap();

        let plan = planner.plan_in_scene(ProjectionMode::Mode2, &scene).unwrap();
        assert_relative_eq!(
            plan.parameters.transform.translation,
            expected.translation,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            plan.parameters.transform.rotation_deg,
            expected.rotation_deg,
            epsilon = 1e-9
        );

        // Same result through the free function
        let composed = compose_tracked(&volume_center, &tube, 400.0).unwrap();
        assert_relative_eq!(composed, expected.to_matrix(), epsilon = 1e-9);
    }

    #[test]
    fn test_plan_tracked_identity_source() {
        let planner = ProjectionPlanner::default();
        let tracking = Matrix4::<f64>::identity();
        let params = planner
            .plan_tracked(ProjectionMode::Mode2, Point3::origin(), &tracking)
            .unwrap();
        assert_relative_eq!(params.transform.translation.z, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_projection_plan_without_volume() {
        let params = ProjectionPlanner::default()
            .plan(ProjectionMode::Mode1Default)
            .unwrap();
        assert!(ProjectionPlan::new(params, None).drr.is_none());
    }
}
