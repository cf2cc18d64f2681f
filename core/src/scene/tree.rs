use super::repository::SceneRepository;
use crate::error::Result;
use crate::geometry::TrackingSource;
use log::{debug, info};
use nalgebra::{Matrix4, Point3};
use std::collections::HashMap;

pub const STYLUS_TIP_TO_STYLUS: &str = "StylusTipToStylus";
pub const STYLUS_TO_TRACKER: &str = "StylusToTracker";
pub const NEEDLE_TIP_TO_NEEDLE: &str = "NeedleTipToNeedle";
pub const NEEDLE_TO_TRACKER: &str = "NeedleToTracker";
pub const TRACKER_TO_REFERENCE: &str = "TrackerToReference";
pub const REFERENCE_TO_RAS: &str = "ReferenceToRAS";

/// Tracked pose of the virtual X-ray tube
pub const XRAY_TUBE_TO_REFERENCE: &str = "XRaytubeToXRaytubeReference";

/// CT volume of the phantom
pub const PHANTOM_VOLUME: &str = "PhantomCT";

/// Wires the tracked tools into the reference frame
///
/// ```text
/// StylusTipToStylus -> StylusToTracker -> TrackerToReference -> ReferenceToRAS
/// NeedleTipToNeedle -> NeedleToTracker -> TrackerToReference
/// ```
///
/// Missing transforms are created as identity. Existing matrices are kept.
pub fn build_transform_tree<R: SceneRepository + ?Sized>(repo: &mut R) -> Result<()> {
    for name in [
        STYLUS_TIP_TO_STYLUS,
        STYLUS_TO_TRACKER,
        NEEDLE_TIP_TO_NEEDLE,
        NEEDLE_TO_TRACKER,
        TRACKER_TO_REFERENCE,
        REFERENCE_TO_RAS,
    ] {
        repo.get_or_create_transform(name);
    }

    let edges = [
        (STYLUS_TIP_TO_STYLUS, STYLUS_TO_TRACKER),
        (STYLUS_TO_TRACKER, TRACKER_TO_REFERENCE),
        (TRACKER_TO_REFERENCE, REFERENCE_TO_RAS),
        (NEEDLE_TIP_TO_NEEDLE, NEEDLE_TO_TRACKER),
        (NEEDLE_TO_TRACKER, TRACKER_TO_REFERENCE),
    ];
    for (child, parent) in edges {
        repo.set_parent(child, Some(parent))?;
    }

    info!("Transform tree built");
    Ok(())
}

/// World position of the needle tip
pub fn needle_tip_position<R: SceneRepository + ?Sized>(repo: &R) -> Result<Point3<f64>> {
    let world = repo.world_matrix(NEEDLE_TIP_TO_NEEDLE)?;
    Ok(world.transform_point(&Point3::origin()))
}

/// Reads a transform node's world matrix as the Mode2 tracking snapshot
pub struct SceneTracking<'a, R: SceneRepository + ?Sized> {
    repo: &'a R,
    node: String,
}

impl<'a, R: SceneRepository + ?Sized> SceneTracking<'a, R> {
    pub fn new(repo: &'a R, node: impl Into<String>) -> Self {
        Self {
            repo,
            node: node.into(),
        }
    }

    /// Tracks the X-ray tube node
    pub fn xray_tube(repo: &'a R) -> Self {
        Self::new(repo, XRAY_TUBE_TO_REFERENCE)
    }
}

impl<R: SceneRepository + ?Sized> TrackingSource for SceneTracking<'_, R> {
    fn snapshot(&self) -> Result<Matrix4<f64>> {
        self.repo.world_matrix(&self.node)
    }
}

/// Matrices of transforms that existed before a session started
///
/// The first sighting of a transform stores its world matrix. Later sightings
/// write the stored matrix back as the local matrix, so reloading a scene
/// cannot drift saved calibrations.
#[derive(Debug, Clone, Default)]
pub struct TransformCache {
    saved: HashMap<String, Matrix4<f64>>,
}

impl TransformCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores or restores the named transform
    ///
    /// Returns `true` if the matrix was restored from the cache.
    pub fn update_or_restore<R: SceneRepository + ?Sized>(
        &mut self,
        repo: &mut R,
        name: &str,
    ) -> Result<bool> {
        match self.saved.get(name) {
            Some(matrix) => {
                repo.set_matrix(name, *matrix)?;
                debug!("Restored transform {}", name);
                Ok(true)
            }
            None => {
                // Only transforms are cached
                repo.local_matrix(name)?;
                let matrix = repo.world_matrix(name)?;
                self.saved.insert(name.to_string(), matrix);
                Ok(false)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Matrix4<f64>> {
        self.saved.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SnsimError;
    use crate::scene::InMemoryScene;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn translation(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    #[test]
    fn test_build_transform_tree_links() {
        let mut scene = InMemoryScene::new();
        build_transform_tree(&mut scene).unwrap();

        let parent = |name: &str| scene.find(name).unwrap().parent.clone();
        assert_eq!(parent(STYLUS_TIP_TO_STYLUS).as_deref(), Some(STYLUS_TO_TRACKER));
        assert_eq!(parent(STYLUS_TO_TRACKER).as_deref(), Some(TRACKER_TO_REFERENCE));
        assert_eq!(parent(TRACKER_TO_REFERENCE).as_deref(), Some(REFERENCE_TO_RAS));
        assert_eq!(parent(NEEDLE_TIP_TO_NEEDLE).as_deref(), Some(NEEDLE_TO_TRACKER));
        assert_eq!(parent(NEEDLE_TO_TRACKER).as_deref(), Some(TRACKER_TO_REFERENCE));
        assert_eq!(parent(REFERENCE_TO_RAS), None);
    }

    #[test]
    fn test_build_transform_tree_keeps_existing() {
        let mut scene = InMemoryScene::new();
        scene.get_or_create_transform(NEEDLE_TO_TRACKER);
        scene.set_matrix(NEEDLE_TO_TRACKER, translation(0.0, 0.0, 7.0)).unwrap();

        build_transform_tree(&mut scene).unwrap();

        assert_eq!(
            scene.local_matrix(NEEDLE_TO_TRACKER).unwrap(),
            translation(0.0, 0.0, 7.0)
        );
    }

    #[test]
    fn test_needle_tip_position() {
        let mut scene = InMemoryScene::new();
        build_transform_tree(&mut scene).unwrap();
        scene.set_matrix(NEEDLE_TIP_TO_NEEDLE, translation(0.0, 0.0, 100.0)).unwrap();
        scene.set_matrix(NEEDLE_TO_TRACKER, translation(5.0, 0.0, 0.0)).unwrap();
        scene.set_matrix(REFERENCE_TO_RAS, translation(0.0, -3.0, 0.0)).unwrap();

        let tip = needle_tip_position(&scene).unwrap();
        assert_relative_eq!(tip, Point3::new(5.0, -3.0, 100.0), epsilon = 1e-12);
    }

    #[test]
    fn test_scene_tracking_snapshot() {
        let mut scene = InMemoryScene::new();
        scene.get_or_create_transform(XRAY_TUBE_TO_REFERENCE);
        scene.get_or_create_transform(REFERENCE_TO_RAS);
        scene.set_matrix(XRAY_TUBE_TO_REFERENCE, translation(1.0, 0.0, 0.0)).unwrap();
        scene.set_matrix(REFERENCE_TO_RAS, translation(0.0, 2.0, 0.0)).unwrap();
        scene.set_parent(XRAY_TUBE_TO_REFERENCE, Some(REFERENCE_TO_RAS)).unwrap();

        let tracking = SceneTracking::xray_tube(&scene);
        assert_eq!(tracking.snapshot().unwrap(), translation(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_scene_tracking_missing_node() {
        let scene = InMemoryScene::new();
        let tracking = SceneTracking::xray_tube(&scene);
        assert!(matches!(tracking.snapshot(), Err(SnsimError::NodeNotFound(_))));
    }

    #[test]
    fn test_transform_cache_restores() {
        let mut scene = InMemoryScene::new();
        scene.get_or_create_transform(NEEDLE_TIP_TO_NEEDLE);
        scene.set_matrix(NEEDLE_TIP_TO_NEEDLE, translation(0.0, 0.0, 1.0)).unwrap();

        let mut cache = TransformCache::new();
        assert!(!cache.update_or_restore(&mut scene, NEEDLE_TIP_TO_NEEDLE).unwrap());

        scene.make_identity(NEEDLE_TIP_TO_NEEDLE).unwrap();
        assert!(cache.update_or_restore(&mut scene, NEEDLE_TIP_TO_NEEDLE).unwrap());
        assert_eq!(
            scene.local_matrix(NEEDLE_TIP_TO_NEEDLE).unwrap(),
            translation(0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn test_transform_cache_saves_world_matrix() {
        let mut scene = InMemoryScene::new();
        build_transform_tree(&mut scene).unwrap();
        scene.set_matrix(NEEDLE_TIP_TO_NEEDLE, translation(0.0, 0.0, 1.0)).unwrap();
        scene.set_matrix(NEEDLE_TO_TRACKER, translation(4.0, 0.0, 0.0)).unwrap();

        let mut cache = TransformCache::new();
        cache.update_or_restore(&mut scene, NEEDLE_TIP_TO_NEEDLE).unwrap();
        assert_eq!(
            cache.get(NEEDLE_TIP_TO_NEEDLE),
            Some(&translation(4.0, 0.0, 1.0))
        );

        assert!(cache.update_or_restore(&mut scene, NEEDLE_TIP_TO_NEEDLE).unwrap());
        assert_eq!(
            scene.local_matrix(NEEDLE_TIP_TO_NEEDLE).unwrap(),
            translation(4.0, 0.0, 1.0)
        );
    }

    #[test]
    fn test_transform_cache_rejects_volume() {
        let mut scene = InMemoryScene::new();
        scene.create_or_get(
            PHANTOM_VOLUME,
            crate::scene::NodeKind::Volume {
                geometry: crate::types::VolumeGeometry::new(
                    Point3::origin(),
                    Vector3::new(1.0, 1.0, 1.0),
                    [1, 1, 1],
                ),
            },
        );
        let mut cache = TransformCache::new();
        let result = cache.update_or_restore(&mut scene, PHANTOM_VOLUME);
        assert!(matches!(result, Err(SnsimError::NodeKindMismatch { .. })));
        assert!(cache.get(PHANTOM_VOLUME).is_none());
    }
}
