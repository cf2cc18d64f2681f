//! Live tracking inputs
//!
//! A projection reads the tracked X-ray source pose exactly once. Sources
//! hand out copies, so nothing downstream holds a live reference while the
//! tracker keeps updating.

use crate::error::{Result, SnsimError};
use nalgebra::{Matrix4, Point3};
use std::sync::{Arc, RwLock};

/// Source of a tracked rigid transform
pub trait TrackingSource {
    /// Returns one consistent copy of the current transform
    fn snapshot(&self) -> Result<Matrix4<f64>>;
}

impl TrackingSource for Matrix4<f64> {
    fn snapshot(&self) -> Result<Matrix4<f64>> {
        Ok(*self)
    }
}

/// Tracking transform shared with an updater thread
///
/// Clones share the same underlying transform. [`TrackingSource::snapshot`]
/// copies it under a read lock, so a concurrent [`SharedTracking::update`]
/// is observed either entirely or not at all.
#[derive(Debug, Clone)]
pub struct SharedTracking {
    inner: Arc<RwLock<Matrix4<f64>>>,
}

impl SharedTracking {
    /// Creates a shared transform starting at `initial`
    pub fn new(initial: Matrix4<f64>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Replaces the transform with a new reading
    pub fn update(&self, matrix: Matrix4<f64>) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| SnsimError::ComputationError("tracking lock poisoned".to_string()))?;
        *guard = matrix;
        Ok(())
    }
}

impl Default for SharedTracking {
    fn default() -> Self {
        Self::new(Matrix4::identity())
    }
}

impl TrackingSource for SharedTracking {
    fn snapshot(&self) -> Result<Matrix4<f64>> {
        self.inner
            .read()
            .map(|guard| *guard)
            .map_err(|_| SnsimError::ComputationError("tracking lock poisoned".to_string()))
    }
}

/// Inputs a tracked projection needs besides the request itself
pub struct Calibration<'a> {
    /// Centre of the CT volume bounding box
    pub volume_center: Point3<f64>,
    /// Pose of the X-ray source
    pub tracking: &'a dyn TrackingSource,
}

impl<'a> Calibration<'a> {
    /// Creates a new Calibration
    pub fn new(volume_center: Point3<f64>, tracking: &'a dyn TrackingSource) -> Self {
        Self {
            volume_center,
            tracking,
        }
    }
}
