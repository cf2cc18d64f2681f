use crate::error::{Result, SnsimError};
use crate::types::{
    ProjectionMode, SimulationConfig, TargetArea, TargetForamen, DEFAULT_SECONDS_PER_PROJECTION,
};
use log::{debug, info};
use nalgebra::Matrix4;
use std::time::Instant;

/// Outcome of one "target reached" check
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct TargetCheck {
    pub area: TargetArea,
    /// Seconds since the repetition started
    pub at: f64,
}

/// Estimated procedure time for a repetition
///
/// Each projection is charged a fixed real-world acquisition time and the
/// time the simulator spent computing it is given back.
pub fn estimated_surgical_time(
    seconds_per_projection: f64,
    projections: usize,
    computational_time: f64,
    total_time: f64,
) -> f64 {
    seconds_per_projection * projections as f64 - computational_time + total_time
}

/// One timed attempt at reaching a target foramen
#[derive(Debug, Clone)]
pub struct Repetition {
    target: TargetForamen,
    started: Instant,
    last_projection: Instant,
    in_progress: Option<Instant>,
    seconds_per_projection: f64,
    time_at_each_projection: Vec<f64>,
    time_per_projection: Vec<f64>,
    computational_time: Vec<f64>,
    needle_in_projection: Vec<Matrix4<f64>>,
    punctures: u32,
    target_checks: Vec<TargetCheck>,
    needle_at_target_check: Vec<Matrix4<f64>>,
}

impl Repetition {
    pub fn start(target: TargetForamen, at: Instant) -> Self {
        info!("Repetition started for target {}", target);
        Self {
            target,
            started: at,
            last_projection: at,
            in_progress: None,
            seconds_per_projection: DEFAULT_SECONDS_PER_PROJECTION,
            time_at_each_projection: Vec::new(),
            time_per_projection: Vec::new(),
            computational_time: Vec::new(),
            needle_in_projection: Vec::new(),
            punctures: 0,
            target_checks: Vec::new(),
            needle_at_target_check: Vec::new(),
        }
    }

    /// Starts a repetition timed with the session's acquisition time
    pub fn start_with(config: &SimulationConfig, target: TargetForamen, at: Instant) -> Self {
        Self::start(target, at).with_seconds_per_projection(config.seconds_per_projection)
    }

    /// Overrides the acquisition time charged per projection
    pub fn with_seconds_per_projection(mut self, seconds: f64) -> Self {
        self.seconds_per_projection = seconds;
        self
    }

    pub fn target(&self) -> TargetForamen {
        self.target
    }

    fn seconds_since(&self, earlier: Instant, at: Instant) -> f64 {
        at.saturating_duration_since(earlier).as_secs_f64()
    }

    /// Marks the moment a projection was requested
    pub fn begin_projection(&mut self, mode: ProjectionMode, at: Instant) {
        self.time_at_each_projection
            .push(self.seconds_since(self.started, at));
        self.time_per_projection
            .push(self.seconds_since(self.last_projection, at));
        self.last_projection = at;
        self.in_progress = Some(at);
        debug!(
            "Projection {} ({}) requested",
            self.time_at_each_projection.len(),
            mode
        );
    }

    /// Marks the projection as computed and stores the needle pose shown in it
    ///
    /// Returns the computational time in seconds.
    ///
    /// # Errors
    ///
    /// Fails if no projection was begun
    pub fn finish_projection(&mut self, at: Instant, needle: Matrix4<f64>) -> Result<f64> {
        let begun = self.in_progress.take().ok_or_else(|| {
            SnsimError::InvalidValue("projection finished before it was begun".to_string())
        })?;
        let elapsed = self.seconds_since(begun, at);
        self.computational_time.push(elapsed);
        self.needle_in_projection.push(needle);
        Ok(elapsed)
    }

    pub fn projection_count(&self) -> usize {
        self.time_at_each_projection.len()
    }

    pub fn add_puncture(&mut self) -> u32 {
        self.punctures += 1;
        debug!("Puncture added: {}", self.punctures);
        self.punctures
    }

    /// Removes a puncture, never going below zero
    pub fn remove_puncture(&mut self) -> u32 {
        self.punctures = self.punctures.saturating_sub(1);
        debug!("Puncture removed: {}", self.punctures);
        self.punctures
    }

    pub fn set_punctures(&mut self, punctures: u32) {
        self.punctures = punctures;
    }

    pub fn punctures(&self) -> u32 {
        self.punctures
    }

    /// Records a target check and the needle pose at that moment
    pub fn check_target(&mut self, at: Instant, area: TargetArea, needle: Matrix4<f64>) {
        let check = TargetCheck {
            area,
            at: self.seconds_since(self.started, at),
        };
        info!("Target check: {} ({})", area, area.feedback());
        self.target_checks.push(check);
        self.needle_at_target_check.push(needle);
    }

    /// Ends the repetition
    ///
    /// The interval from the last projection to `at` is appended to the
    /// time between projections.
    pub fn stop(mut self, at: Instant) -> RepetitionSummary {
        let total_time = self.seconds_since(self.started, at);
        self.time_per_projection
            .push(self.seconds_since(self.last_projection, at));

        let computational_total: f64 = self.computational_time.iter().sum();
        let projections = self.projection_count();
        let estimated = estimated_surgical_time(
            self.seconds_per_projection,
            projections,
            computational_total,
            total_time,
        );
        info!(
            "Repetition stopped after {:.1} s, {} projections",
            total_time, projections
        );

        RepetitionSummary {
            target: self.target,
            total_time,
            projections,
            punctures: self.punctures,
            estimated_surgical_time: estimated,
            time_per_projection: self.time_per_projection,
            time_at_each_projection: self.time_at_each_projection,
            computational_time_per_projection: self.computational_time,
            target_checks: self.target_checks,
            needle_in_projection: self.needle_in_projection,
            needle_at_target_check: self.needle_at_target_check,
        }
    }
}

/// Results of a stopped repetition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct RepetitionSummary {
    pub target: TargetForamen,
    /// Seconds from start to stop
    pub total_time: f64,
    pub projections: usize,
    pub punctures: u32,
    pub estimated_surgical_time: f64,
    /// Seconds between consecutive projections, closed by the stop
    pub time_per_projection: Vec<f64>,
    /// Seconds since start at each projection
    pub time_at_each_projection: Vec<f64>,
    pub computational_time_per_projection: Vec<f64>,
    pub target_checks: Vec<TargetCheck>,
    pub needle_in_projection: Vec<Matrix4<f64>>,
    pub needle_at_target_check: Vec<Matrix4<f64>>,
}

impl RepetitionSummary {
    /// Whether any check landed in the green zone
    pub fn target_reached(&self) -> bool {
        self.target_checks.iter().any(|c| c.area.is_reached())
    }
}
