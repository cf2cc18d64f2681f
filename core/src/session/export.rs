use super::activity::{now_stamp, ActivityLog};
use super::repetition::RepetitionSummary;
use crate::error::Result;
use crate::geometry::write_matrix4;
use crate::types::SimulationConfig;
use log::info;
use nalgebra::Matrix4;
use std::fs;
use std::path::{Path, PathBuf};

const STATISTICS_FILE: &str = "StatisticalResults.csv";
const ACTIVITY_FILE: &str = "RecordedActivity.csv";
const PROJECTION_NEEDLE_DIR: &str = "NeedlePositionTransformsPerProjection";
const TARGET_NEEDLE_DIR: &str = "NeedlePositionTransformsPerTargetReached";

const STATISTICS_HEADER: [&str; 14] = [
    "phantomID",
    "userID",
    "repetitionID",
    "TargetSelected",
    "RepetitionTotalTime",
    "NumberOfProjections",
    "NumberOfPunctures",
    "EstimatedSurgicalTime",
    "TimePerProjection",
    "TimeAtEachProjection",
    "ComputationalTimePerProjection",
    "NumberOfTimesTargetReachedButtonClicked",
    "OutputPerTargetReachedButtonClicked",
    "TimeAtEachTargetReachedButtonClicked",
];

/// Quotes a CSV field if it contains a separator, quote or newline
pub(crate) fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Seconds always carry a decimal point, `4.0` rather than `4`
fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

fn format_seconds(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|&v| format_float(v)).collect();
    format!("[{}]", items.join(", "))
}

fn format_names<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let items: Vec<String> = values.map(|v| format!("'{}'", v)).collect();
    format!("[{}]", items.join(", "))
}

/// Writes the results of a repetition to disk
///
/// # Example
///
/// ```no_run
/// use snsim_core::session::RepetitionExport;
///
/// let export = RepetitionExport::new("/data", "Phantom01", "U07", "3", "2026-10-19_10-30-00");
/// assert!(export.directory().ends_with("Phantom01/User_U07"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RepetitionExport {
    pub root: PathBuf,
    pub phantom_id: String,
    pub user_id: String,
    pub repetition_id: String,
    /// Timestamp used in the directory name, `%Y-%m-%d_%H-%M-%S`
    pub stamp: String,
}

impl RepetitionExport {
    pub fn new(
        root: impl Into<PathBuf>,
        phantom_id: &str,
        user_id: &str,
        repetition_id: &str,
        stamp: &str,
    ) -> Self {
        Self {
            root: root.into(),
            phantom_id: phantom_id.to_string(),
            user_id: user_id.to_string(),
            repetition_id: repetition_id.to_string(),
            stamp: stamp.to_string(),
        }
    }

    /// Export for the session's phantom, stamped with the current local time
    pub fn from_config(
        root: impl Into<PathBuf>,
        config: &SimulationConfig,
        user_id: &str,
        repetition_id: &str,
    ) -> Self {
        Self::new(root, &config.phantom_id, user_id, repetition_id, &now_stamp())
    }

    /// Parent directory shared by all repetitions of this user
    pub fn directory(&self) -> PathBuf {
        self.root
            .join("RecordedResults")
            .join("TraditionalMethod")
            .join(&self.phantom_id)
            .join(format!("User_{}", self.user_id))
    }

    /// Directory of one repetition
    pub fn repetition_directory(&self, summary: &RepetitionSummary) -> PathBuf {
        self.directory().join(format!(
            "Rep_{}_{}_{}",
            self.repetition_id, summary.target, self.stamp
        ))
    }

    /// Header and single data row of the statistics file
    pub fn statistics_csv(&self, summary: &RepetitionSummary) -> String {
        let row = [
            self.phantom_id.clone(),
            self.user_id.clone(),
            self.repetition_id.clone(),
            summary.target.simple_name().to_string(),
            format_float(summary.total_time),
            summary.projections.to_string(),
            summary.punctures.to_string(),
            format_float(summary.estimated_surgical_time),
            format_seconds(&summary.time_per_projection),
            format_seconds(&summary.time_at_each_projection),
            format_seconds(&summary.computational_time_per_projection),
            summary.target_checks.len().to_string(),
            format_names(summary.target_checks.iter().map(|c| c.area.simple_name())),
            format_seconds(
                &summary
                    .target_checks
                    .iter()
                    .map(|c| c.at)
                    .collect::<Vec<_>>(),
            ),
        ];

        let cells: Vec<String> = row.iter().map(|v| csv_field(v)).collect();
        format!("{}\n{}\n", STATISTICS_HEADER.join(","), cells.join(","))
    }

    /// Writes statistics, needle poses and the activity log
    ///
    /// Returns the repetition directory.
    pub fn write(&self, summary: &RepetitionSummary, activity: &ActivityLog) -> Result<PathBuf> {
        let dir = self.repetition_directory(summary);
        fs::create_dir_all(&dir)?;
        info!("Saving repetition to {}", dir.display());

        let statistics_path = dir.join(STATISTICS_FILE);
        fs::write(&statistics_path, self.statistics_csv(summary))?;
        info!("Statistics saved to {}", statistics_path.display());

        write_needle_poses(
            &dir.join(PROJECTION_NEEDLE_DIR),
            "NeedlePositionInProjection",
            &summary.needle_in_projection,
        )?;
        write_needle_poses(
            &dir.join(TARGET_NEEDLE_DIR),
            "NeedlePositionInTargetReached",
            &summary.needle_at_target_check,
        )?;

        activity.write_csv(&dir.join(ACTIVITY_FILE))?;
        Ok(dir)
    }
}

fn write_needle_poses(dir: &Path, prefix: &str, poses: &[Matrix4<f64>]) -> Result<()> {
    fs::create_dir_all(dir)?;
    for (i, pose) in poses.iter().enumerate() {
        let path = dir.join(format!("{}_{}_Transform.txt", prefix, i + 1));
        write_matrix4(&path, pose)?;
    }
    info!("{} needle poses saved to {}", poses.len(), dir.display());
    Ok(())
}
