pub mod report;

use crate::error::{Result, SnsimError};
use crate::types::{
    parse_triplet, ProjectionMode, SimulationConfig, VolumeGeometry, DEFAULT_FOCAL_DISTANCE,
    DEFAULT_OUTPUT_SIZE, DEFAULT_THRESHOLD,
};
use clap::{Parser, ValueEnum};
use nalgebra::{Point3, Vector3};
use std::path::PathBuf;

/// Command-line arguments for snsim
#[derive(Parser, Debug)]
#[command(name = "snsim")]
#[command(about = "Projection geometry planner for sacral nerve stimulation DRR simulation")]
#[command(version)]
pub struct Cli {
    /// Projection mode (lateral, anterior, mode1, mode2)
    #[arg(short, long, default_value = "mode1")]
    pub mode: String,

    /// Source-to-image distance in mm
    #[arg(long, default_value_t = DEFAULT_FOCAL_DISTANCE)]
    pub focal_distance: f64,

    /// Ray-cast intensity threshold
    #[arg(long, default_value_t = DEFAULT_THRESHOLD, allow_hyphen_values = true)]
    pub threshold: f64,

    /// Output image width in pixels
    #[arg(long, default_value_t = DEFAULT_OUTPUT_SIZE)]
    pub width: u32,

    /// Output image height in pixels
    #[arg(long, default_value_t = DEFAULT_OUTPUT_SIZE)]
    pub height: u32,

    /// Tracked X-ray tube pose, 16 numbers row-major
    #[arg(long, value_name = "FILE")]
    pub tracked_transform: Option<PathBuf>,

    /// Volume centre "X,Y,Z" in mm, defaults to the centre of the volume layout
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_triplet, allow_hyphen_values = true)]
    pub volume_center: Option<[f64; 3]>,

    /// Volume origin "X,Y,Z" in mm
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_triplet, allow_hyphen_values = true)]
    pub volume_origin: Option<[f64; 3]>,

    /// Voxel spacing "X,Y,Z" in mm
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_triplet)]
    pub volume_spacing: Option<[f64; 3]>,

    /// Volume size "X,Y,Z" in voxels
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_triplet)]
    pub volume_size: Option<[f64; 3]>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

impl Cli {
    pub fn projection_mode(&self) -> ProjectionMode {
        ProjectionMode::from_str(&self.mode)
    }

    /// DRR controls from the command line
    pub fn config(&self) -> SimulationConfig {
        SimulationConfig::default()
            .with_focal_distance(self.focal_distance)
            .with_threshold(self.threshold)
            .with_output_size(self.width, self.height)
    }

    /// Volume layout, if origin, spacing and size were all given
    ///
    /// # Errors
    ///
    /// Fails if only some of the three are given, or the size is not a
    /// positive whole number of voxels
    pub fn volume(&self) -> Result<Option<VolumeGeometry>> {
        let given = (self.volume_origin, self.volume_spacing, self.volume_size);
        let (origin, spacing, size) = match given {
            (None, None, None) => return Ok(None),
            (Some(origin), Some(spacing), Some(size)) => (origin, spacing, size),
            _ => {
                return Err(SnsimError::InvalidValue(
                    "--volume-origin, --volume-spacing and --volume-size go together".to_string(),
                ))
            }
        };

        let mut voxels = [0usize; 3];
        for (dst, &n) in voxels.iter_mut().zip(size.iter()) {
            if n < 1.0 || n.fract() != 0.0 {
                return Err(SnsimError::InvalidValue(format!(
                    "volume size must be positive whole numbers, got {}",
                    n
                )));
            }
            *dst = n as usize;
        }

        Ok(Some(VolumeGeometry::new(
            Point3::from(origin),
            Vector3::from(spacing),
            voxels,
        )))
    }

    /// Explicit centre, else the centre of `volume`
    pub fn volume_center(&self, volume: Option<&VolumeGeometry>) -> Option<Point3<f64>> {
        self.volume_center
            .map(Point3::from)
            .or_else(|| volume.map(VolumeGeometry::center))
    }
}
