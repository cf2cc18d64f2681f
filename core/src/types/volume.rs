use nalgebra::{Point3, Vector3};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Physical layout of a CT volume
///
/// Origin is the position of the first voxel in millimetres, spacing the
/// voxel size in millimetres and size the voxel count along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct VolumeGeometry {
    pub origin: Point3<f64>,
    pub spacing: Vector3<f64>,
    pub size: [usize; 3],
}

impl VolumeGeometry {
    /// Creates a new VolumeGeometry
    pub fn new(origin: Point3<f64>, spacing: Vector3<f64>, size: [usize; 3]) -> Self {
        Self {
            origin,
            spacing,
            size,
        }
    }

    /// Physical extent along each axis
    pub fn extent(&self) -> Vector3<f64> {
        Vector3::new(
            self.spacing.x * self.size[0] as f64,
            self.spacing.y * self.size[1] as f64,
            self.spacing.z * self.size[2] as f64,
        )
    }

    /// Bounds as `[xmin, xmax, ymin, ymax, zmin, zmax]`
    pub fn bounds(&self) -> [f64; 6] {
        let max = self.origin + self.extent();
        [
            self.origin.x,
            max.x,
            self.origin.y,
            max.y,
            self.origin.z,
            max.z,
        ]
    }

    /// Centre of the bounding box
    pub fn center(&self) -> Point3<f64> {
        self.origin + self.extent() / 2.0
    }

    /// Total number of voxels
    pub fn voxel_count(&self) -> usize {
        self.size.iter().product()
    }
}

/// Parses exactly three numbers from free-form text
///
/// Accepts formats like:
/// - "1 2 3"
/// - "1,2,3"
/// - "[0.5, 0.5, 1.25]"
/// - Exponential notation: "1.5e-1 2 3"
///
/// # Errors
///
/// Returns an error if fewer or more than three numbers are present
pub fn parse_triplet(s: &str) -> Result<[f64; 3], String> {
    let numbers = parse_numbers(s)?;
    if numbers.len() != 3 {
        return Err(format!(
            "Expected 3 values, found {} in '{}'",
            numbers.len(),
            s
        ));
    }
    Ok([numbers[0], numbers[1], numbers[2]])
}

/// Extracts every number in `s`
pub(crate) fn parse_numbers(s: &str) -> Result<Vec<f64>, String> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| {
        Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("Failed to compile regex")
    });

    re.find_iter(s)
        .map(|m| {
            m.as_str()
                .parse::<f64>()
                .map_err(|e| format!("Failed to parse '{}': {}", m.as_str(), e))
        })
        .collect()
}

impl fmt::Display for VolumeGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}x{} voxels, spacing {} x {} x {} mm",
            self.size[0], self.size[1], self.size[2], self.spacing.x, self.spacing.y, self.spacing.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ct() -> VolumeGeometry {
        VolumeGeometry::new(
            Point3::new(-100.0, -50.0, 0.0),
            Vector3::new(0.5, 0.5, 1.0),
            [400, 200, 120],
        )
    }

    #[test]
    fn test_bounds_and_center() {
        let volume = ct();
        assert_eq!(volume.bounds(), [-100.0, 100.0, -50.0, 50.0, 0.0, 120.0]);
        assert_eq!(volume.center(), Point3::new(0.0, 0.0, 60.0));
        assert_eq!(volume.voxel_count(), 400 * 200 * 120);
    }

    #[test]
    fn test_parse_space_separator() {
        assert_eq!(parse_triplet("1 2 3").unwrap(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_parse_array_format() {
        assert_eq!(parse_triplet("[0.5, -0.5, 1.25]").unwrap(), [0.5, -0.5, 1.25]);
    }

    #[test]
    fn test_parse_exponential_notation() {
        assert_eq!(parse_triplet("1.5e-1,2e+1,3").unwrap(), [0.15, 20.0, 3.0]);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_triplet("").is_err());
        assert!(parse_triplet("1 2").is_err());
        assert!(parse_triplet("1 2 3 4").is_err());
        assert!(parse_triplet("x y z").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ct().to_string(),
            "400x200x120 voxels, spacing 0.5 x 0.5 x 1 mm"
        );
    }
}
