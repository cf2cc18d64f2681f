use crate::error::{Result, SnsimError};
use crate::types::{ProjectionParameters, INTENSITY_CLAMP_MAX, INTENSITY_CLAMP_MIN, TRANSFER_BETA};

/// CT value written into voxels covered by the needle model
pub const NEEDLE_CT_VALUE: i16 = 1500;

/// X-ray attenuation transfer applied to CT values before projection
///
/// `exp(beta * (clamp(v, min, max) + min) / 1000)`. The clamp minimum is
/// added after clamping, which shifts the whole range down by 1024 HU with
/// the default constants.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct XRayTransfer {
    pub min: f64,
    pub max: f64,
    pub beta: f64,
}

impl Default for XRayTransfer {
    fn default() -> Self {
        Self {
            min: INTENSITY_CLAMP_MIN,
            max: INTENSITY_CLAMP_MAX,
            beta: TRANSFER_BETA,
        }
    }
}

impl XRayTransfer {
    /// Transfer constants carried by a parameter set
    pub fn from_parameters(params: &ProjectionParameters) -> Self {
        Self {
            min: params.intensity_clamp_min,
            max: params.intensity_clamp_max,
            beta: params.transfer_beta,
        }
    }

    /// Attenuation for a single CT value
    pub fn apply(&self, value: f64) -> f64 {
        let shifted = value.clamp(self.min, self.max) + self.min;
        (self.beta * shifted / 1000.0).exp()
    }

    /// Attenuation for every voxel of a volume
    pub fn apply_all(&self, values: &[i16]) -> Vec<f64> {
        values.iter().map(|&v| self.apply(f64::from(v))).collect()
    }
}

/// Writes `value` into every voxel whose label is non-zero
///
/// Returns the number of voxels changed.
///
/// # Errors
///
/// Returns an error if the volume and labelmap differ in length
pub fn burn_label(volume: &mut [i16], labels: &[u8], value: i16) -> Result<usize> {
    if volume.len() != labels.len() {
        return Err(SnsimError::InvalidValue(format!(
            "labelmap has {} voxels, volume has {}",
            labels.len(),
            volume.len()
        )));
    }

    let mut changed = 0;
    for (voxel, _) in volume.iter_mut().zip(labels).filter(|(_, label)| **label != 0) {
        *voxel = value;
        changed += 1;
    }
    Ok(changed)
}
