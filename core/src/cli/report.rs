use crate::api::ProjectionPlan;
use std::fmt;

/// Text report formatter for a projection plan
pub struct TextReport<'a> {
    plan: &'a ProjectionPlan,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(plan: &'a ProjectionPlan) -> Self {
        Self { plan }
    }
}

fn triplet(v: &[f64]) -> String {
    format!("({:.3}, {:.3}, {:.3})", v[0], v[1], v[2])
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = &self.plan.parameters;

        writeln!(f, "Projection Parameters")?;
        writeln!(f, "=====================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Translation:    {} mm",
            triplet(params.transform.translation.as_slice())
        )?;
        writeln!(
            f,
            "Rotation:       {} deg",
            triplet(params.transform.rotation_deg.as_slice())
        )?;
        writeln!(f, "Center:         {}", triplet(params.center.as_slice()))?;
        writeln!(f, "Threshold:      {}", params.threshold)?;
        writeln!(f, "SID:            {} mm", params.source_image_distance)?;
        writeln!(
            f,
            "Output Size:    {}x{}",
            params.output_width, params.output_height
        )?;
        writeln!(
            f,
            "Intensity Clamp: [{}, {}]",
            params.intensity_clamp_min, params.intensity_clamp_max
        )?;
        writeln!(f, "Transfer Beta:  {}", params.transfer_beta)?;

        if let Some(drr) = &self.plan.drr {
            writeln!(f)?;
            writeln!(f, "Ray-cast Geometry")?;
            writeln!(f, "-----------------")?;
            writeln!(f, "Rotation Center: {}", triplet(drr.center.coords.as_slice()))?;
            writeln!(f, "Focal Point:    {}", triplet(drr.focal_point.coords.as_slice()))?;
            writeln!(
                f,
                "Output Origin:  {}",
                triplet(drr.output_origin.coords.as_slice())
            )?;
            writeln!(
                f,
                "Output Extent:  {}x{}x{}",
                drr.output_size[0], drr.output_size[1], drr.output_size[2]
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProjectionParameters, RigidTransform, VolumeGeometry};
    use nalgebra::{Point3, Vector3};

    fn params() -> ProjectionParameters {
        ProjectionParameters::new(
            RigidTransform::from_arrays([75.0, 50.0, 0.0], [180.0, -90.0, 0.0]),
            100.0,
            400.0,
            512,
            512,
        )
    }

    #[test]
    fn test_text_report_format() {
        let plan = ProjectionPlan::new(params(), None);
        let output = format!("{}", TextReport::new(&plan));

        assert!(output.contains("Projection Parameters"));
        assert!(output.contains("Translation:    (75.000, 50.000, 0.000) mm"));
        assert!(output.contains("Rotation:       (180.000, -90.000, 0.000) deg"));
        assert!(output.contains("SID:            400 mm"));
        assert!(output.contains("Output Size:    512x512"));
        assert!(output.contains("Intensity Clamp: [-1024, 1500]"));
        assert!(!output.contains("Ray-cast Geometry"));
    }

    #[test]
    fn test_text_report_with_drr() {
        let volume = VolumeGeometry::new(
            Point3::new(-100.0, -100.0, 0.0),
            Vector3::new(0.5, 0.5, 1.0),
            [400, 400, 200],
        );
        let plan = ProjectionPlan::new(params(), Some(&volume));
        let output = format!("{}", TextReport::new(&plan));

        assert!(output.contains("Ray-cast Geometry"));
        assert!(output.contains("Focal Point:    (0.000, 0.000, -100.000)"));
        assert!(output.contains("Output Origin:  (-255.500, -255.500, 300.000)"));
        assert!(output.contains("Output Extent:  512x512x1"));
    }
}
