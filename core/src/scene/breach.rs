use crate::types::{TargetArea, TargetForamen};
use nalgebra::Point3;

/// Colour shown by a breach warning when the tool tip enters its model
pub const WARNING_COLOR: [f64; 3] = [1.0, 0.0, 0.0];

/// Breach warning between the needle tip and one target zone model
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct BreachWarningConfig {
    pub name: String,
    /// Watched model node
    pub model: String,
    /// Tool tip transform
    pub tool_transform: String,
    pub warning_color: [f64; 3],
    pub play_sound: bool,
    pub display_warning_color: bool,
}

impl BreachWarningConfig {
    fn for_zone(zone: &str, foramen: TargetForamen, tool_transform: &str) -> Self {
        Self {
            name: format!("TargetReached{}AreaBreachWarning", zone),
            model: format!("TargetModel{}Area_{}", zone, foramen.simple_name()),
            tool_transform: tool_transform.to_string(),
            warning_color: WARNING_COLOR,
            play_sound: false,
            display_warning_color: false,
        }
    }

    /// Warning for the inner zone of `foramen`
    pub fn green(foramen: TargetForamen, tool_transform: &str) -> Self {
        Self::for_zone("Green", foramen, tool_transform)
    }

    /// Warning for the outer zone of `foramen`
    pub fn yellow(foramen: TargetForamen, tool_transform: &str) -> Self {
        Self::for_zone("Yellow", foramen, tool_transform)
    }
}

/// Answers whether the tracked tool tip is inside a target zone
pub trait TipInZone {
    fn is_tool_tip_inside(&self) -> bool;
}

impl TipInZone for bool {
    fn is_tool_tip_inside(&self) -> bool {
        *self
    }
}

/// Closed volume tested against a point
pub trait TargetZone {
    fn contains(&self, point: &Point3<f64>) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereZone {
    pub center: Point3<f64>,
    pub radius: f64,
}

impl TargetZone for SphereZone {
    fn contains(&self, point: &Point3<f64>) -> bool {
        nalgebra::distance(&self.center, point) <= self.radius
    }
}

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxZone {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl TargetZone for BoxZone {
    fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}

/// A zone tested against a fixed tool tip position
pub struct ZoneAtTip<'a> {
    zone: &'a dyn TargetZone,
    tip: Point3<f64>,
}

impl<'a> ZoneAtTip<'a> {
    pub fn new(zone: &'a dyn TargetZone, tip: Point3<f64>) -> Self {
        Self { zone, tip }
    }
}

impl TipInZone for ZoneAtTip<'_> {
    fn is_tool_tip_inside(&self) -> bool {
        self.zone.contains(&self.tip)
    }
}

/// Classifies the needle against the green and yellow zones
pub fn classify_target(green: &dyn TipInZone, yellow: &dyn TipInZone) -> TargetArea {
    TargetArea::classify(green.is_tool_tip_inside(), yellow.is_tool_tip_inside())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_breach_warning_names() {
        let green = BreachWarningConfig::green(TargetForamen::S3L, "NeedleTipToNeedle");
        assert_eq!(green.name, "TargetReachedGreenAreaBreachWarning");
        assert_eq!(green.model, "TargetModelGreenArea_S3L");
        assert_eq!(green.tool_transform, "NeedleTipToNeedle");
        assert_eq!(green.warning_color, [1.0, 0.0, 0.0]);
        assert!(!green.play_sound);
        assert!(!green.display_warning_color);

        let yellow = BreachWarningConfig::yellow(TargetForamen::S4R, "NeedleTipToNeedle");
        assert_eq!(yellow.name, "TargetReachedYellowAreaBreachWarning");
        assert_eq!(yellow.model, "TargetModelYellowArea_S4R");
    }

    #[rstest]
    #[case(true, true, TargetArea::Green)]
    #[case(true, false, TargetArea::Green)]
    #[case(false, true, TargetArea::Yellow)]
    #[case(false, false, TargetArea::Red)]
    fn test_classify_target(
        #[case] green: bool,
        #[case] yellow: bool,
        #[case] expected: TargetArea,
    ) {
        assert_eq!(classify_target(&green, &yellow), expected);
    }

    #[test]
    fn test_nested_sphere_zones() {
        let green = SphereZone {
            center: Point3::new(0.0, 0.0, 0.0),
            radius: 2.0,
        };
        let yellow = SphereZone {
            center: Point3::new(0.0, 0.0, 0.0),
            radius: 5.0,
        };

        let classify = |tip: Point3<f64>| {
            classify_target(&ZoneAtTip::new(&green, tip), &ZoneAtTip::new(&yellow, tip))
        };
        assert_eq!(classify(Point3::new(1.0, 0.0, 0.0)), TargetArea::Green);
        assert_eq!(classify(Point3::new(0.0, 4.0, 0.0)), TargetArea::Yellow);
        assert_eq!(classify(Point3::new(0.0, 0.0, 9.0)), TargetArea::Red);
    }

    #[test]
    fn test_box_zone_bounds_inclusive() {
        let zone = BoxZone {
            min: Point3::new(0.0, 0.0, 0.0),
            max: Point3::new(1.0, 1.0, 1.0),
        };
        assert!(zone.contains(&Point3::new(1.0, 0.0, 0.5)));
        assert!(!zone.contains(&Point3::new(1.0, -0.1, 0.5)));
    }
}
