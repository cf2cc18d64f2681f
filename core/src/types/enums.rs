use std::fmt;

/// Projection mode selecting how the DRR pose is obtained
///
/// Mode 1 uses a small catalog of fixed clinical views. Mode 2 derives the
/// pose from the tracked X-ray source. Anything that cannot be parsed maps to
/// [`ProjectionMode::Unknown`], which produces an identity pose instead of
/// halting the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum ProjectionMode {
    #[default]
    Unknown,
    Mode1Lateral,
    Mode1Anterior,
    Mode1Default,
    Mode2,
}

impl ProjectionMode {
    /// Returns whether this mode is unknown
    pub fn is_unknown(&self) -> bool {
        matches!(self, ProjectionMode::Unknown)
    }

    /// Returns whether this mode uses one of the fixed presets
    pub fn is_preset(&self) -> bool {
        matches!(
            self,
            ProjectionMode::Mode1Lateral
                | ProjectionMode::Mode1Anterior
                | ProjectionMode::Mode1Default
        )
    }

    /// Returns whether this mode needs the tracked X-ray source
    pub fn is_tracked(&self) -> bool {
        matches!(self, ProjectionMode::Mode2)
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            ProjectionMode::Unknown => "unknown",
            ProjectionMode::Mode1Lateral => "mode1_lateral",
            ProjectionMode::Mode1Anterior => "mode1_anterior",
            ProjectionMode::Mode1Default => "mode1",
            ProjectionMode::Mode2 => "mode2_rbparams",
        }
    }

    /// Parses projection mode from string
    ///
    /// Accepts the projection type names used by the simulation buttons
    /// (`mode1_lateral`, `mode1_anterior`, `mode2_RBParams`) as well as the
    /// short forms `lateral`, `anterior`, `mode1` and `mode2`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        let s_lower = s.trim().to_lowercase().replace('-', "_");
        match s_lower.as_str() {
            "mode1_lateral" | "lateral" => ProjectionMode::Mode1Lateral,
            "mode1_anterior" | "anterior" => ProjectionMode::Mode1Anterior,
            "mode1" | "mode_1" | "mode1_default" | "default" => ProjectionMode::Mode1Default,
            "mode2" | "mode_2" | "mode2_rbparams" | "tracked" => ProjectionMode::Mode2,
            _ => ProjectionMode::Unknown,
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Sacral foramen chosen as the needle target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetForamen {
    #[default]
    None,
    S3L,
    S3R,
    S4L,
    S4R,
}

impl TargetForamen {
    /// Returns whether a real target is selected
    pub fn is_selected(&self) -> bool {
        !matches!(self, TargetForamen::None)
    }

    /// Returns simple name for display and file naming
    pub fn simple_name(&self) -> &'static str {
        match self {
            TargetForamen::None => "None",
            TargetForamen::S3L => "S3L",
            TargetForamen::S3R => "S3R",
            TargetForamen::S4L => "S4L",
            TargetForamen::S4R => "S4R",
        }
    }

    /// Parses target from string, unrecognised values map to `None`
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "S3L" => TargetForamen::S3L,
            "S3R" => TargetForamen::S3R,
            "S4L" => TargetForamen::S4L,
            "S4R" => TargetForamen::S4R,
            _ => TargetForamen::None,
        }
    }
}

impl fmt::Display for TargetForamen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Outcome of a "target reached" check
///
/// Green means the needle tip is inside the target zone, yellow means it is
/// inside the surrounding tolerance zone, red means neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetArea {
    Green,
    Yellow,
    Red,
}

impl TargetArea {
    /// Classifies the needle tip from the two zone containment checks
    ///
    /// The green zone wins when both report containment.
    pub fn classify(inside_green: bool, inside_yellow: bool) -> Self {
        if inside_green {
            TargetArea::Green
        } else if inside_yellow {
            TargetArea::Yellow
        } else {
            TargetArea::Red
        }
    }

    /// Returns whether the target counts as reached
    pub fn is_reached(&self) -> bool {
        matches!(self, TargetArea::Green)
    }

    /// Returns simple name for display and CSV output
    pub fn simple_name(&self) -> &'static str {
        match self {
            TargetArea::Green => "GreenArea",
            TargetArea::Yellow => "YellowArea",
            TargetArea::Red => "RedArea",
        }
    }

    /// Returns the feedback message shown to the trainee
    pub fn feedback(&self) -> &'static str {
        match self {
            TargetArea::Green => "YES!!!",
            TargetArea::Yellow => "YOU ARE CLOSE!!!",
            TargetArea::Red => "NO, Try Again!!!",
        }
    }
}

impl fmt::Display for TargetArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
