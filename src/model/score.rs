use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a hole relative to par.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ResultLabel {
    Albatross,
    Eagle,
    Birdie,
    Par,
    Bogey,
    DoubleBogey,
    TripleBogey,
    /// More than three over; carries the difference.
    Over(i32),
}

impl ResultLabel {
    #[must_use]
    pub fn from_diff(diff: i32) -> Self {
        match diff {
            i32::MIN..=-3 => Self::Albatross,
            -2 => Self::Eagle,
            -1 => Self::Birdie,
            0 => Self::Par,
            1 => Self::Bogey,
            2 => Self::DoubleBogey,
            3 => Self::TripleBogey,
            over => Self::Over(over),
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Albatross => "Albatross".to_string(),
            Self::Eagle => "Eagle".to_string(),
            Self::Birdie => "Birdie".to_string(),
            Self::Par => "Par".to_string(),
            Self::Bogey => "Bogey".to_string(),
            Self::DoubleBogey => "Double Bogey".to_string(),
            Self::TripleBogey => "Triple Bogey".to_string(),
            Self::Over(diff) => format!("+{diff}"),
        }
    }

    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Albatross => "albatross",
            Self::Eagle => "eagle",
            Self::Birdie => "birdie",
            Self::Par => "par",
            Self::Bogey => "bogey",
            Self::DoubleBogey => "double",
            Self::TripleBogey => "triple",
            Self::Over(_) => "other-pos",
        }
    }
}

impl fmt::Display for ResultLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Classifies a hole. No strokes means no result, which is distinct from `Par`.
#[must_use]
pub fn classify(strokes: usize, par: i32) -> Option<ResultLabel> {
    if strokes == 0 {
        return None;
    }
    let strokes = i32::try_from(strokes).unwrap_or(i32::MAX);
    Some(ResultLabel::from_diff(strokes.saturating_sub(par)))
}

/// `Even`, `+n` or `-n`.
#[must_use]
pub fn format_diff(diff: i32) -> String {
    match diff {
        0 => "Even".to_string(),
        d if d > 0 => format!("+{d}"),
        d => d.to_string(),
    }
}

/// What the scorecard shows after a hole is marked complete.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Celebration {
    pub hole_number: usize,
    pub strokes: usize,
    pub par: i32,
    pub diff: i32,
    pub result: ResultLabel,
    pub message: &'static str,
    pub icon: &'static str,
}

impl Celebration {
    #[must_use]
    pub fn new(hole_index: usize, strokes: usize, par: i32) -> Option<Self> {
        let result = classify(strokes, par)?;
        let diff = i32::try_from(strokes).unwrap_or(i32::MAX).saturating_sub(par);
        let (message, icon) = match diff {
            i32::MIN..=-3 => ("INCREDIBLE ALBATROSS!", "🦅"),
            -2 => ("AMAZING EAGLE!", "🦅"),
            -1 => ("GREAT BIRDIE!", "🐦"),
            0 => ("SOLID PAR!", "🎯"),
            1 => ("NICE BOGEY!", "⚡"),
            _ => ("KEEP GOING!", "💪"),
        };
        Some(Self {
            hole_number: hole_index + 1,
            strokes,
            par,
            diff,
            result,
            message,
            icon,
        })
    }
}
