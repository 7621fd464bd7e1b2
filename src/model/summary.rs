use serde::Serialize;

use super::round::{HoleRecord, Round};

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct NineTotals {
    pub par: i32,
    pub strokes: usize,
}

impl NineTotals {
    fn from_holes(holes: &[HoleRecord]) -> Self {
        Self {
            par: holes.iter().map(|h| h.par).sum(),
            strokes: holes.iter().map(HoleRecord::strokes).sum(),
        }
    }
}

/// Totals shown in the scorecard footer and the saved-game view.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RoundSummary {
    pub holes: usize,
    pub total_par: i32,
    pub total_strokes: usize,
    pub diff: i32,
    pub completed_holes: usize,
    pub front: NineTotals,
    /// Only present for rounds longer than nine holes.
    pub back: Option<NineTotals>,
}

impl RoundSummary {
    #[must_use]
    pub fn of(round: &Round) -> Self {
        let holes = round.holes();
        let total_par = round.total_par();
        let total_strokes = round.total_strokes();
        let front_end = holes.len().min(9);
        Self {
            holes: holes.len(),
            total_par,
            total_strokes,
            diff: i32::try_from(total_strokes)
                .unwrap_or(i32::MAX)
                .saturating_sub(total_par),
            completed_holes: round.completed_holes(),
            front: NineTotals::from_holes(&holes[..front_end]),
            back: (holes.len() > 9).then(|| NineTotals::from_holes(&holes[9..holes.len().min(18)])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::round::SwingRecord;

    #[test]
    fn splits_front_and_back() {
        let mut round = Round::with_holes(18);
        if let Some(hole) = round.hole_mut(10) {
            hole.swings = vec![SwingRecord::default(); 5];
            hole.completed = true;
        }
        let summary = RoundSummary::of(&round);
        assert_eq!(summary.total_par, 72);
        assert_eq!(summary.total_strokes, 5);
        assert_eq!(summary.diff, -67);
        assert_eq!(summary.completed_holes, 1);
        assert_eq!(summary.front, NineTotals { par: 36, strokes: 0 });
        assert_eq!(summary.back, Some(NineTotals { par: 36, strokes: 5 }));
    }

    #[test]
    fn nine_hole_round_has_no_back() {
        assert_eq!(RoundSummary::of(&Round::with_holes(9)).back, None);
    }
}
