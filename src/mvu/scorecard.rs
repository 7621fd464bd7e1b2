use std::collections::BTreeSet;
use std::sync::Mutex;

use super::error::AppError;
use crate::events::{AppEvent, EventBus};
use crate::model::{Celebration, HoleCount, Round, SwingRecord, SwingUpdate};
use crate::storage::keys::scores_key;
use crate::storage::{KvStore, put_json};

#[derive(Debug, Clone)]
pub struct ScorecardModel {
    pub holes: usize,
    pub round: Round,
    pub celebration: Option<Celebration>,
    pub error: Option<AppError>,
}

impl ScorecardModel {
    #[must_use]
    pub fn new(holes: usize, round: Round) -> Self {
        Self {
            holes,
            round,
            celebration: None,
            error: None,
        }
    }

    #[must_use]
    pub fn key(&self) -> String {
        scores_key(self.holes)
    }
}

/// Which hole details are open in the editor. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoleUi {
    expanded: BTreeSet<usize>,
    scroll_target: Option<usize>,
}

impl HoleUi {
    pub fn expand(&mut self, hole: usize) {
        self.expanded.insert(hole);
    }

    pub fn toggle(&mut self, hole: usize) {
        if !self.expanded.remove(&hole) {
            self.expanded.insert(hole);
        }
    }

    /// Expands `hole` and marks it as the element to scroll to on the next render.
    pub fn select(&mut self, hole: usize) {
        self.expand(hole);
        self.scroll_target = Some(hole);
    }

    #[must_use]
    pub fn is_expanded(&self, hole: usize) -> bool {
        self.expanded.contains(&hole)
    }

    #[must_use]
    pub fn scroll_target(&self) -> Option<usize> {
        self.scroll_target
    }

    pub fn take_scroll_target(&mut self) -> Option<usize> {
        self.scroll_target.take()
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    SetPar { hole: usize, par: i32 },
    AddSwing { hole: usize },
    RemoveLastSwing { hole: usize },
    UpdateSwing { hole: usize, swing: usize, update: SwingUpdate },
    RemoveSwing { hole: usize, swing: usize },
    CompleteHole { hole: usize },
    Reset,
    ApplyBulkPars(String),
    Resize(HoleCount),
    Replace(Round),
    Persisted,
    Broadcasted,
    Expanded,
    Failed(AppError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Persist,
    Broadcast,
    Expand(usize),
}

/// Applies `edit` to a copy of the round and swaps it in when `edit` reports a change.
fn copy_on_write(model: &mut ScorecardModel, edit: impl FnOnce(&mut Round) -> bool) -> Vec<Effect> {
    let mut next = model.round.clone();
    if !edit(&mut next) {
        return vec![];
    }
    model.round = next;
    vec![Effect::Persist]
}

pub fn update(model: &mut ScorecardModel, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::SetPar { hole, par } => copy_on_write(model, |round| {
            round.hole_mut(hole).map(|h| h.par = par).is_some()
        }),
        Msg::AddSwing { hole } => {
            let mut effects = copy_on_write(model, |round| {
                round
                    .hole_mut(hole)
                    .map(|h| h.swings.push(SwingRecord::default()))
                    .is_some()
            });
            // Popped first, so the hole opens even if persisting fails.
            if !effects.is_empty() {
                effects.push(Effect::Expand(hole));
            }
            effects
        }
        Msg::RemoveLastSwing { hole } => copy_on_write(model, |round| {
            round
                .hole_mut(hole)
                .and_then(|h| h.swings.pop())
                .is_some()
        }),
        Msg::UpdateSwing {
            hole,
            swing,
            update,
        } => copy_on_write(model, |round| {
            round
                .hole_mut(hole)
                .and_then(|h| h.swings.get_mut(swing))
                .map(|s| update.apply(s))
                .is_some()
        }),
        Msg::RemoveSwing { hole, swing } => copy_on_write(model, |round| {
            match round.hole_mut(hole) {
                Some(h) if swing < h.swings.len() => {
                    h.swings.remove(swing);
                    true
                }
                _ => false,
            }
        }),
        Msg::CompleteHole { hole } => {
            let Some(record) = model.round.hole(hole).filter(|h| !h.swings.is_empty()) else {
                model.celebration = None;
                return vec![];
            };
            model.celebration = Celebration::new(hole, record.strokes(), record.par);
            // Repeat completions write again.
            copy_on_write(model, |round| {
                round.hole_mut(hole).map(|h| h.completed = true).is_some()
            })
        }
        Msg::Reset => {
            model.round = Round::with_holes(model.holes);
            model.celebration = None;
            vec![Effect::Persist]
        }
        Msg::ApplyBulkPars(input) => {
            copy_on_write(model, |round| round.apply_bulk_pars(&input) > 0)
        }
        Msg::Resize(count) => {
            let count = count.count();
            if count == model.holes && model.round.len() == count {
                return vec![];
            }
            model.holes = count;
            copy_on_write(model, |round| {
                round.resize(count);
                true
            })
        }
        Msg::Replace(mut round) => {
            round.resize(model.holes);
            model.round = round;
            model.celebration = None;
            vec![Effect::Persist]
        }
        Msg::Persisted => vec![Effect::Broadcast],
        Msg::Broadcasted | Msg::Expanded => vec![],
        Msg::Failed(e) => {
            model.error = Some(e);
            vec![]
        }
    }
}

#[derive(Clone, Copy)]
pub struct Deps<'a> {
    pub store: &'a dyn KvStore,
    pub bus: &'a EventBus,
    pub ui: &'a Mutex<HoleUi>,
}

pub fn run_effect(effect: Effect, model: &ScorecardModel, deps: Deps<'_>) -> Msg {
    match effect {
        Effect::Persist => match put_json(deps.store, &model.key(), &model.round) {
            Ok(()) => Msg::Persisted,
            Err(e) => Msg::Failed(AppError::from(e)),
        },
        Effect::Broadcast => {
            deps.bus.publish(AppEvent::DataUpdated { key: model.key() });
            Msg::Broadcasted
        }
        Effect::Expand(hole) => {
            deps.ui
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .expand(hole);
            Msg::Expanded
        }
    }
}
