use super::error::AppError;
use super::scorecard::{Deps, Msg, ScorecardModel, run_effect, update};

/// Runs the MVU loop for the scorecard: seeds with `msg` and drains effects.
///
/// # Errors
///
/// Returns the first failure reported by an effect; the model keeps its in-memory state.
pub fn run_scorecard(model: &mut ScorecardModel, msg: Msg, deps: Deps<'_>) -> Result<(), AppError> {
    model.error = None;
    let mut effects = update(model, msg);
    while let Some(effect) = effects.pop() {
        match run_effect(effect, model, deps) {
            Msg::Failed(e) => {
                // Record failure and stop the loop.
                update(model, Msg::Failed(e.clone()));
                return Err(e);
            }
            other => {
                let next = update(model, other);
                effects.extend(next);
            }
        }
    }
    Ok(())
}
