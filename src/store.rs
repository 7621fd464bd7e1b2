//! The canonical round being edited, with persistence and change notification.
//!
//! Every mutating call runs one pass of the scorecard MVU loop: the round is copied, edited,
//! swapped in, written to `scores:{holes}` and announced with `AppEvent::DataUpdated`.
//! Out-of-range indices leave everything untouched.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::events::{AppEvent, EventBus, SubscriptionId};
use crate::model::{Celebration, HoleCount, Round, RoundSummary, SwingUpdate, load_round};
use crate::mvu::AppError;
use crate::mvu::runtime::run_scorecard;
use crate::mvu::scorecard::{Deps, HoleUi, Msg, ScorecardModel};
use crate::storage::KvStore;

pub struct RoundStore {
    hole_count: HoleCount,
    model: ScorecardModel,
    store: Arc<dyn KvStore>,
    bus: Arc<EventBus>,
    ui: Arc<Mutex<HoleUi>>,
    subscription: SubscriptionId,
}

impl RoundStore {
    /// Loads `scores:{holes}` (normalizing legacy records) and starts listening for hole selection.
    #[must_use]
    pub fn load(hole_count: HoleCount, store: Arc<dyn KvStore>, bus: Arc<EventBus>) -> Self {
        let holes = hole_count.count();
        let round = load_round(store.as_ref(), holes);
        let ui = Arc::new(Mutex::new(HoleUi::default()));

        let handler_ui = Arc::clone(&ui);
        let subscription = bus.subscribe(move |event| {
            if let AppEvent::SelectHole(index) = event {
                handler_ui
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .select(*index);
            }
        });

        log::debug!("event=round_store_load module=store status=ok holes={holes}");
        Self {
            hole_count,
            model: ScorecardModel::new(holes, round),
            store,
            bus,
            ui,
            subscription,
        }
    }

    fn ui(&self) -> MutexGuard<'_, HoleUi> {
        self.ui.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&mut self, msg: Msg) -> Result<(), AppError> {
        let deps = Deps {
            store: self.store.as_ref(),
            bus: self.bus.as_ref(),
            ui: self.ui.as_ref(),
        };
        let result = run_scorecard(&mut self.model, msg, deps);
        if let Err(e) = &result {
            log::warn!(
                "event=round_persist module=store status=error key={} error={e}",
                self.model.key()
            );
        }
        result
    }

    // Persist failures are logged in `dispatch`; the in-memory round stays authoritative.
    fn apply(&mut self, msg: Msg) {
        let _ = self.dispatch(msg);
    }

    pub fn set_par(&mut self, hole: usize, par: i32) {
        self.apply(Msg::SetPar { hole, par });
    }

    pub fn add_swing(&mut self, hole: usize) {
        self.apply(Msg::AddSwing { hole });
    }

    pub fn remove_last_swing(&mut self, hole: usize) {
        self.apply(Msg::RemoveLastSwing { hole });
    }

    pub fn update_swing(&mut self, hole: usize, swing: usize, update: SwingUpdate) {
        self.apply(Msg::UpdateSwing {
            hole,
            swing,
            update,
        });
    }

    pub fn remove_swing(&mut self, hole: usize, swing: usize) {
        self.apply(Msg::RemoveSwing { hole, swing });
    }

    /// Marks the hole complete and returns what to celebrate. `None` when the hole has no swings.
    ///
    /// Completing an already completed hole writes and broadcasts again.
    pub fn complete_hole(&mut self, hole: usize) -> Option<Celebration> {
        self.apply(Msg::CompleteHole { hole });
        self.model.celebration.clone()
    }

    pub fn reset_round(&mut self) {
        self.apply(Msg::Reset);
    }

    pub fn apply_bulk_pars(&mut self, input: &str) {
        self.apply(Msg::ApplyBulkPars(input.to_string()));
    }

    /// Switches to `hole_count`, keeping records by index, and writes under the new key.
    pub fn resize_to(&mut self, hole_count: HoleCount) {
        self.hole_count = hole_count;
        self.apply(Msg::Resize(hole_count));
    }

    /// Swaps in a round from history or an account, sized to the current hole count.
    pub fn replace_round(&mut self, round: Round) {
        self.apply(Msg::Replace(round));
    }

    pub fn toggle_hole(&self, hole: usize) {
        self.ui().toggle(hole);
    }

    #[must_use]
    pub fn is_expanded(&self, hole: usize) -> bool {
        self.ui().is_expanded(hole)
    }

    #[must_use]
    pub fn scroll_target(&self) -> Option<usize> {
        self.ui().scroll_target()
    }

    /// Returns and clears the pending scroll target; rendering consumes it once.
    pub fn take_scroll_target(&self) -> Option<usize> {
        self.ui().take_scroll_target()
    }

    #[must_use]
    pub fn celebration(&self) -> Option<&Celebration> {
        self.model.celebration.as_ref()
    }

    pub fn dismiss_celebration(&mut self) {
        self.model.celebration = None;
    }

    /// The failure from the most recent mutation, if its write did not go through.
    #[must_use]
    pub fn last_error(&self) -> Option<&AppError> {
        self.model.error.as_ref()
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.model.round
    }

    #[must_use]
    pub fn hole_count(&self) -> HoleCount {
        self.hole_count
    }

    #[must_use]
    pub fn key(&self) -> String {
        self.model.key()
    }

    #[must_use]
    pub fn summary(&self) -> RoundSummary {
        RoundSummary::of(&self.model.round)
    }
}

impl Drop for RoundStore {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscription);
    }
}
