use std::sync::Arc;

use crate::events::EventBus;
use crate::model::account::Accounts;
use crate::model::session::SessionManager;
use crate::model::{ClubSet, HoleCount, SavedGames};
use crate::projector::{HeatmapProjector, HeatmapView};
use crate::storage::KvStore;
use crate::store::RoundStore;
use crate::sync::SessionSync;
use crate::view::scorecard::Panel;

/// Everything one user edits, shared by all handlers behind a `tokio::sync::Mutex`.
pub struct Workspace {
    pub kv: Arc<dyn KvStore>,
    pub bus: Arc<EventBus>,
    pub round: RoundStore,
    pub heatmap: HeatmapProjector,
    pub show_heatmap: bool,
    pub clubs: ClubSet,
    pub saved: SavedGames,
    pub accounts: Accounts,
    pub session: SessionManager,
    pub remote_sync: bool,
}

impl Workspace {
    /// Loads every persisted document and wires the round store and heatmap to one bus.
    #[must_use]
    pub fn open(
        kv: Arc<dyn KvStore>,
        hole_count: HoleCount,
        sync: Arc<dyn SessionSync>,
        remote_sync: bool,
    ) -> Self {
        let bus = Arc::new(EventBus::new());
        let round = RoundStore::load(hole_count, Arc::clone(&kv), Arc::clone(&bus));
        let heatmap = HeatmapProjector::mount(
            hole_count,
            HeatmapView::All,
            Arc::clone(&kv),
            Arc::clone(&bus),
        );
        let clubs = ClubSet::load(kv.as_ref());
        let saved = SavedGames::load(kv.as_ref());
        let accounts = Accounts::load(Arc::clone(&kv), Arc::clone(&bus));
        log::info!(
            "event=workspace_open module=controller status=ok holes={} remote_sync={remote_sync}",
            hole_count.count()
        );
        Self {
            kv,
            bus,
            round,
            heatmap,
            show_heatmap: true,
            clubs,
            saved,
            accounts,
            session: SessionManager::new(sync),
            remote_sync,
        }
    }

    /// Switches the scorecard and the heatmap to another hole count.
    pub fn resize(&mut self, hole_count: HoleCount) {
        self.round.resize_to(hole_count);
        self.heatmap.set_holes(hole_count);
    }

    /// Snapshot for rendering; consumes any pending scroll target.
    #[must_use]
    pub fn panel(&self) -> Panel<'_> {
        Panel {
            store: &self.round,
            projection: self.heatmap.projection(),
            view: self.heatmap.view(),
            clubs: &self.clubs,
            show_heatmap: self.show_heatmap,
            scroll_to: self.round.take_scroll_target(),
        }
    }
}

/// How handlers receive the workspace.
pub type WorkspaceData = actix_web::web::Data<tokio::sync::Mutex<Workspace>>;
