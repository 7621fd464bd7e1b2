//! Read-only heatmap of swing feel per hole.
//!
//! The projector never sees the round store. It reads `scores:{holes}` itself and re-reads it
//! whenever a `DataUpdated` event arrives.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::events::{AppEvent, EventBus, SubscriptionId};
use crate::model::{HoleCount, Round, Terrain, load_round};
use crate::storage::KvStore;

/// Only the first swings of a hole feed its average and dots.
pub const MAX_SWINGS_PER_CELL: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatmapView {
    #[default]
    All,
    Front,
    Back,
}

impl HeatmapView {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Front => "front",
            Self::Back => "back",
        }
    }

    /// Hole indices shown for a round of `holes`. Front and back only split an 18-hole round.
    #[must_use]
    pub fn range(self, holes: usize) -> Range<usize> {
        match (self, holes) {
            (Self::Front, 18) => 0..9,
            (Self::Back, 18) => 9..18,
            _ => 0..holes,
        }
    }
}

impl fmt::Display for HeatmapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeatmapView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "front" => Ok(Self::Front),
            "back" => Ok(Self::Back),
            other => Err(format!("unknown heatmap view `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeelBand {
    NoData,
    Feel1,
    Feel2,
    Feel3,
    Feel4,
    Feel5,
}

impl FeelBand {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::NoData => "no-data",
            Self::Feel1 => "feel-1",
            Self::Feel2 => "feel-2",
            Self::Feel3 => "feel-3",
            Self::Feel4 => "feel-4",
            Self::Feel5 => "feel-5",
        }
    }
}

#[must_use]
pub fn feel_band(average: Option<f64>) -> FeelBand {
    match average {
        None => FeelBand::NoData,
        Some(avg) if avg <= 1.5 => FeelBand::Feel1,
        Some(avg) if avg <= 2.5 => FeelBand::Feel2,
        Some(avg) if avg <= 3.5 => FeelBand::Feel3,
        Some(avg) if avg <= 4.5 => FeelBand::Feel4,
        Some(_) => FeelBand::Feel5,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwingDot {
    pub band: FeelBand,
    pub club: String,
    pub terrain: Terrain,
    pub satisfaction: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatCell {
    pub hole_index: usize,
    pub average: Option<f64>,
    pub band: FeelBand,
    pub dots: Vec<SwingDot>,
}

impl HeatCell {
    #[must_use]
    pub fn hole_number(&self) -> usize {
        self.hole_index + 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HeatmapProjection {
    /// No swings anywhere in the visible range.
    Empty,
    Cells(Vec<HeatCell>),
}

/// Pure projection of `round` for `view`.
#[must_use]
pub fn project(round: &Round, view: HeatmapView) -> HeatmapProjection {
    let range = view.range(round.len());
    let visible = &round.holes()[range.clone()];
    if visible.iter().all(|h| h.swings.is_empty()) {
        return HeatmapProjection::Empty;
    }

    let cells = range
        .zip(visible)
        .map(|(hole_index, hole)| {
            let shown = &hole.swings[..hole.swings.len().min(MAX_SWINGS_PER_CELL)];
            let average = (!shown.is_empty()).then(|| {
                let sum: f64 = shown.iter().map(|s| f64::from(s.satisfaction)).sum();
                sum / shown.len() as f64
            });
            let dots = shown
                .iter()
                .map(|s| SwingDot {
                    band: feel_band(Some(f64::from(s.satisfaction))),
                    club: s.club.clone(),
                    terrain: s.terrain,
                    satisfaction: s.satisfaction,
                })
                .collect();
            HeatCell {
                hole_index,
                average,
                band: feel_band(average),
                dots,
            }
        })
        .collect();
    HeatmapProjection::Cells(cells)
}

struct Snapshot {
    holes: usize,
    round: Round,
}

pub struct HeatmapProjector {
    view: HeatmapView,
    store: Arc<dyn KvStore>,
    bus: Arc<EventBus>,
    snapshot: Arc<Mutex<Snapshot>>,
    subscription: SubscriptionId,
}

impl HeatmapProjector {
    #[must_use]
    pub fn mount(
        hole_count: HoleCount,
        view: HeatmapView,
        store: Arc<dyn KvStore>,
        bus: Arc<EventBus>,
    ) -> Self {
        let holes = hole_count.count();
        let snapshot = Arc::new(Mutex::new(Snapshot {
            holes,
            round: load_round(store.as_ref(), holes),
        }));

        let handler_store = Arc::clone(&store);
        let handler_snapshot = Arc::clone(&snapshot);
        let subscription = bus.subscribe(move |event| {
            if let AppEvent::DataUpdated { key } = event {
                let mut snapshot = handler_snapshot.lock().unwrap_or_else(PoisonError::into_inner);
                snapshot.round = load_round(handler_store.as_ref(), snapshot.holes);
                log::trace!("event=heatmap_refresh module=projector status=ok trigger={key}");
            }
        });

        Self {
            view,
            store,
            bus,
            snapshot,
            subscription,
        }
    }

    fn snapshot(&self) -> MutexGuard<'_, Snapshot> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn view(&self) -> HeatmapView {
        self.view
    }

    pub fn set_view(&mut self, view: HeatmapView) {
        self.view = view;
    }

    #[must_use]
    pub fn holes(&self) -> usize {
        self.snapshot().holes
    }

    /// Points the projector at another hole count and reads that key.
    pub fn set_holes(&self, hole_count: HoleCount) {
        let holes = hole_count.count();
        let mut snapshot = self.snapshot();
        snapshot.holes = holes;
        snapshot.round = load_round(self.store.as_ref(), holes);
    }

    #[must_use]
    pub fn projection(&self) -> HeatmapProjection {
        project(&self.snapshot().round, self.view)
    }

    /// Asks the scorecard to open and scroll to `hole_index`.
    pub fn select(&self, hole_index: usize) {
        self.bus.publish(AppEvent::SelectHole(hole_index));
    }
}

impl Drop for HeatmapProjector {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscription);
    }
}
