pub mod args;
pub mod controller;
pub mod events;
pub mod logging;
pub mod model;
pub mod mvu;
pub mod projector;
pub mod storage;
pub mod store;
pub mod sync;
pub mod view;

const HTMX_PATH: &str = "https://unpkg.com/htmx.org@1.9.12";

pub use events::{AppEvent, EventBus};
pub use projector::{HeatmapProjector, HeatmapView};
pub use store::RoundStore;
