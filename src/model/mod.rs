pub mod account;
pub mod clubs;
pub mod round;
pub mod saved_games;
pub mod schema;
pub mod score;
pub mod session;
pub mod summary;

pub use clubs::ClubSet;
pub use round::*;
pub use saved_games::{SavedGame, SavedGames};
pub use schema::{load_round, parse_round};
pub use score::*;
pub use summary::{NineTotals, RoundSummary};
