pub mod engine;
pub mod report;

pub use engine::{Game, GameError, PLAYER_COUNT, TRICKS_PER_HAND};
pub use report::HandReport;
