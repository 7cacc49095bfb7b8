#![deny(warnings)]
pub mod game;
pub mod model;

pub use game::{Game, GameError, HandReport};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "hearts-sim"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
