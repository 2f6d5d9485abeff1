pub mod game;
pub mod error;
pub mod config;
pub mod logging;

pub use error::{GameError, Result};
pub use config::{Config, ConfigError};
pub use game::{GameEngine, GameView, GameEvent, EventRecorder, MoveOutcome};
