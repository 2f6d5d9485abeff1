pub mod types;
pub mod board;
pub mod win_condition;
pub mod state;
pub mod view;
pub mod engine;

pub use types::*;
pub use board::*;
pub use win_condition::*;
pub use state::*;
pub use view::*;
pub use engine::*;
