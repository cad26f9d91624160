//! Game module - Engine, states, and the loop that drives them

mod engine;
mod menu;
mod pause;
mod play;
mod state;
mod time;

pub use engine::Engine;
pub use menu::MainMenuState;
pub use pause::PauseState;
pub use play::PlayState;
pub use state::{State, Transition};
pub use time::TickTimer;
