//! Wildmere - A terminal wilderness-survival game
//!
//! Wake in the marsh, keep the hunger gauge off the floor,
//! and outlast whatever comes looking for you.

pub mod assets;
pub mod config;
pub mod ecs;
pub mod events;
pub mod game;
pub mod render;
pub mod ui;
pub mod world;

// Re-export commonly used types
pub use config::Config;
pub use ecs::{Entity, EntityId, EntityStore};
pub use events::{EventBus, EventKind, GameEvent};
pub use game::{Engine, State, Transition};
pub use world::Map;
