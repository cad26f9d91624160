//! Entity Component System module
//!
//! The entity store, all component kinds, and the systems that run over
//! them.

pub mod components;
pub mod entity;
pub mod systems;

pub use components::*;
pub use entity::{Entity, EntityId, EntityStore};
pub use systems::{AISystem, MovementSystem, RenderSystem, System};
