//! ECS Components
//!
//! All component kinds entities can carry. Storage is one optional slot per
//! kind: attaching a component of a kind an entity already has replaces it.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

// ============================================================================
// Position & Movement
// ============================================================================

/// Position in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The tile cell this position falls in
    pub fn tile(&self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

/// Velocity in world units per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Velocity {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

// ============================================================================
// Vitals
// ============================================================================

/// Health pool
///
/// `current` stays within `0..=max`; the mutating helpers clamp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage, returning how much was actually taken
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    /// Restore health, returning how much was actually restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let actual = amount.min(self.max - self.current);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn percentage(&self) -> f32 {
        self.current as f32 / self.max as f32
    }
}

/// Hunger gauge
///
/// Same shape and invariant as [`Health`]: `current` within `0..=max`.
/// Hitting zero means starvation, which drains health elsewhere.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hunger {
    pub current: i32,
    pub max: i32,
}

impl Hunger {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Drain the gauge, clamped at zero
    pub fn starve(&mut self, amount: i32) {
        self.current = (self.current - amount).max(0);
    }

    /// Refill the gauge, clamped at max
    pub fn eat(&mut self, amount: i32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn is_starving(&self) -> bool {
        self.current <= 0
    }

    pub fn percentage(&self) -> f32 {
        self.current as f32 / self.max as f32
    }
}

// ============================================================================
// Inventory
// ============================================================================

/// A carried list of items
///
/// Order is acquisition order. Removal takes the first matching item only,
/// so duplicates survive one at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<String>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Remove the first item matching `name`, if any
    pub fn remove_first(&mut self, name: &str) -> Option<String> {
        let idx = self.items.iter().position(|i| i == name)?;
        Some(self.items.remove(idx))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|i| i == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// AI
// ============================================================================

/// AI state for autonomous entities
///
/// `target` is a weak reference: just an id to look up, never an owning
/// handle. The target may be despawned at any time; failing to resolve it
/// is ordinary data flow the AI system answers by dropping the reference.
#[derive(Debug, Clone, Copy)]
pub struct AI {
    pub behavior: AIBehavior,
    pub target: Option<EntityId>,
}

impl AI {
    pub fn new(behavior: AIBehavior) -> Self {
        Self {
            behavior,
            target: None,
        }
    }

    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AIBehavior {
    Idle,
    Wander,
    Seek,
}

// ============================================================================
// Rendering
// ============================================================================

/// Visual representation of an entity
#[derive(Debug, Clone, Copy)]
pub struct Renderable {
    /// Character to display
    pub glyph: char,
    /// Foreground color (RGB)
    pub fg: (u8, u8, u8),
    /// Render order (higher draws on top)
    pub render_order: i32,
}

impl Renderable {
    pub fn new(glyph: char, fg: (u8, u8, u8)) -> Self {
        Self {
            glyph,
            fg,
            render_order: 0,
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.render_order = order;
        self
    }
}

// ============================================================================
// Component registry
// ============================================================================

/// A component value of any kind
#[derive(Debug, Clone)]
pub enum Component {
    Health(Health),
    Hunger(Hunger),
    Inventory(Inventory),
    AI(AI),
    Velocity(Velocity),
    Renderable(Renderable),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Health(_) => ComponentKind::Health,
            Component::Hunger(_) => ComponentKind::Hunger,
            Component::Inventory(_) => ComponentKind::Inventory,
            Component::AI(_) => ComponentKind::AI,
            Component::Velocity(_) => ComponentKind::Velocity,
            Component::Renderable(_) => ComponentKind::Renderable,
        }
    }
}

/// The fixed set of component kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Health,
    Hunger,
    Inventory,
    AI,
    Velocity,
    Renderable,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::Health,
        ComponentKind::Hunger,
        ComponentKind::Inventory,
        ComponentKind::AI,
        ComponentKind::Velocity,
        ComponentKind::Renderable,
    ];
}

/// Per-entity component storage: one optional slot per kind
///
/// Systems read and write the typed fields directly; `attach`/`detach`
/// cover dynamic composition where the kind is only known at runtime.
#[derive(Debug, Clone, Default)]
pub struct ComponentSet {
    pub health: Option<Health>,
    pub hunger: Option<Hunger>,
    pub inventory: Option<Inventory>,
    pub ai: Option<AI>,
    pub velocity: Option<Velocity>,
    pub renderable: Option<Renderable>,
}

impl ComponentSet {
    /// Attach a component, replacing any existing one of the same kind
    pub fn attach(&mut self, component: Component) {
        match component {
            Component::Health(c) => self.health = Some(c),
            Component::Hunger(c) => self.hunger = Some(c),
            Component::Inventory(c) => self.inventory = Some(c),
            Component::AI(c) => self.ai = Some(c),
            Component::Velocity(c) => self.velocity = Some(c),
            Component::Renderable(c) => self.renderable = Some(c),
        }
    }

    /// Detach and return the component of a kind, if present
    pub fn detach(&mut self, kind: ComponentKind) -> Option<Component> {
        match kind {
            ComponentKind::Health => self.health.take().map(Component::Health),
            ComponentKind::Hunger => self.hunger.take().map(Component::Hunger),
            ComponentKind::Inventory => self.inventory.take().map(Component::Inventory),
            ComponentKind::AI => self.ai.take().map(Component::AI),
            ComponentKind::Velocity => self.velocity.take().map(Component::Velocity),
            ComponentKind::Renderable => self.renderable.take().map(Component::Renderable),
        }
    }

    pub fn contains(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Health => self.health.is_some(),
            ComponentKind::Hunger => self.hunger.is_some(),
            ComponentKind::Inventory => self.inventory.is_some(),
            ComponentKind::AI => self.ai.is_some(),
            ComponentKind::Velocity => self.velocity.is_some(),
            ComponentKind::Renderable => self.renderable.is_some(),
        }
    }

    /// Kinds currently present, in registry order
    pub fn kinds(&self) -> Vec<ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(|k| self.contains(*k))
            .collect()
    }
}
