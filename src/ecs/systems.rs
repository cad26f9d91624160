//! ECS Systems
//!
//! Game logic that runs over the entity batch each frame. Systems rewrite
//! entities but never add or remove them: they only ever see the batch
//! slice, and anything that wants a spawn or despawn asks for it by
//! pushing an event instead.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

use super::components::{AIBehavior, Position, Velocity};
use super::entity::{Entity, EntityId};
use crate::events::{EventBus, EventKind};
use crate::render::DrawCommand;

/// A simulation system
///
/// Systems run in the order the owning state lists them, once per frame,
/// and must be safe to call on an empty batch.
pub trait System {
    fn name(&self) -> &'static str;

    /// Advance the batch by `dt` seconds
    fn update(&mut self, entities: &mut [Entity], events: &mut EventBus, dt: f32);
}

// ============================================================================
// Movement
// ============================================================================

/// Integrates velocity into position
///
/// Plain scaling, no collision: an entity with velocity `(1, 0)` moves
/// exactly one world unit along x per second.
#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn update(&mut self, entities: &mut [Entity], _events: &mut EventBus, dt: f32) {
        for entity in entities.iter_mut() {
            if let Some(vel) = entity.components.velocity {
                if vel.is_zero() {
                    continue;
                }
                entity.position.x += vel.dx * dt;
                entity.position.y += vel.dy * dt;
            }
        }
    }
}

// ============================================================================
// AI
// ============================================================================

/// Wander speed in world units per second
const WANDER_SPEED: f32 = 1.2;
/// Seek speed in world units per second
const SEEK_SPEED: f32 = 2.4;
/// Distance at which a seeker counts as having reached its target
const ARRIVE_RADIUS: f32 = 0.75;
/// Chance per second that a wanderer picks a new direction
const WANDER_REROLL_RATE: f32 = 0.8;

/// Drives entities with an AI component
///
/// Two phases per update: snapshot every entity's position (the read
/// pass), then walk the batch applying behavior (the write pass). Seek
/// targets are weak ids resolved against the snapshot; a target that has
/// despawned clears the reference and drops the seeker back to wandering.
pub struct AISystem {
    rng: StdRng,
}

impl AISystem {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed seed, for reproducible behavior
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn random_direction(&mut self) -> Velocity {
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        Velocity::new(angle.cos() * WANDER_SPEED, angle.sin() * WANDER_SPEED)
    }
}

impl Default for AISystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for AISystem {
    fn name(&self) -> &'static str {
        "ai"
    }

    fn update(&mut self, entities: &mut [Entity], events: &mut EventBus, dt: f32) {
        // Read pass: positions of everything, for target lookups
        let positions: Vec<(EntityId, Position)> =
            entities.iter().map(|e| (e.id(), e.position)).collect();

        for entity in entities.iter_mut() {
            let entity_id = entity.id();
            let Some(ai) = entity.components.ai.as_mut() else {
                continue;
            };

            match ai.behavior {
                AIBehavior::Idle => {
                    if let Some(vel) = entity.components.velocity.as_mut() {
                        *vel = Velocity::zero();
                    }
                }
                AIBehavior::Wander => {
                    let reroll = (WANDER_REROLL_RATE * dt).clamp(0.0, 1.0);
                    if self.rng.gen_bool(reroll as f64) {
                        entity.components.velocity = Some(self.random_direction());
                    }
                }
                AIBehavior::Seek => {
                    let Some(target_id) = ai.target else {
                        // Nothing to chase; wander until a target shows up
                        ai.behavior = AIBehavior::Wander;
                        continue;
                    };

                    let target_pos = positions
                        .iter()
                        .find(|(id, _)| *id == target_id)
                        .map(|(_, pos)| *pos);

                    match target_pos {
                        None => {
                            // Target despawned out from under us; the weak
                            // reference just gets dropped
                            log::debug!("Entity {} lost seek target {}", entity_id, target_id);
                            ai.target = None;
                            ai.behavior = AIBehavior::Wander;
                        }
                        Some(pos) if entity.position.distance_to(&pos) <= ARRIVE_RADIUS => {
                            entity.components.velocity = Some(Velocity::zero());
                            ai.target = None;
                            ai.behavior = AIBehavior::Idle;
                            events.emit(
                                EventKind::from_tag("TARGET_REACHED"),
                                Some(json!({
                                    "seeker": entity_id.raw(),
                                    "target": target_id.raw(),
                                })),
                            );
                        }
                        Some(pos) => {
                            let dx = pos.x - entity.position.x;
                            let dy = pos.y - entity.position.y;
                            let len = (dx * dx + dy * dy).sqrt();
                            entity.components.velocity =
                                Some(Velocity::new(dx / len * SEEK_SPEED, dy / len * SEEK_SPEED));
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Builds the per-frame draw list
///
/// Read-only over the batch: entities without a Renderable are skipped,
/// not an error. Output order is deterministic — a stable sort by render
/// order over the batch's insertion order.
#[derive(Debug, Default)]
pub struct RenderSystem;

impl RenderSystem {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, entities: &[Entity]) -> Vec<DrawCommand> {
        let mut commands: Vec<DrawCommand> = entities
            .iter()
            .filter_map(|entity| {
                let renderable = entity.components.renderable?;
                let (x, y) = entity.position.tile();
                Some(DrawCommand {
                    x,
                    y,
                    glyph: renderable.glyph,
                    fg: renderable.fg,
                    order: renderable.render_order,
                })
            })
            .collect();
        // sort_by_key is stable, so equal orders keep insertion order
        commands.sort_by_key(|c| c.order);
        commands
    }
}
