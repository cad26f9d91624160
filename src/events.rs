//! Game events
//!
//! A FIFO event bus owned by the active game state. Producers append,
//! consumers read without draining, and the owner clears explicitly once
//! per frame after dispatch. Events are immutable once queued.

use std::collections::HashMap;

use serde_json::Value;

/// Kinds of game events
///
/// The vocabulary is open: systems may ship kinds the dispatcher has not
/// learned yet, which travel as `Custom` and get the warn-and-continue
/// treatment in [`EventBus::handle_event`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    PlayerAction,
    ItemPickup,
    Custom(String),
}

impl EventKind {
    /// Wire tag for this kind
    pub fn tag(&self) -> &str {
        match self {
            EventKind::PlayerAction => "PLAYER_ACTION",
            EventKind::ItemPickup => "ITEM_PICKUP",
            EventKind::Custom(tag) => tag,
        }
    }

    /// Parse a wire tag into a kind
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "PLAYER_ACTION" => EventKind::PlayerAction,
            "ITEM_PICKUP" => EventKind::ItemPickup,
            other => EventKind::Custom(other.to_string()),
        }
    }
}

/// A single game event
#[derive(Debug, Clone, PartialEq)]
pub struct GameEvent {
    pub kind: EventKind,
    /// Seconds of bus time when the event was created
    pub timestamp: f32,
    /// Open payload; meaning is up to the kind
    pub payload: Option<Value>,
}

impl GameEvent {
    pub fn new(kind: EventKind, timestamp: f32) -> Self {
        Self {
            kind,
            timestamp,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// FIFO queue plus dispatch for game events
///
/// The bus is the sole mutator of its queue. Dispatch never touches the
/// queue, so handling and draining stay independent: the owning state
/// dispatches everything queued, then calls [`clear`](EventBus::clear).
#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<GameEvent>,
    clock: f32,
    handled: HashMap<String, u64>,
    unknown: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the bus clock; `emit` stamps events from it
    pub fn advance(&mut self, dt: f32) {
        self.clock += dt;
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Append an event to the back of the queue
    pub fn push(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    /// Build an event stamped with the bus clock and append it
    pub fn emit(&mut self, kind: EventKind, payload: Option<Value>) {
        self.push(GameEvent {
            kind,
            timestamp: self.clock,
            payload,
        });
    }

    /// Every queued event, oldest first; does not drain
    pub fn events(&self) -> &[GameEvent] {
        &self.queue
    }

    /// Drop all queued events; only the owner calls this
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Dispatch one event to its handler by kind
    ///
    /// Unrecognized kinds are logged and skipped, never fatal: new event
    /// kinds appear over time and an old dispatcher must keep running.
    /// Dispatch leaves the queue alone regardless of kind.
    pub fn handle_event(&mut self, event: &GameEvent) {
        match &event.kind {
            EventKind::PlayerAction => self.on_player_action(event),
            EventKind::ItemPickup => self.on_item_pickup(event),
            EventKind::Custom(tag) => {
                self.unknown += 1;
                log::warn!("Unhandled event type: {}", tag);
            }
        }
    }

    fn on_player_action(&mut self, event: &GameEvent) {
        *self
            .handled
            .entry(EventKind::PlayerAction.tag().to_string())
            .or_insert(0) += 1;
        log::debug!(
            "Player action at t={:.2}s: {:?}",
            event.timestamp,
            event.payload
        );
    }

    fn on_item_pickup(&mut self, event: &GameEvent) {
        *self
            .handled
            .entry(EventKind::ItemPickup.tag().to_string())
            .or_insert(0) += 1;
        log::debug!(
            "Item pickup at t={:.2}s: {:?}",
            event.timestamp,
            event.payload
        );
    }

    /// How many events of a kind have been dispatched to their handler
    pub fn handled_count(&self, kind: &EventKind) -> u64 {
        self.handled.get(kind.tag()).copied().unwrap_or(0)
    }

    /// How many events fell through dispatch unrecognized
    pub fn unknown_count(&self) -> u64 {
        self.unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_events_come_back_in_push_order() {
        let mut bus = EventBus::new();
        bus.push(GameEvent::new(EventKind::PlayerAction, 0.0));
        bus.push(GameEvent::new(EventKind::ItemPickup, 1.0));
        bus.push(GameEvent::new(EventKind::from_tag("WEATHER"), 2.0));

        let kinds: Vec<&str> = bus.events().iter().map(|e| e.kind.tag()).collect();
        assert_eq!(kinds, vec!["PLAYER_ACTION", "ITEM_PICKUP", "WEATHER"]);
        assert_eq!(bus.len(), 3);
    }

    #[test]
    fn test_clear_is_explicit_and_total() {
        let mut bus = EventBus::new();
        bus.push(GameEvent::new(EventKind::PlayerAction, 0.0));
        bus.push(GameEvent::new(EventKind::PlayerAction, 0.5));

        // Reading does not drain
        assert_eq!(bus.events().len(), 2);
        assert_eq!(bus.events().len(), 2);

        bus.clear();
        assert!(bus.is_empty());
    }

    #[test]
    fn test_emit_stamps_with_bus_clock() {
        let mut bus = EventBus::new();
        bus.advance(1.5);
        bus.emit(EventKind::PlayerAction, None);
        bus.advance(0.5);
        bus.emit(EventKind::ItemPickup, Some(json!({ "item": "berry" })));

        assert_eq!(bus.events()[0].timestamp, 1.5);
        assert_eq!(bus.events()[1].timestamp, 2.0);
        assert_eq!(
            bus.events()[1].payload,
            Some(json!({ "item": "berry" }))
        );
    }

    #[test]
    fn test_unknown_kind_warns_without_mutating_queue() {
        let mut bus = EventBus::new();
        bus.push(GameEvent::new(EventKind::PlayerAction, 0.0));
        bus.push(GameEvent::new(EventKind::Custom("ECLIPSE".into()), 1.0));
        let before: Vec<GameEvent> = bus.events().to_vec();

        // Dispatching the unknown kind neither panics nor drains
        let unknown = before[1].clone();
        bus.handle_event(&unknown);

        assert_eq!(bus.events(), &before[..]);
        assert_eq!(bus.unknown_count(), 1);
        assert_eq!(bus.handled_count(&EventKind::PlayerAction), 0);
    }

    #[test]
    fn test_recognized_kinds_reach_their_handlers() {
        let mut bus = EventBus::new();
        bus.emit(EventKind::PlayerAction, None);
        bus.emit(EventKind::PlayerAction, None);
        bus.emit(EventKind::ItemPickup, Some(json!({ "item": "flint" })));

        let queued: Vec<GameEvent> = bus.events().to_vec();
        for event in &queued {
            bus.handle_event(event);
        }

        assert_eq!(bus.handled_count(&EventKind::PlayerAction), 2);
        assert_eq!(bus.handled_count(&EventKind::ItemPickup), 1);
        assert_eq!(bus.unknown_count(), 0);
        // Dispatch handled everything but drained nothing
        assert_eq!(bus.len(), 3);
    }

    #[test]
    fn test_tag_round_trip() {
        assert_eq!(EventKind::from_tag("PLAYER_ACTION"), EventKind::PlayerAction);
        assert_eq!(EventKind::from_tag("ITEM_PICKUP"), EventKind::ItemPickup);
        assert_eq!(
            EventKind::from_tag("MIGRATION"),
            EventKind::Custom("MIGRATION".into())
        );
        assert_eq!(EventKind::Custom("MIGRATION".into()).tag(), "MIGRATION");
    }
}
