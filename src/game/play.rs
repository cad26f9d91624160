//! Play state
//!
//! The live world: entity store, event bus, map, HUD, and the systems
//! that run over them every frame. The whole thing is bundled into a
//! `WorldSession` so pausing can move it out and resuming can move it
//! back without rebuilding anything.

use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;
use serde_json::json;

use super::menu::MainMenuState;
use super::pause::PauseState;
use super::state::{State, Transition};
use super::time::TickTimer;
use crate::config::Config;
use crate::ecs::{
    AIBehavior, AISystem, Component, EntityId, EntityStore, Health, Hunger, Inventory,
    MovementSystem, Position, Renderable, RenderSystem, System, Velocity, AI,
};
use crate::events::{EventBus, EventKind, GameEvent};
use crate::render::paint_world;
use crate::ui::Hud;
use crate::world::{Map, TileKind};

/// Seconds between hunger ticks
const HUNGER_TICK_SECS: f32 = 2.0;
/// Hunger drained per tick
const HUNGER_PER_TICK: i32 = 1;
/// Health drained per hunger tick once the gauge is empty
const STARVATION_DAMAGE: i32 = 2;
/// How many critters share the map with the player
const CRITTER_COUNT: usize = 6;
/// Player walk speed in tiles per second
const PLAYER_SPEED: f32 = 6.0;
/// How much one foraged meal refills
const FOOD_VALUE: i32 = 25;
/// What the player can eat, in preference order
const FOODS: [&str; 2] = ["berries", "mushroom"];

/// Everything one run owns; survives pause round trips intact
pub(super) struct WorldSession {
    store: EntityStore,
    events: EventBus,
    map: Map,
    hud: Hud,
    systems: Vec<Box<dyn System>>,
    renderer: RenderSystem,
    player: EntityId,
    hunger_timer: TickTimer,
    starving_warned: bool,
}

impl WorldSession {
    /// Route a gameplay key
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('w') => self.steer(0.0, -PLAYER_SPEED, "north"),
            KeyCode::Down | KeyCode::Char('s') => self.steer(0.0, PLAYER_SPEED, "south"),
            KeyCode::Left | KeyCode::Char('a') => self.steer(-PLAYER_SPEED, 0.0, "west"),
            KeyCode::Right | KeyCode::Char('d') => self.steer(PLAYER_SPEED, 0.0, "east"),
            KeyCode::Char(' ') => self.halt(),
            KeyCode::Char('g') => self.forage(),
            KeyCode::Char('e') => self.eat(),
            _ => {}
        }
    }

    /// Point the player somewhere and record the action
    fn steer(&mut self, dx: f32, dy: f32, heading: &str) {
        if let Some(player) = self.store.get_mut(self.player) {
            player.components.velocity = Some(Velocity::new(dx, dy));
        }
        self.events.emit(
            EventKind::PlayerAction,
            Some(json!({ "action": "move", "heading": heading })),
        );
    }

    fn halt(&mut self) {
        if let Some(player) = self.store.get_mut(self.player) {
            player.components.velocity = Some(Velocity::zero());
        }
        self.events.emit(
            EventKind::PlayerAction,
            Some(json!({ "action": "halt" })),
        );
    }

    /// Gather whatever grows on the player's tile
    fn forage(&mut self) {
        let tile = self
            .store
            .get(self.player)
            .and_then(|player| {
                let (x, y) = player.position.tile();
                self.map.tile(x, y).ok()
            });

        let found = match tile {
            Some(TileKind::Grass) => Some("berries"),
            Some(TileKind::Forest) => Some("mushroom"),
            _ => None,
        };

        match found {
            Some(item) => {
                if let Some(player) = self.store.get_mut(self.player) {
                    if let Some(inventory) = player.components.inventory.as_mut() {
                        inventory.add(item);
                    }
                }
                self.hud.add_item(item);
                self.hud.push_message(format!("You gather {}.", item));
                self.events
                    .emit(EventKind::ItemPickup, Some(json!({ "item": item })));
            }
            None => self.hud.push_message("Nothing to gather here."),
        }
    }

    /// Eat the first food in the pack
    fn eat(&mut self) {
        let mut eaten = None;
        if let Some(player) = self.store.get_mut(self.player) {
            if let Some(inventory) = player.components.inventory.as_mut() {
                eaten = FOODS.iter().find_map(|food| inventory.remove_first(food));
            }
            if eaten.is_some() {
                if let Some(hunger) = player.components.hunger.as_mut() {
                    hunger.eat(FOOD_VALUE);
                }
            }
        }

        match eaten {
            Some(item) => {
                self.hud.remove_item(&item);
                self.hud.update_hunger(FOOD_VALUE);
                self.hud.push_message(format!("You eat the {}.", item));
            }
            None => self.hud.push_message("Nothing edible in the pack."),
        }
    }
}

/// The state that runs an expedition
pub struct PlayState {
    config: Config,
    session: Option<WorldSession>,
}

impl PlayState {
    /// A fresh run; the world is built in `init`
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Rewrap a suspended session; `init` leaves it untouched
    pub(super) fn resume(config: Config, session: WorldSession) -> Self {
        Self {
            config,
            session: Some(session),
        }
    }

    pub(super) fn take_session(&mut self) -> Option<WorldSession> {
        self.session.take()
    }

    fn build_session(config: &Config) -> WorldSession {
        let map = Map::generate(config.map_width, config.map_height);
        let mut store = EntityStore::new();
        let mut rng = StdRng::from_entropy();

        // Player wakes on the northern grassland
        let player = store.spawn(Position::new(config.map_width as f32 / 2.0, 1.5));
        if let Some(entity) = store.get_mut(player) {
            entity.components.attach(Component::Health(Health::new(100)));
            entity.components.attach(Component::Hunger(Hunger::new(100)));
            entity
                .components
                .attach(Component::Inventory(Inventory::new()));
            entity
                .components
                .attach(Component::Velocity(Velocity::zero()));
            entity.components.attach(Component::Renderable(
                Renderable::new('@', (240, 240, 240)).with_order(10),
            ));
        }

        // Wildlife scattered over dry ground
        let open = map.walkable_positions();
        for i in 0..CRITTER_COUNT {
            if open.is_empty() {
                break;
            }
            let (x, y) = open[rng.gen_range(0..open.len())];
            let critter = store.spawn(Position::new(x as f32 + 0.5, y as f32 + 0.5));
            if let Some(entity) = store.get_mut(critter) {
                entity.components.attach(Component::Health(Health::new(20)));
                entity
                    .components
                    .attach(Component::Velocity(Velocity::zero()));
                // the first critter is bold enough to come looking
                let ai = if i == 0 {
                    AI::new(AIBehavior::Seek).with_target(player)
                } else {
                    AI::new(AIBehavior::Wander)
                };
                entity.components.attach(Component::AI(ai));
                let (glyph, fg) = if i == 0 {
                    ('f', (200, 120, 60))
                } else {
                    ('r', (170, 150, 110))
                };
                entity
                    .components
                    .attach(Component::Renderable(Renderable::new(glyph, fg)));
            }
        }

        // AI steers first, movement applies it in the same frame
        let systems: Vec<Box<dyn System>> = vec![
            Box::new(AISystem::new()),
            Box::new(MovementSystem::new()),
        ];

        let mut hud = Hud::new();
        hud.push_message("You wake in the wildmere. Forage [g], eat [e].");

        WorldSession {
            store,
            events: EventBus::new(),
            map,
            hud,
            systems,
            renderer: RenderSystem::new(),
            player,
            hunger_timer: TickTimer::new(HUNGER_TICK_SECS),
            starving_warned: false,
        }
    }

    /// Keep every entity on the map after movement
    fn clamp_to_map(store: &mut EntityStore, map: &Map) {
        let max_x = (map.width() as f32 - 0.01).max(0.0);
        let max_y = (map.height() as f32 - 0.01).max(0.0);
        for entity in store.entities_mut() {
            entity.position.x = entity.position.x.clamp(0.0, max_x);
            entity.position.y = entity.position.y.clamp(0.0, max_y);
        }
    }
}

impl State for PlayState {
    fn name(&self) -> &'static str {
        "play"
    }

    fn init(&mut self) {
        if self.session.is_none() {
            self.session = Some(Self::build_session(&self.config));
            log::info!(
                "New run started on a {}x{} map",
                self.config.map_width,
                self.config.map_height
            );
        } else {
            log::info!("Run resumed");
        }
    }

    fn handle_input(&mut self, key: KeyEvent) -> Transition {
        match key.code {
            KeyCode::Esc => {
                log::debug!("Suspending run");
                match self.take_session() {
                    Some(session) => Transition::Switch(Box::new(PauseState::new(
                        self.config.clone(),
                        session,
                    ))),
                    // nothing to suspend, fall back to the menu
                    None => {
                        Transition::Switch(Box::new(MainMenuState::new(self.config.clone())))
                    }
                }
            }
            KeyCode::Char('q') => Transition::Quit,
            _ => {
                if let Some(session) = self.session.as_mut() {
                    session.handle_key(key);
                }
                Transition::None
            }
        }
    }

    fn update(&mut self, dt: f32) -> Transition {
        let session = match self.session.as_mut() {
            Some(session) => session,
            None => return Transition::None,
        };

        session.events.advance(dt);

        // Systems run in registration order over the whole batch
        for system in session.systems.iter_mut() {
            system.update(session.store.entities_mut(), &mut session.events, dt);
        }
        Self::clamp_to_map(&mut session.store, &session.map);

        // Hunger drains on its own clock, not per frame
        for _ in 0..session.hunger_timer.tick(dt) {
            session.hud.update_hunger(-HUNGER_PER_TICK);
            let mut starving = false;
            if let Some(player) = session.store.get_mut(session.player) {
                if let Some(hunger) = player.components.hunger.as_mut() {
                    hunger.starve(HUNGER_PER_TICK);
                    starving = hunger.is_starving();
                }
            }
            if starving {
                session.hud.update_health(-STARVATION_DAMAGE);
                if let Some(player) = session.store.get_mut(session.player) {
                    if let Some(health) = player.components.health.as_mut() {
                        health.take_damage(STARVATION_DAMAGE);
                    }
                }
                if !session.starving_warned {
                    session.hud.push_message("Your stomach is empty. Find food.");
                    session.starving_warned = true;
                }
            } else {
                session.starving_warned = false;
            }
        }

        // Dispatch everything queued this frame, then clear once
        let queued: Vec<GameEvent> = session.events.events().to_vec();
        for event in &queued {
            session.events.handle_event(event);
        }
        session.events.clear();

        // Starved out: the run is over
        let player_dead = session
            .store
            .get(session.player)
            .and_then(|p| p.components.health)
            .map_or(false, |h| h.is_dead());
        if player_dead {
            log::info!("The player starved; back to the menu");
            return Transition::Switch(Box::new(MainMenuState::new(self.config.clone())));
        }

        Transition::None
    }

    fn render(&mut self, frame: &mut Frame) {
        let session = match self.session.as_ref() {
            Some(session) => session,
            None => return,
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(28)])
            .split(frame.area());

        let draw_list = session.renderer.render(session.store.entities());
        paint_world(frame, chunks[0], &session.map, &draw_list);
        session.hud.render(frame, chunks[1]);
    }

    fn exit(&mut self) {
        match self.session.as_ref() {
            Some(session) => log::info!(
                "Leaving run after {:.1}s with {} entities",
                session.hunger_timer.elapsed(),
                session.store.len()
            ),
            None => log::debug!("Play state suspended"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn started() -> PlayState {
        let config = Config {
            map_width: 12,
            map_height: 9,
            ..Config::default()
        };
        let mut play = PlayState::new(config);
        play.init();
        play
    }

    #[test]
    fn test_init_builds_the_world_once() {
        let mut play = started();
        let before: Vec<_> = {
            let session = play.session.as_ref().unwrap();
            session.store.iter().map(|e| e.id()).collect()
        };
        assert!(!before.is_empty());

        // a second init must not rebuild or respawn anything
        play.init();
        let after: Vec<_> = {
            let session = play.session.as_ref().unwrap();
            session.store.iter().map(|e| e.id()).collect()
        };
        assert_eq!(before, after);
    }

    #[test]
    fn test_player_spawns_with_survival_kit() {
        let play = started();
        let session = play.session.as_ref().unwrap();
        let player = session.store.get(session.player).unwrap();

        assert!(player.components.health.is_some());
        assert!(player.components.hunger.is_some());
        assert!(player.components.inventory.is_some());
        assert!(player.components.renderable.is_some());
        // the player is steered by keys, not by the AI system
        assert!(player.components.ai.is_none());
    }

    #[test]
    fn test_update_dispatches_then_clears_events() {
        let mut play = started();
        play.handle_input(key(KeyCode::Right));
        assert_eq!(play.session.as_ref().unwrap().events.len(), 1);

        let transition = play.update(0.016);
        assert!(matches!(transition, Transition::None));

        let session = play.session.as_ref().unwrap();
        assert!(session.events.is_empty());
        assert_eq!(session.events.handled_count(&EventKind::PlayerAction), 1);
    }

    #[test]
    fn test_steering_moves_the_player() {
        let mut play = started();
        let start = {
            let session = play.session.as_ref().unwrap();
            session.store.get(session.player).unwrap().position
        };

        play.handle_input(key(KeyCode::Right));
        play.update(0.5);

        let session = play.session.as_ref().unwrap();
        let here = session.store.get(session.player).unwrap().position;
        assert!(here.x > start.x);
        assert_eq!(here.y, start.y);
    }

    #[test]
    fn test_forage_and_eat_round_trip() {
        let mut play = started();
        // the player starts on the grass band, so foraging yields berries
        play.handle_input(key(KeyCode::Char('g')));
        {
            let session = play.session.as_ref().unwrap();
            assert!(session.hud.items().contains(&"berries".to_string()));
            let player = session.store.get(session.player).unwrap();
            assert!(player
                .components
                .inventory
                .as_ref()
                .unwrap()
                .contains("berries"));
        }

        // drain one hunger tick, then eat it back
        play.update(2.1);
        let hungry = play.session.as_ref().unwrap().hud.hunger();
        assert!(hungry < 100);

        play.handle_input(key(KeyCode::Char('e')));
        let session = play.session.as_ref().unwrap();
        assert!(session.hud.hunger() > hungry);
        assert!(session.hud.items().is_empty());
        let player = session.store.get(session.player).unwrap();
        assert!(player.components.inventory.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_starvation_drains_health() {
        let mut play = started();
        {
            let session = play.session.as_mut().unwrap();
            // run the gauge dry so the next tick starves
            if let Some(player) = session.store.get_mut(session.player) {
                if let Some(hunger) = player.components.hunger.as_mut() {
                    hunger.starve(1000);
                }
            }
            session.hud.update_hunger(-1000);
        }

        play.update(2.1);

        let session = play.session.as_ref().unwrap();
        let player = session.store.get(session.player).unwrap();
        assert!(player.components.health.unwrap().current < 100);
        assert!(session.hud.health() < 100);
    }

    #[test]
    fn test_esc_suspends_the_session() {
        let mut play = started();
        let transition = play.handle_input(key(KeyCode::Esc));
        match transition {
            Transition::Switch(next) => assert_eq!(next.name(), "pause"),
            other => panic!("expected Switch, got {:?}", other),
        }
        // the session left with it
        assert!(play.session.is_none());
    }

    #[test]
    fn test_resume_preserves_the_session() {
        let mut play = started();
        play.handle_input(key(KeyCode::Char('g')));
        let ids: Vec<_> = {
            let session = play.session.as_ref().unwrap();
            session.store.iter().map(|e| e.id()).collect()
        };

        // suspend, rewrap, reactivate
        let session = play.take_session().unwrap();
        let mut resumed = PlayState::resume(Config::default(), session);
        resumed.init();

        let session = resumed.session.as_ref().unwrap();
        let after: Vec<_> = session.store.iter().map(|e| e.id()).collect();
        assert_eq!(ids, after);
        assert!(session.hud.items().contains(&"berries".to_string()));
    }

    #[test]
    fn test_dead_player_ends_the_run() {
        let mut play = started();
        {
            let session = play.session.as_mut().unwrap();
            if let Some(player) = session.store.get_mut(session.player) {
                if let Some(health) = player.components.health.as_mut() {
                    health.take_damage(1000);
                }
            }
        }

        let transition = play.update(0.016);
        match transition {
            Transition::Switch(next) => assert_eq!(next.name(), "main_menu"),
            other => panic!("expected Switch, got {:?}", other),
        }
    }

    #[test]
    fn test_play_screen_shows_map_and_hud() {
        let mut play = started();
        let backend = TestBackend::new(70, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| play.render(frame)).unwrap();

        let mut screen = String::new();
        let buffer = terminal.backend().buffer();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                screen.push_str(buffer[(x, y)].symbol());
            }
        }
        assert!(screen.contains("Wildmere"));
        assert!(screen.contains("Health:"));
    }
}
