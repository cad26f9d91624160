//! Game state machine
//!
//! Exactly one state is active at a time. The engine owns it as a trait
//! object, so new modes can be added without touching the loop. A state
//! owns whatever data lives for its tenure: the play state owns the
//! whole world session, the menu owns nothing but a blink timer.

use crossterm::event::KeyEvent;
use ratatui::Frame;

/// What a state asks the engine to do after handling a frame or a key
pub enum Transition {
    /// Keep the current state
    None,
    /// Replace the active state with this one
    Switch(Box<dyn State>),
    /// Shut the loop down
    Quit,
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::None => write!(f, "None"),
            Transition::Switch(state) => write!(f, "Switch({})", state.name()),
            Transition::Quit => write!(f, "Quit"),
        }
    }
}

/// One mode of the game: menu, play, pause
///
/// Lifecycle contract: `init` runs exactly once per instance, immediately
/// after the instance becomes active and before its first `update`. The
/// engine then calls `update` and `render` every frame, in that order.
/// `exit` runs when the instance is replaced, before the next state's
/// `init`.
pub trait State {
    /// Stable label for logging
    fn name(&self) -> &'static str;

    /// One-time setup at activation
    fn init(&mut self);

    /// Route a single key press
    fn handle_input(&mut self, key: KeyEvent) -> Transition;

    /// Advance by `dt` seconds
    fn update(&mut self, dt: f32) -> Transition;

    /// Draw this state's screen
    fn render(&mut self, frame: &mut Frame);

    /// Teardown before being replaced
    fn exit(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub;

    impl State for Stub {
        fn name(&self) -> &'static str {
            "stub"
        }
        fn init(&mut self) {}
        fn handle_input(&mut self, _key: KeyEvent) -> Transition {
            Transition::None
        }
        fn update(&mut self, _dt: f32) -> Transition {
            Transition::Quit
        }
        fn render(&mut self, _frame: &mut Frame) {}
        fn exit(&mut self) {}
    }

    #[test]
    fn test_transition_debug_names_target() {
        let t = Transition::Switch(Box::new(Stub));
        assert_eq!(format!("{:?}", t), "Switch(stub)");
        assert_eq!(format!("{:?}", Transition::None), "None");
        assert_eq!(format!("{:?}", Transition::Quit), "Quit");
    }
}
