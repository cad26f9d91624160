//! Game engine
//!
//! Owns the active state and drives the loop. The engine is an explicit
//! value: build one, run it, stop it. Nothing here lives in a global, so
//! tests can spin up as many engines as they like.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::{Frame, Terminal};

use super::state::{State, Transition};
use crate::config::Config;

/// The engine: active state, config, and the stop flag the loop watches
pub struct Engine {
    state: Box<dyn State>,
    config: Config,
    running: bool,
    frames: u64,
}

impl Engine {
    /// Build an engine around an initial state
    ///
    /// The state becomes active here, so its `init` runs before this
    /// returns and before any `update`.
    pub fn new(config: Config, initial: Box<dyn State>) -> Self {
        let mut state = initial;
        log::info!("Engine initialized in state '{}'", state.name());
        state.init();
        Self {
            state,
            config,
            running: false,
            frames: 0,
        }
    }

    /// Replace the active state immediately
    ///
    /// The outgoing state gets its `exit`, then the incoming one its
    /// `init`, before control returns to the caller.
    pub fn change_state(&mut self, next: Box<dyn State>) {
        log::debug!("State transition: {} -> {}", self.state.name(), next.name());
        self.state.exit();
        self.state = next;
        self.state.init();
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::None => {}
            Transition::Switch(next) => self.change_state(next),
            Transition::Quit => self.stop(),
        }
    }

    /// Advance the active state by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let transition = self.state.update(dt);
        self.apply(transition);
    }

    /// Draw the active state
    pub fn render(&mut self, frame: &mut Frame) {
        self.state.render(frame);
    }

    /// Route one key press to the active state
    pub fn handle_input(&mut self, key: KeyEvent) {
        let transition = self.state.handle_input(key);
        self.apply(transition);
    }

    /// Ask the loop to stop before its next iteration
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Name of the currently active state
    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the loop until something calls `stop`
    ///
    /// Each iteration: measure the delta, handle pending input, update,
    /// render, then sleep whatever is left of the frame budget.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let frame_budget = self.config.frame_time();
        self.running = true;
        let mut last_frame = Instant::now();

        while self.running {
            let frame_start = Instant::now();
            let delta = frame_start.duration_since(last_frame);
            last_frame = frame_start;

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = event::read()? {
                    // Only handle key press events, not releases
                    if key.kind == KeyEventKind::Press {
                        self.handle_input(key);
                    }
                }
            }

            // Update the active state
            self.update(delta.as_secs_f32());

            // Render
            terminal.draw(|frame| {
                self.state.render(frame);
            })?;
            self.frames += 1;

            // Frame rate limiting
            let frame_time = frame_start.elapsed();
            if frame_time < frame_budget {
                std::thread::sleep(frame_budget - frame_time);
            }
        }

        log::info!("Engine stopped after {} frames", self.frames);
        Ok(())
    }
}
