//! Pause state
//!
//! Holds a suspended run. Resuming hands the session to a fresh play
//! state, so the world comes back exactly as it was left. Abandoning
//! drops the session and the run with it.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::menu::MainMenuState;
use super::play::{PlayState, WorldSession};
use super::state::{State, Transition};
use crate::config::Config;

pub struct PauseState {
    config: Config,
    session: Option<WorldSession>,
}

impl PauseState {
    pub(super) fn new(config: Config, session: WorldSession) -> Self {
        Self {
            config,
            session: Some(session),
        }
    }
}

impl State for PauseState {
    fn name(&self) -> &'static str {
        "pause"
    }

    fn init(&mut self) {
        log::debug!("Run paused");
    }

    fn handle_input(&mut self, key: KeyEvent) -> Transition {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => match self.session.take() {
                Some(session) => Transition::Switch(Box::new(PlayState::resume(
                    self.config.clone(),
                    session,
                ))),
                // session already gone, nothing left to resume
                None => Transition::Switch(Box::new(MainMenuState::new(self.config.clone()))),
            },
            KeyCode::Char('m') => {
                // abandoning drops the session, ending the run
                self.session = None;
                Transition::Switch(Box::new(MainMenuState::new(self.config.clone())))
            }
            KeyCode::Char('q') => Transition::Quit,
            _ => Transition::None,
        }
    }

    fn update(&mut self, _dt: f32) -> Transition {
        Transition::None
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(20),
                Constraint::Percentage(40),
            ])
            .split(frame.area());

        let banner = vec![
            Line::from(Span::styled(
                "P A U S E D",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] resume    [m] abandon run    [q] quit",
                Style::default().fg(Color::Gray),
            )),
        ];

        let para = Paragraph::new(banner).alignment(Alignment::Center);
        frame.render_widget(para, chunks[1]);
    }

    fn exit(&mut self) {
        log::debug!("Leaving pause screen");
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

    fn paused() -> PauseState {
        let config = Config {
            map_width: 12,
            map_height: 9,
            ..Config::default()
        };
        let mut play = PlayState::new(config.clone());
        play.init();
        let session = play.take_session().expect("init builds a session");
        PauseState::new(config, session)
    }

    #[test]
    fn test_enter_resumes_into_play() {
        let mut pause = paused();
        match pause.handle_input(key(KeyCode::Enter)) {
            Transition::Switch(next) => assert_eq!(next.name(), "play"),
            other => panic!("expected Switch, got {:?}", other),
        }
        // the session moved into the new play state
        assert!(pause.session.is_none());
    }

    #[test]
    fn test_abandon_goes_to_menu_and_drops_the_run() {
        let mut pause = paused();
        match pause.handle_input(key(KeyCode::Char('m'))) {
            Transition::Switch(next) => assert_eq!(next.name(), "main_menu"),
            other => panic!("expected Switch, got {:?}", other),
        }
        assert!(pause.session.is_none());
    }

    #[test]
    fn test_pause_idles_and_quits() {
        let mut pause = paused();
        assert!(matches!(pause.update(1.0), Transition::None));
        assert!(matches!(pause.handle_input(key(KeyCode::Char('x'))), Transition::None));
        assert!(matches!(pause.handle_input(key(KeyCode::Char('q'))), Transition::Quit));
    }

    #[test]
    fn test_renders_paused_banner() {
        let mut pause = paused();
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| pause.render(frame)).unwrap();

        let mut screen = String::new();
        let buffer = terminal.backend().buffer();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                screen.push_str(buffer[(x, y)].symbol());
            }
        }
        assert!(screen.contains("P A U S E D"));
        assert!(screen.contains("[Enter] resume"));
    }
}
