//! Main menu state

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::play::PlayState;
use super::state::{State, Transition};
use crate::config::Config;

/// Title screen; entry point of the state machine
pub struct MainMenuState {
    config: Config,
}

impl MainMenuState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl State for MainMenuState {
    fn name(&self) -> &'static str {
        "main_menu"
    }

    fn init(&mut self) {
        log::info!("Entered main menu");
    }

    fn handle_input(&mut self, key: KeyEvent) -> Transition {
        match key.code {
            KeyCode::Enter | KeyCode::Char('n') => {
                Transition::Switch(Box::new(PlayState::new(self.config.clone())))
            }
            KeyCode::Char('q') | KeyCode::Esc => Transition::Quit,
            _ => Transition::None,
        }
    }

    fn update(&mut self, _dt: f32) -> Transition {
        Transition::None
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(area);

        // Title
        let title = vec![
            Line::from(Span::styled(
                r"__        ___ _     _                         ",
                Style::default().fg(Color::Rgb(70, 160, 70)),
            )),
            Line::from(Span::styled(
                r"\ \      / (_) | __| |_ __ ___   ___ _ __ ___ ",
                Style::default().fg(Color::Rgb(70, 160, 70)),
            )),
            Line::from(Span::styled(
                r" \ \ /\ / /| | |/ _` | '_ ` _ \ / _ \ '__/ _ \",
                Style::default().fg(Color::Rgb(60, 140, 60)),
            )),
            Line::from(Span::styled(
                r"  \ V  V / | | | (_| | | | | | |  __/ | |  __/",
                Style::default().fg(Color::Rgb(50, 115, 50)),
            )),
            Line::from(Span::styled(
                r"   \_/\_/  |_|_|\__,_|_| |_| |_|\___|_|  \___|",
                Style::default().fg(Color::Rgb(40, 95, 40)),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "The marsh keeps what it catches...",
                Style::default().fg(Color::Rgb(100, 100, 100)),
            )),
        ];

        let title_para = Paragraph::new(title).alignment(Alignment::Center);
        frame.render_widget(title_para, chunks[0]);

        // Menu options
        let menu = vec![
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] New Expedition",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("[Q] Quit", Style::default().fg(Color::Gray))),
        ];

        let menu_para = Paragraph::new(menu).alignment(Alignment::Center);
        frame.render_widget(menu_para, chunks[1]);

        // Footer
        let footer = Paragraph::new(Line::from(Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[2]);
    }

    fn exit(&mut self) {
        log::debug!("Leaving main menu");
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

    #[test]
    fn test_enter_starts_a_run() {
        let mut menu = MainMenuState::new(Config::default());
        let transition = menu.handle_input(key(KeyCode::Enter));
        match transition {
            Transition::Switch(next) => assert_eq!(next.name(), "play"),
            other => panic!("expected Switch, got {:?}", other),
        }
    }

    #[test]
    fn test_q_quits_and_other_keys_do_nothing() {
        let mut menu = MainMenuState::new(Config::default());
        assert!(matches!(menu.handle_input(key(KeyCode::Char('q'))), Transition::Quit));
        assert!(matches!(menu.handle_input(key(KeyCode::Char('x'))), Transition::None));
        assert!(matches!(menu.update(0.016), Transition::None));
    }

    #[test]
    fn test_renders_title_and_prompt() {
        let mut menu = MainMenuState::new(Config::default());
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| menu.render(frame)).unwrap();

        let mut screen = String::new();
        let buffer = terminal.backend().buffer();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                screen.push_str(buffer[(x, y)].symbol());
            }
        }
        assert!(screen.contains("New Expedition"));
        assert!(screen.contains("[Q] Quit"));
    }
}
