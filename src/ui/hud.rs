//! HUD
//!
//! Player status readout: clamped health and hunger gauges, the carried
//! item list, and a capped message feed. Every mutation rebuilds the
//! three-line readout immediately, so whatever consumes it always sees the
//! full current state.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Gauge floor
pub const GAUGE_MIN: i32 = 0;
/// Gauge ceiling
pub const GAUGE_MAX: i32 = 100;
/// Most messages kept in the feed
const MAX_MESSAGES: usize = 50;

/// The in-game status display
#[derive(Debug, Clone)]
pub struct Hud {
    health: i32,
    hunger: i32,
    inventory: Vec<String>,
    lines: [String; 3],
    messages: Vec<String>,
}

impl Hud {
    pub fn new() -> Self {
        let mut hud = Self {
            health: GAUGE_MAX,
            hunger: GAUGE_MAX,
            inventory: Vec::new(),
            lines: Default::default(),
            messages: Vec::new(),
        };
        hud.refresh();
        hud
    }

    /// Shift health by a delta, clamped to the gauge range
    pub fn update_health(&mut self, amount: i32) {
        self.health = (self.health + amount).clamp(GAUGE_MIN, GAUGE_MAX);
        self.refresh();
    }

    /// Shift hunger by a delta, clamped to the gauge range
    pub fn update_hunger(&mut self, amount: i32) {
        self.hunger = (self.hunger + amount).clamp(GAUGE_MIN, GAUGE_MAX);
        self.refresh();
    }

    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.push(item.into());
        self.refresh();
    }

    /// Remove the first item matching `name`; `false` when none matched
    pub fn remove_item(&mut self, name: &str) -> bool {
        match self.inventory.iter().position(|i| i == name) {
            Some(idx) => {
                self.inventory.remove(idx);
                self.refresh();
                true
            }
            None => false,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn hunger(&self) -> i32 {
        self.hunger
    }

    pub fn items(&self) -> &[String] {
        &self.inventory
    }

    /// The three-line readout, current as of the last mutation
    pub fn lines(&self) -> &[String; 3] {
        &self.lines
    }

    fn refresh(&mut self) {
        self.lines = [
            format!("Health: {}", self.health),
            format!("Hunger: {}", self.hunger),
            format!("Inventory: {}", self.inventory.join(", ")),
        ];
    }

    /// Append to the message feed, dropping the oldest past the cap
    pub fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Paint the sidebar: gauges, inventory, then the message feed
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Status ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(Span::styled(
                "Survivor",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                self.lines[0].clone(),
                Style::default().fg(gauge_color(self.health)),
            )),
            Line::from(Span::styled(
                self.lines[1].clone(),
                Style::default().fg(gauge_color(self.hunger)),
            )),
            Line::from(self.lines[2].clone()),
            Line::from(""),
        ];

        // Newest messages at the bottom, as many as fit
        let room = (inner.height as usize).saturating_sub(lines.len());
        let start = self.messages.len().saturating_sub(room);
        for message in &self.messages[start..] {
            lines.push(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

/// Green above 60%, yellow above 30%, red below
fn gauge_color(value: i32) -> Color {
    let pct = value as f32 / GAUGE_MAX as f32;
    if pct > 0.6 {
        Color::Green
    } else if pct > 0.3 {
        Color::Yellow
    } else {
        Color::Red
    }
}
