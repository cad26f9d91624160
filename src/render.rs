//! Rendering
//!
//! The draw list the render system produces each frame, plus the terminal
//! painter that consumes it together with the map.

use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::world::Map;

/// One entity cell to draw this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub x: i32,
    pub y: i32,
    pub glyph: char,
    pub fg: (u8, u8, u8),
    /// Higher draws on top; the draw list arrives already sorted
    pub order: i32,
}

/// Paint terrain and the frame's draw list into an area
///
/// Commands land in list order, so later commands win a contested cell.
pub fn paint_world(frame: &mut Frame, area: Rect, map: &Map, draw_list: &[DrawCommand]) {
    let block = Block::default().borders(Borders::ALL).title(" Wildmere ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let view_width = inner.width as i32;
    let view_height = inner.height as i32;
    let buf = frame.buffer_mut();

    for screen_y in 0..view_height {
        for screen_x in 0..view_width {
            let cell_x = inner.x + screen_x as u16;
            let cell_y = inner.y + screen_y as u16;

            match map.tile(screen_x, screen_y) {
                Ok(kind) => {
                    let fg = kind.fg_color();
                    let bg = kind.bg_color();
                    buf[(cell_x, cell_y)].set_char(kind.glyph());
                    buf[(cell_x, cell_y)].set_fg(Color::Rgb(fg.0, fg.1, fg.2));
                    buf[(cell_x, cell_y)].set_bg(Color::Rgb(bg.0, bg.1, bg.2));
                }
                Err(_) => {
                    // Past the map edge: leave the void dark
                    buf[(cell_x, cell_y)].set_char(' ');
                    buf[(cell_x, cell_y)].set_bg(Color::Rgb(8, 8, 8));
                }
            }
        }
    }

    for cmd in draw_list {
        if cmd.x < 0 || cmd.x >= view_width || cmd.y < 0 || cmd.y >= view_height {
            continue;
        }
        let cell_x = inner.x + cmd.x as u16;
        let cell_y = inner.y + cmd.y as u16;
        buf[(cell_x, cell_y)].set_char(cmd.glyph);
        buf[(cell_x, cell_y)].set_fg(Color::Rgb(cmd.fg.0, cmd.fg.1, cmd.fg.2));
    }
}
