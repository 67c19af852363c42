// Slider for small bounded numeric values

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Widget,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slider {
    value: u32,
    min: u32,
    max: u32,
    label: &'static str,
    focused: bool,
}

impl Slider {
    pub fn new(label: &'static str, min: u32, max: u32) -> Self {
        Self {
            value: min,
            min,
            max,
            label,
            focused: false,
        }
    }

    pub fn value(mut self, value: u32) -> Self {
        self.value = value.clamp(self.min, self.max);
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn get_value(&self) -> u32 {
        self.value
    }

    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        let next = match key {
            KeyCode::Char('-') | KeyCode::Char('h') => self.value.saturating_sub(1).max(self.min),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char('l') => {
                (self.value + 1).min(self.max)
            }
            KeyCode::Home => self.min,
            KeyCode::End => self.max,
            _ => return false,
        };
        let changed = next != self.value;
        self.value = next;
        changed
    }
}

impl Widget for &Slider {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let value_style = if self.focused {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Cyan)
        };

        if area.height == 0 || area.width == 0 {
            return;
        }

        let label_line = Line::from(vec![
            Span::raw(self.label),
            Span::raw(": "),
            Span::styled(format!("{}", self.value), value_style),
            Span::styled(
                format!(" ({}-{})", self.min, self.max),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        buf.set_line(area.x, area.y, &label_line, area.width);

        if area.height > 1 {
            let bar_y = area.y + 1;
            let range = self.max - self.min;
            let ratio = if range > 0 {
                (self.value - self.min) as f64 / range as f64
            } else {
                0.0
            };
            let filled_width = (area.width as f64 * ratio).round() as u16;

            for x in 0..area.width {
                let (symbol, color) = if x < filled_width {
                    ("█", if self.focused { Color::Blue } else { Color::DarkGray })
                } else {
                    ("─", Color::DarkGray)
                };
                buf.set_string(area.x + x, bar_y, symbol, Style::default().fg(color));
            }
        }
    }
}
