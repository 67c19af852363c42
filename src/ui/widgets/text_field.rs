// Single-line text input with a character cursor

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Widget,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub label: &'static str,
    value: String,
    cursor: usize, // Position in characters
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            cursor: 0,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Apply an editing key. Returns true if the key was consumed.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(c) => {
                let idx = self.byte_index();
                self.value.insert(idx, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let idx = self.byte_index();
                    self.value.remove(idx);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    let idx = self.byte_index();
                    self.value.remove(idx);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                true
            }
            _ => false,
        }
    }

    pub fn widget(&self, focused: bool, editing: bool) -> TextFieldWidget<'_> {
        TextFieldWidget {
            field: self,
            focused,
            editing,
        }
    }
}

pub struct TextFieldWidget<'a> {
    field: &'a TextField,
    focused: bool,
    editing: bool,
}

impl Widget for TextFieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_style = if self.focused {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut spans = vec![
            Span::styled(format!("{:<14}", self.field.label), label_style),
            Span::raw(" "),
        ];

        if self.editing {
            let (before, after): (String, String) = {
                let mut chars = self.field.value.chars();
                let before: String = chars.by_ref().take(self.field.cursor).collect();
                (before, chars.collect())
            };
            spans.push(Span::styled(before, Style::default().fg(Color::White)));
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(after, Style::default().fg(Color::White)));
        } else if self.field.value.is_empty() {
            spans.push(Span::styled("…", Style::default().fg(Color::DarkGray)));
        } else {
            spans.push(Span::styled(
                self.field.value.clone(),
                Style::default().fg(Color::White),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut field = TextField::new("Reason");
        for c in "Confrence".chars() {
            field.handle_key(KeyCode::Char(c));
        }
        // Fix the typo: move back 5, insert 'e'
        for _ in 0..5 {
            field.handle_key(KeyCode::Left);
        }
        field.handle_key(KeyCode::Char('e'));
        assert_eq!(field.value(), "Conference");

        field.handle_key(KeyCode::End);
        field.handle_key(KeyCode::Backspace);
        assert_eq!(field.value(), "Conferenc");
    }

    #[test]
    fn test_multibyte_cursor() {
        let mut field = TextField::new("Name").with_value("Zoë");
        field.handle_key(KeyCode::Backspace);
        assert_eq!(field.value(), "Zo");
        field.handle_key(KeyCode::Home);
        field.handle_key(KeyCode::Delete);
        assert_eq!(field.value(), "o");
    }

    #[test]
    fn test_blank_detection() {
        let mut field = TextField::new("Body");
        assert!(field.is_blank());
        field.set_value("   ");
        assert!(field.is_blank());
        field.set_value(" hi ");
        assert!(!field.is_blank());
        field.clear();
        assert_eq!(field.value(), "");
    }
}
