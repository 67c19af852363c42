// Vertical form of text fields with normal/editing modes

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::text_field::TextField;
use crate::ui::components::{Button, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Ignored,
    Consumed,
    Submit,
}

#[derive(Debug, Clone, Default)]
pub struct Form {
    pub fields: Vec<TextField>,
    pub focus: usize,
    pub editing: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl Form {
    pub fn new(labels: &[&'static str]) -> Self {
        Self {
            fields: labels.iter().map(|l| TextField::new(*l)).collect(),
            ..Self::default()
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value()).unwrap_or("")
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut TextField> {
        self.fields.get_mut(index)
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.focus = 0;
        self.editing = false;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.notice = None;
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.reset();
        self.notice = Some(message.into());
    }

    /// Normal mode: ↑/↓ move, Enter edits, `s` submits.
    /// Editing mode: keys go to the field, Enter/Esc stop editing.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        if self.editing {
            return match key.code {
                KeyCode::Esc => {
                    self.editing = false;
                    FormEvent::Consumed
                }
                KeyCode::Enter => {
                    self.editing = false;
                    if self.focus + 1 < self.fields.len() {
                        self.focus += 1;
                    }
                    FormEvent::Consumed
                }
                code => match self.fields.get_mut(self.focus) {
                    Some(field) => {
                        if field.handle_key(code) {
                            FormEvent::Consumed
                        } else {
                            FormEvent::Ignored
                        }
                    }
                    None => FormEvent::Ignored,
                },
            };
        }

        match key.code {
            KeyCode::Up => {
                self.focus = self.focus.saturating_sub(1);
                FormEvent::Consumed
            }
            KeyCode::Down => {
                if self.focus + 1 < self.fields.len() {
                    self.focus += 1;
                }
                FormEvent::Consumed
            }
            KeyCode::Enter => {
                if !self.fields.is_empty() {
                    self.editing = true;
                    self.notice = None;
                }
                FormEvent::Consumed
            }
            KeyCode::Char('s') | KeyCode::Char('S') => FormEvent::Submit,
            _ => FormEvent::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str, submit_label: &str) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", title));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints: Vec<Constraint> =
            self.fields.iter().map(|_| Constraint::Length(1)).collect();
        constraints.push(Constraint::Length(1)); // Spacer
        constraints.push(Constraint::Length(1)); // Submit
        constraints.push(Constraint::Length(1)); // Status
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in self.fields.iter().enumerate() {
            let focused = i == self.focus;
            frame.render_widget(field.widget(focused, focused && self.editing), rows[i]);
        }

        let n = self.fields.len();
        frame.render_widget(
            Button::new(submit_label).hotkey("s").variant(Variant::Primary),
            rows[n + 1],
        );

        let status = if let Some(err) = &self.error {
            Line::from(Span::styled(format!("✗ {}", err), Style::default().fg(Color::Red)))
        } else if let Some(notice) = &self.notice {
            Line::from(Span::styled(format!("✓ {}", notice), Style::default().fg(Color::Green)))
        } else if self.editing {
            Line::from(Span::styled(
                "Editing: Enter/Esc to finish",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(Span::styled(
                "↑/↓ field  Enter edit  s submit",
                Style::default().fg(Color::DarkGray),
            ))
        };
        frame.render_widget(Paragraph::new(status), rows[n + 2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut Form, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_edit_then_submit() {
        let mut form = Form::new(&["Title", "Due"]);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::Consumed);
        assert!(form.editing);
        type_text(&mut form, "Lab 3");
        form.handle_key(key(KeyCode::Enter));
        assert!(!form.editing);
        assert_eq!(form.focus, 1);
        assert_eq!(form.value(0), "Lab 3");

        // 's' while editing types, while normal submits
        form.handle_key(key(KeyCode::Enter));
        type_text(&mut form, "s");
        assert_eq!(form.value(1), "s");
        form.handle_key(key(KeyCode::Esc));
        assert_eq!(form.handle_key(key(KeyCode::Char('s'))), FormEvent::Submit);
    }

    #[test]
    fn test_editing_keys_reach_the_focused_field() {
        let mut form = Form::new(&["Title"]);
        form.handle_key(key(KeyCode::Enter));
        assert_eq!(form.handle_key(key(KeyCode::Char('x'))), FormEvent::Consumed);
        assert_eq!(form.handle_key(key(KeyCode::Backspace)), FormEvent::Consumed);
        assert_eq!(form.value(0), "");
        assert_eq!(form.handle_key(key(KeyCode::F(2))), FormEvent::Ignored);
        assert!(form.editing);
    }

    #[test]
    fn test_succeed_resets_fields() {
        let mut form = Form::new(&["Reason"]);
        form.field_mut(0).unwrap().set_value("Conference");
        form.fail("bad");
        assert_eq!(form.error.as_deref(), Some("bad"));
        form.succeed("Submitted");
        assert_eq!(form.value(0), "");
        assert_eq!(form.error, None);
        assert_eq!(form.notice.as_deref(), Some("Submitted"));
    }
}
