// Dropdown select with a popup list that closes on outside clicks

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::ui::listeners::{Dismissable, Listeners};

#[derive(Debug)]
pub struct Select {
    owner: &'static str,
    options: &'static [&'static str],
    selected: usize,
    highlight: usize,
    popup: Dismissable,
    trigger_area: Option<Rect>,
    popup_area: Option<Rect>,
}

impl Select {
    pub fn new(owner: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            owner,
            options,
            selected: 0,
            highlight: 0,
            popup: Dismissable::default(),
            trigger_area: None,
            popup_area: None,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_label(&self) -> &'static str {
        self.options.get(self.selected).copied().unwrap_or("")
    }

    pub fn is_open(&mut self) -> bool {
        self.popup.is_open()
    }

    pub fn is_expanded(&self) -> bool {
        self.popup.is_active()
    }

    pub fn open(&mut self, listeners: &Listeners) {
        self.highlight = self.selected;
        self.popup.open(listeners, self.owner);
    }

    pub fn close(&mut self) {
        self.popup.close();
    }

    /// Keys while the popup is open. Returns Some(index) when a choice is made.
    pub fn handle_key(&mut self, code: KeyCode) -> Option<usize> {
        match code {
            KeyCode::Up => {
                self.highlight = self.highlight.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if self.highlight + 1 < self.options.len() {
                    self.highlight += 1;
                }
                None
            }
            KeyCode::Enter => {
                self.selected = self.highlight;
                self.close();
                Some(self.selected)
            }
            KeyCode::Esc => {
                self.close();
                None
            }
            _ => None,
        }
    }

    /// Mouse click. Toggles on the trigger, chooses on a popup row.
    pub fn handle_click(&mut self, column: u16, row: u16, listeners: &Listeners) -> Option<usize> {
        let point = Position::new(column, row);
        if self.is_open() {
            if let Some(popup) = self.popup_area {
                if popup.contains(point) && row > popup.y {
                    let index = (row - popup.y - 1) as usize;
                    if index < self.options.len() {
                        self.selected = index;
                        self.close();
                        return Some(index);
                    }
                }
            }
            if self.trigger_area.is_some_and(|t| t.contains(point)) {
                self.close();
            }
        } else if self.trigger_area.is_some_and(|t| t.contains(point)) {
            self.open(listeners);
        }
        None
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, label: &str) {
        let line = Line::from(vec![
            Span::styled(format!("{:<14} ", label), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("[ {} ▾ ]", self.selected_label()),
                Style::default().fg(Color::Cyan),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        self.trigger_area = Some(area);
    }

    /// Draw the popup list (call last so it sits on top).
    pub fn render_popup(&mut self, frame: &mut Frame) {
        let Some(trigger) = self.trigger_area else {
            return;
        };
        if !self.is_open() {
            self.popup_area = None;
            return;
        }

        let screen = frame.area();
        let width = self
            .options
            .iter()
            .map(|o| o.chars().count() as u16 + 6)
            .max()
            .unwrap_or(10)
            .min(screen.width);
        let height = (self.options.len() as u16 + 2).min(screen.height.saturating_sub(trigger.y + 1));
        let popup = Rect {
            x: (trigger.x + 15).min(screen.width.saturating_sub(width)),
            y: trigger.y + 1,
            width,
            height,
        };

        let items: Vec<ListItem> = self.options.iter().map(|o| ListItem::new(*o)).collect();
        let mut state = ListState::default();
        state.select(Some(self.highlight));

        frame.render_widget(Clear, popup);
        frame.render_stateful_widget(
            List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD))
                .highlight_symbol("› "),
            popup,
            &mut state,
        );

        self.popup_area = Some(popup);
        self.popup.set_bounds(&[popup, trigger]);
    }
}
