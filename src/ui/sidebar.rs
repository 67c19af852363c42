// Sidebar: registry entries as a selectable list with a visibility state machine

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::registry::NavigationRegistry;
use crate::ui::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarVisibility {
    Open,
    Closed,
}

impl SidebarVisibility {
    /// Closed on narrow viewports, open on wide ones.
    pub fn initial(viewport: &Viewport) -> Self {
        if viewport.is_narrow() {
            Self::Closed
        } else {
            Self::Open
        }
    }

    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    pub fn toggle(&mut self) {
        *self = match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        };
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Applied after a sidebar selection: narrow viewports close, wide ones keep state.
    pub fn after_select(&mut self, viewport: &Viewport) {
        if viewport.is_narrow() {
            self.close();
        }
    }
}

/// One rendered sidebar row. The highlight is derived from the active key only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRow {
    pub key: &'static str,
    pub label: &'static str,
    pub glyph: &'static str,
    pub badge: Option<u32>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarHit {
    Entry(&'static str),
    Close,
    Backdrop,
    Inside,
}

#[derive(Debug, Clone)]
pub struct SidebarState {
    pub visibility: SidebarVisibility,
    /// Keyboard cursor, independent of the highlighted (active) entry
    pub cursor: usize,
    panel_area: Option<Rect>,
    entry_areas: Vec<(Rect, &'static str)>,
    close_area: Option<Rect>,
    backdrop_area: Option<Rect>,
}

impl SidebarState {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            visibility: SidebarVisibility::initial(viewport),
            cursor: 0,
            panel_area: None,
            entry_areas: Vec::new(),
            close_area: None,
            backdrop_area: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<SidebarHit> {
        if !self.is_open() {
            return None;
        }
        let point = Position::new(column, row);
        if self.close_area.is_some_and(|a| a.contains(point)) {
            return Some(SidebarHit::Close);
        }
        if let Some((_, key)) = self.entry_areas.iter().find(|(a, _)| a.contains(point)) {
            return Some(SidebarHit::Entry(key));
        }
        if self.panel_area.is_some_and(|a| a.contains(point)) {
            return Some(SidebarHit::Inside);
        }
        if self.backdrop_area.is_some_and(|a| a.contains(point)) {
            return Some(SidebarHit::Backdrop);
        }
        None
    }

    fn clear_areas(&mut self) {
        self.panel_area = None;
        self.entry_areas.clear();
        self.close_area = None;
        self.backdrop_area = None;
    }
}

pub struct SidebarView;

impl SidebarView {
    pub fn rows(registry: &NavigationRegistry, active_key: &str) -> Vec<SidebarRow> {
        registry
            .iter()
            .map(|entry| SidebarRow {
                key: entry.key,
                label: entry.label,
                glyph: entry.icon.glyph(),
                badge: entry.badge,
                highlighted: entry.key == active_key,
            })
            .collect()
    }

    /// Draw the sidebar into `panel`. On narrow viewports `backdrop` is the
    /// dimmed region beside it that closes the sidebar when clicked.
    pub fn render(
        frame: &mut Frame,
        panel: Rect,
        backdrop: Option<Rect>,
        registry: &NavigationRegistry,
        active_key: &str,
        state: &mut SidebarState,
        focused: bool,
    ) {
        state.clear_areas();
        if !state.is_open() || panel.width == 0 || panel.height == 0 {
            return;
        }

        if let Some(backdrop) = backdrop {
            frame.buffer_mut().set_style(
                backdrop,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
            );
            state.backdrop_area = Some(backdrop);
        }

        frame.render_widget(Clear, panel);
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(border_style)
            .title(Span::styled(
                " FACULTY PORTAL ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        state.panel_area = Some(panel);

        // The close control only exists on narrow layouts
        let mut list_area = inner;
        if backdrop.is_some() && inner.height > 1 {
            let close = Rect::new(inner.x, inner.y, inner.width, 1);
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("[x]", Style::default().fg(Color::Red)),
                    Span::styled(" Close", Style::default().fg(Color::Gray)),
                ])),
                close,
            );
            state.close_area = Some(Rect::new(inner.x, inner.y, 9.min(inner.width), 1));
            list_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
        }

        let rows = Self::rows(registry, active_key);
        let visible = list_area.height as usize;
        let anchor = if focused {
            state.cursor
        } else {
            rows.iter().position(|r| r.highlighted).unwrap_or(0)
        };
        let offset = (anchor + 1).saturating_sub(visible);

        for (i, row) in rows.iter().enumerate().skip(offset).take(visible) {
            let y = list_area.y + (i - offset) as u16;
            let area = Rect::new(list_area.x, y, list_area.width, 1);
            let line = Self::row_line(row, list_area.width, focused && i == state.cursor);
            frame.render_widget(Paragraph::new(line), area);
            state.entry_areas.push((area, row.key));
        }
    }

    fn row_line(row: &SidebarRow, width: u16, under_cursor: bool) -> Line<'static> {
        let marker = if under_cursor { "›" } else { " " };
        let badge = row.badge.map(|b| format!(" {} ", b)).unwrap_or_default();
        let label_width = (width as usize).saturating_sub(4 + badge.chars().count());
        let label: String = row.label.chars().take(label_width).collect();

        let style = if row.highlighted {
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(format!("{} ", row.glyph), style),
            Span::styled(format!("{:<w$}", label, w = label_width), style),
        ];
        if !badge.is_empty() {
            spans.push(Span::styled(
                badge,
                Style::default().fg(Color::Black).bg(Color::Red),
            ));
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrow() -> Viewport {
        Viewport::new(80, 30, 100)
    }

    fn wide() -> Viewport {
        Viewport::new(140, 40, 100)
    }

    #[test]
    fn test_initial_visibility_follows_viewport() {
        assert_eq!(SidebarVisibility::initial(&narrow()), SidebarVisibility::Closed);
        assert_eq!(SidebarVisibility::initial(&wide()), SidebarVisibility::Open);
    }

    #[test]
    fn test_after_select_closes_only_on_narrow() {
        let mut visibility = SidebarVisibility::Open;
        visibility.after_select(&wide());
        assert_eq!(visibility, SidebarVisibility::Open);
        visibility.after_select(&narrow());
        assert_eq!(visibility, SidebarVisibility::Closed);

        // Closed stays closed
        visibility.after_select(&narrow());
        assert_eq!(visibility, SidebarVisibility::Closed);
    }

    #[test]
    fn test_toggle_and_close() {
        let mut visibility = SidebarVisibility::Closed;
        visibility.toggle();
        assert!(visibility.is_open());
        visibility.close();
        assert!(!visibility.is_open());
        visibility.close();
        assert!(!visibility.is_open());
    }

    #[test]
    fn test_rows_follow_registry_order() {
        let registry = NavigationRegistry::faculty();
        let rows = SidebarView::rows(&registry, "leave");
        let keys: Vec<_> = rows.iter().map(|r| r.key).collect();
        assert_eq!(keys, registry.keys().collect::<Vec<_>>());
        let highlighted: Vec<_> = rows.iter().filter(|r| r.highlighted).map(|r| r.key).collect();
        assert_eq!(highlighted, vec!["leave"]);
    }

    #[test]
    fn test_cursor_clamps() {
        let mut state = SidebarState::new(&wide());
        state.move_cursor(-3, 20);
        assert_eq!(state.cursor, 0);
        state.move_cursor(25, 20);
        assert_eq!(state.cursor, 19);
    }
}
