// Reusable UI components shared by the shell and every section

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Widget},
};

use crate::ui::tabs::TabBar;

/// Visual treatment shared by buttons and other controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Destructive,
    Ghost,
}

impl Variant {
    fn style(self, focused: bool) -> Style {
        let base = match self {
            Self::Primary => Style::default().bg(Color::Blue).fg(Color::White),
            Self::Secondary => Style::default().bg(Color::DarkGray).fg(Color::White),
            Self::Outline => Style::default().fg(Color::Cyan),
            Self::Destructive => Style::default().bg(Color::Red).fg(Color::White),
            Self::Ghost => Style::default().fg(Color::Gray),
        };
        if focused {
            base.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            base
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

impl Size {
    fn padding(self) -> usize {
        match self {
            Self::Small => 0,
            Self::Medium => 1,
            Self::Large => 2,
        }
    }
}

pub struct Button<'a> {
    label: &'a str,
    hotkey: Option<&'a str>,
    variant: Variant,
    size: Size,
    focused: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            hotkey: None,
            variant: Variant::default(),
            size: Size::default(),
            focused: false,
        }
    }

    pub fn hotkey(mut self, hotkey: &'a str) -> Self {
        self.hotkey = Some(hotkey);
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn width(&self) -> u16 {
        let hotkey = self.hotkey.map(|h| h.chars().count() + 3).unwrap_or(0);
        (self.label.chars().count() + hotkey + self.size.padding() * 2) as u16
    }

    fn line(&self) -> Line<'a> {
        let pad = " ".repeat(self.size.padding());
        let style = self.variant.style(self.focused);
        let mut spans = vec![Span::raw(pad.clone())];
        if let Some(hotkey) = self.hotkey {
            spans.push(Span::raw("["));
            spans.push(Span::styled(hotkey, Style::default().fg(Color::Yellow).bold()));
            spans.push(Span::raw("] "));
        }
        spans.push(Span::raw(self.label));
        spans.push(Span::raw(pad));
        Line::from(spans).style(style)
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.line();
        let mut centered_area = area;
        let text_width = self.width();
        if area.width > text_width {
            let padding = (area.width - text_width) / 2;
            centered_area.x += padding;
            centered_area.width = text_width;
        }
        buf.set_line(centered_area.x, centered_area.y, &text, centered_area.width);
    }
}

/// Semantic colour for badges and status labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Warning,
    Danger,
    Info,
}

impl Tone {
    pub fn color(self) -> Color {
        match self {
            Self::Neutral => Color::Gray,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Danger => Color::Red,
            Self::Info => Color::Cyan,
        }
    }
}

pub struct Badge;

impl Badge {
    pub fn span(text: impl Into<String>, tone: Tone) -> Span<'static> {
        Span::styled(
            format!(" {} ", text.into()),
            Style::default().fg(Color::Black).bg(tone.color()),
        )
    }

    pub fn cell(text: impl Into<String>, tone: Tone) -> Cell<'static> {
        Cell::from(Span::styled(text.into(), Style::default().fg(tone.color())))
    }
}

/// Stat card: a bordered box with a headline value and a caption.
pub struct Card<'a> {
    title: &'a str,
    value: String,
    caption: &'a str,
    tone: Tone,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, value: impl Into<String>, caption: &'a str) -> Self {
        Self {
            title,
            value: value.into(),
            caption,
            tone: Tone::Info,
        }
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(Span::styled(
                self.value,
                Style::default()
                    .fg(self.tone.color())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(self.caption, Style::default().fg(Color::DarkGray))),
        ];
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(format!(" {} ", self.title)),
            )
            .render(area, buf);
    }
}

/// Bottom hint bar listing hotkeys.
pub struct Footer {
    content: Line<'static>,
}

impl Footer {
    pub fn new(hints: &[(&'static str, &'static str)]) -> Self {
        let mut spans = vec![Span::raw(" ")];
        for (i, (hotkey, desc)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*hotkey, Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(" "));
            spans.push(Span::raw(*desc));
        }
        Self {
            content: Line::from(spans),
        }
    }
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.content)
            .style(Style::default().bg(Color::DarkGray))
            .render(area, buf);
    }
}

pub fn render_checkbox(label: &str, checked: bool, focused: bool, area: Rect, buf: &mut Buffer) {
    let symbol = if checked { "[x]" } else { "[ ]" };
    let symbol_style = if focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::Cyan)
    };

    let text = Line::from(vec![
        Span::styled(symbol, symbol_style),
        Span::raw(" "),
        Span::raw(label),
    ]);

    buf.set_line(area.x, area.y, &text, area.width);
}

/// Draw tab triggers on one line and record their areas on the panel.
pub fn render_tab_bar(frame: &mut Frame, area: Rect, tabs: &mut dyn TabBar) {
    let mut spans = Vec::new();
    let mut areas = Vec::new();
    let mut x = area.x;

    for (i, spec) in tabs.specs().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            x = x.saturating_add(3);
        }
        let label = format!(" {} ", spec.label);
        let width = label.chars().count() as u16;
        let style = if spec.key == tabs.active_key() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(label, style));

        let visible = width.min((area.x + area.width).saturating_sub(x));
        if visible > 0 {
            areas.push((Rect::new(x, area.y, visible, 1), spec.key));
        }
        x = x.saturating_add(width);
    }

    tabs.set_trigger_areas(areas);
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Bordered table with a header row and a highlighted selection.
pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    header: &[&'static str],
    widths: &[Constraint],
    rows: Vec<Row<'static>>,
    state: &mut TableState,
) {
    let header_row = Row::new(header.iter().map(|h| Cell::from(*h)))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(0);

    let empty = rows.is_empty();
    let table = Table::new(rows, widths.to_vec())
        .header(header_row)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", title)),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, state);

    if empty {
        let inner = Rect {
            x: area.x + 2,
            y: area.y + 2,
            width: area.width.saturating_sub(4),
            height: 1.min(area.height.saturating_sub(3)),
        };
        frame.render_widget(
            Paragraph::new("Nothing here yet").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
    }
}

/// Move a table selection by `delta` rows, clamped to `len`.
pub fn step_selection(state: &mut TableState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1) as usize;
    state.select(Some(next));
}

/// Table state starting on the first row.
pub fn first_row() -> TableState {
    let mut state = TableState::default();
    state.select(Some(0));
    state
}

/// Centered rectangle of at most `width` x `height` within `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    use crate::ui::tabs::{TabPanel, TabSpec};

    const SPECS: &[TabSpec] = &[TabSpec::new("a", "Alpha"), TabSpec::new("b", "Beta")];

    fn mount(key: &str) -> Option<()> {
        (key == "a" || key == "b").then_some(())
    }

    #[test]
    fn test_button_width_includes_hotkey_and_padding() {
        assert_eq!(Button::new("Save").width(), 6);
        assert_eq!(Button::new("Save").hotkey("s").width(), 10);
        assert_eq!(Button::new("Save").size(Size::Small).width(), 4);
    }

    #[test]
    fn test_step_selection_clamps() {
        let mut state = first_row();
        step_selection(&mut state, 3, -1);
        assert_eq!(state.selected(), Some(0));
        step_selection(&mut state, 3, 5);
        assert_eq!(state.selected(), Some(2));
        step_selection(&mut state, 0, 1);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_tab_bar_records_trigger_areas() {
        let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
        let mut panel = TabPanel::new(SPECS, "a", mount);
        terminal
            .draw(|frame| render_tab_bar(frame, frame.area(), &mut panel))
            .unwrap();

        // " Alpha " is 7 wide, then " │ ", then " Beta "
        assert_eq!(panel.hit(0, 0), Some("a"));
        assert_eq!(panel.hit(6, 0), Some("a"));
        assert_eq!(panel.hit(8, 0), None);
        assert_eq!(panel.hit(10, 0), Some("b"));
    }

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 50, 50), area);
    }
}
