// Help modal implementation

use super::navigation::{HelpModalState, HelpSection};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct HelpModal;

impl HelpModal {
    pub fn render(frame: &mut Frame, state: &mut HelpModalState) {
        let area = frame.area();

        // 80% width, 90% height, clamped to the screen
        let modal_width = ((area.width * 80) / 100).max(60).min(area.width);
        let modal_height = ((area.height * 90) / 100).max(20).min(area.height);

        let modal_area = Rect {
            x: (area.width.saturating_sub(modal_width)) / 2,
            y: (area.height.saturating_sub(modal_height)) / 2,
            width: modal_width,
            height: modal_height,
        };

        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!("Help - {}", state.current_section.title()))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Section tabs
                Constraint::Min(1),    // Content area
                Constraint::Length(1), // Footer/navigation hints
            ])
            .split(inner);

        Self::render_tabs(frame, chunks[0], state.current_section);

        let content = Self::get_section_content(state);
        let content_height = content.len() as u16;
        let viewport_height = chunks[1].height;

        state.max_scroll = content_height.saturating_sub(viewport_height);
        state.scroll_offset = state.scroll_offset.min(state.max_scroll);

        let visible_content: Vec<Line> = content
            .into_iter()
            .skip(state.scroll_offset as usize)
            .take(viewport_height as usize)
            .collect();

        let paragraph = Paragraph::new(visible_content)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, chunks[1]);

        Self::render_footer(frame, chunks[2], state);
    }

    fn render_tabs(frame: &mut Frame, area: Rect, current: HelpSection) {
        let mut spans = Vec::new();

        for (i, section) in HelpSection::all_sections().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }

            let style = if *section == current {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            spans.push(Span::styled(section.title().to_string(), style));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Left),
            area,
        );
    }

    fn render_footer(frame: &mut Frame, area: Rect, state: &HelpModalState) {
        let mut hints = vec![
            Span::styled("[Tab/←→]", Style::default().fg(Color::Yellow)),
            Span::raw(" Switch  "),
            Span::styled("[↑↓/jk]", Style::default().fg(Color::Yellow)),
            Span::raw(" Scroll  "),
            Span::styled("[Esc/?]", Style::default().fg(Color::Yellow)),
            Span::raw(" Close"),
        ];

        if state.scroll_offset > 0 {
            hints.insert(0, Span::styled("↑ ", Style::default().fg(Color::Cyan)));
        }
        if state.scroll_offset < state.max_scroll {
            hints.push(Span::styled(" ↓", Style::default().fg(Color::Cyan)));
        }

        frame.render_widget(
            Paragraph::new(Line::from(hints))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray)),
            area,
        );
    }

    fn get_section_content(state: &HelpModalState) -> Vec<Line<'static>> {
        match state.current_section {
            HelpSection::About => Self::about_content(state),
            HelpSection::Navigation => Self::navigation_content(),
            HelpSection::Sections => Self::sections_content(state),
            HelpSection::KeyboardShortcuts => Self::keyboard_shortcuts_content(),
        }
    }

    fn heading(text: &'static str) -> Line<'static> {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn key_line(keys: &'static str, desc: &'static str) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  {:<9}", keys), Style::default().fg(Color::Yellow)),
            Span::raw(format!("- {}", desc)),
        ])
    }

    fn about_content(state: &HelpModalState) -> Vec<Line<'static>> {
        vec![
            Self::heading("facdash - Faculty Dashboard"),
            Line::from(""),
            Line::from(format!("Version:  {}", state.app_version)),
            Line::from(format!("Sections: {}", state.sections.len())),
            Line::from(""),
            Line::from("A terminal workspace for faculty: attendance, assignments, leave,"),
            Line::from("messages, grievances, e-office files and more. All data shown is"),
            Line::from("held in memory for the session and is discarded on exit."),
            Line::from(""),
            Line::from(Span::styled(
                "Logs are written to the file configured under [logging].",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    }

    fn navigation_content() -> Vec<Line<'static>> {
        vec![
            Self::heading("SIDEBAR"),
            Line::from("The sidebar lists every section in a fixed order. The active"),
            Line::from("section is highlighted. On wide terminals it is docked on the"),
            Line::from("left and stays open after a selection. On narrow terminals it"),
            Line::from("is drawn over the content and closes after each selection."),
            Line::from(""),
            Self::heading("SECTIONS AND SUB-TABS"),
            Line::from("Each section has its own row of sub-tabs. Leaving a section"),
            Line::from("discards its state: coming back always opens its first sub-tab."),
            Line::from("Switching sub-tabs discards unsaved input, except in forms that"),
            Line::from("keep their draft (Leave > Apply, Exams > Grading)."),
            Line::from(""),
            Self::heading("POPOVERS"),
            Line::from("Notifications, the profile menu and dropdowns close on Esc or"),
            Line::from("on a click anywhere outside them."),
        ]
    }

    fn sections_content(state: &HelpModalState) -> Vec<Line<'static>> {
        let mut lines = vec![Self::heading("REGISTERED SECTIONS"), Line::from("")];
        for (i, (key, label, badge)) in state.sections.iter().enumerate() {
            let mut spans = vec![
                Span::styled(format!("  {:>2}  ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:<16}", label), Style::default().fg(Color::White)),
                Span::styled(key.to_string(), Style::default().fg(Color::DarkGray)),
            ];
            if let Some(count) = badge {
                spans.push(Span::styled(
                    format!("  ({})", count),
                    Style::default().fg(Color::Red),
                ));
            }
            lines.push(Line::from(spans));
        }
        lines
    }

    fn keyboard_shortcuts_content() -> Vec<Line<'static>> {
        vec![
            Self::heading("GLOBAL KEYS"),
            Self::key_line("q", "Quit application"),
            Self::key_line("?", "Toggle this help screen"),
            Self::key_line("b", "Open / close the sidebar"),
            Self::key_line("n", "Notifications"),
            Self::key_line("p", "Profile menu"),
            Self::key_line("[ / ]", "Previous / next section"),
            Self::key_line("Tab", "Move focus between sidebar and content"),
            Self::key_line("Esc", "Close popover, then the sidebar"),
            Line::from(""),
            Self::heading("SIDEBAR"),
            Self::key_line("↑/↓", "Move cursor"),
            Self::key_line("Enter", "Open section under cursor"),
            Line::from(""),
            Self::heading("CONTENT"),
            Self::key_line("←/→", "Previous / next sub-tab"),
            Self::key_line("↑/↓", "Move through rows or form fields"),
            Self::key_line("Enter", "Edit field / activate"),
            Self::key_line("s", "Submit form"),
            Line::from(""),
            Self::heading("TEXT EDITING"),
            Self::key_line("←/→", "Move cursor"),
            Self::key_line("Home/End", "Jump to start/end"),
            Self::key_line("Enter", "Finish and move to next field"),
            Self::key_line("Esc", "Finish editing"),
        ]
    }
}
