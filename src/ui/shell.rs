// Shell layout: header, sidebar, routed content, footer, overlays

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::ui::components::Footer;
use crate::ui::focus::Focus;
use crate::ui::help::HelpModal;
use crate::ui::sidebar::SidebarView;
use crate::ui::state::AppState;

/// Regions computed for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellLayout {
    pub header: Rect,
    pub content: Rect,
    pub footer: Rect,
    pub sidebar: Option<Rect>,
    pub backdrop: Option<Rect>,
}

impl ShellLayout {
    pub fn compute(area: Rect, narrow: bool, sidebar_open: bool, sidebar_width: u16) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header line + rule
                Constraint::Min(0),    // Body
                Constraint::Length(1), // Footer
            ])
            .split(area);
        let body = rows[1];

        let (content, sidebar, backdrop) = if !sidebar_open {
            (body, None, None)
        } else if narrow {
            // Drawn over the content; the rest of the body is the backdrop
            let width = sidebar_width.min(body.width);
            let panel = Rect::new(body.x, body.y, width, body.height);
            let rest = Rect::new(body.x + width, body.y, body.width - width, body.height);
            (body, Some(panel), (rest.width > 0).then_some(rest))
        } else {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
                .split(body);
            (cols[1], Some(cols[0]), None)
        };

        Self {
            header: rows[0],
            content,
            footer: rows[2],
            sidebar,
            backdrop,
        }
    }
}

pub struct Shell;

impl Shell {
    pub fn render(frame: &mut Frame, state: &mut AppState) {
        let narrow = state.viewport.is_narrow();
        let layout = ShellLayout::compute(
            frame.area(),
            narrow,
            state.sidebar.is_open(),
            state.sidebar_width,
        );

        let entry = state.router.current_entry().clone();
        state.header.render(frame, layout.header, &entry, narrow);

        // Content first so an overlay sidebar lands on top of it
        let content = Rect {
            x: layout.content.x + 1,
            width: layout.content.width.saturating_sub(2),
            ..layout.content
        };
        state.router.current_section_mut().render(frame, content);

        if let Some(panel) = layout.sidebar {
            let active = state.router.active_key();
            SidebarView::render(
                frame,
                panel,
                layout.backdrop,
                state.router.registry(),
                active,
                &mut state.sidebar,
                state.focus == Focus::Sidebar,
            );
        }

        let mut hints: Vec<(&'static str, &'static str)> = Vec::new();
        hints.extend_from_slice(state.router.current_section().hints());
        if narrow {
            hints.extend_from_slice(&SHELL_HINTS[..2]);
        } else {
            hints.extend_from_slice(SHELL_HINTS);
        }
        frame.render_widget(Footer::new(&hints), layout.footer);

        state.header.render_popovers(frame);

        if let Some(help) = state.help_modal.as_mut() {
            HelpModal::render(frame, help);
        }
    }
}

const SHELL_HINTS: &[(&str, &str)] = &[
    ("[b]", "Menu"),
    ("[?]", "Help"),
    ("[Tab]", "Focus"),
    ("[[ ]]", "Section"),
    ("[n]", "Alerts"),
    ("[p]", "Profile"),
    ("[q]", "Quit"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_layout_docks_sidebar() {
        let layout = ShellLayout::compute(Rect::new(0, 0, 140, 40), false, true, 26);
        assert_eq!(layout.sidebar, Some(Rect::new(0, 2, 26, 37)));
        assert_eq!(layout.content, Rect::new(26, 2, 114, 37));
        assert_eq!(layout.backdrop, None);
    }

    #[test]
    fn test_narrow_layout_overlays_with_backdrop() {
        let layout = ShellLayout::compute(Rect::new(0, 0, 80, 30), true, true, 26);
        assert_eq!(layout.content, Rect::new(0, 2, 80, 27));
        assert_eq!(layout.sidebar, Some(Rect::new(0, 2, 26, 27)));
        assert_eq!(layout.backdrop, Some(Rect::new(26, 2, 54, 27)));
    }

    #[test]
    fn test_closed_sidebar_gives_content_full_body() {
        let layout = ShellLayout::compute(Rect::new(0, 0, 140, 40), false, false, 26);
        assert_eq!(layout.sidebar, None);
        assert_eq!(layout.content, Rect::new(0, 2, 140, 37));
    }
}
