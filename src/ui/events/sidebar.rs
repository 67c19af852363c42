use super::*;
use crate::ui::sidebar::SidebarHit;

pub(super) fn handle_sidebar_key(key: KeyEvent, state: &mut AppState) {
    let len = state.router.registry().len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.sidebar.move_cursor(-1, len),
        KeyCode::Down | KeyCode::Char('j') => state.sidebar.move_cursor(1, len),
        KeyCode::Home => state.sidebar.cursor = 0,
        KeyCode::End => state.sidebar.cursor = len.saturating_sub(1),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let key = state.router.registry().entry_at(state.sidebar.cursor).map(|e| e.key);
            if let Some(key) = key {
                state.on_select(key);
            }
        }
        _ => {}
    }
}

/// Returns true if the sidebar (or its backdrop) took the click.
pub(super) fn handle_sidebar_click(mouse: MouseEvent, state: &mut AppState) -> bool {
    match state.sidebar.hit(mouse.column, mouse.row) {
        Some(SidebarHit::Entry(key)) => {
            if let Some(index) = state.router.registry().index_of(key) {
                state.sidebar.cursor = index;
            }
            state.on_select(key);
            true
        }
        Some(SidebarHit::Close) | Some(SidebarHit::Backdrop) => {
            state.on_close_request();
            true
        }
        Some(SidebarHit::Inside) => {
            state.focus = Focus::Sidebar;
            true
        }
        None => false,
    }
}
