use super::*;

pub(super) fn handle_help_key(key: KeyEvent, state: &mut AppState) {
    let Some(help_state) = state.help_modal.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => state.close_help(),
        KeyCode::Tab | KeyCode::Right => help_state.next_section(),
        KeyCode::BackTab | KeyCode::Left => help_state.previous_section(),
        KeyCode::Up | KeyCode::Char('k') => help_state.scroll_by(-1),
        KeyCode::Down | KeyCode::Char('j') => help_state.scroll_by(1),
        KeyCode::PageUp => help_state.scroll_by(-10),
        KeyCode::PageDown => help_state.scroll_by(10),
        KeyCode::Home => help_state.scroll_offset = 0,
        KeyCode::End => help_state.scroll_offset = help_state.max_scroll,
        _ => {}
    }
}
