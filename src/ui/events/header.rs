use super::*;

pub(super) fn toggle_notifications(state: &mut AppState) {
    state.header.toggle_notifications(&state.listeners);
}

pub(super) fn toggle_profile_menu(state: &mut AppState) {
    state.header.toggle_profile_menu(&state.listeners);
}

/// Returns true if the click landed on a header control or popover item.
pub(super) fn handle_header_click(mouse: MouseEvent, state: &mut AppState) -> bool {
    let action = state
        .header
        .handle_click(mouse.column, mouse.row, &state.listeners);
    if action == HeaderAction::None {
        return false;
    }
    state.apply_header_action(action);
    true
}
