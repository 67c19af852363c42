// Outside-click listeners: popovers close on a click elsewhere, and nothing
// is left registered once its owner is gone

use crate::common::helpers::*;
use crossterm::event::KeyCode;
use ratatui::layout::Rect;

#[test]
fn notifications_popover_closes_on_outside_click() {
    let mut state = app(WIDE);
    press(&mut state, KeyCode::Char('n'));
    assert!(state.header.notifications_open());
    assert_eq!(state.listeners.owners(), vec!["notifications"]);

    draw(&mut state);
    click(&mut state, 70, 30);
    assert!(!state.header.notifications_open());
    assert!(state.listeners.is_empty());
}

/// Click every cell of the first notification rows, below the popover title.
fn click_inside_notifications(state: &mut facdash::ui::AppState) {
    let buffer = draw(state);
    let (x, y) = find_text(&buffer, "Notifications").expect("popover drawn");
    for row in y + 1..y + 3 {
        for column in x..x + 24 {
            click(state, column, row);
        }
    }
}

#[test]
fn clicks_inside_notifications_do_not_reach_the_section() {
    for (key, default_tab) in [
        ("assignments", "assignments"),
        ("exams", "schedule"),
        ("e-office", "files"),
        ("events", "upcoming"),
    ] {
        let mut state = app(NARROW);
        state.select(key);
        press(&mut state, KeyCode::Char('n'));
        click_inside_notifications(&mut state);

        assert_eq!(
            state.router.current_section().active_sub_tab(),
            default_tab,
            "{} sub-tab changed under the popover",
            key
        );
        assert!(state.header.notifications_open());
        assert_eq!(state.listeners.owners(), vec!["notifications"]);
    }
}

#[test]
fn clicks_inside_notifications_leave_dropdowns_closed() {
    let mut state = app(WIDE);
    state.select("attendance");
    press(&mut state, KeyCode::Char('n'));
    click_inside_notifications(&mut state);
    assert_eq!(state.listeners.owners(), vec!["notifications"]);
}

#[test]
fn popovers_are_mutually_exclusive() {
    let mut state = app(WIDE);
    press(&mut state, KeyCode::Char('n'));
    press(&mut state, KeyCode::Char('p'));
    assert!(state.header.profile_menu_open());
    assert!(!state.header.notifications_open());
    assert_eq!(state.listeners.len(), 1);

    press(&mut state, KeyCode::Esc);
    assert!(!state.header.profile_menu_open());
    assert!(state.listeners.is_empty());
}

#[test]
fn profile_menu_settings_navigates() {
    let mut state = app(WIDE);
    press(&mut state, KeyCode::Char('p'));
    press(&mut state, KeyCode::Down);
    press(&mut state, KeyCode::Enter);
    assert_eq!(state.active_key(), "settings");
    assert!(state.listeners.is_empty());
}

#[test]
fn dropdown_listener_released_when_section_unmounts() {
    let mut state = app(WIDE);
    state.select("attendance");
    press(&mut state, KeyCode::Char('c'));
    assert_eq!(state.listeners.owners(), vec!["attendance-course"]);

    // Dropdown holds the keyboard, so navigate with the sidebar
    press(&mut state, KeyCode::Char(']'));
    assert_eq!(state.active_key(), "attendance");

    let buffer = draw(&mut state);
    let sidebar = Rect::new(0, 0, state.sidebar_width, state.viewport.height);
    let (x, y) = find_text_in(&buffer, "Leave", sidebar).expect("sidebar entry drawn");
    click(&mut state, x, y);

    assert_eq!(state.active_key(), "leave");
    assert!(state.listeners.is_empty());
}

#[test]
fn no_listeners_leak_across_every_section() {
    let mut state = app(WIDE);
    let keys: Vec<&str> = state.router.registry().keys().collect();
    for key in keys {
        state.select(key);
        draw(&mut state);
        assert!(state.listeners.is_empty(), "{} registered a listener on mount", key);
    }
}
