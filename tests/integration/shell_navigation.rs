// Shell-level navigation: registry selection, sidebar visibility, keyboard shortcuts

use crate::common::helpers::*;
use crossterm::event::KeyCode;
use facdash::ui::NavigationRegistry;
use facdash::ui::focus::Focus;
use facdash::ui::sidebar::{SidebarView, SidebarVisibility};

#[test]
fn every_registered_key_mounts_its_own_section() {
    let mut state = app(WIDE);
    let keys: Vec<&str> = NavigationRegistry::faculty().keys().collect();
    for key in keys {
        state.select(key);
        assert_eq!(state.active_key(), key);
        assert_eq!(state.router.current_section().key(), key);
        assert_eq!(state.router.current_entry().key, key);
    }
}

#[test]
fn unregistered_key_leaves_active_section_alone() {
    let mut state = app(WIDE);
    state.select("library");
    for bogus in ["", "Library", "cafeteria", "library ", "../settings"] {
        assert!(!state.select(bogus));
        assert_eq!(state.active_key(), "library");
    }
}

#[test]
fn reentering_a_section_starts_at_its_default_sub_tab() {
    let mut state = app(WIDE);
    state.select("leave");
    press(&mut state, KeyCode::Right);
    assert_ne!(state.router.current_section().active_sub_tab(), "apply");

    state.select("dashboard");
    state.select("leave");
    assert_eq!(state.router.current_section().active_sub_tab(), "apply");
}

#[test]
fn sidebar_highlights_exactly_the_active_entry() {
    let registry = NavigationRegistry::faculty();
    for key in registry.keys() {
        let highlighted: Vec<_> = SidebarView::rows(&registry, key)
            .into_iter()
            .filter(|r| r.highlighted)
            .map(|r| r.key)
            .collect();
        assert_eq!(highlighted, vec![key]);
    }
}

#[test]
fn narrow_selection_closes_sidebar_wide_keeps_it() {
    let mut narrow = app(NARROW);
    narrow.toggle_sidebar();
    assert_eq!(narrow.sidebar.visibility, SidebarVisibility::Open);
    narrow.on_select("research");
    assert_eq!(narrow.sidebar.visibility, SidebarVisibility::Closed);
    assert_eq!(narrow.focus, Focus::Content);

    let mut wide = app(WIDE);
    assert_eq!(wide.sidebar.visibility, SidebarVisibility::Open);
    wide.on_select("research");
    assert_eq!(wide.sidebar.visibility, SidebarVisibility::Open);

    wide.toggle_sidebar();
    wide.on_select("library");
    assert_eq!(wide.sidebar.visibility, SidebarVisibility::Closed);
}

#[test]
fn dashboard_to_assignments_shows_the_list_view() {
    let mut state = app(WIDE);
    assert_eq!(state.active_key(), "dashboard");
    state.select("assignments");
    assert_eq!(state.router.current_section().active_sub_tab(), "assignments");
}

#[test]
fn narrow_hamburger_then_entry_click_selects_and_closes() {
    let mut state = app(NARROW);
    assert!(!state.sidebar.is_open());

    let buffer = draw(&mut state);
    let (x, y) = find_text(&buffer, "[≡]").expect("hamburger drawn");
    click(&mut state, x, y);
    assert!(state.sidebar.is_open());

    let buffer = draw(&mut state);
    let (x, y) = find_text(&buffer, "Library").expect("sidebar entry drawn");
    assert!(x < state.sidebar_width);
    click(&mut state, x, y);

    assert_eq!(state.sidebar.visibility, SidebarVisibility::Closed);
    assert_eq!(state.active_key(), "library");
}

#[test]
fn close_request_always_closes() {
    for key in ["dashboard", "settings", "exams"] {
        let mut state = app(NARROW);
        state.select(key);
        state.toggle_sidebar();
        state.on_close_request();
        assert!(!state.sidebar.is_open());
        assert_eq!(state.active_key(), key);
    }

    // Wide layouts too
    let mut state = app(WIDE);
    state.on_close_request();
    assert!(!state.sidebar.is_open());
}

#[test]
fn backdrop_click_closes_overlay() {
    let mut state = app(NARROW);
    state.toggle_sidebar();
    draw(&mut state);
    click(&mut state, NARROW - 2, 20);
    assert!(!state.sidebar.is_open());
    assert_eq!(state.active_key(), "dashboard");
}

#[test]
fn selecting_active_key_twice_keeps_sub_tab() {
    let mut state = app(WIDE);
    state.select("exams");
    press(&mut state, KeyCode::Right);
    assert_eq!(state.router.current_section().active_sub_tab(), "grading");

    assert!(!state.select("exams"));
    assert_eq!(state.router.current_section().active_sub_tab(), "grading");
}

#[test]
fn bracket_keys_step_through_registry() {
    let mut state = app(WIDE);
    press(&mut state, KeyCode::Char(']'));
    assert_eq!(state.active_key(), "attendance");
    press(&mut state, KeyCode::Char('['));
    press(&mut state, KeyCode::Char('['));
    assert_eq!(state.active_key(), "settings");
}

#[test]
fn sidebar_keyboard_selection() {
    let mut state = app(WIDE);
    press(&mut state, KeyCode::Tab);
    assert_eq!(state.focus, Focus::Sidebar);
    press(&mut state, KeyCode::Down);
    press(&mut state, KeyCode::Down);
    press(&mut state, KeyCode::Enter);
    assert_eq!(state.active_key(), "assignments");
}

#[test]
fn dashboard_quick_action_navigates() {
    let mut state = app(WIDE);
    press(&mut state, KeyCode::Char('i'));
    assert_eq!(state.active_key(), "messages");
}

#[test]
fn editing_suspends_global_shortcuts() {
    let mut state = app(WIDE);
    state.select("library");
    press(&mut state, KeyCode::Right);
    press(&mut state, KeyCode::Char('/'));
    for c in "quantum [b]".chars() {
        press(&mut state, KeyCode::Char(c));
    }
    assert!(!state.should_quit);
    assert_eq!(state.active_key(), "library");
    assert!(state.sidebar.is_open());

    press(&mut state, KeyCode::Esc);
    press(&mut state, KeyCode::Char('q'));
    assert!(state.should_quit);
}
