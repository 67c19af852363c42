// Rendering through ratatui's TestBackend: every section, both layouts

use crate::common::helpers::*;
use crossterm::event::KeyCode;
use facdash::config::Config;
use facdash::ui::headless::render_frame;

#[test]
fn every_section_renders_wide_and_narrow() {
    for width in [WIDE, NARROW] {
        let mut state = app(width);
        let entries: Vec<(&str, &str)> = state
            .router
            .registry()
            .iter()
            .map(|e| (e.key, e.label))
            .collect();
        for (key, label) in entries {
            state.select(key);
            let text = screen(&draw(&mut state));
            let header = text.lines().next().unwrap_or_default();
            assert!(header.contains(label), "{} header missing at width {}", key, width);
        }
    }
}

#[test]
fn every_section_survives_tiny_terminals() {
    let sizes = [
        (1, 1),
        (10, 4),
        (20, 6),
        (30, 8),
        (40, 10),
        (60, 12),
        (99, 5),
        (100, 5),
    ];
    for (width, height) in sizes {
        let mut state = app_sized(width, height);
        let keys: Vec<&str> = state.router.registry().keys().collect();
        for key in keys {
            state.select(key);
            draw(&mut state);
            state.toggle_sidebar();
            draw(&mut state);
            state.toggle_sidebar();
        }
    }
}

#[test]
fn social_impact_projects_clip_to_available_rows() {
    let mut state = app_sized(99, 5);
    state.select("social-impact");
    assert_eq!(state.router.current_section().active_sub_tab(), "projects");
    let text = screen(&draw(&mut state));
    assert!(text.lines().next().unwrap_or_default().contains("Social Impact"));
}

#[test]
fn wide_layout_shows_docked_sidebar_and_full_footer() {
    let mut state = app(WIDE);
    let text = screen(&draw(&mut state));
    assert!(text.contains("FACULTY PORTAL"));
    assert!(!text.contains("[x] Close"));
    assert!(text.contains("[q] Quit"));
}

#[test]
fn narrow_overlay_has_close_control() {
    let mut state = app(NARROW);
    let text = screen(&draw(&mut state));
    assert!(!text.contains("FACULTY PORTAL"));

    press(&mut state, KeyCode::Char('b'));
    let buffer = draw(&mut state);
    let (x, y) = find_text(&buffer, "[x] Close").expect("close control drawn");
    click(&mut state, x, y);
    assert!(!state.sidebar.is_open());
}

#[test]
fn section_hints_reach_the_footer() {
    let mut state = app(WIDE);
    state.select("library");
    let text = screen(&draw(&mut state));
    let footer = text.lines().last().unwrap_or_default();
    assert!(footer.contains("[r] Renew"));
}

#[test]
fn help_modal_draws_over_the_shell() {
    let mut state = app(WIDE);
    press(&mut state, KeyCode::Char('?'));
    assert!(state.help_modal.is_some());
    draw(&mut state);
    press(&mut state, KeyCode::Esc);
    assert!(state.help_modal.is_none());
}

#[test]
fn headless_render_matches_interactive_frame() {
    let from_cli = render_frame(&Config::default(), "timetable", WIDE, 40, today()).unwrap();
    let mut state = app(WIDE);
    state.select("timetable");
    assert_eq!(from_cli, screen(&draw(&mut state)));
}
