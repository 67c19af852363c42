// Tabs contract: only the active sub-view exists; switching discards the old one

use crate::common::helpers::*;
use crossterm::event::KeyCode;
use facdash::ui::tabs::{TabBar, TabPanel, TabSpec};
use std::cell::Cell;

const SPECS: &[TabSpec] = &[
    TabSpec::new("a", "A"),
    TabSpec::new("b", "B"),
    TabSpec::new("c", "C"),
];

thread_local! {
    static MOUNTS: Cell<usize> = const { Cell::new(0) };
    static DROPS: Cell<usize> = const { Cell::new(0) };
}

#[derive(Debug)]
struct Probe {
    key: String,
    scratch: String,
}

impl Drop for Probe {
    fn drop(&mut self) {
        DROPS.with(|d| d.set(d.get() + 1));
    }
}

fn mount_probe(key: &str) -> Option<Probe> {
    if !SPECS.iter().any(|s| s.key == key) {
        return None;
    }
    MOUNTS.with(|m| m.set(m.get() + 1));
    Some(Probe {
        key: key.to_string(),
        scratch: String::new(),
    })
}

fn counts() -> (usize, usize) {
    (MOUNTS.with(Cell::get), DROPS.with(Cell::get))
}

#[test]
fn switching_unmounts_previous_content() {
    let mut panel = TabPanel::new(SPECS, "a", mount_probe);
    if let Some(probe) = panel.content_mut() {
        probe.scratch.push_str("typed");
    }
    let (mounts, drops) = counts();

    panel.set_active("b");
    assert_eq!(counts(), (mounts + 1, drops + 1));
    assert_eq!(panel.content().map(|p| p.key.as_str()), Some("b"));

    panel.set_active("a");
    assert_eq!(panel.content().map(|p| p.scratch.as_str()), Some(""));
}

#[test]
fn setting_the_active_key_again_keeps_content() {
    let mut panel = TabPanel::new(SPECS, "b", mount_probe);
    if let Some(probe) = panel.content_mut() {
        probe.scratch.push_str("draft");
    }
    let before = counts();
    panel.set_active("b");
    assert_eq!(counts(), before);
    assert_eq!(panel.content().map(|p| p.scratch.as_str()), Some("draft"));
}

#[test]
fn unknown_key_mounts_nothing() {
    let mut panel = TabPanel::new(SPECS, "a", mount_probe);
    panel.set_active("zzz");
    assert_eq!(panel.active_key(), "zzz");
    assert!(!panel.is_mounted());
    assert!(panel.content().is_none());
}

#[test]
fn next_and_previous_wrap() {
    let mut panel = TabPanel::new(SPECS, "c", mount_probe);
    panel.next();
    assert_eq!(panel.active_key(), "a");
    panel.previous();
    panel.previous();
    assert_eq!(panel.active_key(), "b");
}

#[test]
fn compose_draft_is_lost_on_sub_tab_switch() {
    let mut state = app(WIDE);
    state.select("messages");
    press(&mut state, KeyCode::Right);
    assert_eq!(state.router.current_section().active_sub_tab(), "compose");

    press(&mut state, KeyCode::Enter);
    for c in "dean.zq@campus.edu".chars() {
        press(&mut state, KeyCode::Char(c));
    }
    press(&mut state, KeyCode::Esc);
    assert!(screen(&draw(&mut state)).contains("dean.zq@campus.edu"));

    press(&mut state, KeyCode::Right);
    press(&mut state, KeyCode::Left);
    assert!(!screen(&draw(&mut state)).contains("dean.zq@campus.edu"));
}

#[test]
fn leave_application_survives_sub_tab_switch() {
    let mut state = app(WIDE);
    state.select("leave");
    assert!(!screen(&draw(&mut state)).contains("2026-11-02"));

    press(&mut state, KeyCode::Down);
    press(&mut state, KeyCode::Enter);
    for c in "2026-11-02".chars() {
        press(&mut state, KeyCode::Char(c));
    }
    press(&mut state, KeyCode::Esc);

    press(&mut state, KeyCode::Right);
    assert_eq!(state.router.current_section().active_sub_tab(), "history");
    press(&mut state, KeyCode::Left);
    assert!(screen(&draw(&mut state)).contains("2026-11-02"));

    // Leaving the section discards it all the same
    state.select("dashboard");
    state.select("leave");
    assert!(!screen(&draw(&mut state)).contains("2026-11-02"));
}

#[test]
fn clicking_a_sub_tab_trigger_switches() {
    let mut state = app(WIDE);
    state.select("assignments");
    let buffer = draw(&mut state);
    let (x, y) = find_text(&buffer, "Review Submissions").expect("trigger drawn");
    click(&mut state, x + 1, y);
    assert_eq!(
        state.router.current_section().active_sub_tab(),
        "review-submissions"
    );
}
