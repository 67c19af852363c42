/// Property-based tests for shell navigation
///
/// Random sequences of selections, sidebar toggles, close requests and
/// resizes must keep the shell's invariants: the active key is always
/// registered, exactly one sidebar row is highlighted, and the mounted
/// section matches the active key.
use chrono::NaiveDate;
use facdash::config::Config;
use facdash::ui::sidebar::SidebarView;
use facdash::ui::{AppState, NavigationRegistry, Viewport};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Select(String),
    OnSelect(String),
    Toggle,
    Close,
    Resize(u16),
    Step(isize),
}

fn registered_key() -> impl Strategy<Value = String> {
    let keys: Vec<String> = NavigationRegistry::faculty()
        .keys()
        .map(str::to_string)
        .collect();
    prop::sample::select(keys)
}

fn any_key() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => registered_key(),
        1 => "[a-z-]{0,12}",
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any_key().prop_map(Op::Select),
        any_key().prop_map(Op::OnSelect),
        Just(Op::Toggle),
        Just(Op::Close),
        (40u16..200).prop_map(Op::Resize),
        (-3isize..=3).prop_map(Op::Step),
    ]
}

fn state(width: u16) -> AppState {
    AppState::new(
        &Config::default(),
        Viewport::new(width, 40, 100),
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
    )
}

proptest! {
    #[test]
    fn shell_invariants_hold(width in 40u16..200, ops in prop::collection::vec(op(), 0..40)) {
        let registry = NavigationRegistry::faculty();
        let mut state = state(width);

        for op in ops {
            let before = state.active_key();
            let was_open = state.sidebar.is_open();
            match op {
                Op::Select(key) => {
                    state.select(&key);
                    if !registry.contains(&key) {
                        prop_assert_eq!(state.active_key(), before);
                    }
                }
                Op::OnSelect(key) => {
                    state.on_select(&key);
                    if state.viewport.is_narrow() {
                        prop_assert!(!state.sidebar.is_open());
                    } else {
                        prop_assert_eq!(state.sidebar.is_open(), was_open);
                    }
                }
                Op::Toggle => {
                    state.toggle_sidebar();
                    prop_assert_eq!(state.sidebar.is_open(), !was_open);
                }
                Op::Close => {
                    state.on_close_request();
                    prop_assert!(!state.sidebar.is_open());
                }
                Op::Resize(w) => {
                    state.resize(w, 40);
                    prop_assert_eq!(state.sidebar.is_open(), was_open);
                }
                Op::Step(offset) => state.step_section(offset),
            }

            let active = state.active_key();
            prop_assert!(registry.contains(active));
            prop_assert_eq!(state.router.current_section().key(), active);

            let highlighted: Vec<_> = SidebarView::rows(&registry, active)
                .into_iter()
                .filter(|r| r.highlighted)
                .map(|r| r.key)
                .collect();
            prop_assert_eq!(highlighted, vec![active]);
        }
    }

    #[test]
    fn reselecting_never_remounts(key in registered_key()) {
        let mut state = state(140);
        state.select(&key);
        let sub_tab = state.router.current_section().tabs().specs()[1].key;
        state.router.current_section_mut().tabs_mut().set_active(sub_tab);

        prop_assert!(!state.select(&key));
        prop_assert_eq!(state.router.current_section().active_sub_tab(), sub_tab);
    }
}
