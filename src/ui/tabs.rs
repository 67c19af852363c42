// Tabs contract: one visible sub-view at a time, keyed by string
//
// A sub-view value exists only while its key is active. Switching keys drops
// the previous value, so any state it held is discarded.

use ratatui::layout::{Position, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSpec {
    pub key: &'static str,
    pub label: &'static str,
}

impl TabSpec {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Tabbed container owning the currently mounted sub-view.
pub struct TabPanel<V> {
    specs: &'static [TabSpec],
    active: String,
    mounted: Option<V>,
    mount: fn(&str) -> Option<V>,
    trigger_areas: Vec<(Rect, &'static str)>,
}

impl<V> TabPanel<V> {
    pub fn new(specs: &'static [TabSpec], default_key: &str, mount: fn(&str) -> Option<V>) -> Self {
        Self {
            specs,
            active: default_key.to_string(),
            mounted: mount(default_key),
            mount,
            trigger_areas: Vec::new(),
        }
    }

    pub fn content(&self) -> Option<&V> {
        self.mounted.as_ref()
    }

    pub fn content_mut(&mut self) -> Option<&mut V> {
        self.mounted.as_mut()
    }
}

/// Object-safe view of a tab panel, independent of its sub-view type.
pub trait TabBar {
    fn specs(&self) -> &'static [TabSpec];

    fn active_key(&self) -> &str;

    /// Activate `key`. Any string is accepted; a key with no content mounts nothing.
    fn set_active(&mut self, key: &str);

    /// Record where each trigger was drawn, for mouse hit testing.
    fn set_trigger_areas(&mut self, areas: Vec<(Rect, &'static str)>);

    fn trigger_areas(&self) -> &[(Rect, &'static str)];

    fn is_mounted(&self) -> bool;

    fn hit(&self, column: u16, row: u16) -> Option<&'static str> {
        let point = Position::new(column, row);
        self.trigger_areas()
            .iter()
            .find(|(area, _)| area.contains(point))
            .map(|(_, key)| *key)
    }

    fn active_index(&self) -> Option<usize> {
        self.specs().iter().position(|s| s.key == self.active_key())
    }

    fn next(&mut self) {
        let specs = self.specs();
        if specs.is_empty() {
            return;
        }
        let next = self.active_index().map(|i| (i + 1) % specs.len()).unwrap_or(0);
        self.set_active(specs[next].key);
    }

    fn previous(&mut self) {
        let specs = self.specs();
        if specs.is_empty() {
            return;
        }
        let prev = self
            .active_index()
            .map(|i| (i + specs.len() - 1) % specs.len())
            .unwrap_or(0);
        self.set_active(specs[prev].key);
    }
}

impl<V> TabBar for TabPanel<V> {
    fn specs(&self) -> &'static [TabSpec] {
        self.specs
    }

    fn active_key(&self) -> &str {
        &self.active
    }

    fn set_active(&mut self, key: &str) {
        if self.active == key {
            return;
        }
        // Drop the old sub-view before building the new one
        self.mounted = None;
        self.active = key.to_string();
        self.mounted = (self.mount)(key);
    }

    fn set_trigger_areas(&mut self, areas: Vec<(Rect, &'static str)>) {
        self.trigger_areas = areas;
    }

    fn trigger_areas(&self) -> &[(Rect, &'static str)] {
        &self.trigger_areas
    }

    fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: &[TabSpec] = &[
        TabSpec::new("inbox", "Inbox"),
        TabSpec::new("compose", "Compose"),
        TabSpec::new("sent", "Sent"),
    ];

    #[derive(Debug, PartialEq)]
    enum View {
        Inbox(usize),
        Compose(String),
        Sent,
    }

    fn mount(key: &str) -> Option<View> {
        match key {
            "inbox" => Some(View::Inbox(0)),
            "compose" => Some(View::Compose(String::new())),
            "sent" => Some(View::Sent),
            _ => None,
        }
    }

    #[test]
    fn test_starts_on_default() {
        let panel = TabPanel::new(SPECS, "inbox", mount);
        assert_eq!(panel.active_key(), "inbox");
        assert_eq!(panel.content(), Some(&View::Inbox(0)));
    }

    #[test]
    fn test_switch_unmounts_previous() {
        let mut panel = TabPanel::new(SPECS, "inbox", mount);
        panel.set_active("compose");
        if let Some(View::Compose(draft)) = panel.content_mut() {
            draft.push_str("Dear Dean,");
        }
        assert_eq!(panel.content(), Some(&View::Compose("Dear Dean,".into())));

        panel.set_active("sent");
        assert_eq!(panel.content(), Some(&View::Sent));

        panel.set_active("compose");
        assert_eq!(panel.content(), Some(&View::Compose(String::new())));
    }

    #[test]
    fn test_same_key_keeps_state() {
        let mut panel = TabPanel::new(SPECS, "compose", mount);
        if let Some(View::Compose(draft)) = panel.content_mut() {
            draft.push('x');
        }
        panel.set_active("compose");
        assert_eq!(panel.content(), Some(&View::Compose("x".into())));
    }

    #[test]
    fn test_unknown_key_renders_nothing() {
        let mut panel = TabPanel::new(SPECS, "inbox", mount);
        panel.set_active("archive");
        assert_eq!(panel.active_key(), "archive");
        assert!(!panel.is_mounted());
        assert_eq!(panel.active_index(), None);

        // Cycling from an unknown key restarts at the first trigger
        panel.next();
        assert_eq!(panel.active_key(), "inbox");
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut panel = TabPanel::new(SPECS, "inbox", mount);
        panel.previous();
        assert_eq!(panel.active_key(), "sent");
        panel.next();
        assert_eq!(panel.active_key(), "inbox");
        panel.next();
        assert_eq!(panel.active_key(), "compose");
    }

    #[test]
    fn test_hit_uses_recorded_areas() {
        let mut panel = TabPanel::new(SPECS, "inbox", mount);
        panel.set_trigger_areas(vec![
            (Rect::new(0, 0, 7, 1), "inbox"),
            (Rect::new(8, 0, 9, 1), "compose"),
        ]);
        assert_eq!(panel.hit(9, 0), Some("compose"));
        assert_eq!(panel.hit(30, 0), None);
    }
}
