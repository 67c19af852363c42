// TabState and ContentRouter: which section is active, and its mounted instance

use crate::sections::{Section, SectionContext};
use crate::ui::registry::{NavigationEntry, NavigationRegistry};

/// The single active section key. Always a registered key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabState {
    active_key: &'static str,
}

impl TabState {
    pub fn active_key(&self) -> &'static str {
        self.active_key
    }
}

/// Mounts exactly one section at a time.
pub struct ContentRouter {
    registry: NavigationRegistry,
    state: TabState,
    mounted: Box<dyn Section>,
    ctx: SectionContext,
}

impl ContentRouter {
    pub fn new(registry: NavigationRegistry, initial_key: &str, ctx: SectionContext) -> Self {
        let entry = match registry.get(initial_key) {
            Some(entry) => entry,
            None => {
                tracing::warn!(
                    key = initial_key,
                    "initial section is not registered, falling back to default"
                );
                registry.default_entry()
            }
        };
        let key = entry.key;
        let mounted = (entry.factory)(&ctx);
        tracing::info!(section = key, "section mounted");

        Self {
            state: TabState { active_key: key },
            mounted,
            registry,
            ctx,
        }
    }

    /// Switch to `key`. Unregistered keys and the already-active key are no-ops.
    /// Returns true if a different section was mounted.
    pub fn select(&mut self, key: &str) -> bool {
        let Some(entry) = self.registry.get(key) else {
            tracing::debug!(key, "ignoring selection of unregistered section");
            return false;
        };
        if entry.key == self.state.active_key {
            return false;
        }

        let (next_key, factory) = (entry.key, entry.factory);
        let previous = self.state.active_key;

        let unmounted = std::mem::replace(&mut self.mounted, factory(&self.ctx));
        drop(unmounted);
        self.state.active_key = next_key;

        tracing::info!(from = previous, to = next_key, "section selected");
        true
    }

    pub fn state(&self) -> TabState {
        self.state
    }

    pub fn active_key(&self) -> &'static str {
        self.state.active_key
    }

    /// Entry bound to the active key, or the default entry if unresolved.
    pub fn current_entry(&self) -> &NavigationEntry {
        self.registry
            .get(self.state.active_key)
            .unwrap_or_else(|| self.registry.default_entry())
    }

    pub fn current_section(&self) -> &dyn Section {
        self.mounted.as_ref()
    }

    pub fn current_section_mut(&mut self) -> &mut dyn Section {
        self.mounted.as_mut()
    }

    pub fn registry(&self) -> &NavigationRegistry {
        &self.registry
    }

    pub fn context(&self) -> &SectionContext {
        &self.ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::ctx;

    fn router() -> ContentRouter {
        ContentRouter::new(NavigationRegistry::faculty(), "dashboard", ctx())
    }

    #[test]
    fn test_starts_on_initial_key() {
        let router = router();
        assert_eq!(router.active_key(), "dashboard");
        assert_eq!(router.current_section().key(), "dashboard");
    }

    #[test]
    fn test_unknown_initial_key_falls_back() {
        let router = ContentRouter::new(NavigationRegistry::faculty(), "cafeteria", ctx());
        assert_eq!(router.active_key(), "dashboard");
    }

    #[test]
    fn test_select_mounts_matching_section() {
        let mut router = router();
        assert!(router.select("leave"));
        assert_eq!(router.active_key(), "leave");
        assert_eq!(router.current_section().key(), "leave");
        assert_eq!(router.current_entry().label, "Leave");
    }

    #[test]
    fn test_select_unknown_is_noop() {
        let mut router = router();
        router.select("messages");
        assert!(!router.select("cafeteria"));
        assert_eq!(router.active_key(), "messages");
    }

    #[test]
    fn test_reselect_active_is_noop() {
        let mut router = router();
        router.select("messages");
        router.current_section_mut().tabs_mut().set_active("sent");
        assert!(!router.select("messages"));
        assert_eq!(router.current_section().active_sub_tab(), "sent");
    }
}
