// Outside-click listeners for popovers, dropdowns and other dismissable UI
//
// Every open popover holds a ListenerGuard. The guard's slot is removed when
// the guard is dropped, so tearing down a section (or closing the popover)
// can never leave a listener behind.

use ratatui::layout::{Position, Rect};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Default)]
struct ListenerTable {
    next_id: u64,
    slots: BTreeMap<u64, Slot>,
}

#[derive(Debug)]
struct Slot {
    owner: &'static str,
    bounds: Vec<Rect>,
    tripped: bool,
}

/// Shared table of active outside-click listeners.
#[derive(Debug, Clone, Default)]
pub struct Listeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, owner: &'static str) -> ListenerGuard {
        let mut table = self.table.borrow_mut();
        let id = table.next_id;
        table.next_id += 1;
        table.slots.insert(
            id,
            Slot {
                owner,
                bounds: Vec::new(),
                tripped: false,
            },
        );
        tracing::trace!(owner, id, "outside-click listener registered");

        ListenerGuard {
            id,
            table: Rc::clone(&self.table),
        }
    }

    pub fn len(&self) -> usize {
        self.table.borrow().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn owners(&self) -> Vec<&'static str> {
        self.table.borrow().slots.values().map(|s| s.owner).collect()
    }

    /// Dispatch a click to every listener. Listeners whose bounds are known
    /// and don't contain the point are tripped. Returns the number tripped.
    pub fn click(&self, column: u16, row: u16) -> usize {
        let point = Position::new(column, row);
        let mut tripped = 0;
        for slot in self.table.borrow_mut().slots.values_mut() {
            if slot.bounds.is_empty() {
                continue;
            }
            if !slot.bounds.iter().any(|b| b.contains(point)) {
                slot.tripped = true;
                tripped += 1;
            }
        }
        tripped
    }
}

/// Scoped registration; dropping it deregisters the listener.
#[derive(Debug)]
pub struct ListenerGuard {
    id: u64,
    table: Rc<RefCell<ListenerTable>>,
}

impl ListenerGuard {
    /// Areas that count as "inside" (the popover and its trigger).
    pub fn set_bounds(&self, bounds: &[Rect]) {
        if let Some(slot) = self.table.borrow_mut().slots.get_mut(&self.id) {
            slot.bounds = bounds.to_vec();
        }
    }

    /// Returns true once after an outside click was observed.
    pub fn take_tripped(&self) -> bool {
        match self.table.borrow_mut().slots.get_mut(&self.id) {
            Some(slot) => std::mem::take(&mut slot.tripped),
            None => false,
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Ok(mut table) = self.table.try_borrow_mut() {
            if let Some(slot) = table.slots.remove(&self.id) {
                tracing::trace!(owner = slot.owner, id = self.id, "outside-click listener removed");
            }
        }
    }
}

/// Open/closed flag for a popover that closes itself on an outside click.
#[derive(Debug, Default)]
pub struct Dismissable {
    guard: Option<ListenerGuard>,
}

impl Dismissable {
    pub fn open(&mut self, listeners: &Listeners, owner: &'static str) {
        if self.guard.is_none() {
            self.guard = Some(listeners.register(owner));
        }
    }

    pub fn close(&mut self) {
        self.guard = None;
    }

    pub fn toggle(&mut self, listeners: &Listeners, owner: &'static str) {
        if self.is_open() {
            self.close();
        } else {
            self.open(listeners, owner);
        }
    }

    /// Whether the popover is open, closing it first if an outside click tripped.
    pub fn is_open(&mut self) -> bool {
        let tripped = self.guard.as_ref().is_some_and(|g| g.take_tripped());
        if tripped {
            self.guard = None;
        }
        self.guard.is_some()
    }

    /// Open flag without consuming a pending outside-click trip.
    pub fn is_active(&self) -> bool {
        self.guard.is_some()
    }

    pub fn set_bounds(&self, bounds: &[Rect]) {
        if let Some(guard) = &self.guard {
            guard.set_bounds(bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_drop_removes_listener() {
        let listeners = Listeners::new();
        let guard = listeners.register("notifications");
        assert_eq!(listeners.len(), 1);
        assert_eq!(listeners.owners(), vec!["notifications"]);
        drop(guard);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_click_outside_trips_only_outside() {
        let listeners = Listeners::new();
        let guard = listeners.register("menu");
        guard.set_bounds(&[Rect::new(10, 0, 20, 5)]);

        assert_eq!(listeners.click(12, 2), 0);
        assert!(!guard.take_tripped());

        assert_eq!(listeners.click(40, 20), 1);
        assert!(guard.take_tripped());
        // Consumed
        assert!(!guard.take_tripped());
    }

    #[test]
    fn test_unrendered_listener_is_not_tripped() {
        let listeners = Listeners::new();
        let guard = listeners.register("dropdown");
        assert_eq!(listeners.click(0, 0), 0);
        assert!(!guard.take_tripped());
    }

    #[test]
    fn test_dismissable_closes_on_outside_click() {
        let listeners = Listeners::new();
        let mut popover = Dismissable::default();
        popover.open(&listeners, "profile-menu");
        popover.set_bounds(&[Rect::new(0, 0, 10, 10)]);
        assert!(popover.is_open());

        listeners.click(50, 50);
        assert!(!popover.is_open());
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_dismissable_toggle() {
        let listeners = Listeners::new();
        let mut popover = Dismissable::default();
        popover.toggle(&listeners, "bell");
        assert!(popover.is_open());
        popover.toggle(&listeners, "bell");
        assert!(!popover.is_open());
        assert!(listeners.is_empty());
    }
}
