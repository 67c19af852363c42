// Events: campus events open for registration and the faculty's registrations

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::{Cell, Row, TableState},
};

use super::{Section, SectionAction, SectionContext};
use crate::ui::components::{Badge, Tone, first_row, render_table, step_selection};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};

const TABS: &[TabSpec] = &[
    TabSpec::new("upcoming", "Upcoming"),
    TabSpec::new("registrations", "My Registrations"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampusEvent {
    pub title: &'static str,
    pub date: &'static str,
    pub venue: &'static str,
    pub seats_left: u32,
    pub registered: bool,
}

impl CampusEvent {
    fn status(&self) -> Cell<'static> {
        if self.registered {
            Badge::cell("Registered", Tone::Success)
        } else if self.seats_left == 0 {
            Badge::cell("Full", Tone::Danger)
        } else {
            Badge::cell(format!("{} seats", self.seats_left), Tone::Info)
        }
    }
}

enum View {
    Upcoming(TableState),
    Registrations(TableState),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "upcoming" => Some(View::Upcoming(first_row())),
        "registrations" => Some(View::Registrations(first_row())),
        _ => None,
    }
}

pub struct EventsSection {
    tabs: TabPanel<View>,
    events: Vec<CampusEvent>,
}

pub fn mount(_ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(EventsSection::new())
}

impl Default for EventsSection {
    fn default() -> Self {
        Self::new()
    }
}

impl EventsSection {
    pub fn new() -> Self {
        Self {
            tabs: TabPanel::new(TABS, "upcoming", mount_view),
            events: sample_events(),
        }
    }

    pub fn events(&self) -> &[CampusEvent] {
        &self.events
    }

    pub fn registered(&self) -> impl Iterator<Item = &CampusEvent> {
        self.events.iter().filter(|e| e.registered)
    }

    /// Register for the event at `index`. Full or already-registered events are left alone.
    pub fn register(&mut self, index: usize) -> bool {
        match self.events.get_mut(index) {
            Some(event) if !event.registered && event.seats_left > 0 => {
                event.registered = true;
                event.seats_left -= 1;
                tracing::info!(event = event.title, "registered for event");
                true
            }
            _ => false,
        }
    }

    /// Cancel the `index`-th registration (index into the registrations list).
    pub fn cancel(&mut self, index: usize) -> bool {
        match self.events.iter_mut().filter(|e| e.registered).nth(index) {
            Some(event) => {
                event.registered = false;
                event.seats_left += 1;
                tracing::info!(event = event.title, "registration cancelled");
                true
            }
            None => false,
        }
    }
}

const WIDTHS: &[Constraint] = &[
    Constraint::Min(24),
    Constraint::Length(8),
    Constraint::Length(18),
    Constraint::Length(11),
];

impl Section for EventsSection {
    fn key(&self) -> &'static str {
        "events"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Upcoming(_)) => &[("[r]", "Register")],
            Some(View::Registrations(_)) => &[("[x]", "Cancel")],
            None => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        let row = |e: &CampusEvent| {
            Row::new(vec![
                Cell::from(e.title),
                Cell::from(e.date),
                Cell::from(e.venue),
                e.status(),
            ])
        };
        match self.tabs.content_mut() {
            Some(View::Upcoming(state)) => {
                let rows = self.events.iter().map(row).collect();
                render_table(
                    frame,
                    area,
                    "Upcoming Events",
                    &["Event", "Date", "Venue", "Status"],
                    WIDTHS,
                    rows,
                    state,
                );
            }
            Some(View::Registrations(state)) => {
                let rows = self.events.iter().filter(|e| e.registered).map(row).collect();
                render_table(
                    frame,
                    area,
                    "My Registrations",
                    &["Event", "Date", "Venue", "Status"],
                    WIDTHS,
                    rows,
                    state,
                );
            }
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        let events_len = self.events.len();
        let registered_len = self.registered().count();
        match self.tabs.content_mut() {
            Some(View::Upcoming(state)) => match key.code {
                KeyCode::Up => {
                    step_selection(state, events_len, -1);
                    SectionAction::Consumed
                }
                KeyCode::Down => {
                    step_selection(state, events_len, 1);
                    SectionAction::Consumed
                }
                KeyCode::Enter | KeyCode::Char('r') => {
                    if let Some(index) = state.selected() {
                        self.register(index);
                    }
                    SectionAction::Consumed
                }
                _ => SectionAction::Ignored,
            },
            Some(View::Registrations(state)) => match key.code {
                KeyCode::Up => {
                    step_selection(state, registered_len, -1);
                    SectionAction::Consumed
                }
                KeyCode::Down => {
                    step_selection(state, registered_len, 1);
                    SectionAction::Consumed
                }
                KeyCode::Char('x') => {
                    if let Some(index) = state.selected() {
                        if self.cancel(index) {
                            let remaining = self.registered().count();
                            if let Some(View::Registrations(state)) = self.tabs.content_mut() {
                                step_selection(state, remaining, 0);
                            }
                        }
                    }
                    SectionAction::Consumed
                }
                _ => SectionAction::Ignored,
            },
            None => SectionAction::Ignored,
        }
    }
}

fn sample_events() -> Vec<CampusEvent> {
    let event = |title, date, venue, seats_left, registered| CampusEvent {
        title,
        date,
        venue,
        seats_left,
        registered,
    };
    vec![
        event("Faculty Development Programme: GenAI", "28 Oct", "Seminar Hall A", 12, false),
        event("Annual Tech Fest inauguration", "05 Nov", "Open Air Theatre", 200, true),
        event("Research Methodology workshop", "12 Nov", "Senate Room", 0, false),
        event("Alumni Meet 2026", "20 Dec", "Convention Centre", 80, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press};

    #[test]
    fn test_default_sub_tab_is_upcoming() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "upcoming");
    }

    #[test]
    fn test_register_takes_a_seat() {
        let mut section = EventsSection::new();
        press(&mut section, KeyCode::Char('r'));
        assert!(section.events()[0].registered);
        assert_eq!(section.events()[0].seats_left, 11);
        assert_eq!(section.registered().count(), 2);

        // Registering twice is a no-op
        press(&mut section, KeyCode::Enter);
        assert_eq!(section.events()[0].seats_left, 11);
    }

    #[test]
    fn test_full_event_cannot_be_registered() {
        let mut section = EventsSection::new();
        assert!(!section.register(2));
    }

    #[test]
    fn test_cancel_from_registrations() {
        let mut section = EventsSection::new();
        press(&mut section, KeyCode::Right);
        press(&mut section, KeyCode::Char('x'));
        assert_eq!(section.registered().count(), 0);
        assert_eq!(section.events()[1].seats_left, 201);
    }
}
