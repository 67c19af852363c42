// Clubs: clubs the faculty advises and their events

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
    TabSpec::new("my-clubs", "My Clubs"),
    TabSpec::new("events", "Events"),
];

const CLUBS: &[(&str, &str, u32, &str)] = &[
    ("Coding Club", "Faculty advisor", 142, "Weekly, Wed 17:00"),
    ("Robotics Society", "Co-advisor", 58, "Sat 10:00"),
    ("Literary Circle", "Member", 35, "Fortnightly"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubEvent {
    pub club: &'static str,
    pub title: &'static str,
    pub when: &'static str,
    pub going: bool,
}

enum View {
    MyClubs(TableState),
    Events(TableState),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "my-clubs" => Some(View::MyClubs(first_row())),
        "events" => Some(View::Events(first_row())),
        _ => None,
    }
}

pub struct ClubsSection {
    tabs: TabPanel<View>,
    events: Vec<ClubEvent>,
}

pub fn mount(_ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(ClubsSection::new())
}

impl Default for ClubsSection {
    fn default() -> Self {
        Self::new()
    }
}

impl ClubsSection {
    pub fn new() -> Self {
        Self {
            tabs: TabPanel::new(TABS, "my-clubs", mount_view),
            events: sample_events(),
        }
    }

    pub fn events(&self) -> &[ClubEvent] {
        &self.events
    }

    pub fn attending(&self) -> usize {
        self.events.iter().filter(|e| e.going).count()
    }
}

impl Section for ClubsSection {
    fn key(&self) -> &'static str {
        "clubs"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Events(_)) => &[("[Space]", "RSVP")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        let attending = self.attending();
        match self.tabs.content_mut() {
            Some(View::MyClubs(state)) => {
                let rows = CLUBS
                    .iter()
                    .map(|(name, role, members, meets)| {
                        Row::new(vec![
                            Cell::from(*name),
                            Badge::cell(*role, Tone::Info),
                            Cell::from(members.to_string()),
                            Cell::from(*meets),
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    "My Clubs",
                    &["Club", "Role", "Members", "Meets"],
                    &[
                        Constraint::Length(18),
                        Constraint::Length(16),
                        Constraint::Length(8),
                        Constraint::Min(12),
                    ],
                    rows,
                    state,
                );
            }
            Some(View::Events(state)) => {
                let rows = self
                    .events
                    .iter()
                    .map(|e| {
                        Row::new(vec![
                            Cell::from(e.when),
                            Cell::from(e.title),
                            Cell::from(e.club),
                            if e.going {
                                Badge::cell("Going", Tone::Success)
                            } else {
                                Badge::cell("-", Tone::Neutral)
                            },
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    &format!("Club Events ({} going)", attending),
                    &["When", "Event", "Club", "RSVP"],
                    &[
                        Constraint::Length(8),
                        Constraint::Min(20),
                        Constraint::Length(16),
                        Constraint::Length(6),
                    ],
                    rows,
                    state,
                );
            }
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        let events_len = self.events.len();
        match self.tabs.content_mut() {
            Some(View::MyClubs(state)) => {
                match key.code {
                    KeyCode::Up => step_selection(state, CLUBS.len(), -1),
                    KeyCode::Down => step_selection(state, CLUBS.len(), 1),
                    _ => return SectionAction::Ignored,
                }
                SectionAction::Consumed
            }
            Some(View::Events(state)) => {
                match key.code {
                    KeyCode::Up => step_selection(state, events_len, -1),
                    KeyCode::Down => step_selection(state, events_len, 1),
                    KeyCode::Char(' ') | KeyCode::Enter => {
                        if let Some(event) = state.selected().and_then(|i| self.events.get_mut(i)) {
                            event.going = !event.going;
                            tracing::debug!(event = event.title, going = event.going, "club rsvp");
                        }
                    }
                    _ => return SectionAction::Ignored,
                }
                SectionAction::Consumed
            }
            None => SectionAction::Ignored,
        }
    }
}

fn sample_events() -> Vec<ClubEvent> {
    let event = |club, title, when, going| ClubEvent {
        club,
        title,
        when,
        going,
    };
    vec![
        event("Coding Club", "Hack Night: systems edition", "24 Oct", false),
        event("Robotics Society", "Line follower workshop", "26 Oct", true),
        event("Literary Circle", "Poetry open mic", "31 Oct", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press};

    #[test]
    fn test_default_sub_tab_is_my_clubs() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "my-clubs");
    }

    #[test]
    fn test_rsvp_toggles() {
        let mut section = ClubsSection::new();
        press(&mut section, KeyCode::Right);
        assert_eq!(section.attending(), 1);
        press(&mut section, KeyCode::Char(' '));
        assert_eq!(section.attending(), 2);
        press(&mut section, KeyCode::Char(' '));
        assert_eq!(section.attending(), 1);
    }

    #[test]
    fn test_rsvp_survives_tab_switch() {
        let mut section = ClubsSection::new();
        press(&mut section, KeyCode::Right);
        press(&mut section, KeyCode::Char(' '));
        press(&mut section, KeyCode::Left);
        press(&mut section, KeyCode::Right);
        assert!(section.events()[0].going);
    }
}
