// Research: publications and sponsored grants

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Cell, Row, TableState},
};

use super::{Section, SectionAction, SectionContext};
use crate::ui::components::{Badge, Card, Tone, first_row, render_table, step_selection};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};

const TABS: &[TabSpec] = &[
    TabSpec::new("publications", "Publications"),
    TabSpec::new("grants", "Grants"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Publication {
    pub title: &'static str,
    pub venue: &'static str,
    pub year: u16,
    pub citations: u32,
    pub kind: &'static str,
}

const PUBLICATIONS: &[Publication] = &[
    Publication {
        title: "Adaptive indexing for HTAP workloads",
        venue: "VLDB",
        year: 2025,
        citations: 14,
        kind: "Conference",
    },
    Publication {
        title: "Learned cardinality estimation under drift",
        venue: "SIGMOD",
        year: 2024,
        citations: 41,
        kind: "Conference",
    },
    Publication {
        title: "A survey of query optimisation with ML",
        venue: "ACM Computing Surveys",
        year: 2023,
        citations: 87,
        kind: "Journal",
    },
    Publication {
        title: "Teaching databases with autograded labs",
        venue: "ITiCSE",
        year: 2026,
        citations: 2,
        kind: "Conference",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grant {
    pub title: &'static str,
    pub agency: &'static str,
    pub amount_lakh: u32,
    pub spent_lakh: u32,
    pub ends: &'static str,
}

const GRANTS: &[Grant] = &[
    Grant {
        title: "Self-tuning storage engines",
        agency: "SERB",
        amount_lakh: 32,
        spent_lakh: 19,
        ends: "Mar 2027",
    },
    Grant {
        title: "AI tutors for programming labs",
        agency: "AICTE",
        amount_lakh: 12,
        spent_lakh: 11,
        ends: "Dec 2026",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Newest,
    MostCited,
}

struct PublicationList {
    order: SortOrder,
    state: TableState,
}

impl PublicationList {
    fn sorted(&self) -> Vec<&'static Publication> {
        let mut list: Vec<_> = PUBLICATIONS.iter().collect();
        match self.order {
            SortOrder::Newest => list.sort_by(|a, b| b.year.cmp(&a.year)),
            SortOrder::MostCited => list.sort_by(|a, b| b.citations.cmp(&a.citations)),
        }
        list
    }
}

enum View {
    Publications(PublicationList),
    Grants(TableState),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "publications" => Some(View::Publications(PublicationList {
            order: SortOrder::Newest,
            state: first_row(),
        })),
        "grants" => Some(View::Grants(first_row())),
        _ => None,
    }
}

pub struct ResearchSection {
    tabs: TabPanel<View>,
}

pub fn mount(_ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(ResearchSection::new())
}

impl Default for ResearchSection {
    fn default() -> Self {
        Self::new()
    }
}

impl ResearchSection {
    pub fn new() -> Self {
        Self {
            tabs: TabPanel::new(TABS, "publications", mount_view),
        }
    }

    pub fn listed_titles(&self) -> Vec<&'static str> {
        match self.tabs.content() {
            Some(View::Publications(list)) => list.sorted().iter().map(|p| p.title).collect(),
            _ => Vec::new(),
        }
    }
}

pub fn h_index(citations: impl IntoIterator<Item = u32>) -> u32 {
    let mut counts: Vec<u32> = citations.into_iter().collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    counts
        .iter()
        .enumerate()
        .take_while(|(i, c)| **c as usize > *i)
        .count() as u32
}

impl Section for ResearchSection {
    fn key(&self) -> &'static str {
        "research"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Publications(_)) => &[("[o]", "Sort")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(chunks[0]);

        match self.tabs.content_mut() {
            Some(View::Publications(list)) => {
                let total: u32 = PUBLICATIONS.iter().map(|p| p.citations).sum();
                frame.render_widget(
                    Card::new("Publications", PUBLICATIONS.len().to_string(), "indexed"),
                    cards[0],
                );
                frame.render_widget(
                    Card::new("Citations", total.to_string(), "all time").tone(Tone::Success),
                    cards[1],
                );
                frame.render_widget(
                    Card::new(
                        "h-index",
                        h_index(PUBLICATIONS.iter().map(|p| p.citations)).to_string(),
                        "from listed work",
                    )
                    .tone(Tone::Warning),
                    cards[2],
                );

                let rows = list
                    .sorted()
                    .into_iter()
                    .map(|p| {
                        Row::new(vec![
                            Cell::from(p.title),
                            Cell::from(p.venue),
                            Cell::from(p.year.to_string()),
                            Cell::from(p.citations.to_string()),
                            Badge::cell(p.kind, Tone::Info),
                        ])
                    })
                    .collect();
                let title = match list.order {
                    SortOrder::Newest => "Publications (newest first)",
                    SortOrder::MostCited => "Publications (most cited)",
                };
                render_table(
                    frame,
                    chunks[1],
                    title,
                    &["Title", "Venue", "Year", "Cites", "Type"],
                    &[
                        Constraint::Min(28),
                        Constraint::Length(22),
                        Constraint::Length(5),
                        Constraint::Length(6),
                        Constraint::Length(11),
                    ],
                    rows,
                    &mut list.state,
                );
            }
            Some(View::Grants(state)) => {
                let sanctioned: u32 = GRANTS.iter().map(|g| g.amount_lakh).sum();
                let spent: u32 = GRANTS.iter().map(|g| g.spent_lakh).sum();
                frame.render_widget(
                    Card::new("Active grants", GRANTS.len().to_string(), "sponsored"),
                    cards[0],
                );
                frame.render_widget(
                    Card::new("Sanctioned", format!("₹{}L", sanctioned), "total").tone(Tone::Success),
                    cards[1],
                );
                frame.render_widget(
                    Card::new("Utilised", format!("₹{}L", spent), "to date").tone(Tone::Warning),
                    cards[2],
                );

                let rows = GRANTS
                    .iter()
                    .map(|g| {
                        let used = g.spent_lakh * 100 / g.amount_lakh.max(1);
                        let tone = if used >= 90 { Tone::Danger } else { Tone::Neutral };
                        Row::new(vec![
                            Cell::from(g.title),
                            Cell::from(g.agency),
                            Cell::from(format!("₹{}L", g.amount_lakh)),
                            Badge::cell(format!("{}%", used), tone),
                            Cell::from(g.ends),
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    chunks[1],
                    "Grants",
                    &["Project", "Agency", "Amount", "Used", "Ends"],
                    &[
                        Constraint::Min(26),
                        Constraint::Length(8),
                        Constraint::Length(8),
                        Constraint::Length(6),
                        Constraint::Length(9),
                    ],
                    rows,
                    state,
                );
            }
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        match self.tabs.content_mut() {
            Some(View::Publications(list)) => {
                match key.code {
                    KeyCode::Char('o') => {
                        list.order = match list.order {
                            SortOrder::Newest => SortOrder::MostCited,
                            SortOrder::MostCited => SortOrder::Newest,
                        };
                        list.state = first_row();
                    }
                    KeyCode::Up => step_selection(&mut list.state, PUBLICATIONS.len(), -1),
                    KeyCode::Down => step_selection(&mut list.state, PUBLICATIONS.len(), 1),
                    _ => return SectionAction::Ignored,
                }
                SectionAction::Consumed
            }
            Some(View::Grants(state)) => {
                match key.code {
                    KeyCode::Up => step_selection(state, GRANTS.len(), -1),
                    KeyCode::Down => step_selection(state, GRANTS.len(), 1),
                    _ => return SectionAction::Ignored,
                }
                SectionAction::Consumed
            }
            None => SectionAction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press};

    #[test]
    fn test_default_sub_tab_is_publications() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "publications");
    }

    #[test]
    fn test_h_index() {
        assert_eq!(h_index([87, 41, 14, 2]), 3);
        assert_eq!(h_index([0, 0]), 0);
        assert_eq!(h_index(Vec::<u32>::new()), 0);
    }

    #[test]
    fn test_sort_toggle() {
        let mut section = ResearchSection::new();
        assert_eq!(section.listed_titles()[0], "Teaching databases with autograded labs");
        press(&mut section, KeyCode::Char('o'));
        assert_eq!(section.listed_titles()[0], "A survey of query optimisation with ML");
    }
}
