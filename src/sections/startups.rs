// Startups: incubated ventures and mentoring sessions

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
    TabSpec::new("portfolio", "Portfolio"),
    TabSpec::new("mentoring", "Mentoring"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ideation,
    Prototype,
    Seed,
    Growth,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Self::Ideation, Self::Prototype, Self::Seed, Self::Growth];

    pub fn label(self) -> &'static str {
        match self {
            Self::Ideation => "Ideation",
            Self::Prototype => "Prototype",
            Self::Seed => "Seed",
            Self::Growth => "Growth",
        }
    }

    fn tone(self) -> Tone {
        match self {
            Self::Ideation => Tone::Neutral,
            Self::Prototype => Tone::Info,
            Self::Seed => Tone::Warning,
            Self::Growth => Tone::Success,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Startup {
    pub name: &'static str,
    pub domain: &'static str,
    pub founders: &'static str,
    pub stage: Stage,
    pub funding: u32,
}

const PORTFOLIO: &[Startup] = &[
    Startup {
        name: "KrishiSense",
        domain: "Agritech",
        founders: "A. Rao, V. Joshi",
        stage: Stage::Seed,
        funding: 25,
    },
    Startup {
        name: "MediQueue",
        domain: "Healthtech",
        founders: "S. Pillai",
        stage: Stage::Prototype,
        funding: 5,
    },
    Startup {
        name: "CampusKart",
        domain: "E-commerce",
        founders: "R. Verma, K. Singh",
        stage: Stage::Growth,
        funding: 120,
    },
    Startup {
        name: "LexiLearn",
        domain: "Edtech",
        founders: "M. Nair",
        stage: Stage::Ideation,
        funding: 0,
    },
    Startup {
        name: "GridWise",
        domain: "Energy",
        founders: "A. Kulkarni",
        stage: Stage::Prototype,
        funding: 8,
    },
];

const SESSIONS: &[(&str, &str, &str)] = &[
    ("21 Oct 15:00", "KrishiSense", "Pitch deck review"),
    ("23 Oct 11:00", "MediQueue", "Regulatory pathway"),
    ("30 Oct 16:30", "GridWise", "Pilot with campus estate office"),
];

/// Portfolio table with an optional stage filter. Filter resets on tab switch.
struct Portfolio {
    filter: Option<Stage>,
    state: TableState,
}

impl Portfolio {
    fn visible(&self) -> impl Iterator<Item = &'static Startup> + '_ {
        PORTFOLIO
            .iter()
            .filter(move |s| self.filter.is_none_or(|stage| s.stage == stage))
    }

    /// All → Ideation → Prototype → Seed → Growth → All.
    fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None => Some(Stage::ALL[0]),
            Some(stage) => Stage::ALL
                .iter()
                .position(|s| *s == stage)
                .and_then(|i| Stage::ALL.get(i + 1))
                .copied(),
        };
        self.state = first_row();
    }
}

enum View {
    Portfolio(Portfolio),
    Mentoring(TableState),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "portfolio" => Some(View::Portfolio(Portfolio {
            filter: None,
            state: first_row(),
        })),
        "mentoring" => Some(View::Mentoring(first_row())),
        _ => None,
    }
}

pub struct StartupsSection {
    tabs: TabPanel<View>,
}

pub fn mount(_ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(StartupsSection::new())
}

impl Default for StartupsSection {
    fn default() -> Self {
        Self::new()
    }
}

impl StartupsSection {
    pub fn new() -> Self {
        Self {
            tabs: TabPanel::new(TABS, "portfolio", mount_view),
        }
    }

    /// Names currently listed in the portfolio view.
    pub fn visible_names(&self) -> Vec<&'static str> {
        match self.tabs.content() {
            Some(View::Portfolio(portfolio)) => portfolio.visible().map(|s| s.name).collect(),
            _ => Vec::new(),
        }
    }
}

impl Section for StartupsSection {
    fn key(&self) -> &'static str {
        "startups"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Portfolio(_)) => &[("[f]", "Filter stage")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        match self.tabs.content_mut() {
            Some(View::Portfolio(portfolio)) => {
                let rows = portfolio
                    .visible()
                    .map(|s| {
                        Row::new(vec![
                            Cell::from(s.name),
                            Cell::from(s.domain),
                            Cell::from(s.founders),
                            Badge::cell(s.stage.label(), s.stage.tone()),
                            Cell::from(format!("₹{}L", s.funding)),
                        ])
                    })
                    .collect();
                let title = match portfolio.filter {
                    Some(stage) => format!("Portfolio: {}", stage.label()),
                    None => "Portfolio: all stages".to_string(),
                };
                render_table(
                    frame,
                    area,
                    &title,
                    &["Startup", "Domain", "Founders", "Stage", "Raised"],
                    &[
                        Constraint::Length(12),
                        Constraint::Length(11),
                        Constraint::Min(18),
                        Constraint::Length(10),
                        Constraint::Length(7),
                    ],
                    rows,
                    &mut portfolio.state,
                );
            }
            Some(View::Mentoring(state)) => {
                let rows = SESSIONS
                    .iter()
                    .map(|(when, startup, topic)| {
                        Row::new(vec![Cell::from(*when), Cell::from(*startup), Cell::from(*topic)])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    "Mentoring Sessions",
                    &["When", "Startup", "Topic"],
                    &[
                        Constraint::Length(13),
                        Constraint::Length(12),
                        Constraint::Min(20),
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
            Some(View::Portfolio(portfolio)) => {
                let len = portfolio.visible().count();
                match key.code {
                    KeyCode::Char('f') => {
                        portfolio.cycle_filter();
                        tracing::debug!(filter = ?portfolio.filter, "startup stage filter");
                    }
                    KeyCode::Up => step_selection(&mut portfolio.state, len, -1),
                    KeyCode::Down => step_selection(&mut portfolio.state, len, 1),
                    _ => return SectionAction::Ignored,
                }
                SectionAction::Consumed
            }
            Some(View::Mentoring(state)) => {
                match key.code {
                    KeyCode::Up => step_selection(state, SESSIONS.len(), -1),
                    KeyCode::Down => step_selection(state, SESSIONS.len(), 1),
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
    fn test_default_sub_tab_is_portfolio() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "portfolio");
    }

    #[test]
    fn test_stage_filter_cycles_back_to_all() {
        let mut section = StartupsSection::new();
        assert_eq!(section.visible_names().len(), 5);

        press(&mut section, KeyCode::Char('f'));
        assert_eq!(section.visible_names(), vec!["LexiLearn"]);
        press(&mut section, KeyCode::Char('f'));
        assert_eq!(section.visible_names(), vec!["MediQueue", "GridWise"]);
        press(&mut section, KeyCode::Char('f'));
        press(&mut section, KeyCode::Char('f'));
        assert_eq!(section.visible_names(), vec!["CampusKart"]);
        press(&mut section, KeyCode::Char('f'));
        assert_eq!(section.visible_names().len(), 5);
    }

    #[test]
    fn test_filter_resets_on_tab_switch() {
        let mut section = StartupsSection::new();
        press(&mut section, KeyCode::Char('f'));
        press(&mut section, KeyCode::Right);
        press(&mut section, KeyCode::Left);
        assert_eq!(section.visible_names().len(), 5);
    }
}
