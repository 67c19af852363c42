// Library: current loans with renewal, catalogue search
//
// The search query belongs to the Catalogue sub-view and is cleared when
// the user switches away.

use chrono::{Duration, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Cell, Row, TableState},
};

use super::{Section, SectionAction, SectionContext};
use crate::ui::components::{Badge, Tone, first_row, render_table, step_selection};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};
use crate::ui::widgets::TextField;

const TABS: &[TabSpec] = &[
    TabSpec::new("loans", "Loans"),
    TabSpec::new("catalogue", "Catalogue"),
];

pub const RENEWAL_DAYS: i64 = 14;
pub const MAX_RENEWALS: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub title: &'static str,
    pub author: &'static str,
    pub due: NaiveDate,
    pub renewals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenewError {
    LimitReached,
    NoSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Book {
    pub title: &'static str,
    pub author: &'static str,
    pub shelf: &'static str,
    pub available: u8,
}

const CATALOGUE: &[Book] = &[
    Book {
        title: "Database System Concepts",
        author: "Silberschatz, Korth, Sudarshan",
        shelf: "005.74 SIL",
        available: 3,
    },
    Book {
        title: "Designing Data-Intensive Applications",
        author: "Martin Kleppmann",
        shelf: "005.74 KLE",
        available: 0,
    },
    Book {
        title: "Introduction to Algorithms",
        author: "Cormen, Leiserson, Rivest, Stein",
        shelf: "005.1 COR",
        available: 5,
    },
    Book {
        title: "Pattern Recognition and Machine Learning",
        author: "Christopher Bishop",
        shelf: "006.31 BIS",
        available: 1,
    },
    Book {
        title: "The Art of Computer Programming, Vol. 1",
        author: "Donald Knuth",
        shelf: "005.1 KNU",
        available: 2,
    },
];

/// Case-insensitive match on title or author.
pub fn search(query: &str) -> Vec<&'static Book> {
    let needle = query.trim().to_lowercase();
    CATALOGUE
        .iter()
        .filter(|b| {
            needle.is_empty()
                || b.title.to_lowercase().contains(&needle)
                || b.author.to_lowercase().contains(&needle)
        })
        .collect()
}

struct Catalogue {
    query: TextField,
    editing: bool,
    state: TableState,
}

enum View {
    Loans(TableState),
    Catalogue(Catalogue),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "loans" => Some(View::Loans(first_row())),
        "catalogue" => Some(View::Catalogue(Catalogue {
            query: TextField::new("Search"),
            editing: false,
            state: first_row(),
        })),
        _ => None,
    }
}

pub struct LibrarySection {
    tabs: TabPanel<View>,
    loans: Vec<Loan>,
    today: NaiveDate,
}

pub fn mount(ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(LibrarySection::new(ctx.today))
}

impl LibrarySection {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tabs: TabPanel::new(TABS, "loans", mount_view),
            loans: sample_loans(today),
            today,
        }
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn query(&self) -> Option<&str> {
        match self.tabs.content() {
            Some(View::Catalogue(catalogue)) => Some(catalogue.query.value()),
            _ => None,
        }
    }

    /// Push the due date out by two weeks, at most twice per loan.
    pub fn renew(&mut self, index: usize) -> Result<NaiveDate, RenewError> {
        let loan = self.loans.get_mut(index).ok_or(RenewError::NoSelection)?;
        if loan.renewals >= MAX_RENEWALS {
            return Err(RenewError::LimitReached);
        }
        loan.renewals += 1;
        loan.due += Duration::days(RENEWAL_DAYS);
        tracing::info!(title = loan.title, due = %loan.due, "loan renewed");
        Ok(loan.due)
    }
}

impl Section for LibrarySection {
    fn key(&self) -> &'static str {
        "library"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn is_editing(&self) -> bool {
        matches!(self.tabs.content(), Some(View::Catalogue(c)) if c.editing)
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Loans(_)) => &[("[r]", "Renew")],
            Some(View::Catalogue(_)) => &[("[/]", "Search")],
            None => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        let today = self.today;
        match self.tabs.content_mut() {
            Some(View::Loans(state)) => {
                let rows = self
                    .loans
                    .iter()
                    .map(|l| {
                        let days_left = (l.due - today).num_days();
                        let badge = if days_left < 0 {
                            Badge::cell(format!("Overdue {}d", -days_left), Tone::Danger)
                        } else if days_left <= 3 {
                            Badge::cell(format!("{}d left", days_left), Tone::Warning)
                        } else {
                            Badge::cell(format!("{}d left", days_left), Tone::Success)
                        };
                        Row::new(vec![
                            Cell::from(l.title),
                            Cell::from(l.author),
                            Cell::from(l.due.format("%d %b").to_string()),
                            badge,
                            Cell::from(format!("{}/{}", l.renewals, MAX_RENEWALS)),
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    "On Loan",
                    &["Title", "Author", "Due", "Status", "Renewed"],
                    &[
                        Constraint::Min(24),
                        Constraint::Length(20),
                        Constraint::Length(7),
                        Constraint::Length(11),
                        Constraint::Length(7),
                    ],
                    rows,
                    state,
                );
            }
            Some(View::Catalogue(catalogue)) => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Min(0)])
                    .split(area);
                frame.render_widget(
                    catalogue.query.widget(true, catalogue.editing),
                    chunks[0],
                );
                let rows: Vec<_> = search(catalogue.query.value())
                    .into_iter()
                    .map(|b| {
                        Row::new(vec![
                            Cell::from(b.title),
                            Cell::from(b.author),
                            Cell::from(b.shelf),
                            if b.available > 0 {
                                Badge::cell(format!("{} in", b.available), Tone::Success)
                            } else {
                                Badge::cell("All out", Tone::Danger)
                            },
                        ])
                    })
                    .collect();
                let title = format!("Catalogue ({} found)", rows.len());
                render_table(
                    frame,
                    chunks[1],
                    &title,
                    &["Title", "Author", "Shelf", "Copies"],
                    &[
                        Constraint::Min(24),
                        Constraint::Length(24),
                        Constraint::Length(11),
                        Constraint::Length(8),
                    ],
                    rows,
                    &mut catalogue.state,
                );
            }
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        let loans_len = self.loans.len();
        match self.tabs.content_mut() {
            Some(View::Loans(state)) => match key.code {
                KeyCode::Up => {
                    step_selection(state, loans_len, -1);
                    SectionAction::Consumed
                }
                KeyCode::Down => {
                    step_selection(state, loans_len, 1);
                    SectionAction::Consumed
                }
                KeyCode::Char('r') => {
                    let selected = state.selected().unwrap_or(usize::MAX);
                    if let Err(error) = self.renew(selected) {
                        tracing::debug!(?error, "renewal refused");
                    }
                    SectionAction::Consumed
                }
                _ => SectionAction::Ignored,
            },
            Some(View::Catalogue(catalogue)) => {
                if catalogue.editing {
                    match key.code {
                        KeyCode::Esc | KeyCode::Enter => catalogue.editing = false,
                        code => {
                            if !catalogue.query.handle_key(code) {
                                return SectionAction::Ignored;
                            }
                            catalogue.state = first_row();
                        }
                    }
                    return SectionAction::Consumed;
                }
                let len = search(catalogue.query.value()).len();
                match key.code {
                    KeyCode::Char('/') | KeyCode::Enter => catalogue.editing = true,
                    KeyCode::Up => step_selection(&mut catalogue.state, len, -1),
                    KeyCode::Down => step_selection(&mut catalogue.state, len, 1),
                    _ => return SectionAction::Ignored,
                }
                SectionAction::Consumed
            }
            None => SectionAction::Ignored,
        }
    }
}

fn sample_loans(today: NaiveDate) -> Vec<Loan> {
    vec![
        Loan {
            title: "Database System Concepts",
            author: "Silberschatz et al.",
            due: today + Duration::days(6),
            renewals: 0,
        },
        Loan {
            title: "Readings in Database Systems",
            author: "Hellerstein, Stonebraker",
            due: today + Duration::days(2),
            renewals: 2,
        },
        Loan {
            title: "Deep Learning",
            author: "Goodfellow et al.",
            due: today - Duration::days(1),
            renewals: 1,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press, type_text};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_default_sub_tab_is_loans() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "loans");
    }

    #[test]
    fn test_renew_extends_due_date_until_limit() {
        let mut section = LibrarySection::new(today());
        press(&mut section, KeyCode::Char('r'));
        assert_eq!(section.loans()[0].due, today() + Duration::days(20));
        press(&mut section, KeyCode::Char('r'));
        press(&mut section, KeyCode::Char('r'));
        assert_eq!(section.loans()[0].renewals, 2);
        assert_eq!(section.loans()[0].due, today() + Duration::days(34));

        assert_eq!(section.renew(1), Err(RenewError::LimitReached));
        assert_eq!(section.renew(9), Err(RenewError::NoSelection));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let titles: Vec<_> = search("DATA").iter().map(|b| b.title).collect();
        assert_eq!(
            titles,
            vec!["Database System Concepts", "Designing Data-Intensive Applications"]
        );
        assert_eq!(search("knuth").len(), 1);
        assert_eq!(search("  ").len(), CATALOGUE.len());
    }

    #[test]
    fn test_query_is_lost_on_tab_switch() {
        let mut section = LibrarySection::new(today());
        press(&mut section, KeyCode::Right);
        press(&mut section, KeyCode::Char('/'));
        assert!(section.is_editing());
        type_text(&mut section, "bishop");
        press(&mut section, KeyCode::Esc);
        assert_eq!(section.query(), Some("bishop"));

        press(&mut section, KeyCode::Left);
        press(&mut section, KeyCode::Right);
        assert_eq!(section.query(), Some(""));
    }
}
