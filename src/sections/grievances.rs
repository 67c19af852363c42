// Grievances: open tickets, raise a new one, resolved archive

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::{Cell, Row, TableState},
};

use super::{Section, SectionAction, SectionContext};
use crate::ui::components::{Badge, Tone, first_row, render_table, step_selection};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};
use crate::ui::widgets::{Form, FormEvent};

const TABS: &[TabSpec] = &[
    TabSpec::new("open", "Open"),
    TabSpec::new("raise", "Raise"),
    TabSpec::new("resolved", "Resolved"),
];

const FIELDS: &[&str] = &["Category", "Subject", "Details", "Priority"];
const PRIORITIES: &[&str] = &["Low", "Medium", "High"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: u32,
    pub category: String,
    pub subject: String,
    pub priority: &'static str,
    pub raised: NaiveDate,
    pub resolved: Option<NaiveDate>,
}

fn priority_tone(priority: &str) -> Tone {
    match priority {
        "High" => Tone::Danger,
        "Medium" => Tone::Warning,
        _ => Tone::Neutral,
    }
}

enum View {
    Open(TableState),
    Raise(Form),
    Resolved(TableState),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "open" => Some(View::Open(first_row())),
        "raise" => Some(View::Raise(Form::new(FIELDS))),
        "resolved" => Some(View::Resolved(first_row())),
        _ => None,
    }
}

pub struct GrievancesSection {
    tabs: TabPanel<View>,
    tickets: Vec<Ticket>,
    next_id: u32,
    today: NaiveDate,
}

pub fn mount(ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(GrievancesSection::new(ctx.today))
}

impl GrievancesSection {
    pub fn new(today: NaiveDate) -> Self {
        let tickets = sample_tickets(today);
        let next_id = tickets.iter().map(|t| t.id).max().unwrap_or(1000) + 1;
        Self {
            tabs: TabPanel::new(TABS, "open", mount_view),
            tickets,
            next_id,
            today,
        }
    }

    pub fn open_tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().filter(|t| t.resolved.is_none())
    }

    pub fn resolved_tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().filter(|t| t.resolved.is_some())
    }

    /// Resolve the `index`-th open ticket.
    fn resolve(&mut self, index: usize) -> bool {
        let today = self.today;
        match self
            .tickets
            .iter_mut()
            .filter(|t| t.resolved.is_none())
            .nth(index)
        {
            Some(ticket) => {
                ticket.resolved = Some(today);
                tracing::info!(id = ticket.id, "grievance resolved");
                true
            }
            None => false,
        }
    }
}

/// Subject and details required; priority must be Low, Medium or High.
pub fn validate(form: &Form) -> Result<(String, String, &'static str), String> {
    let subject = form.value(1).trim();
    if subject.is_empty() {
        return Err("Subject is required".to_string());
    }
    if form.value(2).trim().is_empty() {
        return Err("Please describe the grievance".to_string());
    }
    let priority = match form.value(3).trim() {
        "" => "Medium",
        p => PRIORITIES
            .iter()
            .find(|known| known.eq_ignore_ascii_case(p))
            .copied()
            .ok_or("Priority must be Low, Medium or High")?,
    };
    let category = match form.value(0).trim() {
        "" => "General",
        c => c,
    };
    Ok((category.to_string(), subject.to_string(), priority))
}

fn ticket_row(ticket: &Ticket) -> Row<'static> {
    Row::new(vec![
        Cell::from(format!("#{}", ticket.id)),
        Cell::from(ticket.category.clone()),
        Cell::from(ticket.subject.clone()),
        Badge::cell(ticket.priority, priority_tone(ticket.priority)),
        Cell::from(
            ticket
                .resolved
                .unwrap_or(ticket.raised)
                .format("%d %b")
                .to_string(),
        ),
    ])
}

const WIDTHS: &[Constraint] = &[
    Constraint::Length(6),
    Constraint::Length(14),
    Constraint::Min(20),
    Constraint::Length(8),
    Constraint::Length(7),
];

impl Section for GrievancesSection {
    fn key(&self) -> &'static str {
        "grievances"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn is_editing(&self) -> bool {
        matches!(self.tabs.content(), Some(View::Raise(form)) if form.editing)
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Open(_)) => &[("[r]", "Resolve")],
            Some(View::Raise(_)) => &[("[Enter]", "Edit"), ("[s]", "Submit")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        match self.tabs.content_mut() {
            Some(View::Open(state)) => {
                let rows: Vec<_> = self
                    .tickets
                    .iter()
                    .filter(|t| t.resolved.is_none())
                    .map(ticket_row)
                    .collect();
                let title = format!("Open Tickets ({})", rows.len());
                render_table(
                    frame,
                    area,
                    &title,
                    &["ID", "Category", "Subject", "Priority", "Raised"],
                    WIDTHS,
                    rows,
                    state,
                );
            }
            Some(View::Raise(form)) => form.render(frame, area, "Raise a Grievance", "Submit"),
            Some(View::Resolved(state)) => {
                let rows = self
                    .tickets
                    .iter()
                    .filter(|t| t.resolved.is_some())
                    .map(ticket_row)
                    .collect();
                render_table(
                    frame,
                    area,
                    "Resolved",
                    &["ID", "Category", "Subject", "Priority", "Closed"],
                    WIDTHS,
                    rows,
                    state,
                );
            }
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        let open_len = self.open_tickets().count();
        let resolved_len = self.resolved_tickets().count();
        let selected = match self.tabs.content_mut() {
            Some(View::Open(state)) => match key.code {
                KeyCode::Up => {
                    step_selection(state, open_len, -1);
                    return SectionAction::Consumed;
                }
                KeyCode::Down => {
                    step_selection(state, open_len, 1);
                    return SectionAction::Consumed;
                }
                KeyCode::Char('r') => state.selected(),
                _ => return SectionAction::Ignored,
            },
            Some(View::Raise(form)) => {
                return match form.handle_key(key) {
                    FormEvent::Submit => {
                        match validate(form) {
                            Ok((category, subject, priority)) => {
                                let id = self.next_id;
                                self.next_id += 1;
                                tracing::info!(id, priority, "grievance raised");
                                self.tickets.insert(
                                    0,
                                    Ticket {
                                        id,
                                        category,
                                        subject,
                                        priority,
                                        raised: self.today,
                                        resolved: None,
                                    },
                                );
                                form.succeed(format!("Ticket #{} raised", id));
                            }
                            Err(error) => form.fail(error),
                        }
                        SectionAction::Consumed
                    }
                    FormEvent::Consumed => SectionAction::Consumed,
                    FormEvent::Ignored => SectionAction::Ignored,
                };
            }
            Some(View::Resolved(state)) => {
                match key.code {
                    KeyCode::Up => step_selection(state, resolved_len, -1),
                    KeyCode::Down => step_selection(state, resolved_len, 1),
                    _ => return SectionAction::Ignored,
                }
                return SectionAction::Consumed;
            }
            None => return SectionAction::Ignored,
        };

        // 'r' on the open list
        if let Some(index) = selected {
            if self.resolve(index) {
                let remaining = self.open_tickets().count();
                if let Some(View::Open(state)) = self.tabs.content_mut() {
                    step_selection(state, remaining, 0);
                }
            }
        }
        SectionAction::Consumed
    }
}

fn sample_tickets(today: NaiveDate) -> Vec<Ticket> {
    let days_ago = |n: i64| today - chrono::Duration::days(n);
    let ticket = |id, category: &str, subject: &str, priority, raised, resolved| Ticket {
        id,
        category: category.to_string(),
        subject: subject.to_string(),
        priority,
        raised,
        resolved,
    };
    vec![
        ticket(1042, "Infrastructure", "Projector in LH-2 flickers", "High", days_ago(2), None),
        ticket(1039, "IT", "Wi-Fi drops in staff room", "Medium", days_ago(6), None),
        ticket(
            1031,
            "Admin",
            "Travel reimbursement delayed",
            "Low",
            days_ago(20),
            Some(days_ago(9)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press, type_text};

    fn section() -> GrievancesSection {
        GrievancesSection::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[test]
    fn test_default_sub_tab_is_open() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "open");
    }

    #[test]
    fn test_resolve_moves_ticket() {
        let mut section = section();
        assert_eq!(section.open_tickets().count(), 2);
        press(&mut section, KeyCode::Char('r'));
        assert_eq!(section.open_tickets().count(), 1);
        let resolved: Vec<_> = section.resolved_tickets().map(|t| t.id).collect();
        assert_eq!(resolved, vec![1042, 1031]);
    }

    #[test]
    fn test_raise_validates_priority() {
        let mut form = Form::new(FIELDS);
        form.field_mut(1).unwrap().set_value("Leaking tap");
        form.field_mut(2).unwrap().set_value("Second floor washroom");
        form.field_mut(3).unwrap().set_value("urgent");
        assert_eq!(
            validate(&form).unwrap_err(),
            "Priority must be Low, Medium or High"
        );
        form.field_mut(3).unwrap().set_value("high");
        assert_eq!(validate(&form).unwrap().2, "High");
    }

    #[test]
    fn test_raise_adds_open_ticket() {
        let mut section = section();
        section.tabs.set_active("raise");
        press(&mut section, KeyCode::Down);
        press(&mut section, KeyCode::Enter);
        type_text(&mut section, "Lab AC not working");
        press(&mut section, KeyCode::Enter);
        press(&mut section, KeyCode::Enter);
        type_text(&mut section, "Lab C since Monday");
        press(&mut section, KeyCode::Esc);
        press(&mut section, KeyCode::Char('s'));
        assert_eq!(section.open_tickets().count(), 3);
        assert_eq!(section.open_tickets().next().map(|t| t.id), Some(1043));
    }
}
