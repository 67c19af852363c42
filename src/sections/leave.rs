// Leave: apply for leave, own history, student requests awaiting approval
//
// The application form lives on the section, not the sub-view, so a half
// filled form survives switching to History and back.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Cell, Row, TableState},
};

use super::{Section, SectionAction, SectionContext, parse_date};
use crate::ui::components::{Badge, Card, Tone, first_row, render_table, step_selection};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};
use crate::ui::widgets::{Form, FormEvent};

const TABS: &[TabSpec] = &[
    TabSpec::new("apply", "Apply"),
    TabSpec::new("history", "History"),
    TabSpec::new("approvals", "Approvals"),
];

const FIELDS: &[&str] = &["Leave type", "From", "To", "Reason"];
const TYPE: usize = 0;
const FROM: usize = 1;
const TO: usize = 2;
const REASON: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    fn badge(self) -> Cell<'static> {
        match self {
            Self::Pending => Badge::cell("Pending", Tone::Warning),
            Self::Approved => Badge::cell("Approved", Tone::Success),
            Self::Rejected => Badge::cell("Rejected", Tone::Danger),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveApplication {
    pub kind: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
}

impl LeaveApplication {
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRequest {
    pub student: &'static str,
    pub roll: &'static str,
    pub dates: &'static str,
    pub reason: &'static str,
    pub status: LeaveStatus,
}

enum View {
    Apply,
    History(TableState),
    Approvals(TableState),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "apply" => Some(View::Apply),
        "history" => Some(View::History(first_row())),
        "approvals" => Some(View::Approvals(first_row())),
        _ => None,
    }
}

pub struct LeaveSection {
    tabs: TabPanel<View>,
    form: Form,
    history: Vec<LeaveApplication>,
    requests: Vec<StudentRequest>,
    balance: u32,
    today: NaiveDate,
}

pub fn mount(ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(LeaveSection::new(ctx.today))
}

impl LeaveSection {
    pub fn new(today: NaiveDate) -> Self {
        let mut form = Form::new(FIELDS);
        if let Some(field) = form.field_mut(TYPE) {
            field.set_value("Casual");
        }
        Self {
            tabs: TabPanel::new(TABS, "apply", mount_view),
            form,
            history: sample_history(),
            requests: sample_requests(),
            balance: 12,
            today,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn history(&self) -> &[LeaveApplication] {
        &self.history
    }

    pub fn requests(&self) -> &[StudentRequest] {
        &self.requests
    }

    fn submit(&mut self) {
        match validate(&self.form) {
            Ok(application) => {
                let days = application.days();
                tracing::info!(days, kind = %application.kind, "leave application submitted");
                self.history.insert(0, application);
                self.form.succeed(format!("Leave request for {} day(s) submitted", days));
                if let Some(field) = self.form.field_mut(TYPE) {
                    field.set_value("Casual");
                }
            }
            Err(message) => self.form.fail(message),
        }
    }

    fn decide(&mut self, index: usize, status: LeaveStatus) {
        if let Some(request) = self.requests.get_mut(index) {
            if request.status == LeaveStatus::Pending {
                request.status = status;
                tracing::debug!(student = request.student, ?status, "student leave decided");
            }
        }
    }

    pub fn pending_requests(&self) -> usize {
        self.requests
            .iter()
            .filter(|r| r.status == LeaveStatus::Pending)
            .count()
    }
}

/// Reason required, both dates valid, start not after end.
pub fn validate(form: &Form) -> Result<LeaveApplication, String> {
    let from = parse_date(form.value(FROM)).ok_or("From must be a date (YYYY-MM-DD)")?;
    let to = parse_date(form.value(TO)).ok_or("To must be a date (YYYY-MM-DD)")?;
    if from > to {
        return Err("From date must not be after To date".to_string());
    }
    let reason = form.value(REASON).trim();
    if reason.is_empty() {
        return Err("Reason is required".to_string());
    }
    let kind = match form.value(TYPE).trim() {
        "" => "Casual",
        kind => kind,
    };
    Ok(LeaveApplication {
        kind: kind.to_string(),
        from,
        to,
        reason: reason.to_string(),
        status: LeaveStatus::Pending,
    })
}

impl Section for LeaveSection {
    fn key(&self) -> &'static str {
        "leave"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn is_editing(&self) -> bool {
        matches!(self.tabs.content(), Some(View::Apply)) && self.form.editing
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Apply) => &[("[Enter]", "Edit"), ("[s]", "Submit")],
            Some(View::Approvals(_)) => &[("[a]", "Approve"), ("[r]", "Reject")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        let pending = self.pending_requests();
        match self.tabs.content_mut() {
            Some(View::Apply) => {
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Min(40), Constraint::Length(26)])
                    .split(area);
                self.form.render(frame, cols[0], "Apply for Leave", "Submit request");
                let cards = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(4), Constraint::Length(4), Constraint::Min(0)])
                    .split(cols[1]);
                frame.render_widget(
                    Card::new("Balance", format!("{} days", self.balance), "casual + earned"),
                    cards[0],
                );
                frame.render_widget(
                    Card::new("Today", self.today.format("%d %b %Y").to_string(), "dates as YYYY-MM-DD"),
                    cards[1],
                );
            }
            Some(View::History(state)) => {
                let rows = self
                    .history
                    .iter()
                    .map(|a| {
                        Row::new(vec![
                            Cell::from(a.kind.clone()),
                            Cell::from(a.from.format("%Y-%m-%d").to_string()),
                            Cell::from(a.to.format("%Y-%m-%d").to_string()),
                            Cell::from(a.days().to_string()),
                            Cell::from(a.reason.clone()),
                            a.status.badge(),
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    "My Leave",
                    &["Type", "From", "To", "Days", "Reason", "Status"],
                    &[
                        Constraint::Length(10),
                        Constraint::Length(11),
                        Constraint::Length(11),
                        Constraint::Length(5),
                        Constraint::Min(16),
                        Constraint::Length(10),
                    ],
                    rows,
                    state,
                );
            }
            Some(View::Approvals(state)) => {
                let rows = self
                    .requests
                    .iter()
                    .map(|r| {
                        Row::new(vec![
                            Cell::from(r.student),
                            Cell::from(r.roll),
                            Cell::from(r.dates),
                            Cell::from(r.reason),
                            r.status.badge(),
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    &format!("Student Requests ({} pending)", pending),
                    &["Student", "Roll No", "Dates", "Reason", "Status"],
                    &[
                        Constraint::Length(16),
                        Constraint::Length(10),
                        Constraint::Length(14),
                        Constraint::Min(16),
                        Constraint::Length(10),
                    ],
                    rows,
                    state,
                );
            }
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        let history_len = self.history.len();
        let requests_len = self.requests.len();
        match self.tabs.content_mut() {
            Some(View::Apply) => match self.form.handle_key(key) {
                FormEvent::Submit => {
                    self.submit();
                    SectionAction::Consumed
                }
                FormEvent::Consumed => SectionAction::Consumed,
                FormEvent::Ignored => SectionAction::Ignored,
            },
            Some(View::History(state)) => match key.code {
                KeyCode::Up => {
                    step_selection(state, history_len, -1);
                    SectionAction::Consumed
                }
                KeyCode::Down => {
                    step_selection(state, history_len, 1);
                    SectionAction::Consumed
                }
                _ => SectionAction::Ignored,
            },
            Some(View::Approvals(state)) => {
                let selected = state.selected().unwrap_or(0);
                match key.code {
                    KeyCode::Up => {
                        step_selection(state, requests_len, -1);
                        SectionAction::Consumed
                    }
                    KeyCode::Down => {
                        step_selection(state, requests_len, 1);
                        SectionAction::Consumed
                    }
                    KeyCode::Char('a') => {
                        self.decide(selected, LeaveStatus::Approved);
                        SectionAction::Consumed
                    }
                    KeyCode::Char('r') => {
                        self.decide(selected, LeaveStatus::Rejected);
                        SectionAction::Consumed
                    }
                    _ => SectionAction::Ignored,
                }
            }
            None => SectionAction::Ignored,
        }
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn sample_history() -> Vec<LeaveApplication> {
    vec![
        LeaveApplication {
            kind: "Conference".to_string(),
            from: date(2026, 9, 14),
            to: date(2026, 9, 16),
            reason: "IEEE ICDE, Hyderabad".to_string(),
            status: LeaveStatus::Approved,
        },
        LeaveApplication {
            kind: "Casual".to_string(),
            from: date(2026, 8, 3),
            to: date(2026, 8, 3),
            reason: "Family function".to_string(),
            status: LeaveStatus::Approved,
        },
        LeaveApplication {
            kind: "Medical".to_string(),
            from: date(2026, 6, 22),
            to: date(2026, 6, 24),
            reason: "Fever".to_string(),
            status: LeaveStatus::Rejected,
        },
    ]
}

fn sample_requests() -> Vec<StudentRequest> {
    vec![
        StudentRequest {
            student: "Arjun Mehta",
            roll: "21CS045",
            dates: "21-22 Oct",
            reason: "Hackathon at IIT Bombay",
            status: LeaveStatus::Pending,
        },
        StudentRequest {
            student: "Sneha Iyer",
            roll: "21CS112",
            dates: "24 Oct",
            reason: "Medical appointment",
            status: LeaveStatus::Pending,
        },
        StudentRequest {
            student: "Rahul Verma",
            roll: "22CS008",
            dates: "12-13 Oct",
            reason: "Sister's wedding",
            status: LeaveStatus::Approved,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press, type_text};

    fn fill(section: &mut LeaveSection, field: usize, text: &str) {
        if let Some(f) = section.form.field_mut(field) {
            f.set_value(text);
        }
    }

    #[test]
    fn test_default_sub_tab_is_apply() {
        let section = mount(&ctx());
        assert_eq!(section.active_sub_tab(), "apply");
    }

    #[test]
    fn test_form_survives_tab_switch() {
        let mut section = LeaveSection::new(ctx().today);
        press(&mut section, KeyCode::Down);
        press(&mut section, KeyCode::Enter);
        assert!(section.is_editing());
        type_text(&mut section, "2026-10-27");
        press(&mut section, KeyCode::Esc);
        assert!(!section.is_editing());

        press(&mut section, KeyCode::Right);
        assert_eq!(section.active_sub_tab(), "history");
        press(&mut section, KeyCode::Left);
        assert_eq!(section.active_sub_tab(), "apply");
        assert_eq!(section.form().value(FROM), "2026-10-27");
    }

    #[test]
    fn test_reason_is_required() {
        let mut section = LeaveSection::new(ctx().today);
        fill(&mut section, FROM, "2026-10-27");
        fill(&mut section, TO, "2026-10-28");
        press(&mut section, KeyCode::Char('s'));
        assert_eq!(section.form().error.as_deref(), Some("Reason is required"));
        assert_eq!(section.history().len(), 3);
    }

    #[test]
    fn test_start_after_end_rejected() {
        let mut section = LeaveSection::new(ctx().today);
        fill(&mut section, FROM, "2026-10-29");
        fill(&mut section, TO, "2026-10-27");
        fill(&mut section, REASON, "Workshop");
        press(&mut section, KeyCode::Char('s'));
        assert_eq!(
            section.form().error.as_deref(),
            Some("From date must not be after To date")
        );
    }

    #[test]
    fn test_valid_submission_is_recorded() {
        let mut section = LeaveSection::new(ctx().today);
        fill(&mut section, FROM, "2026-10-27");
        fill(&mut section, TO, "2026-10-29");
        fill(&mut section, REASON, "Workshop at NIT Trichy");
        press(&mut section, KeyCode::Char('s'));
        assert!(section.form().error.is_none());
        assert_eq!(section.history().len(), 4);
        assert_eq!(section.history()[0].days(), 3);
        assert_eq!(section.history()[0].status, LeaveStatus::Pending);
        assert_eq!(section.form().value(REASON), "");
    }

    #[test]
    fn test_approve_and_reject_pending_only() {
        let mut section = LeaveSection::new(ctx().today);
        section.tabs.set_active("approvals");
        press(&mut section, KeyCode::Char('a'));
        assert_eq!(section.requests()[0].status, LeaveStatus::Approved);
        press(&mut section, KeyCode::Down);
        press(&mut section, KeyCode::Char('r'));
        assert_eq!(section.requests()[1].status, LeaveStatus::Rejected);
        press(&mut section, KeyCode::Down);
        press(&mut section, KeyCode::Char('r'));
        assert_eq!(section.requests()[2].status, LeaveStatus::Approved);
        assert_eq!(section.pending_requests(), 0);
    }
}
