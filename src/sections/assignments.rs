// Assignments: published work, a create form and the submission review queue

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::{Cell, Row, TableState},
};

use super::{Section, SectionAction, SectionContext, parse_date};
use crate::ui::components::{Badge, Tone, first_row, render_table, step_selection};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};
use crate::ui::widgets::{Form, FormEvent};

const TABS: &[TabSpec] = &[
    TabSpec::new("assignments", "Assignments"),
    TabSpec::new("create-assignment", "Create"),
    TabSpec::new("review-submissions", "Review Submissions"),
];

const FIELDS: &[&str] = &["Title", "Course", "Due date", "Max marks"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub title: String,
    pub course: String,
    pub due: NaiveDate,
    pub max_marks: u32,
    pub submitted: u32,
    pub enrolled: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub student: &'static str,
    pub assignment: &'static str,
    pub submitted_on: &'static str,
    pub reviewed: bool,
}

enum View {
    List(TableState),
    // Not lifted: leaving the tab discards a half-written assignment
    Create(Form),
    Review(TableState),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "assignments" => Some(View::List(first_row())),
        "create-assignment" => Some(View::Create(Form::new(FIELDS))),
        "review-submissions" => Some(View::Review(first_row())),
        _ => None,
    }
}

pub struct AssignmentsSection {
    tabs: TabPanel<View>,
    assignments: Vec<Assignment>,
    submissions: Vec<Submission>,
    today: NaiveDate,
}

pub fn mount(ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(AssignmentsSection::new(ctx.today))
}

impl AssignmentsSection {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tabs: TabPanel::new(TABS, "assignments", mount_view),
            assignments: sample_assignments(),
            submissions: sample_submissions(),
            today,
        }
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn pending_reviews(&self) -> usize {
        self.submissions.iter().filter(|s| !s.reviewed).count()
    }

    /// Draft title in the create form, if that sub-tab is mounted.
    pub fn draft_title(&self) -> Option<&str> {
        match self.tabs.content() {
            Some(View::Create(form)) => Some(form.value(0)),
            _ => None,
        }
    }
}

/// Title required; due date valid and not in the past; marks a positive integer (default 10).
pub fn validate(form: &Form, today: NaiveDate) -> Result<Assignment, String> {
    let title = form.value(0).trim();
    if title.is_empty() {
        return Err("Title is required".to_string());
    }
    let due = parse_date(form.value(2)).ok_or("Due date must be a date (YYYY-MM-DD)")?;
    if due < today {
        return Err("Due date cannot be in the past".to_string());
    }
    let max_marks = match form.value(3).trim() {
        "" => 10,
        raw => match raw.parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => return Err("Max marks must be a positive number".to_string()),
        },
    };
    let course = match form.value(1).trim() {
        "" => "General",
        course => course,
    };
    Ok(Assignment {
        title: title.to_string(),
        course: course.to_string(),
        due,
        max_marks,
        submitted: 0,
        enrolled: 60,
    })
}

impl Section for AssignmentsSection {
    fn key(&self) -> &'static str {
        "assignments"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn is_editing(&self) -> bool {
        matches!(self.tabs.content(), Some(View::Create(form)) if form.editing)
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Create(_)) => &[("[Enter]", "Edit"), ("[s]", "Publish")],
            Some(View::Review(_)) => &[("[Space]", "Mark reviewed")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        let today = self.today;
        let pending = self.pending_reviews();
        match self.tabs.content_mut() {
            Some(View::List(state)) => {
                let rows = self
                    .assignments
                    .iter()
                    .map(|a| {
                        let days_left = (a.due - today).num_days();
                        let due = if days_left < 0 {
                            Badge::cell(format!("{} (closed)", a.due), Tone::Neutral)
                        } else if days_left <= 3 {
                            Badge::cell(format!("{} ({}d)", a.due, days_left), Tone::Warning)
                        } else {
                            Badge::cell(a.due.to_string(), Tone::Info)
                        };
                        Row::new(vec![
                            Cell::from(a.title.clone()),
                            Cell::from(a.course.clone()),
                            due,
                            Cell::from(a.max_marks.to_string()),
                            Cell::from(format!("{}/{}", a.submitted, a.enrolled)),
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    "Published Assignments",
                    &["Title", "Course", "Due", "Marks", "Submitted"],
                    &[
                        Constraint::Min(24),
                        Constraint::Length(10),
                        Constraint::Length(20),
                        Constraint::Length(6),
                        Constraint::Length(10),
                    ],
                    rows,
                    state,
                );
            }
            Some(View::Create(form)) => {
                form.render(frame, area, "New Assignment", "Publish");
            }
            Some(View::Review(state)) => {
                let rows = self
                    .submissions
                    .iter()
                    .map(|s| {
                        Row::new(vec![
                            Cell::from(s.student),
                            Cell::from(s.assignment),
                            Cell::from(s.submitted_on),
                            if s.reviewed {
                                Badge::cell("Reviewed", Tone::Success)
                            } else {
                                Badge::cell("Pending", Tone::Warning)
                            },
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    &format!("Submissions ({} to review)", pending),
                    &["Student", "Assignment", "Submitted", "Status"],
                    &[
                        Constraint::Length(18),
                        Constraint::Min(20),
                        Constraint::Length(12),
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
        let assignments_len = self.assignments.len();
        let submissions_len = self.submissions.len();
        let today = self.today;
        match self.tabs.content_mut() {
            Some(View::List(state)) => match key.code {
                KeyCode::Up => {
                    step_selection(state, assignments_len, -1);
                    SectionAction::Consumed
                }
                KeyCode::Down => {
                    step_selection(state, assignments_len, 1);
                    SectionAction::Consumed
                }
                _ => SectionAction::Ignored,
            },
            Some(View::Create(form)) => match form.handle_key(key) {
                FormEvent::Submit => {
                    match validate(form, today) {
                        Ok(assignment) => {
                            tracing::info!(title = %assignment.title, due = %assignment.due, "assignment published");
                            form.succeed(format!("Published \"{}\"", assignment.title));
                            self.assignments.push(assignment);
                        }
                        Err(message) => form.fail(message),
                    }
                    SectionAction::Consumed
                }
                FormEvent::Consumed => SectionAction::Consumed,
                FormEvent::Ignored => SectionAction::Ignored,
            },
            Some(View::Review(state)) => match key.code {
                KeyCode::Up => {
                    step_selection(state, submissions_len, -1);
                    SectionAction::Consumed
                }
                KeyCode::Down => {
                    step_selection(state, submissions_len, 1);
                    SectionAction::Consumed
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    if let Some(s) = state.selected().and_then(|i| self.submissions.get_mut(i)) {
                        s.reviewed = !s.reviewed;
                    }
                    SectionAction::Consumed
                }
                _ => SectionAction::Ignored,
            },
            None => SectionAction::Ignored,
        }
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn sample_assignments() -> Vec<Assignment> {
    vec![
        Assignment {
            title: "ER Diagram for Library System".to_string(),
            course: "CS301".to_string(),
            due: date(2026, 10, 21),
            max_marks: 20,
            submitted: 41,
            enrolled: 58,
        },
        Assignment {
            title: "Normalization Worksheet".to_string(),
            course: "CS301".to_string(),
            due: date(2026, 10, 30),
            max_marks: 10,
            submitted: 12,
            enrolled: 58,
        },
        Assignment {
            title: "Process Scheduling Simulator".to_string(),
            course: "CS305".to_string(),
            due: date(2026, 11, 6),
            max_marks: 30,
            submitted: 3,
            enrolled: 62,
        },
        Assignment {
            title: "Linked List Lab".to_string(),
            course: "CS102".to_string(),
            due: date(2026, 10, 10),
            max_marks: 10,
            submitted: 64,
            enrolled: 66,
        },
    ]
}

fn sample_submissions() -> Vec<Submission> {
    vec![
        Submission {
            student: "Ananya Rao",
            assignment: "ER Diagram for Library System",
            submitted_on: "17 Oct",
            reviewed: false,
        },
        Submission {
            student: "Karthik Nair",
            assignment: "ER Diagram for Library System",
            submitted_on: "18 Oct",
            reviewed: false,
        },
        Submission {
            student: "Meera Joshi",
            assignment: "Normalization Worksheet",
            submitted_on: "18 Oct",
            reviewed: false,
        },
        Submission {
            student: "Vikram Singh",
            assignment: "Linked List Lab",
            submitted_on: "09 Oct",
            reviewed: true,
        },
    ]
}
