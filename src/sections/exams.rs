// Exams: exam schedule, grade entry, invigilation duties
//
// Grade entries are held on the section so marks typed on the Grading tab
// survive a look at the Schedule and back. Submitting locks them.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, TableState},
};

use super::{Section, SectionAction, SectionContext};
use crate::ui::components::{Badge, Tone, first_row, render_table, step_selection};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};
use crate::ui::widgets::TextField;

const TABS: &[TabSpec] = &[
    TabSpec::new("schedule", "Schedule"),
    TabSpec::new("grading", "Grading"),
    TabSpec::new("invigilation", "Invigilation"),
];

pub const MAX_MARKS: u32 = 100;

const SCHEDULE: &[(&str, &str, &str, &str)] = &[
    ("02 Nov", "10:00-12:00", "CS301 Database Systems", "Mid-sem"),
    ("04 Nov", "14:00-16:00", "CS204 Data Structures", "Mid-sem"),
    ("06 Nov", "10:00-12:00", "CS410 Machine Learning", "Mid-sem"),
];

const DUTIES: &[(&str, &str, &str, &str)] = &[
    ("03 Nov", "10:00-12:00", "Exam Hall 2", "Chief invigilator"),
    ("05 Nov", "14:00-16:00", "LH-4", "Invigilator"),
];

const STUDENTS: &[(&str, &str)] = &[
    ("21CS001", "Ananya Rao"),
    ("21CS014", "Rahul Verma"),
    ("21CS022", "Sneha Pillai"),
    ("21CS031", "Arjun Mehta"),
    ("21CS047", "Fatima Khan"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeEntry {
    pub roll: &'static str,
    pub name: &'static str,
    pub marks: TextField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl std::fmt::Display for GradeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(roll) => write!(f, "Marks missing for {}", roll),
            Self::Invalid(roll) => write!(f, "Marks for {} must be 0-{}", roll, MAX_MARKS),
        }
    }
}

/// Every entry must hold a whole number between 0 and 100.
pub fn validate_grades(entries: &[GradeEntry]) -> Result<Vec<u32>, GradeError> {
    entries
        .iter()
        .map(|e| {
            let raw = e.marks.value().trim();
            if raw.is_empty() {
                return Err(GradeError::Missing(e.roll));
            }
            raw.parse::<u32>()
                .ok()
                .filter(|m| *m <= MAX_MARKS)
                .ok_or(GradeError::Invalid(e.roll))
        })
        .collect()
}

pub fn letter_grade(marks: u32) -> &'static str {
    match marks {
        90..=100 => "A+",
        80..=89 => "A",
        70..=79 => "B",
        60..=69 => "C",
        50..=59 => "D",
        40..=49 => "E",
        _ => "F",
    }
}

/// Lifted grading state.
#[derive(Debug, Clone)]
pub struct Gradebook {
    pub entries: Vec<GradeEntry>,
    pub cursor: usize,
    pub editing: bool,
    pub submitted: bool,
    pub message: Option<Result<String, String>>,
}

impl Gradebook {
    fn new() -> Self {
        Self {
            entries: STUDENTS
                .iter()
                .map(|&(roll, name)| GradeEntry {
                    roll,
                    name,
                    marks: TextField::new("Marks"),
                })
                .collect(),
            cursor: 0,
            editing: false,
            submitted: false,
            message: None,
        }
    }

    fn submit(&mut self) {
        match validate_grades(&self.entries) {
            Ok(marks) => {
                let average = marks.iter().sum::<u32>() / marks.len().max(1) as u32;
                tracing::info!(students = marks.len(), average, "grades submitted");
                self.submitted = true;
                self.message = Some(Ok(format!(
                    "Submitted {} grades, class average {}",
                    marks.len(),
                    average
                )));
            }
            Err(error) => self.message = Some(Err(error.to_string())),
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing {
            match code {
                KeyCode::Esc => self.editing = false,
                KeyCode::Enter => {
                    self.editing = false;
                    if self.cursor + 1 < self.entries.len() {
                        self.cursor += 1;
                    }
                }
                code => {
                    // Digits only
                    if let KeyCode::Char(c) = code {
                        if !c.is_ascii_digit() {
                            return true;
                        }
                    }
                    if let Some(entry) = self.entries.get_mut(self.cursor) {
                        return entry.marks.handle_key(code);
                    }
                }
            }
            return true;
        }

        match code {
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.cursor + 1 < self.entries.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Enter if !self.submitted => {
                self.editing = true;
                self.message = None;
            }
            KeyCode::Char('s') if !self.submitted => self.submit(),
            _ => return false,
        }
        true
    }
}

fn render_gradebook(frame: &mut Frame, area: Rect, book: &Gradebook) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let rows = book
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let marks = if book.editing && i == book.cursor {
                format!("{}█", e.marks.value())
            } else {
                e.marks.value().to_string()
            };
            let grade = match e.marks.value().trim().parse::<u32>() {
                Ok(m) if m <= MAX_MARKS => Badge::cell(letter_grade(m), Tone::Info),
                Ok(_) => Badge::cell("?", Tone::Danger),
                Err(_) => Cell::from(""),
            };
            Row::new(vec![
                Cell::from(e.roll),
                Cell::from(e.name),
                Cell::from(marks),
                grade,
            ])
        })
        .collect();
    let mut state = TableState::default();
    state.select(Some(book.cursor));
    let title = if book.submitted {
        "CS301 Mid-sem (submitted)"
    } else {
        "CS301 Mid-sem"
    };
    render_table(
        frame,
        chunks[0],
        title,
        &["Roll", "Name", "Marks", "Grade"],
        &[
            Constraint::Length(9),
            Constraint::Min(16),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
        rows,
        &mut state,
    );

    let status = match &book.message {
        Some(Ok(notice)) => Span::styled(format!("✓ {}", notice), Style::default().fg(Color::Green)),
        Some(Err(error)) => Span::styled(format!("✗ {}", error), Style::default().fg(Color::Red)),
        None if book.editing => Span::styled(
            "Editing: digits, Enter next, Esc done",
            Style::default().fg(Color::DarkGray),
        ),
        None => Span::styled(
            "↑/↓ student  Enter edit  s submit",
            Style::default().fg(Color::DarkGray),
        ),
    };
    frame.render_widget(Paragraph::new(Line::from(status)), chunks[1]);
}

enum View {
    Schedule(TableState),
    Grading,
    Invigilation(TableState),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "schedule" => Some(View::Schedule(first_row())),
        "grading" => Some(View::Grading),
        "invigilation" => Some(View::Invigilation(first_row())),
        _ => None,
    }
}

pub struct ExamsSection {
    tabs: TabPanel<View>,
    gradebook: Gradebook,
}

pub fn mount(_ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(ExamsSection::new())
}

impl Default for ExamsSection {
    fn default() -> Self {
        Self::new()
    }
}

impl ExamsSection {
    pub fn new() -> Self {
        Self {
            tabs: TabPanel::new(TABS, "schedule", mount_view),
            gradebook: Gradebook::new(),
        }
    }

    pub fn gradebook(&self) -> &Gradebook {
        &self.gradebook
    }
}

fn four_column_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    header: &[&'static str],
    data: &'static [(&'static str, &'static str, &'static str, &'static str)],
    state: &mut TableState,
) {
    let rows = data
        .iter()
        .map(|(a, b, c, d)| {
            Row::new(vec![
                Cell::from(*a),
                Cell::from(*b),
                Cell::from(*c),
                Badge::cell(*d, Tone::Info),
            ])
        })
        .collect();
    render_table(
        frame,
        area,
        title,
        header,
        &[
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(18),
        ],
        rows,
        state,
    );
}

impl Section for ExamsSection {
    fn key(&self) -> &'static str {
        "exams"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn is_editing(&self) -> bool {
        matches!(self.tabs.content(), Some(View::Grading)) && self.gradebook.editing
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Grading) => &[("[Enter]", "Edit"), ("[s]", "Submit")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        match self.tabs.content_mut() {
            Some(View::Schedule(state)) => four_column_table(
                frame,
                area,
                "Exam Schedule",
                &["Date", "Time", "Course", "Exam"],
                SCHEDULE,
                state,
            ),
            Some(View::Grading) => render_gradebook(frame, area, &self.gradebook),
            Some(View::Invigilation(state)) => four_column_table(
                frame,
                area,
                "Invigilation Duties",
                &["Date", "Time", "Venue", "Role"],
                DUTIES,
                state,
            ),
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        let (state, len) = match self.tabs.content_mut() {
            Some(View::Grading) => {
                return if self.gradebook.handle_key(key.code) {
                    SectionAction::Consumed
                } else {
                    SectionAction::Ignored
                };
            }
            Some(View::Schedule(state)) => (state, SCHEDULE.len()),
            Some(View::Invigilation(state)) => (state, DUTIES.len()),
            None => return SectionAction::Ignored,
        };
        match key.code {
            KeyCode::Up => step_selection(state, len, -1),
            KeyCode::Down => step_selection(state, len, 1),
            _ => return SectionAction::Ignored,
        }
        SectionAction::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press, type_text};

    fn enter_marks(section: &mut ExamsSection, marks: &[&str]) {
        for m in marks {
            press(section, KeyCode::Enter);
            type_text(section, m);
            press(section, KeyCode::Enter);
        }
    }

    #[test]
    fn test_default_sub_tab_is_schedule() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "schedule");
    }

    #[test]
    fn test_grades_survive_tab_switch() {
        let mut section = ExamsSection::new();
        section.tabs.set_active("grading");
        enter_marks(&mut section, &["78", "91"]);
        press(&mut section, KeyCode::Left);
        assert_eq!(section.active_sub_tab(), "schedule");
        press(&mut section, KeyCode::Right);
        assert_eq!(section.gradebook().entries[0].marks.value(), "78");
        assert_eq!(section.gradebook().entries[1].marks.value(), "91");
    }

    #[test]
    fn test_letters_are_ignored_while_editing() {
        let mut section = ExamsSection::new();
        section.tabs.set_active("grading");
        press(&mut section, KeyCode::Enter);
        type_text(&mut section, "8a5");
        assert_eq!(section.gradebook().entries[0].marks.value(), "85");
    }

    #[test]
    fn test_submit_requires_all_marks_in_range() {
        let mut section = ExamsSection::new();
        section.tabs.set_active("grading");
        enter_marks(&mut section, &["78", "91", "101", "55", "40"]);
        press(&mut section, KeyCode::Char('s'));
        assert!(!section.gradebook().submitted);
        assert_eq!(
            section.gradebook().message,
            Some(Err("Marks for 21CS022 must be 0-100".to_string()))
        );

        // Fix the third entry
        press(&mut section, KeyCode::Up);
        press(&mut section, KeyCode::Up);
        press(&mut section, KeyCode::Enter);
        press(&mut section, KeyCode::Backspace);
        press(&mut section, KeyCode::Backspace);
        press(&mut section, KeyCode::Backspace);
        type_text(&mut section, "66");
        press(&mut section, KeyCode::Esc);
        press(&mut section, KeyCode::Char('s'));
        assert!(section.gradebook().submitted);
    }

    #[test]
    fn test_letter_grade_bands() {
        assert_eq!(letter_grade(100), "A+");
        assert_eq!(letter_grade(79), "B");
        assert_eq!(letter_grade(12), "F");
    }
}
