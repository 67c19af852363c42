// Attendance: mark a class, past sessions, low-attendance report
//
// The marking sheet belongs to the Mark sub-view. Leaving the tab before
// saving discards the toggles; saved sessions live on the section.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, TableState},
};
use tui_piechart::{PieChart, PieSlice};

use super::{Section, SectionAction, SectionContext};
use crate::ui::components::{Badge, Tone, first_row, render_table, step_selection};
use crate::ui::listeners::Listeners;
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};
use crate::ui::widgets::Select;

const TABS: &[TabSpec] = &[
    TabSpec::new("mark", "Mark"),
    TabSpec::new("history", "History"),
    TabSpec::new("reports", "Reports"),
];

pub const COURSES: &[&str] = &[
    "CS301 Database Systems",
    "CS204 Data Structures",
    "CS410 Machine Learning",
];

/// Attendance percentage below which a student is flagged.
pub const THRESHOLD: u16 = 75;

const ROSTERS: &[&[(&str, &str)]] = &[
    &[
        ("21CS001", "Ananya Rao"),
        ("21CS014", "Rahul Verma"),
        ("21CS022", "Sneha Pillai"),
        ("21CS031", "Arjun Mehta"),
        ("21CS047", "Fatima Khan"),
    ],
    &[
        ("22CS003", "Karan Singh"),
        ("22CS011", "Meera Nair"),
        ("22CS019", "Vikram Joshi"),
        ("22CS026", "Divya Menon"),
    ],
    &[
        ("20CS008", "Rohan Gupta"),
        ("20CS015", "Isha Patel"),
        ("20CS033", "Aditya Kulkarni"),
    ],
];

fn roster(course: usize) -> &'static [(&'static str, &'static str)] {
    ROSTERS.get(course).copied().unwrap_or(&[])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub course: &'static str,
    pub present: usize,
    pub total: usize,
}

impl AttendanceRecord {
    pub fn percent(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        (self.present * 100 / self.total) as u16
    }
}

/// Cumulative attendance for one student this semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentStanding {
    pub roll: &'static str,
    pub name: &'static str,
    pub course: &'static str,
    pub attended: u16,
    pub held: u16,
}

impl StudentStanding {
    pub fn percent(&self) -> u16 {
        if self.held == 0 {
            return 100;
        }
        self.attended * 100 / self.held
    }

    pub fn is_flagged(&self) -> bool {
        self.percent() < THRESHOLD
    }
}

const STANDINGS: &[StudentStanding] = &[
    standing("21CS001", "Ananya Rao", 0, 24, 26),
    standing("21CS014", "Rahul Verma", 0, 17, 26),
    standing("21CS031", "Arjun Mehta", 0, 21, 26),
    standing("22CS011", "Meera Nair", 1, 22, 24),
    standing("22CS019", "Vikram Joshi", 1, 15, 24),
    standing("20CS015", "Isha Patel", 2, 20, 22),
    standing("20CS033", "Aditya Kulkarni", 2, 16, 22),
];

const fn standing(
    roll: &'static str,
    name: &'static str,
    course: usize,
    attended: u16,
    held: u16,
) -> StudentStanding {
    StudentStanding {
        roll,
        name,
        course: COURSES[course],
        attended,
        held,
    }
}

pub fn flagged_students() -> impl Iterator<Item = &'static StudentStanding> {
    STANDINGS.iter().filter(|s| s.is_flagged())
}

/// Sheet for one class session. Everyone starts present.
struct MarkSheet {
    course: Select,
    present: Vec<bool>,
    state: TableState,
    notice: Option<String>,
}

impl MarkSheet {
    fn new() -> Self {
        Self {
            course: Select::new("attendance-course", COURSES),
            present: vec![true; roster(0).len()],
            state: first_row(),
            notice: None,
        }
    }

    fn reset_roster(&mut self) {
        self.present = vec![true; roster(self.course.selected()).len()];
        self.state = first_row();
        self.notice = None;
    }

    fn toggle(&mut self) {
        if let Some(flag) = self.state.selected().and_then(|i| self.present.get_mut(i)) {
            *flag = !*flag;
            self.notice = None;
        }
    }

    fn present_count(&self) -> usize {
        self.present.iter().filter(|p| **p).count()
    }
}

enum View {
    Mark(MarkSheet),
    History(TableState),
    Reports(TableState),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "mark" => Some(View::Mark(MarkSheet::new())),
        "history" => Some(View::History(first_row())),
        "reports" => Some(View::Reports(first_row())),
        _ => None,
    }
}

pub struct AttendanceSection {
    tabs: TabPanel<View>,
    history: Vec<AttendanceRecord>,
    listeners: Listeners,
    today: NaiveDate,
}

pub fn mount(ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(AttendanceSection::new(ctx.listeners.clone(), ctx.today))
}

impl AttendanceSection {
    pub fn new(listeners: Listeners, today: NaiveDate) -> Self {
        Self {
            tabs: TabPanel::new(TABS, "mark", mount_view),
            history: sample_history(today),
            listeners,
            today,
        }
    }

    pub fn history(&self) -> &[AttendanceRecord] {
        &self.history
    }

    fn sheet(&self) -> Option<&MarkSheet> {
        match self.tabs.content() {
            Some(View::Mark(sheet)) => Some(sheet),
            _ => None,
        }
    }
}

fn render_sheet(frame: &mut Frame, area: Rect, sheet: &mut MarkSheet) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Course select
            Constraint::Length(1), // Summary
            Constraint::Min(3),    // Roster
            Constraint::Length(1), // Status
        ])
        .split(area);

    sheet.course.render(frame, rows[0], "Course");

    let present = sheet.present_count();
    let total = sheet.present.len();
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Present ", Style::default().fg(Color::Gray)),
            Span::styled(present.to_string(), Style::default().fg(Color::Green)),
            Span::styled("  Absent ", Style::default().fg(Color::Gray)),
            Span::styled((total - present).to_string(), Style::default().fg(Color::Red)),
        ])),
        rows[1],
    );

    let table_rows = roster(sheet.course.selected())
        .iter()
        .zip(&sheet.present)
        .map(|((roll, name), present)| {
            Row::new(vec![
                Cell::from(if *present { "[x]" } else { "[ ]" }),
                Cell::from(*roll),
                Cell::from(*name),
                if *present {
                    Badge::cell("Present", Tone::Success)
                } else {
                    Badge::cell("Absent", Tone::Danger)
                },
            ])
        })
        .collect();
    render_table(
        frame,
        rows[2],
        "Roster",
        &["", "Roll", "Name", "Status"],
        &[
            Constraint::Length(3),
            Constraint::Length(9),
            Constraint::Min(16),
            Constraint::Length(8),
        ],
        table_rows,
        &mut sheet.state,
    );

    let status = match &sheet.notice {
        Some(notice) => Line::from(Span::styled(
            format!("✓ {}", notice),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            "c course  Space toggle  a all present  s save",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(status), rows[3]);

    sheet.course.render_popup(frame);
}

fn render_reports(frame: &mut Frame, area: Rect, history: &[AttendanceRecord], state: &mut TableState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let rows = flagged_students()
        .map(|s| {
            Row::new(vec![
                Cell::from(s.roll),
                Cell::from(s.name),
                Cell::from(s.course),
                Badge::cell(format!("{}%", s.percent()), Tone::Danger),
            ])
        })
        .collect();
    render_table(
        frame,
        cols[0],
        &format!("Below {}%", THRESHOLD),
        &["Roll", "Name", "Course", "Att."],
        &[
            Constraint::Length(9),
            Constraint::Length(16),
            Constraint::Min(14),
            Constraint::Length(5),
        ],
        rows,
        state,
    );

    let present: usize = history.iter().map(|r| r.present).sum();
    let absent: usize = history.iter().map(|r| r.total - r.present).sum();
    if present + absent == 0 {
        frame.render_widget(
            Paragraph::new("No sessions recorded").block(
                Block::default()
                    .title(" Overall ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
            cols[1],
        );
        return;
    }

    let present_label = format!("Present ({})", present);
    let absent_label = format!("Absent ({})", absent);
    let mut slices = Vec::new();
    if present > 0 {
        slices.push(PieSlice::new(&present_label, present as f64, Color::Green));
    }
    if absent > 0 {
        slices.push(PieSlice::new(&absent_label, absent as f64, Color::Red));
    }
    // Single-slice charts render as a sliver
    if slices.len() == 1 {
        slices.push(PieSlice::new("", 0.001, Color::Reset));
    }

    let chart = PieChart::new(slices)
        .show_legend(true)
        .show_percentages(true)
        .block(
            Block::default()
                .title(" Overall ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(chart, cols[1]);
}

impl Section for AttendanceSection {
    fn key(&self) -> &'static str {
        "attendance"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn is_editing(&self) -> bool {
        self.sheet().is_some_and(|s| s.course.is_expanded())
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Mark(_)) => &[("[c]", "Course"), ("[Space]", "Toggle"), ("[s]", "Save")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        match self.tabs.content_mut() {
            Some(View::Mark(sheet)) => render_sheet(frame, area, sheet),
            Some(View::History(state)) => {
                let rows = self
                    .history
                    .iter()
                    .map(|r| {
                        let tone = if r.percent() < THRESHOLD {
                            Tone::Danger
                        } else {
                            Tone::Success
                        };
                        Row::new(vec![
                            Cell::from(r.date.format("%d %b %Y").to_string()),
                            Cell::from(r.course),
                            Cell::from(format!("{}/{}", r.present, r.total)),
                            Badge::cell(format!("{}%", r.percent()), tone),
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    "Sessions",
                    &["Date", "Course", "Present", "%"],
                    &[
                        Constraint::Length(12),
                        Constraint::Min(20),
                        Constraint::Length(8),
                        Constraint::Length(5),
                    ],
                    rows,
                    state,
                );
            }
            Some(View::Reports(state)) => render_reports(frame, area, &self.history, state),
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        let history_len = self.history.len();
        let flagged_len = flagged_students().count();
        let today = self.today;
        match self.tabs.content_mut() {
            Some(View::Mark(sheet)) => {
                if sheet.course.is_open() {
                    if sheet.course.handle_key(key.code).is_some() {
                        sheet.reset_roster();
                    }
                    return SectionAction::Consumed;
                }
                let len = sheet.present.len();
                match key.code {
                    KeyCode::Char('c') => sheet.course.open(&self.listeners),
                    KeyCode::Up => step_selection(&mut sheet.state, len, -1),
                    KeyCode::Down => step_selection(&mut sheet.state, len, 1),
                    KeyCode::Char(' ') | KeyCode::Enter => sheet.toggle(),
                    KeyCode::Char('a') => {
                        sheet.present.iter_mut().for_each(|p| *p = true);
                        sheet.notice = None;
                    }
                    KeyCode::Char('s') => {
                        let record = AttendanceRecord {
                            date: today,
                            course: sheet.course.selected_label(),
                            present: sheet.present_count(),
                            total: sheet.present.len(),
                        };
                        tracing::info!(
                            course = record.course,
                            present = record.present,
                            total = record.total,
                            "attendance saved"
                        );
                        sheet.notice = Some(format!(
                            "Saved {}/{} present for {}",
                            record.present, record.total, record.course
                        ));
                        self.history.insert(0, record);
                    }
                    _ => return SectionAction::Ignored,
                }
                SectionAction::Consumed
            }
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
            Some(View::Reports(state)) => match key.code {
                KeyCode::Up => {
                    step_selection(state, flagged_len, -1);
                    SectionAction::Consumed
                }
                KeyCode::Down => {
                    step_selection(state, flagged_len, 1);
                    SectionAction::Consumed
                }
                _ => SectionAction::Ignored,
            },
            None => SectionAction::Ignored,
        }
    }

    fn handle_view_click(&mut self, mouse: MouseEvent) -> SectionAction {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return SectionAction::Ignored;
        }
        match self.tabs.content_mut() {
            Some(View::Mark(sheet)) => {
                if sheet
                    .course
                    .handle_click(mouse.column, mouse.row, &self.listeners)
                    .is_some()
                {
                    sheet.reset_roster();
                }
                SectionAction::Consumed
            }
            _ => SectionAction::Ignored,
        }
    }
}

fn sample_history(today: NaiveDate) -> Vec<AttendanceRecord> {
    let days_ago = |n: i64| today - chrono::Duration::days(n);
    vec![
        AttendanceRecord {
            date: days_ago(3),
            course: COURSES[0],
            present: 4,
            total: 5,
        },
        AttendanceRecord {
            date: days_ago(4),
            course: COURSES[2],
            present: 3,
            total: 3,
        },
        AttendanceRecord {
            date: days_ago(5),
            course: COURSES[1],
            present: 2,
            total: 4,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press};
    use ratatui::{Terminal, backend::TestBackend};

    fn section() -> (AttendanceSection, Listeners) {
        let listeners = Listeners::new();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        (AttendanceSection::new(listeners.clone(), today), listeners)
    }

    #[test]
    fn test_default_sub_tab_is_mark() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "mark");
    }

    #[test]
    fn test_save_appends_to_history() {
        let (mut section, _) = section();
        press(&mut section, KeyCode::Down);
        press(&mut section, KeyCode::Char(' '));
        press(&mut section, KeyCode::Char('s'));

        let saved = &section.history()[0];
        assert_eq!(saved.course, "CS301 Database Systems");
        assert_eq!((saved.present, saved.total), (4, 5));
        assert_eq!(section.history().len(), 4);
    }

    #[test]
    fn test_unsaved_toggles_are_lost_on_tab_switch() {
        let (mut section, _) = section();
        press(&mut section, KeyCode::Char(' '));
        assert_eq!(section.sheet().map(|s| s.present_count()), Some(4));

        press(&mut section, KeyCode::Right);
        press(&mut section, KeyCode::Left);
        assert_eq!(section.sheet().map(|s| s.present_count()), Some(5));
    }

    #[test]
    fn test_course_dropdown_holds_keys_and_swaps_roster() {
        let (mut section, listeners) = section();
        press(&mut section, KeyCode::Char('c'));
        assert!(section.is_editing());
        assert_eq!(listeners.len(), 1);

        // ←/→ stay inside the dropdown
        press(&mut section, KeyCode::Right);
        assert_eq!(section.active_sub_tab(), "mark");

        press(&mut section, KeyCode::Down);
        press(&mut section, KeyCode::Enter);
        assert!(!section.is_editing());
        assert!(listeners.is_empty());
        assert_eq!(section.sheet().map(|s| s.present.len()), Some(4));
    }

    #[test]
    fn test_outside_click_closes_dropdown() {
        let (mut section, listeners) = section();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        press(&mut section, KeyCode::Char('c'));
        terminal
            .draw(|frame| section.render(frame, frame.area()))
            .unwrap();

        assert_eq!(listeners.click(90, 18), 1);
        terminal
            .draw(|frame| section.render(frame, frame.area()))
            .unwrap();
        assert!(!section.is_editing());
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_leaving_section_with_open_dropdown_releases_listener() {
        let (mut section, listeners) = section();
        press(&mut section, KeyCode::Char('c'));
        assert_eq!(listeners.len(), 1);
        drop(section);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_flagged_students_are_below_threshold() {
        let flagged: Vec<_> = flagged_students().map(|s| s.roll).collect();
        assert_eq!(flagged, vec!["21CS014", "22CS019", "20CS033"]);
    }
}
