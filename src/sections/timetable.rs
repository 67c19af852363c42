// Timetable: weekly grid and today's classes

use chrono::{Datelike, NaiveDate, Weekday};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::{Cell, Row, TableState},
};

use super::{Section, SectionAction, SectionContext};
use crate::ui::components::{Badge, Tone, first_row, render_table, step_selection};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};

const TABS: &[TabSpec] = &[TabSpec::new("week", "Week"), TabSpec::new("today", "Today")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSlot {
    pub day: Weekday,
    pub time: &'static str,
    pub course: &'static str,
    pub kind: &'static str,
    pub room: &'static str,
}

const fn slot(
    day: Weekday,
    time: &'static str,
    course: &'static str,
    kind: &'static str,
    room: &'static str,
) -> ClassSlot {
    ClassSlot {
        day,
        time,
        course,
        kind,
        room,
    }
}

pub const WEEK: &[ClassSlot] = &[
    slot(Weekday::Mon, "09:00-10:00", "CS301 Database Systems", "Lecture", "LH-2"),
    slot(Weekday::Mon, "11:00-12:00", "CS204 Data Structures", "Lecture", "LH-4"),
    slot(Weekday::Mon, "14:00-16:00", "CS301 Database Systems", "Lab", "Lab C"),
    slot(Weekday::Tue, "10:00-11:00", "CS410 Machine Learning", "Lecture", "LH-1"),
    slot(Weekday::Tue, "15:00-16:00", "CS204 Data Structures", "Tutorial", "T-3"),
    slot(Weekday::Wed, "09:00-10:00", "CS301 Database Systems", "Lecture", "LH-2"),
    slot(Weekday::Wed, "12:00-13:00", "CS410 Machine Learning", "Lecture", "LH-1"),
    slot(Weekday::Thu, "11:00-12:00", "CS204 Data Structures", "Lecture", "LH-4"),
    slot(Weekday::Thu, "14:00-17:00", "CS410 Machine Learning", "Lab", "Lab A"),
    slot(Weekday::Fri, "10:00-11:00", "CS301 Database Systems", "Tutorial", "T-1"),
    slot(Weekday::Fri, "11:00-12:00", "CS410 Machine Learning", "Lecture", "LH-1"),
];

/// Classes scheduled on the weekday of `date`, in time order.
pub fn classes_on(date: NaiveDate) -> Vec<ClassSlot> {
    WEEK.iter().filter(|s| s.day == date.weekday()).copied().collect()
}

fn kind_tone(kind: &str) -> Tone {
    match kind {
        "Lab" => Tone::Warning,
        "Tutorial" => Tone::Info,
        _ => Tone::Neutral,
    }
}

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

enum View {
    Week(TableState),
    Today(TableState),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "week" => Some(View::Week(first_row())),
        "today" => Some(View::Today(first_row())),
        _ => None,
    }
}

pub struct TimetableSection {
    tabs: TabPanel<View>,
    today: NaiveDate,
}

pub fn mount(ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(TimetableSection::new(ctx.today))
}

impl TimetableSection {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tabs: TabPanel::new(TABS, "week", mount_view),
            today,
        }
    }
}

impl Section for TimetableSection {
    fn key(&self) -> &'static str {
        "timetable"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        let today = self.today;
        match self.tabs.content_mut() {
            Some(View::Week(state)) => {
                let rows = WEEK
                    .iter()
                    .map(|s| {
                        Row::new(vec![
                            Cell::from(day_name(s.day)),
                            Cell::from(s.time),
                            Cell::from(s.course),
                            Badge::cell(s.kind, kind_tone(s.kind)),
                            Cell::from(s.room),
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    "Weekly Timetable",
                    &["Day", "Time", "Course", "Type", "Room"],
                    &[
                        Constraint::Length(10),
                        Constraint::Length(12),
                        Constraint::Min(20),
                        Constraint::Length(9),
                        Constraint::Length(6),
                    ],
                    rows,
                    state,
                );
            }
            Some(View::Today(state)) => {
                let rows = classes_on(today)
                    .into_iter()
                    .map(|s| {
                        Row::new(vec![
                            Cell::from(s.time),
                            Cell::from(s.course),
                            Badge::cell(s.kind, kind_tone(s.kind)),
                            Cell::from(s.room),
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    &format!("{}, {}", day_name(today.weekday()), today.format("%d %b %Y")),
                    &["Time", "Course", "Type", "Room"],
                    &[
                        Constraint::Length(12),
                        Constraint::Min(20),
                        Constraint::Length(9),
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
        let today_len = classes_on(self.today).len();
        let (state, len) = match self.tabs.content_mut() {
            Some(View::Week(state)) => (state, WEEK.len()),
            Some(View::Today(state)) => (state, today_len),
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
    use crate::sections::testing::ctx;

    #[test]
    fn test_default_sub_tab_is_week() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "week");
    }

    #[test]
    fn test_classes_follow_weekday() {
        // 2026-10-19 is a Monday
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let classes = classes_on(monday);
        assert_eq!(classes.len(), 3);
        assert_eq!(classes[0].time, "09:00-10:00");

        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert!(classes_on(sunday).is_empty());
    }
}
