// Social impact: community projects and volunteering hours

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Cell, Row, TableState},
};

use super::{Section, SectionAction, SectionContext, parse_date};
use crate::ui::components::{Card, Tone, first_row, render_table, step_selection};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};
use crate::ui::widgets::{EnhancedProgress, Form, FormEvent, ProgressState};

const TABS: &[TabSpec] = &[
    TabSpec::new("projects", "Projects"),
    TabSpec::new("volunteering", "Volunteering"),
];

const FIELDS: &[&str] = &["Activity", "Date", "Hours"];

/// Annual volunteering target in hours.
pub const HOURS_TARGET: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub name: &'static str,
    pub partner: &'static str,
    pub students: u32,
    pub progress: u16,
}

const PROJECTS: &[Project] = &[
    Project {
        name: "Digital literacy for seniors",
        partner: "Ward 12 community centre",
        students: 18,
        progress: 70,
    },
    Project {
        name: "Village water quality survey",
        partner: "Gram panchayat, Nandgaon",
        students: 9,
        progress: 35,
    },
    Project {
        name: "STEM weekends",
        partner: "Govt. Higher Secondary School",
        students: 24,
        progress: 100,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolunteerEntry {
    pub activity: String,
    pub date: NaiveDate,
    pub hours: u32,
}

enum View {
    Projects(TableState),
    Volunteering(Form),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "projects" => Some(View::Projects(first_row())),
        "volunteering" => Some(View::Volunteering(Form::new(FIELDS))),
        _ => None,
    }
}

pub struct SocialImpactSection {
    tabs: TabPanel<View>,
    entries: Vec<VolunteerEntry>,
    today: NaiveDate,
}

pub fn mount(ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(SocialImpactSection::new(ctx.today))
}

impl SocialImpactSection {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tabs: TabPanel::new(TABS, "projects", mount_view),
            entries: vec![VolunteerEntry {
                activity: "Blood donation camp".to_string(),
                date: today - chrono::Duration::days(12),
                hours: 6,
            }],
            today,
        }
    }

    pub fn entries(&self) -> &[VolunteerEntry] {
        &self.entries
    }

    pub fn total_hours(&self) -> u32 {
        self.entries.iter().map(|e| e.hours).sum()
    }
}

/// Activity required; date defaults to today and may not be in the future; hours a positive whole number.
pub fn validate(form: &Form, today: NaiveDate) -> Result<VolunteerEntry, String> {
    let activity = form.value(0).trim();
    if activity.is_empty() {
        return Err("Activity is required".to_string());
    }
    let date = match form.value(1).trim() {
        "" => today,
        raw => parse_date(raw).ok_or("Date must be YYYY-MM-DD")?,
    };
    if date > today {
        return Err("Cannot log hours for a future date".to_string());
    }
    let hours = form
        .value(2)
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|h| *h > 0)
        .ok_or("Hours must be a positive whole number")?;
    Ok(VolunteerEntry {
        activity: activity.to_string(),
        date,
        hours,
    })
}

impl Section for SocialImpactSection {
    fn key(&self) -> &'static str {
        "social-impact"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn is_editing(&self) -> bool {
        matches!(self.tabs.content(), Some(View::Volunteering(form)) if form.editing)
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Volunteering(_)) => &[("[Enter]", "Edit"), ("[s]", "Log hours")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        let total = self.total_hours();
        match self.tabs.content_mut() {
            Some(View::Projects(state)) => {
                let rows = PROJECTS
                    .iter()
                    .map(|p| {
                        Row::new(vec![
                            Cell::from(p.name),
                            Cell::from(p.partner),
                            Cell::from(p.students.to_string()),
                            Cell::from(format!("{}%", p.progress)),
                        ])
                    })
                    .collect();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(5), Constraint::Length(PROJECTS.len() as u16)])
                    .split(area);
                render_table(
                    frame,
                    chunks[0],
                    "Community Projects",
                    &["Project", "Partner", "Students", "Done"],
                    &[
                        Constraint::Min(24),
                        Constraint::Length(26),
                        Constraint::Length(8),
                        Constraint::Length(5),
                    ],
                    rows,
                    state,
                );
                // Short terminals show only as many bars as there are rows
                let visible = chunks[1].height as usize;
                for (i, project) in PROJECTS.iter().enumerate().take(visible) {
                    let bar = Rect {
                        y: chunks[1].y + i as u16,
                        height: 1,
                        ..chunks[1]
                    };
                    frame.render_widget(
                        EnhancedProgress::new(
                            project.name,
                            project.progress,
                            ProgressState::classify(project.progress, 40),
                        ),
                        bar,
                    );
                }
            }
            Some(View::Volunteering(form)) => {
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .split(area);
                form.render(frame, cols[0], "Log Volunteering", "Log hours");
                let tone = if total >= HOURS_TARGET {
                    Tone::Success
                } else {
                    Tone::Warning
                };
                let card_area = Rect {
                    height: 4.min(cols[1].height),
                    ..cols[1]
                };
                frame.render_widget(
                    Card::new(
                        "Hours this year",
                        format!("{} / {}", total, HOURS_TARGET),
                        "annual target",
                    )
                    .tone(tone),
                    card_area,
                );
            }
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        match self.tabs.content_mut() {
            Some(View::Projects(state)) => {
                match key.code {
                    KeyCode::Up => step_selection(state, PROJECTS.len(), -1),
                    KeyCode::Down => step_selection(state, PROJECTS.len(), 1),
                    _ => return SectionAction::Ignored,
                }
                SectionAction::Consumed
            }
            Some(View::Volunteering(form)) => match form.handle_key(key) {
                FormEvent::Submit => {
                    match validate(form, self.today) {
                        Ok(entry) => {
                            tracing::info!(hours = entry.hours, "volunteering hours logged");
                            form.succeed(format!("Logged {} hour(s)", entry.hours));
                            self.entries.insert(0, entry);
                        }
                        Err(error) => form.fail(error),
                    }
                    SectionAction::Consumed
                }
                FormEvent::Consumed => SectionAction::Consumed,
                FormEvent::Ignored => SectionAction::Ignored,
            },
            None => SectionAction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press, type_text};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn form(activity: &str, date: &str, hours: &str) -> Form {
        let mut form = Form::new(FIELDS);
        form.field_mut(0).unwrap().set_value(activity);
        form.field_mut(1).unwrap().set_value(date);
        form.field_mut(2).unwrap().set_value(hours);
        form
    }

    #[test]
    fn test_default_sub_tab_is_projects() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "projects");
    }

    #[test]
    fn test_hours_must_be_positive() {
        let err = validate(&form("Tree planting", "", "0"), today()).unwrap_err();
        assert_eq!(err, "Hours must be a positive whole number");
        assert!(validate(&form("Tree planting", "", "-2"), today()).is_err());
        assert_eq!(validate(&form("Tree planting", "", "3"), today()).unwrap().date, today());
    }

    #[test]
    fn test_future_date_rejected() {
        let err = validate(&form("Tutoring", "2026-12-01", "2"), today()).unwrap_err();
        assert_eq!(err, "Cannot log hours for a future date");
    }

    #[test]
    fn test_log_hours_adds_to_total() {
        let mut section = SocialImpactSection::new(today());
        section.tabs.set_active("volunteering");
        press(&mut section, KeyCode::Enter);
        type_text(&mut section, "Beach clean-up");
        press(&mut section, KeyCode::Enter);
        press(&mut section, KeyCode::Down);
        press(&mut section, KeyCode::Enter);
        type_text(&mut section, "4");
        press(&mut section, KeyCode::Esc);
        press(&mut section, KeyCode::Char('s'));
        assert_eq!(section.total_hours(), 10);
        assert_eq!(section.entries()[0].activity, "Beach clean-up");
    }
}
