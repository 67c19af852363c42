// Residence: quarters allotment and maintenance requests

use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row},
};

use super::{Section, SectionAction, SectionContext};
use crate::ui::components::{Badge, Tone, first_row, render_table};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};
use crate::ui::widgets::{Form, FormEvent};

const TABS: &[TabSpec] = &[
    TabSpec::new("allotment", "Allotment"),
    TabSpec::new("maintenance", "Maintenance"),
];

const FIELDS: &[&str] = &["Issue type", "Location", "Description"];

const ALLOTMENT: &[(&str, &str)] = &[
    ("Quarter", "Type-III, Block C-204"),
    ("Campus", "North Residential Zone"),
    ("Allotted on", "01 Jul 2024"),
    ("Licence valid until", "30 Jun 2027"),
    ("Monthly licence fee", "₹2,450"),
    ("Occupants", "3"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Open,
    InProgress,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceRequest {
    pub issue: String,
    pub location: String,
    pub raised: NaiveDate,
    pub status: RequestStatus,
}

enum View {
    Allotment,
    Maintenance(Form),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "allotment" => Some(View::Allotment),
        "maintenance" => Some(View::Maintenance(Form::new(FIELDS))),
        _ => None,
    }
}

pub struct ResidenceSection {
    tabs: TabPanel<View>,
    requests: Vec<MaintenanceRequest>,
    today: NaiveDate,
}

pub fn mount(ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(ResidenceSection::new(ctx.today))
}

impl ResidenceSection {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tabs: TabPanel::new(TABS, "allotment", mount_view),
            requests: sample_requests(today),
            today,
        }
    }

    pub fn requests(&self) -> &[MaintenanceRequest] {
        &self.requests
    }
}

/// Issue type and description required; location defaults to the allotted quarter.
pub fn validate(form: &Form, today: NaiveDate) -> Result<MaintenanceRequest, String> {
    let issue = form.value(0).trim();
    if issue.is_empty() {
        return Err("Issue type is required".to_string());
    }
    if form.value(2).trim().is_empty() {
        return Err("Describe the problem".to_string());
    }
    let location = match form.value(1).trim() {
        "" => "C-204",
        l => l,
    };
    Ok(MaintenanceRequest {
        issue: issue.to_string(),
        location: location.to_string(),
        raised: today,
        status: RequestStatus::Open,
    })
}

fn status_badge(status: RequestStatus) -> Cell<'static> {
    match status {
        RequestStatus::Open => Badge::cell("Open", Tone::Warning),
        RequestStatus::InProgress => Badge::cell("In progress", Tone::Info),
        RequestStatus::Closed => Badge::cell("Closed", Tone::Success),
    }
}

impl Section for ResidenceSection {
    fn key(&self) -> &'static str {
        "residence"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn is_editing(&self) -> bool {
        matches!(self.tabs.content(), Some(View::Maintenance(form)) if form.editing)
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Maintenance(_)) => &[("[Enter]", "Edit"), ("[s]", "Raise")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        match self.tabs.content_mut() {
            Some(View::Allotment) => {
                let lines: Vec<Line> = ALLOTMENT
                    .iter()
                    .map(|(label, value)| {
                        Line::from(vec![
                            Span::styled(format!("{:<22}", label), Style::default().fg(Color::Gray)),
                            Span::styled(*value, Style::default().add_modifier(Modifier::BOLD)),
                        ])
                    })
                    .collect();
                frame.render_widget(
                    Paragraph::new(lines).block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(Color::DarkGray))
                            .title(" Current Allotment "),
                    ),
                    area,
                );
            }
            Some(View::Maintenance(form)) => {
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .split(area);
                form.render(frame, cols[0], "New Request", "Raise");
                let rows = self
                    .requests
                    .iter()
                    .map(|r| {
                        Row::new(vec![
                            Cell::from(r.issue.clone()),
                            Cell::from(r.location.clone()),
                            Cell::from(r.raised.format("%d %b").to_string()),
                            status_badge(r.status),
                        ])
                    })
                    .collect();
                let mut state = first_row();
                render_table(
                    frame,
                    cols[1],
                    "My Requests",
                    &["Issue", "Where", "Raised", "Status"],
                    &[
                        Constraint::Min(12),
                        Constraint::Length(10),
                        Constraint::Length(7),
                        Constraint::Length(11),
                    ],
                    rows,
                    &mut state,
                );
            }
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        match self.tabs.content_mut() {
            Some(View::Maintenance(form)) => match form.handle_key(key) {
                FormEvent::Submit => {
                    match validate(form, self.today) {
                        Ok(request) => {
                            tracing::info!(issue = %request.issue, "maintenance request raised");
                            form.succeed(format!("Request for {} raised", request.issue));
                            self.requests.insert(0, request);
                        }
                        Err(error) => form.fail(error),
                    }
                    SectionAction::Consumed
                }
                FormEvent::Consumed => SectionAction::Consumed,
                FormEvent::Ignored => SectionAction::Ignored,
            },
            _ => SectionAction::Ignored,
        }
    }
}

fn sample_requests(today: NaiveDate) -> Vec<MaintenanceRequest> {
    vec![
        MaintenanceRequest {
            issue: "Plumbing".to_string(),
            location: "Kitchen".to_string(),
            raised: today - chrono::Duration::days(3),
            status: RequestStatus::InProgress,
        },
        MaintenanceRequest {
            issue: "Electrical".to_string(),
            location: "Balcony light".to_string(),
            raised: today - chrono::Duration::days(21),
            status: RequestStatus::Closed,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use crate::sections::testing::{ctx, press, type_text};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_default_sub_tab_is_allotment() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "allotment");
    }

    #[test]
    fn test_validate_defaults_location() {
        let mut form = Form::new(FIELDS);
        assert_eq!(validate(&form, today()).unwrap_err(), "Issue type is required");
        form.field_mut(0).unwrap().set_value("Carpentry");
        form.field_mut(2).unwrap().set_value("Wardrobe hinge broken");
        assert_eq!(validate(&form, today()).unwrap().location, "C-204");
    }

    #[test]
    fn test_raise_request() {
        let mut section = ResidenceSection::new(today());
        press(&mut section, KeyCode::Right);
        assert_eq!(section.active_sub_tab(), "maintenance");
        press(&mut section, KeyCode::Enter);
        type_text(&mut section, "Painting");
        press(&mut section, KeyCode::Enter);
        press(&mut section, KeyCode::Enter);
        press(&mut section, KeyCode::Enter);
        type_text(&mut section, "Damp patch in bedroom");
        press(&mut section, KeyCode::Esc);
        press(&mut section, KeyCode::Char('s'));
        assert_eq!(section.requests().len(), 3);
        assert_eq!(section.requests()[0].status, RequestStatus::Open);
    }
}
