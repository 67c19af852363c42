// Dashboard: summary cards, quick actions and the week ahead

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, TableState},
};

use super::timetable::classes_on;
use super::{Section, SectionAction, SectionContext};
use crate::ui::components::{
    Badge, Button, Card, Size, Tone, Variant, first_row, render_table, step_selection,
};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};

const TABS: &[TabSpec] = &[
    TabSpec::new("overview", "Overview"),
    TabSpec::new("schedule", "Schedule"),
];

/// Quick action buttons: hotkey, label, target section.
const QUICK_ACTIONS: &[(char, &str, &str)] = &[
    ('t', "View Tasks", "assignments"),
    ('i', "Open Inbox", "messages"),
    ('a', "Mark Attendance", "attendance"),
];

const ANNOUNCEMENTS: &[(&str, &str)] = &[
    ("Mid-semester exams begin 2 Nov", "Exam Cell"),
    ("NAAC visit prep meeting Friday", "IQAC"),
    ("Research grant call closes 30 Oct", "R&D Office"),
];

#[derive(Debug, Clone, Copy)]
struct Upcoming {
    date: &'static str,
    title: &'static str,
    kind: &'static str,
}

const UPCOMING: &[Upcoming] = &[
    Upcoming {
        date: "20 Oct",
        title: "Department meeting",
        kind: "Meeting",
    },
    Upcoming {
        date: "22 Oct",
        title: "CS301 Lab 4 submissions due",
        kind: "Deadline",
    },
    Upcoming {
        date: "24 Oct",
        title: "PhD progress review: R. Iyer",
        kind: "Review",
    },
    Upcoming {
        date: "27 Oct",
        title: "Guest lecture on LLM systems",
        kind: "Event",
    },
    Upcoming {
        date: "02 Nov",
        title: "Mid-semester exams start",
        kind: "Exam",
    },
];

enum View {
    Overview { buttons: Vec<(Rect, &'static str)> },
    Schedule(TableState),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "overview" => Some(View::Overview {
            buttons: Vec::new(),
        }),
        "schedule" => Some(View::Schedule(first_row())),
        _ => None,
    }
}

pub struct DashboardSection {
    tabs: TabPanel<View>,
    faculty: String,
    today: NaiveDate,
}

pub fn mount(ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(DashboardSection::new(&ctx.profile.name, ctx.today))
}

impl DashboardSection {
    pub fn new(faculty: &str, today: NaiveDate) -> Self {
        Self {
            tabs: TabPanel::new(TABS, "overview", mount_view),
            faculty: faculty.to_string(),
            today,
        }
    }
}

fn render_overview(
    frame: &mut Frame,
    area: Rect,
    faculty: &str,
    today: NaiveDate,
    buttons: &mut Vec<(Rect, &'static str)>,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Greeting
            Constraint::Length(4), // Cards
            Constraint::Length(1), // Quick actions
            Constraint::Min(0),    // Today + announcements
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("Welcome back, {}", faculty),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ·  {}", today.format("%A, %d %B %Y")),
                Style::default().fg(Color::DarkGray),
            ),
        ])),
        rows[0],
    );

    let classes = classes_on(today);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[1]);
    frame.render_widget(
        Card::new("Classes Today", classes.len().to_string(), "from timetable"),
        cards[0],
    );
    frame.render_widget(
        Card::new("Pending Reviews", "4", "assignments").tone(Tone::Warning),
        cards[1],
    );
    frame.render_widget(
        Card::new("Unread Messages", "3", "inbox").tone(Tone::Info),
        cards[2],
    );
    frame.render_widget(
        Card::new("Avg Attendance", "82%", "this semester").tone(Tone::Success),
        cards[3],
    );

    buttons.clear();
    let mut x = rows[2].x;
    for (hotkey, label, target) in QUICK_ACTIONS {
        let hotkey = hotkey.to_string();
        let button = Button::new(*label)
            .hotkey(&hotkey)
            .variant(Variant::Outline)
            .size(Size::Small);
        let width = button.width().min((rows[2].x + rows[2].width).saturating_sub(x));
        if width == 0 {
            break;
        }
        let rect = Rect::new(x, rows[2].y, width, 1);
        frame.render_widget(button, rect);
        buttons.push((rect, *target));
        x = x.saturating_add(width + 2);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[3]);

    let today_lines: Vec<Line> = if classes.is_empty() {
        vec![Line::from(Span::styled(
            "No classes today",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        classes
            .iter()
            .map(|c| {
                Line::from(vec![
                    Span::styled(format!("{:<12}", c.time), Style::default().fg(Color::Cyan)),
                    Span::raw(format!("{} ", c.course)),
                    Span::styled(format!("({}, {})", c.kind, c.room), Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect()
    };
    frame.render_widget(
        Paragraph::new(today_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Today's Classes "),
        ),
        bottom[0],
    );

    let notices: Vec<Line> = ANNOUNCEMENTS
        .iter()
        .map(|(text, from)| {
            Line::from(vec![
                Span::raw(format!("• {} ", text)),
                Span::styled(format!("({})", from), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(notices).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Announcements "),
        ),
        bottom[1],
    );
}

fn kind_tone(kind: &str) -> Tone {
    match kind {
        "Deadline" | "Exam" => Tone::Danger,
        "Review" => Tone::Warning,
        "Event" => Tone::Success,
        _ => Tone::Info,
    }
}

impl Section for DashboardSection {
    fn key(&self) -> &'static str {
        "dashboard"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Overview { .. }) => &[("[t]", "Tasks"), ("[i]", "Inbox"), ("[a]", "Attendance")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        let today = self.today;
        match self.tabs.content_mut() {
            Some(View::Overview { buttons }) => {
                render_overview(frame, area, &self.faculty, today, buttons);
            }
            Some(View::Schedule(state)) => {
                let rows = UPCOMING
                    .iter()
                    .map(|u| {
                        Row::new(vec![
                            Cell::from(u.date),
                            Cell::from(u.title),
                            Badge::cell(u.kind, kind_tone(u.kind)),
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    "Upcoming",
                    &["Date", "What", "Type"],
                    &[
                        Constraint::Length(8),
                        Constraint::Min(24),
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
        match self.tabs.content_mut() {
            Some(View::Overview { .. }) => match key.code {
                KeyCode::Char(c) => QUICK_ACTIONS
                    .iter()
                    .find(|(hotkey, _, _)| *hotkey == c)
                    .map(|(_, _, target)| SectionAction::Navigate(*target))
                    .unwrap_or(SectionAction::Ignored),
                _ => SectionAction::Ignored,
            },
            Some(View::Schedule(state)) => match key.code {
                KeyCode::Up => {
                    step_selection(state, UPCOMING.len(), -1);
                    SectionAction::Consumed
                }
                KeyCode::Down => {
                    step_selection(state, UPCOMING.len(), 1);
                    SectionAction::Consumed
                }
                _ => SectionAction::Ignored,
            },
            None => SectionAction::Ignored,
        }
    }

    fn handle_view_click(&mut self, mouse: MouseEvent) -> SectionAction {
        if mouse.kind != MouseEventKind::Down(crossterm::event::MouseButton::Left) {
            return SectionAction::Ignored;
        }
        let point = Position::new(mouse.column, mouse.row);
        match self.tabs.content() {
            Some(View::Overview { buttons }) => buttons
                .iter()
                .find(|(rect, _)| rect.contains(point))
                .map(|(_, target)| SectionAction::Navigate(*target))
                .unwrap_or(SectionAction::Ignored),
            _ => SectionAction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press};
    use crossterm::event::{KeyModifiers, MouseButton};
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_default_sub_tab_is_overview() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "overview");
    }

    #[test]
    fn test_quick_actions_request_navigation() {
        let mut section = mount(&ctx());
        assert_eq!(
            press(section.as_mut(), KeyCode::Char('t')),
            SectionAction::Navigate("assignments")
        );
        assert_eq!(
            press(section.as_mut(), KeyCode::Char('i')),
            SectionAction::Navigate("messages")
        );
    }

    #[test]
    fn test_quick_actions_only_on_overview() {
        let mut section = mount(&ctx());
        press(section.as_mut(), KeyCode::Right);
        assert_eq!(section.active_sub_tab(), "schedule");
        assert_eq!(press(section.as_mut(), KeyCode::Char('t')), SectionAction::Ignored);
    }

    #[test]
    fn test_clicking_view_tasks_navigates() {
        let mut section = mount(&ctx());
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| section.render(frame, frame.area()))
            .unwrap();

        // Tab bar on row 0, greeting row 1, cards rows 2-5, buttons row 6
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 2,
            row: 6,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(section.handle_click(click), SectionAction::Navigate("assignments"));
    }
}
