// Wellness: daily tracker, counselling sessions, resources

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, TableState},
};

use super::{Section, SectionAction, SectionContext};
use crate::ui::components::{Badge, Tone, first_row, render_table, step_selection};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};
use crate::ui::widgets::{EnhancedProgress, ProgressState, Slider};

const TABS: &[TabSpec] = &[
    TabSpec::new("tracker", "Tracker"),
    TabSpec::new("counselling", "Counselling"),
    TabSpec::new("resources", "Resources"),
];

pub const STEP_GOAL: u32 = 8000;
pub const WATER_GOAL: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayLog {
    pub date: NaiveDate,
    pub mood: u32,
    pub steps: u32,
    pub water: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounsellingSlot {
    pub counsellor: &'static str,
    pub when: &'static str,
    pub mode: &'static str,
    pub booked: bool,
}

const RESOURCES: &[(&str, &str)] = &[
    ("Employee Assistance Helpline", "1800-123-4567, 24x7, confidential"),
    ("Yoga for Faculty", "Tue & Thu 07:00, Sports Complex"),
    ("Mindfulness Workshop", "Monthly, Wellness Centre"),
    ("Ergonomics Guide", "Intranet > HR > Wellbeing"),
];

/// Today's entry. Lives in the Tracker sub-view until logged.
struct Tracker {
    mood: Slider,
    steps: u32,
    water: u32,
    notice: Option<String>,
}

impl Tracker {
    fn new() -> Self {
        let mut mood = Slider::new("Mood", 1, 10).value(6);
        mood.set_focused(true);
        Self {
            mood,
            steps: 5200,
            water: 3,
            notice: None,
        }
    }

    fn step_percent(&self) -> u16 {
        (self.steps.saturating_mul(100) / STEP_GOAL).min(100) as u16
    }
}

enum View {
    Tracker(Tracker),
    Counselling(TableState),
    Resources,
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "tracker" => Some(View::Tracker(Tracker::new())),
        "counselling" => Some(View::Counselling(first_row())),
        "resources" => Some(View::Resources),
        _ => None,
    }
}

pub struct WellnessSection {
    tabs: TabPanel<View>,
    logs: Vec<DayLog>,
    slots: Vec<CounsellingSlot>,
    today: NaiveDate,
}

pub fn mount(ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(WellnessSection::new(ctx.today))
}

impl WellnessSection {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tabs: TabPanel::new(TABS, "tracker", mount_view),
            logs: Vec::new(),
            slots: sample_slots(),
            today,
        }
    }

    pub fn logs(&self) -> &[DayLog] {
        &self.logs
    }

    pub fn slots(&self) -> &[CounsellingSlot] {
        &self.slots
    }

    #[cfg(test)]
    fn tracker(&self) -> Option<&Tracker> {
        match self.tabs.content() {
            Some(View::Tracker(tracker)) => Some(tracker),
            _ => None,
        }
    }
}

fn render_tracker(frame: &mut Frame, area: Rect, tracker: &Tracker, logs: &[DayLog]) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Mood slider
            Constraint::Length(1),
            Constraint::Length(1), // Steps
            Constraint::Length(1), // Water
            Constraint::Length(1),
            Constraint::Length(1), // Status
            Constraint::Min(0),    // Recent logs
        ])
        .split(area);

    frame.render_widget(&tracker.mood, rows[0]);

    let step_percent = tracker.step_percent();
    frame.render_widget(
        EnhancedProgress::new(
            "Steps",
            step_percent,
            ProgressState::classify(step_percent, 50),
        ),
        rows[2],
    );
    let water_percent = (tracker.water * 100 / WATER_GOAL).min(100) as u16;
    frame.render_widget(
        EnhancedProgress::new(
            "Water (glasses)",
            water_percent,
            ProgressState::classify(water_percent, 50),
        ),
        rows[3],
    );

    let status = match &tracker.notice {
        Some(notice) => Line::from(Span::styled(
            format!("✓ {}", notice),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            format!(
                "{} steps, {}/{} glasses  ·  +/- mood  w water  l log",
                tracker.steps, tracker.water, WATER_GOAL
            ),
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(status), rows[5]);

    let recent: Vec<Line> = logs
        .iter()
        .take(5)
        .map(|l| {
            Line::from(format!(
                "{}  mood {:>2}/10  {:>5} steps  {} glasses",
                l.date.format("%d %b"),
                l.mood,
                l.steps,
                l.water
            ))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(recent).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Logged "),
        ),
        rows[6],
    );
}

impl Section for WellnessSection {
    fn key(&self) -> &'static str {
        "wellness"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Tracker(_)) => &[("[+/-]", "Mood"), ("[w]", "Water"), ("[l]", "Log")],
            Some(View::Counselling(_)) => &[("[Enter]", "Book/Cancel")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        match self.tabs.content_mut() {
            Some(View::Tracker(tracker)) => render_tracker(frame, area, tracker, &self.logs),
            Some(View::Counselling(state)) => {
                let rows = self
                    .slots
                    .iter()
                    .map(|s| {
                        Row::new(vec![
                            Cell::from(s.counsellor),
                            Cell::from(s.when),
                            Cell::from(s.mode),
                            if s.booked {
                                Badge::cell("Booked", Tone::Success)
                            } else {
                                Badge::cell("Available", Tone::Neutral)
                            },
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    "Counselling Slots",
                    &["Counsellor", "When", "Mode", "Status"],
                    &[
                        Constraint::Length(20),
                        Constraint::Min(16),
                        Constraint::Length(10),
                        Constraint::Length(10),
                    ],
                    rows,
                    state,
                );
            }
            Some(View::Resources) => {
                let lines: Vec<Line> = RESOURCES
                    .iter()
                    .flat_map(|(title, detail)| {
                        [
                            Line::from(Span::styled(*title, Style::default().fg(Color::Cyan))),
                            Line::from(Span::styled(
                                format!("  {}", detail),
                                Style::default().fg(Color::Gray),
                            )),
                        ]
                    })
                    .collect();
                frame.render_widget(
                    Paragraph::new(lines).block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(Color::DarkGray))
                            .title(" Resources "),
                    ),
                    area,
                );
            }
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        let today = self.today;
        let slots_len = self.slots.len();
        match self.tabs.content_mut() {
            Some(View::Tracker(tracker)) => {
                match key.code {
                    KeyCode::Char('w') => {
                        tracker.water += 1;
                        tracker.notice = None;
                    }
                    KeyCode::Char('l') => {
                        let log = DayLog {
                            date: today,
                            mood: tracker.mood.get_value(),
                            steps: tracker.steps,
                            water: tracker.water,
                        };
                        tracing::debug!(mood = log.mood, water = log.water, "wellness logged");
                        self.logs.retain(|l| l.date != today);
                        self.logs.insert(0, log);
                        tracker.notice = Some("Today's entry saved".to_string());
                    }
                    code => {
                        if !tracker.mood.handle_key(code) {
                            return SectionAction::Ignored;
                        }
                        tracker.notice = None;
                    }
                }
                SectionAction::Consumed
            }
            Some(View::Counselling(state)) => match key.code {
                KeyCode::Up => {
                    step_selection(state, slots_len, -1);
                    SectionAction::Consumed
                }
                KeyCode::Down => {
                    step_selection(state, slots_len, 1);
                    SectionAction::Consumed
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if let Some(slot) = state.selected().and_then(|i| self.slots.get_mut(i)) {
                        slot.booked = !slot.booked;
                        tracing::info!(counsellor = slot.counsellor, booked = slot.booked, "counselling slot");
                    }
                    SectionAction::Consumed
                }
                _ => SectionAction::Ignored,
            },
            _ => SectionAction::Ignored,
        }
    }
}

fn sample_slots() -> Vec<CounsellingSlot> {
    let slot = |counsellor, when, mode| CounsellingSlot {
        counsellor,
        when,
        mode,
        booked: false,
    };
    vec![
        slot("Dr. Kavita Rao", "Tue 16:00", "In person"),
        slot("Dr. Kavita Rao", "Thu 11:00", "Video"),
        slot("Mr. Sanjay Das", "Fri 15:30", "In person"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press};

    fn section() -> WellnessSection {
        WellnessSection::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[test]
    fn test_default_sub_tab_is_tracker() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "tracker");
    }

    #[test]
    fn test_mood_and_water_then_log() {
        let mut section = section();
        press(&mut section, KeyCode::Char('+'));
        press(&mut section, KeyCode::Char('w'));
        press(&mut section, KeyCode::Char('l'));
        assert_eq!(section.logs().len(), 1);
        assert_eq!(section.logs()[0].mood, 7);
        assert_eq!(section.logs()[0].water, 4);

        // Logging again replaces today's entry
        press(&mut section, KeyCode::Char('l'));
        assert_eq!(section.logs().len(), 1);
    }

    #[test]
    fn test_unlogged_tracker_resets_on_tab_switch() {
        let mut section = section();
        press(&mut section, KeyCode::Char('w'));
        assert_eq!(section.tracker().map(|t| t.water), Some(4));
        press(&mut section, KeyCode::Right);
        press(&mut section, KeyCode::Left);
        assert_eq!(section.tracker().map(|t| t.water), Some(3));
    }

    #[test]
    fn test_book_counselling_slot() {
        let mut section = section();
        section.tabs.set_active("counselling");
        press(&mut section, KeyCode::Enter);
        assert!(section.slots()[0].booked);
    }

    #[test]
    fn test_step_percent_caps_at_goal() {
        let mut tracker = Tracker::new();
        assert_eq!(tracker.step_percent(), 65);
        tracker.steps = 12_000;
        assert_eq!(tracker.step_percent(), 100);
    }
}
