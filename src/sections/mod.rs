// Section modules: one self-contained feature area per navigation entry
//
// Each section owns its mock data and a TabPanel of sub-views. The shell only
// knows the Section trait; a section asks for a tab switch by returning
// SectionAction::Navigate from its key handler.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::config::ProfileConfig;
use crate::ui::components::render_tab_bar;
use crate::ui::listeners::Listeners;
use crate::ui::tabs::TabBar;

pub mod assignments;
pub mod attendance;
pub mod clubs;
pub mod dashboard;
pub mod eoffice;
pub mod events;
pub mod exams;
pub mod grievances;
pub mod leave;
pub mod library;
pub mod messages;
pub mod payroll;
pub mod research;
pub mod residence;
pub mod settings;
pub mod social_impact;
pub mod startups;
pub mod timetable;
pub mod utilities;
pub mod wellness;

/// Constructor stored in the navigation registry.
pub type SectionFactory = fn(&SectionContext) -> Box<dyn Section>;

/// Environment handed to a section when it is mounted.
#[derive(Debug, Clone)]
pub struct SectionContext {
    pub listeners: Listeners,
    pub today: NaiveDate,
    pub profile: ProfileConfig,
}

impl SectionContext {
    pub fn new(listeners: Listeners, today: NaiveDate) -> Self {
        Self {
            listeners,
            today,
            profile: ProfileConfig::default(),
        }
    }

    pub fn with_profile(mut self, profile: ProfileConfig) -> Self {
        self.profile = profile;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionAction {
    Ignored,
    Consumed,
    /// Ask the shell to switch to another section
    Navigate(&'static str),
}

pub trait Section {
    fn key(&self) -> &'static str;

    fn tabs(&self) -> &dyn TabBar;

    fn tabs_mut(&mut self) -> &mut dyn TabBar;

    /// Draw the active sub-view below the tab bar.
    fn render_view(&mut self, frame: &mut Frame, area: Rect);

    fn handle_view_key(&mut self, _key: KeyEvent) -> SectionAction {
        SectionAction::Ignored
    }

    fn handle_view_click(&mut self, _mouse: MouseEvent) -> SectionAction {
        SectionAction::Ignored
    }

    /// True while a text field or dropdown holds the keyboard; the shell suspends its shortcuts.
    fn is_editing(&self) -> bool {
        false
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    fn active_sub_tab(&self) -> &str {
        self.tabs().active_key()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Sub-tab triggers
                Constraint::Min(0),    // Active sub-view
            ])
            .split(area);

        render_tab_bar(frame, chunks[0], self.tabs_mut());
        self.render_view(frame, chunks[1]);
    }

    /// ←/→ switch sub-tabs unless the view is editing or wants the keys itself.
    fn handle_key(&mut self, key: KeyEvent) -> SectionAction {
        if !self.is_editing() {
            let action = self.handle_view_key(key);
            if action != SectionAction::Ignored {
                return action;
            }
            return match key.code {
                KeyCode::Left => {
                    self.tabs_mut().previous();
                    SectionAction::Consumed
                }
                KeyCode::Right => {
                    self.tabs_mut().next();
                    SectionAction::Consumed
                }
                _ => SectionAction::Ignored,
            };
        }
        self.handle_view_key(key)
    }

    fn handle_click(&mut self, mouse: MouseEvent) -> SectionAction {
        if let Some(key) = self.tabs().hit(mouse.column, mouse.row) {
            self.tabs_mut().set_active(key);
            return SectionAction::Consumed;
        }
        self.handle_view_click(mouse)
    }
}

/// Parse a `YYYY-MM-DD` date entered in a form.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crossterm::event::KeyModifiers;

    pub fn ctx() -> SectionContext {
        SectionContext::new(
            Listeners::new(),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap_or_default(),
        )
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn press(section: &mut dyn Section, code: KeyCode) -> SectionAction {
        section.handle_key(key(code))
    }

    pub fn type_text(section: &mut dyn Section, text: &str) {
        for c in text.chars() {
            section.handle_key(key(KeyCode::Char(c)));
        }
    }
}
