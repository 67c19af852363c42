// Settings: profile details and preference toggles
//
// The profile form is rebuilt from the saved profile every time the tab is
// mounted, so unsaved edits are discarded on switch. Preference toggles are
// held on the section.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{Section, SectionAction, SectionContext};
use crate::config::ProfileConfig;
use crate::ui::components::render_checkbox;
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};
use crate::ui::widgets::{Form, FormEvent};

const TABS: &[TabSpec] = &[
    TabSpec::new("profile", "Profile"),
    TabSpec::new("preferences", "Preferences"),
];

const FIELDS: &[&str] = &["Name", "Department", "Email"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preference {
    pub label: &'static str,
    pub enabled: bool,
}

const DEFAULT_PREFERENCES: &[Preference] = &[
    Preference {
        label: "Email notifications",
        enabled: true,
    },
    Preference {
        label: "Desktop alerts for new messages",
        enabled: false,
    },
    Preference {
        label: "Weekly attendance digest",
        enabled: true,
    },
    Preference {
        label: "Compact tables",
        enabled: false,
    },
];

fn profile_form(profile: &ProfileConfig) -> Form {
    let mut form = Form::new(FIELDS);
    for (i, value) in [&profile.name, &profile.department, &profile.email]
        .into_iter()
        .enumerate()
    {
        if let Some(field) = form.field_mut(i) {
            field.set_value(value);
        }
    }
    form
}

/// Name and department required; email needs a local part and a domain.
pub fn validate(form: &Form) -> Result<ProfileConfig, String> {
    let name = form.value(0).trim();
    if name.is_empty() {
        return Err("Name is required".to_string());
    }
    let department = form.value(1).trim();
    if department.is_empty() {
        return Err("Department is required".to_string());
    }
    let email = form.value(2).trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => return Err("Enter a valid email address".to_string()),
    }
    Ok(ProfileConfig {
        name: name.to_string(),
        department: department.to_string(),
        email: email.to_string(),
    })
}

enum View {
    // Filled from the saved profile on first use after mounting
    Profile(Option<Form>),
    Preferences(usize),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "profile" => Some(View::Profile(None)),
        "preferences" => Some(View::Preferences(0)),
        _ => None,
    }
}

pub struct SettingsSection {
    tabs: TabPanel<View>,
    profile: ProfileConfig,
    preferences: Vec<Preference>,
}

pub fn mount(ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(SettingsSection::new(ctx.profile.clone()))
}

impl SettingsSection {
    pub fn new(profile: ProfileConfig) -> Self {
        Self {
            tabs: TabPanel::new(TABS, "profile", mount_view),
            profile,
            preferences: DEFAULT_PREFERENCES.to_vec(),
        }
    }

    pub fn profile(&self) -> &ProfileConfig {
        &self.profile
    }

    pub fn preferences(&self) -> &[Preference] {
        &self.preferences
    }

    /// Current text of a profile field, as shown in the form.
    pub fn draft(&self, index: usize) -> Option<&str> {
        match self.tabs.content() {
            Some(View::Profile(Some(form))) => Some(form.value(index)),
            Some(View::Profile(None)) => match index {
                0 => Some(self.profile.name.as_str()),
                1 => Some(self.profile.department.as_str()),
                2 => Some(self.profile.email.as_str()),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Section for SettingsSection {
    fn key(&self) -> &'static str {
        "settings"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn is_editing(&self) -> bool {
        matches!(self.tabs.content(), Some(View::Profile(Some(form))) if form.editing)
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Profile(_)) => &[("[Enter]", "Edit"), ("[s]", "Save")],
            Some(View::Preferences(_)) => &[("[Space]", "Toggle")],
            None => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        match self.tabs.content_mut() {
            Some(View::Profile(slot)) => {
                let form = slot.get_or_insert_with(|| profile_form(&self.profile));
                let height = (FIELDS.len() as u16 + 5).min(area.height);
                form.render(frame, Rect { height, ..area }, "My Profile", "Save");
            }
            Some(View::Preferences(cursor)) => {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Preferences ");
                let inner = block.inner(area);
                frame.render_widget(block, area);

                let mut constraints: Vec<Constraint> = self
                    .preferences
                    .iter()
                    .map(|_| Constraint::Length(1))
                    .collect();
                constraints.push(Constraint::Length(1));
                constraints.push(Constraint::Min(0));
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints(constraints)
                    .split(inner);

                let buf = frame.buffer_mut();
                for (i, pref) in self.preferences.iter().enumerate() {
                    render_checkbox(pref.label, pref.enabled, i == *cursor, rows[i], buf);
                }
                let help = Line::from(Span::styled(
                    "↑/↓ select  Space toggle",
                    Style::default().fg(Color::DarkGray),
                ));
                frame.render_widget(Paragraph::new(help), rows[self.preferences.len() + 1]);
            }
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        let count = self.preferences.len();
        match self.tabs.content_mut() {
            Some(View::Profile(slot)) => {
                let form = slot.get_or_insert_with(|| profile_form(&self.profile));
                match form.handle_key(key) {
                    FormEvent::Submit => {
                        match validate(form) {
                            Ok(profile) => {
                                tracing::info!(name = %profile.name, "profile updated");
                                form.error = None;
                                form.notice = Some("Profile saved".to_string());
                                self.profile = profile;
                            }
                            Err(error) => form.fail(error),
                        }
                        SectionAction::Consumed
                    }
                    FormEvent::Consumed => SectionAction::Consumed,
                    FormEvent::Ignored => SectionAction::Ignored,
                }
            }
            Some(View::Preferences(cursor)) => {
                match key.code {
                    KeyCode::Up => *cursor = cursor.saturating_sub(1),
                    KeyCode::Down => *cursor = (*cursor + 1).min(count.saturating_sub(1)),
                    KeyCode::Char(' ') | KeyCode::Enter => {
                        if let Some(pref) = self.preferences.get_mut(*cursor) {
                            pref.enabled = !pref.enabled;
                            tracing::debug!(
                                preference = pref.label,
                                enabled = pref.enabled,
                                "preference toggled"
                            );
                        }
                    }
                    _ => return SectionAction::Ignored,
                }
                SectionAction::Consumed
            }
            None => SectionAction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press, type_text};

    fn clear_field(section: &mut SettingsSection, len: usize) {
        for _ in 0..len {
            press(section, KeyCode::Backspace);
        }
    }

    #[test]
    fn test_default_sub_tab_is_profile() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "profile");
    }

    #[test]
    fn test_form_prefilled_from_profile() {
        let section = SettingsSection::new(ProfileConfig::default());
        assert_eq!(section.draft(0), Some("Dr. Priya Sharma"));
        assert_eq!(section.draft(2), Some("priya.sharma@campus.edu"));
    }

    #[test]
    fn test_email_validation() {
        let mut form = profile_form(&ProfileConfig::default());
        form.field_mut(2).unwrap().set_value("priya.campus.edu");
        assert_eq!(validate(&form).unwrap_err(), "Enter a valid email address");
        form.field_mut(2).unwrap().set_value("@campus.edu");
        assert!(validate(&form).is_err());
        form.field_mut(2).unwrap().set_value("p.sharma@campus.edu");
        assert_eq!(validate(&form).unwrap().email, "p.sharma@campus.edu");
    }

    #[test]
    fn test_save_profile_and_discard_unsaved_edits() {
        let mut section = SettingsSection::new(ProfileConfig::default());
        let name_len = section.profile().name.chars().count();

        press(&mut section, KeyCode::Enter);
        clear_field(&mut section, name_len);
        type_text(&mut section, "Dr. P. Sharma");
        press(&mut section, KeyCode::Esc);
        press(&mut section, KeyCode::Char('s'));
        assert_eq!(section.profile().name, "Dr. P. Sharma");

        // Unsaved edit is discarded by a tab switch
        press(&mut section, KeyCode::Enter);
        type_text(&mut section, "XYZ");
        press(&mut section, KeyCode::Esc);
        assert_eq!(section.draft(0), Some("Dr. P. SharmaXYZ"));
        press(&mut section, KeyCode::Right);
        press(&mut section, KeyCode::Left);
        assert_eq!(section.draft(0), Some("Dr. P. Sharma"));
    }

    #[test]
    fn test_preferences_survive_tab_switch() {
        let mut section = SettingsSection::new(ProfileConfig::default());
        press(&mut section, KeyCode::Right);
        press(&mut section, KeyCode::Down);
        press(&mut section, KeyCode::Char(' '));
        assert!(section.preferences()[1].enabled);

        press(&mut section, KeyCode::Left);
        press(&mut section, KeyCode::Right);
        assert!(section.preferences()[1].enabled);
    }
}
