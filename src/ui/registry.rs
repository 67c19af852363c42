// Navigation registry: the fixed, ordered list of dashboard sections

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::sections::{self, SectionFactory};

/// Symbolic icon identifier, rendered as a short glyph in the sidebar and header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Home,
    ClipboardCheck,
    FileText,
    Calendar,
    CalendarOff,
    Mail,
    AlertTriangle,
    Briefcase,
    Heart,
    Building,
    Zap,
    Rocket,
    Users,
    Globe,
    Flask,
    Book,
    Star,
    GraduationCap,
    Wallet,
    Settings,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Home => "⌂",
            Self::ClipboardCheck => "✔",
            Self::FileText => "≡",
            Self::Calendar => "▦",
            Self::CalendarOff => "▧",
            Self::Mail => "✉",
            Self::AlertTriangle => "▲",
            Self::Briefcase => "▣",
            Self::Heart => "♥",
            Self::Building => "▥",
            Self::Zap => "ϟ",
            Self::Rocket => "↑",
            Self::Users => "☺",
            Self::Globe => "◍",
            Self::Flask => "⚗",
            Self::Book => "▤",
            Self::Star => "★",
            Self::GraduationCap => "◆",
            Self::Wallet => "¤",
            Self::Settings => "⚙",
        }
    }
}

/// A registry item binding a section key to its label, icon, badge and renderer.
#[derive(Clone, Serialize)]
pub struct NavigationEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: Icon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<u32>,
    #[serde(skip)]
    pub factory: SectionFactory,
}

impl NavigationEntry {
    pub fn new(
        key: &'static str,
        label: &'static str,
        icon: Icon,
        factory: SectionFactory,
    ) -> Self {
        Self {
            key,
            label,
            icon,
            badge: None,
            factory,
        }
    }

    pub fn with_badge(mut self, count: u32) -> Self {
        self.badge = Some(count);
        self
    }
}

impl std::fmt::Debug for NavigationEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationEntry")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("badge", &self.badge)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("navigation registry has no entries")]
    Empty,

    #[error("duplicate navigation key '{0}'")]
    DuplicateKey(&'static str),

    #[error("default key '{0}' is not registered")]
    UnknownDefault(String),
}

/// Static, ordered, read-only sequence of navigation entries.
#[derive(Debug, Clone)]
pub struct NavigationRegistry {
    entries: Vec<NavigationEntry>,
    default_index: usize,
}

impl NavigationRegistry {
    pub fn new(entries: Vec<NavigationEntry>, default_key: &str) -> Result<Self, RegistryError> {
        if entries.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.key) {
                return Err(RegistryError::DuplicateKey(entry.key));
            }
        }

        let default_index = entries
            .iter()
            .position(|e| e.key == default_key)
            .ok_or_else(|| RegistryError::UnknownDefault(default_key.to_string()))?;

        Ok(Self {
            entries,
            default_index,
        })
    }

    /// The faculty dashboard's sections, in sidebar order.
    pub fn faculty() -> Self {
        let entries = faculty_entries();
        // Entry 0 is "dashboard"; keys are unique by construction (checked in tests)
        Self {
            entries,
            default_index: 0,
        }
    }

    pub fn get(&self, key: &str) -> Option<&NavigationEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    pub fn entry_at(&self, index: usize) -> Option<&NavigationEntry> {
        self.entries.get(index)
    }

    pub fn default_entry(&self) -> &NavigationEntry {
        &self.entries[self.default_index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &NavigationEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key of the entry `offset` places away from `key`, wrapping around.
    pub fn neighbor(&self, key: &str, offset: isize) -> &'static str {
        let len = self.entries.len() as isize;
        let index = self.index_of(key).unwrap_or(self.default_index) as isize;
        let target = (index + offset).rem_euclid(len) as usize;
        self.entries[target].key
    }

    /// Plain-text table of the registry, one entry per line.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            let badge = entry.badge.map(|b| format!("({})", b)).unwrap_or_default();
            let marker = if i == self.default_index { "*" } else { " " };
            let line = format!(
                "{}{:>2}  {:<14} {:<14} {}",
                marker,
                i + 1,
                entry.key,
                entry.label,
                badge
            );
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn faculty_entries() -> Vec<NavigationEntry> {
    vec![
        NavigationEntry::new("dashboard", "Dashboard", Icon::Home, sections::dashboard::mount),
        NavigationEntry::new(
            "attendance",
            "Attendance",
            Icon::ClipboardCheck,
            sections::attendance::mount,
        ),
        NavigationEntry::new(
            "assignments",
            "Assignments",
            Icon::FileText,
            sections::assignments::mount,
        )
        .with_badge(4),
        NavigationEntry::new("timetable", "Timetable", Icon::Calendar, sections::timetable::mount),
        NavigationEntry::new("leave", "Leave", Icon::CalendarOff, sections::leave::mount)
            .with_badge(2),
        NavigationEntry::new("messages", "Messages", Icon::Mail, sections::messages::mount)
            .with_badge(3),
        NavigationEntry::new(
            "grievances",
            "Grievances",
            Icon::AlertTriangle,
            sections::grievances::mount,
        )
        .with_badge(2),
        NavigationEntry::new("e-office", "E-Office", Icon::Briefcase, sections::eoffice::mount),
        NavigationEntry::new("wellness", "Wellness", Icon::Heart, sections::wellness::mount),
        NavigationEntry::new("residence", "Residence", Icon::Building, sections::residence::mount),
        NavigationEntry::new("utilities", "Utilities", Icon::Zap, sections::utilities::mount),
        NavigationEntry::new("startups", "Startups", Icon::Rocket, sections::startups::mount),
        NavigationEntry::new("clubs", "Clubs", Icon::Users, sections::clubs::mount),
        NavigationEntry::new(
            "social-impact",
            "Social Impact",
            Icon::Globe,
            sections::social_impact::mount,
        ),
        NavigationEntry::new("research", "Research", Icon::Flask, sections::research::mount),
        NavigationEntry::new("library", "Library", Icon::Book, sections::library::mount),
        NavigationEntry::new("events", "Events", Icon::Star, sections::events::mount),
        NavigationEntry::new("exams", "Exams", Icon::GraduationCap, sections::exams::mount),
        NavigationEntry::new("payroll", "Payroll", Icon::Wallet, sections::payroll::mount),
        NavigationEntry::new("settings", "Settings", Icon::Settings, sections::settings::mount),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faculty_registry_is_valid() {
        let validated = NavigationRegistry::new(faculty_entries(), "dashboard").unwrap();
        assert_eq!(validated.len(), 20);
        assert_eq!(validated.default_entry().key, "dashboard");

        let registry = NavigationRegistry::faculty();
        assert_eq!(registry.default_entry().key, "dashboard");
        assert_eq!(
            registry.keys().collect::<Vec<_>>(),
            validated.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let mut entries = faculty_entries();
        entries.push(NavigationEntry::new(
            "leave",
            "Leave Again",
            Icon::CalendarOff,
            sections::leave::mount,
        ));
        assert_eq!(
            NavigationRegistry::new(entries, "dashboard").unwrap_err(),
            RegistryError::DuplicateKey("leave")
        );
    }

    #[test]
    fn test_rejects_unknown_default_and_empty() {
        assert_eq!(
            NavigationRegistry::new(faculty_entries(), "home").unwrap_err(),
            RegistryError::UnknownDefault("home".to_string())
        );
        assert_eq!(
            NavigationRegistry::new(Vec::new(), "dashboard").unwrap_err(),
            RegistryError::Empty
        );
    }

    #[test]
    fn test_lookup_and_order() {
        let registry = NavigationRegistry::faculty();
        assert_eq!(registry.index_of("dashboard"), Some(0));
        assert_eq!(registry.index_of("settings"), Some(19));
        assert_eq!(registry.get("messages").unwrap().badge, Some(3));
        assert!(registry.get("cafeteria").is_none());
    }

    #[test]
    fn test_neighbor_wraps() {
        let registry = NavigationRegistry::faculty();
        assert_eq!(registry.neighbor("dashboard", -1), "settings");
        assert_eq!(registry.neighbor("settings", 1), "dashboard");
        assert_eq!(registry.neighbor("attendance", 1), "assignments");
    }
}
