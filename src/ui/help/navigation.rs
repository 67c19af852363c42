use crate::ui::registry::NavigationRegistry;

#[derive(Debug, Clone)]
pub struct HelpModalState {
    pub current_section: HelpSection,
    pub scroll_offset: u16,
    pub max_scroll: u16,
    pub app_version: String,
    /// (key, label, badge) per registered section, captured when help opens
    pub sections: Vec<(&'static str, &'static str, Option<u32>)>,
}

impl HelpModalState {
    pub fn new(app_version: &str, registry: &NavigationRegistry) -> Self {
        Self {
            current_section: HelpSection::About,
            scroll_offset: 0,
            max_scroll: 0,
            app_version: app_version.to_string(),
            sections: registry
                .iter()
                .map(|e| (e.key, e.label, e.badge))
                .collect(),
        }
    }

    pub fn next_section(&mut self) {
        self.current_section = self.current_section.next();
        self.scroll_offset = 0;
    }

    pub fn previous_section(&mut self) {
        self.current_section = self.current_section.previous();
        self.scroll_offset = 0;
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let next = (self.scroll_offset as i32 + delta).clamp(0, self.max_scroll as i32);
        self.scroll_offset = next as u16;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpSection {
    About,
    Navigation,
    Sections,
    KeyboardShortcuts,
}

impl HelpSection {
    pub fn next(self) -> Self {
        match self {
            Self::About => Self::Navigation,
            Self::Navigation => Self::Sections,
            Self::Sections => Self::KeyboardShortcuts,
            Self::KeyboardShortcuts => Self::About,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::About => Self::KeyboardShortcuts,
            Self::Navigation => Self::About,
            Self::Sections => Self::Navigation,
            Self::KeyboardShortcuts => Self::Sections,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::About => "About",
            Self::Navigation => "Navigation",
            Self::Sections => "Sections",
            Self::KeyboardShortcuts => "Keyboard Shortcuts",
        }
    }

    pub fn all_sections() -> Vec<Self> {
        vec![
            Self::About,
            Self::Navigation,
            Self::Sections,
            Self::KeyboardShortcuts,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_cycle_wraps() {
        let mut section = HelpSection::About;
        for _ in 0..HelpSection::all_sections().len() {
            section = section.next();
        }
        assert_eq!(section, HelpSection::About);
        assert_eq!(HelpSection::About.previous(), HelpSection::KeyboardShortcuts);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut state = HelpModalState::new("0.1.0", &NavigationRegistry::faculty());
        state.max_scroll = 4;
        state.scroll_by(10);
        assert_eq!(state.scroll_offset, 4);
        state.scroll_by(-10);
        assert_eq!(state.scroll_offset, 0);
        assert_eq!(state.sections.len(), 20);
    }
}
