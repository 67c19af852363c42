// Focus management for the shell

/// Which pane receives arrow keys in normal mode.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    #[default]
    Content,
}

impl Focus {
    /// Tab order. The sidebar is skipped while it is closed.
    pub fn next(&self, sidebar_open: bool) -> Self {
        match self {
            Self::Sidebar => Self::Content,
            Self::Content if sidebar_open => Self::Sidebar,
            Self::Content => Self::Content,
        }
    }

    pub fn previous(&self, sidebar_open: bool) -> Self {
        // Two panes, so the cycle is symmetric
        self.next(sidebar_open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_with_open_sidebar() {
        assert_eq!(Focus::Content.next(true), Focus::Sidebar);
        assert_eq!(Focus::Sidebar.next(true), Focus::Content);
        assert_eq!(Focus::Sidebar.previous(true), Focus::Content);
    }

    #[test]
    fn test_closed_sidebar_is_skipped() {
        assert_eq!(Focus::Content.next(false), Focus::Content);
        assert_eq!(Focus::Sidebar.next(false), Focus::Content);
    }
}
