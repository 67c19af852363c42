// Application state: the shell around the mounted section

use chrono::{NaiveDate, NaiveTime};

use crate::config::Config;
use crate::sections::{SectionAction, SectionContext};
use crate::ui::focus::Focus;
use crate::ui::header::{HeaderAction, HeaderState};
use crate::ui::help::HelpModalState;
use crate::ui::listeners::Listeners;
use crate::ui::registry::NavigationRegistry;
use crate::ui::router::ContentRouter;
use crate::ui::sidebar::SidebarState;
use crate::ui::viewport::Viewport;

pub struct AppState {
    pub router: ContentRouter,
    pub sidebar: SidebarState,
    pub header: HeaderState,
    pub viewport: Viewport,
    pub listeners: Listeners,
    pub focus: Focus,
    pub sidebar_width: u16,
    pub help_modal: Option<HelpModalState>,
    pub app_version: String,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: &Config, viewport: Viewport, today: NaiveDate) -> Self {
        Self::with_registry(NavigationRegistry::faculty(), config, viewport, today)
    }

    pub fn with_registry(
        registry: NavigationRegistry,
        config: &Config,
        viewport: Viewport,
        today: NaiveDate,
    ) -> Self {
        let listeners = Listeners::new();
        let initial = config.startup_tab(&registry).to_string();
        let ctx = SectionContext::new(listeners.clone(), today).with_profile(config.profile.clone());
        let router = ContentRouter::new(registry, &initial, ctx);
        let sidebar = SidebarState::new(&viewport);

        tracing::info!(
            width = viewport.width,
            narrow = viewport.is_narrow(),
            sidebar_open = sidebar.is_open(),
            "shell ready"
        );

        Self {
            router,
            sidebar,
            header: HeaderState::new(&config.profile.name, &config.profile.department),
            viewport,
            listeners,
            focus: Focus::Content,
            sidebar_width: config.layout.sidebar_width,
            help_modal: None,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            should_quit: false,
        }
    }

    pub fn active_key(&self) -> &'static str {
        self.router.active_key()
    }

    /// Switch sections. Unregistered and already-active keys are no-ops.
    pub fn select(&mut self, key: &str) -> bool {
        self.router.select(key)
    }

    /// Selection from the sidebar.
    pub fn on_select(&mut self, key: &str) {
        self.select(key);
        self.sidebar.visibility.after_select(&self.viewport);
        if !self.sidebar.is_open() {
            self.focus = Focus::Content;
        }
        tracing::debug!(key, sidebar_open = self.sidebar.is_open(), "sidebar selection");
    }

    /// Backdrop click or the close control.
    pub fn on_close_request(&mut self) {
        self.sidebar.visibility.close();
        self.focus = Focus::Content;
        tracing::debug!("sidebar closed");
    }

    /// Hamburger.
    pub fn toggle_sidebar(&mut self) {
        self.sidebar.visibility.toggle();
        if self.sidebar.is_open() {
            self.sidebar.cursor = self
                .router
                .registry()
                .index_of(self.router.active_key())
                .unwrap_or(0);
            self.focus = Focus::Sidebar;
        } else {
            self.focus = Focus::Content;
        }
        tracing::debug!(open = self.sidebar.is_open(), "sidebar toggled");
    }

    /// Navigation requested from inside a section.
    pub fn navigate(&mut self, key: &'static str) {
        if self.select(key) {
            self.focus = Focus::Content;
        }
    }

    /// `[` and `]`: step through the registry, wrapping at either end.
    pub fn step_section(&mut self, offset: isize) {
        let key = self.router.registry().neighbor(self.active_key(), offset);
        self.select(key);
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next(self.sidebar.is_open());
        if self.focus == Focus::Sidebar {
            self.sidebar.cursor = self
                .router
                .registry()
                .index_of(self.active_key())
                .unwrap_or(0);
        }
    }

    /// Terminal resize. Sidebar visibility is left as it is.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.viewport.resize(width, height) {
            tracing::debug!(width, narrow = self.viewport.is_narrow(), "layout breakpoint crossed");
        }
    }

    pub fn tick(&mut self, now: NaiveTime) {
        self.header.clock = now.format("%H:%M").to_string();
    }

    pub fn open_help(&mut self) {
        self.header.close_popovers();
        self.help_modal = Some(HelpModalState::new(&self.app_version, self.router.registry()));
    }

    pub fn close_help(&mut self) {
        self.help_modal = None;
    }

    pub fn apply_header_action(&mut self, action: HeaderAction) {
        match action {
            HeaderAction::ToggleSidebar => self.toggle_sidebar(),
            HeaderAction::Navigate(key) => self.navigate(key),
            HeaderAction::SignOut => {
                tracing::info!("signed out");
                self.should_quit = true;
            }
            HeaderAction::None | HeaderAction::Consumed => {}
        }
    }

    pub fn apply_section_action(&mut self, action: SectionAction) {
        if let SectionAction::Navigate(key) = action {
            tracing::debug!(from = self.active_key(), to = key, "section requested navigation");
            self.navigate(key);
        }
    }
}
