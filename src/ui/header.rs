// Header: hamburger, section title, clock, notifications and profile menu

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::ui::listeners::{Dismissable, Listeners};
use crate::ui::registry::NavigationEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub age: &'static str,
    pub read: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    None,
    Consumed,
    ToggleSidebar,
    Navigate(&'static str),
    SignOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    MyProfile,
    Settings,
    SignOut,
}

const MENU_ITEMS: &[(MenuItem, &str)] = &[
    (MenuItem::MyProfile, "My Profile"),
    (MenuItem::Settings, "Settings"),
    (MenuItem::SignOut, "Sign out"),
];

#[derive(Debug)]
pub struct HeaderState {
    pub notifications: Vec<Notification>,
    pub profile_name: String,
    pub department: String,
    pub clock: String,
    notifications_popover: Dismissable,
    profile_menu: Dismissable,
    menu_highlight: usize,
    hamburger_area: Option<Rect>,
    bell_area: Option<Rect>,
    profile_area: Option<Rect>,
    notifications_area: Option<Rect>,
    menu_area: Option<Rect>,
}

impl HeaderState {
    pub fn new(profile_name: &str, department: &str) -> Self {
        Self {
            notifications: default_notifications(),
            profile_name: profile_name.to_string(),
            department: department.to_string(),
            clock: String::new(),
            notifications_popover: Dismissable::default(),
            profile_menu: Dismissable::default(),
            menu_highlight: 0,
            hamburger_area: None,
            bell_area: None,
            profile_area: None,
            notifications_area: None,
            menu_area: None,
        }
    }

    pub fn unread(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn notifications_open(&mut self) -> bool {
        self.notifications_popover.is_open()
    }

    pub fn profile_menu_open(&mut self) -> bool {
        self.profile_menu.is_open()
    }

    pub fn any_popover_open(&mut self) -> bool {
        // Evaluate both so outside-click trips are consumed
        let notifications = self.notifications_open();
        let menu = self.profile_menu_open();
        notifications || menu
    }

    pub fn toggle_notifications(&mut self, listeners: &Listeners) {
        self.profile_menu.close();
        self.notifications_popover.toggle(listeners, "notifications");
        tracing::debug!(open = self.notifications_popover.is_open(), "notifications popover");
    }

    pub fn toggle_profile_menu(&mut self, listeners: &Listeners) {
        self.notifications_popover.close();
        self.menu_highlight = 0;
        self.profile_menu.toggle(listeners, "profile-menu");
        tracing::debug!(open = self.profile_menu.is_open(), "profile menu");
    }

    pub fn close_popovers(&mut self) {
        self.notifications_popover.close();
        self.profile_menu.close();
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.notifications {
            n.read = true;
        }
    }

    /// Keys while a popover is open.
    pub fn handle_popover_key(&mut self, code: KeyCode) -> HeaderAction {
        if self.profile_menu_open() {
            return match code {
                KeyCode::Esc => {
                    self.profile_menu.close();
                    HeaderAction::Consumed
                }
                KeyCode::Up => {
                    self.menu_highlight = self.menu_highlight.saturating_sub(1);
                    HeaderAction::Consumed
                }
                KeyCode::Down => {
                    self.menu_highlight = (self.menu_highlight + 1).min(MENU_ITEMS.len() - 1);
                    HeaderAction::Consumed
                }
                KeyCode::Enter => self.activate_menu_item(self.menu_highlight),
                _ => HeaderAction::None,
            };
        }
        if self.notifications_open() {
            return match code {
                KeyCode::Esc => {
                    self.notifications_popover.close();
                    HeaderAction::Consumed
                }
                KeyCode::Enter | KeyCode::Char('r') => {
                    self.mark_all_read();
                    HeaderAction::Consumed
                }
                _ => HeaderAction::None,
            };
        }
        HeaderAction::None
    }

    fn activate_menu_item(&mut self, index: usize) -> HeaderAction {
        self.profile_menu.close();
        match MENU_ITEMS.get(index).map(|(item, _)| *item) {
            Some(MenuItem::MyProfile) | Some(MenuItem::Settings) => {
                HeaderAction::Navigate("settings")
            }
            Some(MenuItem::SignOut) => HeaderAction::SignOut,
            None => HeaderAction::Consumed,
        }
    }

    /// Mouse click inside the header row or one of its popovers.
    pub fn handle_click(&mut self, column: u16, row: u16, listeners: &Listeners) -> HeaderAction {
        let point = Position::new(column, row);
        let inside = |area: Option<Rect>| area.is_some_and(|a| a.contains(point));

        if inside(self.hamburger_area) {
            return HeaderAction::ToggleSidebar;
        }
        if inside(self.bell_area) {
            self.toggle_notifications(listeners);
            return HeaderAction::Consumed;
        }
        if inside(self.profile_area) {
            self.toggle_profile_menu(listeners);
            return HeaderAction::Consumed;
        }
        if self.profile_menu_open() {
            if let Some(menu) = self.menu_area.filter(|m| m.contains(point)) {
                if row > menu.y && row + 1 < menu.y + menu.height {
                    return self.activate_menu_item((row - menu.y - 1) as usize);
                }
                return HeaderAction::Consumed;
            }
        }
        // Clicks inside an open popover stop here
        if self.notifications_open() && inside(self.notifications_area) {
            return HeaderAction::Consumed;
        }
        HeaderAction::None
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, entry: &NavigationEntry, narrow: bool) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let left = Line::from(vec![
            Span::styled(
                "[≡]",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!("{} {}", entry.icon.glyph(), entry.label),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(left), inner);
        self.hamburger_area = Some(Rect::new(inner.x, inner.y, 3.min(inner.width), 1));

        // Right side: clock, bell, profile. Narrow layouts show initials only.
        let unread = self.unread();
        let bell = if unread > 0 {
            format!("✉ {}", unread)
        } else {
            "✉".to_string()
        };
        let who = if narrow {
            initials(&self.profile_name)
        } else {
            self.profile_name.clone()
        };
        let profile = format!("{} ▾", who);
        let clock = if narrow { String::new() } else { format!("{}  ", self.clock) };

        let bell_w = bell.chars().count() as u16;
        let profile_w = profile.chars().count() as u16;
        let clock_w = clock.chars().count() as u16;
        let total = clock_w + bell_w + 2 + profile_w + 1;
        if inner.width > total + 20 {
            let x = inner.x + inner.width - total;
            let right = Line::from(vec![
                Span::styled(clock, Style::default().fg(Color::DarkGray)),
                Span::styled(
                    bell,
                    Style::default().fg(if unread > 0 { Color::Red } else { Color::Gray }),
                ),
                Span::raw("  "),
                Span::styled(profile, Style::default().fg(Color::White)),
            ]);
            frame.render_widget(Paragraph::new(right), Rect::new(x, inner.y, total, 1));
            self.bell_area = Some(Rect::new(x + clock_w, inner.y, bell_w, 1));
            self.profile_area = Some(Rect::new(x + clock_w + bell_w + 2, inner.y, profile_w, 1));
        } else {
            self.bell_area = None;
            self.profile_area = None;
        }
    }

    /// Draw open popovers on top of everything else.
    pub fn render_popovers(&mut self, frame: &mut Frame) {
        let screen = frame.area();

        self.notifications_area = None;
        if self.notifications_open() {
            if let Some(bell) = self.bell_area {
                let width = 44.min(screen.width);
                let height = (self.notifications.len() as u16 + 3).min(screen.height.saturating_sub(bell.y + 1));
                let x = (bell.x + bell.width).saturating_sub(width).max(screen.x);
                let popup = Rect::new(x, bell.y + 1, width, height);

                let mut lines: Vec<Line> = self
                    .notifications
                    .iter()
                    .map(|n| {
                        let style = if n.read {
                            Style::default().fg(Color::DarkGray)
                        } else {
                            Style::default().fg(Color::White)
                        };
                        Line::from(vec![
                            Span::styled(if n.read { "  " } else { "• " }, Style::default().fg(Color::Red)),
                            Span::styled(n.title, style),
                            Span::styled(format!("  {}", n.age), Style::default().fg(Color::DarkGray)),
                        ])
                    })
                    .collect();
                lines.push(Line::from(Span::styled(
                    "[r] mark all read",
                    Style::default().fg(Color::Yellow),
                )));

                frame.render_widget(Clear, popup);
                frame.render_widget(
                    Paragraph::new(lines).block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(Color::Yellow))
                            .title(" Notifications "),
                    ),
                    popup,
                );
                self.notifications_area = Some(popup);
                self.notifications_popover.set_bounds(&[popup, bell]);
            }
        }

        self.menu_area = None;
        if self.profile_menu_open() {
            if let Some(trigger) = self.profile_area {
                let width = 30.min(screen.width);
                let height = (MENU_ITEMS.len() as u16 + 2).min(screen.height.saturating_sub(trigger.y + 1));
                let x = (trigger.x + trigger.width).saturating_sub(width).max(screen.x);
                let popup = Rect::new(x, trigger.y + 1, width, height);

                let items: Vec<ListItem> = MENU_ITEMS
                    .iter()
                    .map(|(_, label)| ListItem::new(*label))
                    .collect();
                let mut state = ListState::default();
                state.select(Some(self.menu_highlight));

                frame.render_widget(Clear, popup);
                frame.render_stateful_widget(
                    List::new(items)
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .border_style(Style::default().fg(Color::Yellow))
                                .title(format!(" {} ", self.department)),
                        )
                        .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD))
                        .highlight_symbol("› "),
                    popup,
                    &mut state,
                );
                self.menu_area = Some(popup);
                self.profile_menu.set_bounds(&[popup, trigger]);
            }
        }
    }
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter(|w| !w.ends_with('.'))
        .filter_map(|w| w.chars().next())
        .collect()
}

fn default_notifications() -> Vec<Notification> {
    vec![
        Notification {
            title: "Leave request from Arjun Mehta",
            age: "5m",
            read: false,
        },
        Notification {
            title: "12 new submissions: DBMS Lab 4",
            age: "1h",
            read: false,
        },
        Notification {
            title: "E-Office file F-2291 awaiting you",
            age: "3h",
            read: false,
        },
        Notification {
            title: "Faculty meeting moved to 3 PM",
            age: "1d",
            read: true,
        },
    ]
}
