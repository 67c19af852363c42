// Messages: inbox with read state, compose, sent folder

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, TableState, Wrap},
};

use super::{Section, SectionAction, SectionContext};
use crate::ui::components::{first_row, render_table, step_selection};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};
use crate::ui::widgets::{Form, FormEvent};

const TABS: &[TabSpec] = &[
    TabSpec::new("inbox", "Inbox"),
    TabSpec::new("compose", "Compose"),
    TabSpec::new("sent", "Sent"),
];

const FIELDS: &[&str] = &["To", "Subject", "Message"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub time: String,
    pub read: bool,
}

enum View {
    Inbox(TableState),
    Compose(Form),
    Sent(TableState),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "inbox" => Some(View::Inbox(first_row())),
        "compose" => Some(View::Compose(Form::new(FIELDS))),
        "sent" => Some(View::Sent(first_row())),
        _ => None,
    }
}

pub struct MessagesSection {
    tabs: TabPanel<View>,
    inbox: Vec<Message>,
    sent: Vec<Message>,
    sender: String,
}

pub fn mount(ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(MessagesSection::new(&ctx.profile.email))
}

impl MessagesSection {
    pub fn new(sender: &str) -> Self {
        Self {
            tabs: TabPanel::new(TABS, "inbox", mount_view),
            inbox: sample_inbox(),
            sent: sample_sent(sender),
            sender: sender.to_string(),
        }
    }

    pub fn unread(&self) -> usize {
        self.inbox.iter().filter(|m| !m.read).count()
    }

    pub fn inbox(&self) -> &[Message] {
        &self.inbox
    }

    pub fn sent(&self) -> &[Message] {
        &self.sent
    }
}

/// Recipient and body required; subject defaults to "(no subject)".
pub fn validate(form: &Form, sender: &str) -> Result<Message, String> {
    let to = form.value(0).trim();
    if to.is_empty() {
        return Err("Recipient is required".to_string());
    }
    let body = form.value(2).trim();
    if body.is_empty() {
        return Err("Message body is required".to_string());
    }
    let subject = match form.value(1).trim() {
        "" => "(no subject)",
        s => s,
    };
    Ok(Message {
        from: sender.to_string(),
        to: to.to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
        time: "Just now".to_string(),
        read: true,
    })
}

fn render_preview(frame: &mut Frame, area: Rect, message: Option<&Message>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Preview ");
    let lines = match message {
        Some(m) => vec![
            Line::from(Span::styled(
                m.subject.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} → {}  ·  {}", m.from, m.to, m.time),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(m.body.clone()),
        ],
        None => vec![Line::from(Span::styled(
            "No message selected",
            Style::default().fg(Color::DarkGray),
        ))],
    };
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn split_list_preview(area: Rect) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Min(5)])
        .split(area);
    [chunks[0], chunks[1]]
}

impl Section for MessagesSection {
    fn key(&self) -> &'static str {
        "messages"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn is_editing(&self) -> bool {
        matches!(self.tabs.content(), Some(View::Compose(form)) if form.editing)
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Inbox(_)) => &[("[Enter]", "Open"), ("[u]", "Mark unread")],
            Some(View::Compose(_)) => &[("[Enter]", "Edit"), ("[s]", "Send")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        let unread = self.unread();
        match self.tabs.content_mut() {
            Some(View::Inbox(state)) => {
                let [list, preview] = split_list_preview(area);
                let rows = self
                    .inbox
                    .iter()
                    .map(|m| {
                        let style = if m.read {
                            Style::default().fg(Color::Gray)
                        } else {
                            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                        };
                        Row::new(vec![
                            Cell::from(if m.read { " " } else { "●" }),
                            Cell::from(m.from.clone()),
                            Cell::from(m.subject.clone()),
                            Cell::from(m.time.clone()),
                        ])
                        .style(style)
                    })
                    .collect();
                render_table(
                    frame,
                    list,
                    &format!("Inbox ({} unread)", unread),
                    &["", "From", "Subject", "Received"],
                    &[
                        Constraint::Length(1),
                        Constraint::Length(20),
                        Constraint::Min(20),
                        Constraint::Length(10),
                    ],
                    rows,
                    state,
                );
                render_preview(frame, preview, state.selected().and_then(|i| self.inbox.get(i)));
            }
            Some(View::Compose(form)) => {
                form.render(frame, area, "New Message", "Send");
            }
            Some(View::Sent(state)) => {
                let [list, preview] = split_list_preview(area);
                let rows = self
                    .sent
                    .iter()
                    .map(|m| {
                        Row::new(vec![
                            Cell::from(m.to.clone()),
                            Cell::from(m.subject.clone()),
                            Cell::from(m.time.clone()),
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    list,
                    "Sent",
                    &["To", "Subject", "Sent"],
                    &[
                        Constraint::Length(24),
                        Constraint::Min(20),
                        Constraint::Length(10),
                    ],
                    rows,
                    state,
                );
                render_preview(frame, preview, state.selected().and_then(|i| self.sent.get(i)));
            }
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        let inbox_len = self.inbox.len();
        let sent_len = self.sent.len();
        match self.tabs.content_mut() {
            Some(View::Inbox(state)) => match key.code {
                KeyCode::Up => {
                    step_selection(state, inbox_len, -1);
                    SectionAction::Consumed
                }
                KeyCode::Down => {
                    step_selection(state, inbox_len, 1);
                    SectionAction::Consumed
                }
                KeyCode::Enter => {
                    if let Some(m) = state.selected().and_then(|i| self.inbox.get_mut(i)) {
                        m.read = true;
                    }
                    SectionAction::Consumed
                }
                KeyCode::Char('u') => {
                    if let Some(m) = state.selected().and_then(|i| self.inbox.get_mut(i)) {
                        m.read = false;
                    }
                    SectionAction::Consumed
                }
                _ => SectionAction::Ignored,
            },
            Some(View::Compose(form)) => match form.handle_key(key) {
                FormEvent::Submit => {
                    match validate(form, &self.sender) {
                        Ok(message) => {
                            tracing::info!(to = %message.to, "message sent");
                            form.succeed(format!("Sent to {}", message.to));
                            self.sent.insert(0, message);
                        }
                        Err(error) => form.fail(error),
                    }
                    SectionAction::Consumed
                }
                FormEvent::Consumed => SectionAction::Consumed,
                FormEvent::Ignored => SectionAction::Ignored,
            },
            Some(View::Sent(state)) => match key.code {
                KeyCode::Up => {
                    step_selection(state, sent_len, -1);
                    SectionAction::Consumed
                }
                KeyCode::Down => {
                    step_selection(state, sent_len, 1);
                    SectionAction::Consumed
                }
                _ => SectionAction::Ignored,
            },
            None => SectionAction::Ignored,
        }
    }
}

fn message(from: &str, to: &str, subject: &str, body: &str, time: &str, read: bool) -> Message {
    Message {
        from: from.to_string(),
        to: to.to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
        time: time.to_string(),
        read,
    }
}

fn sample_inbox() -> Vec<Message> {
    vec![
        message(
            "HOD, CSE",
            "me",
            "Faculty meeting moved to 3 PM",
            "The department meeting on Wednesday is now at 3 PM in the seminar hall.",
            "09:12",
            false,
        ),
        message(
            "Exam Cell",
            "me",
            "Mid-sem question paper deadline",
            "Please upload CS301 mid-semester papers to the exam portal by Friday.",
            "Yesterday",
            false,
        ),
        message(
            "Ananya Rao",
            "me",
            "Doubt in normalization",
            "Could we discuss BCNF decomposition during office hours tomorrow?",
            "Yesterday",
            false,
        ),
        message(
            "Library",
            "me",
            "Book due reminder",
            "'Database System Concepts' is due on 25 Oct.",
            "Mon",
            true,
        ),
    ]
}

fn sample_sent(sender: &str) -> Vec<Message> {
    vec![message(
        sender,
        "CS301 students",
        "Lab 4 instructions",
        "Lab 4 will be held in Lab C. Bring your ER diagrams.",
        "Fri",
        true,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press, type_text};

    fn section() -> MessagesSection {
        MessagesSection::new("priya.sharma@campus.edu")
    }

    #[test]
    fn test_default_sub_tab_is_inbox() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "inbox");
    }

    #[test]
    fn test_open_marks_read() {
        let mut section = section();
        assert_eq!(section.unread(), 3);
        press(&mut section, KeyCode::Enter);
        assert_eq!(section.unread(), 2);
        press(&mut section, KeyCode::Char('u'));
        assert_eq!(section.unread(), 3);
    }

    #[test]
    fn test_compose_requires_recipient_and_body() {
        let mut form = Form::new(FIELDS);
        assert_eq!(validate(&form, "me").unwrap_err(), "Recipient is required");
        form.field_mut(0).unwrap().set_value("hod@campus.edu");
        assert_eq!(validate(&form, "me").unwrap_err(), "Message body is required");
        form.field_mut(2).unwrap().set_value("Noted.");
        assert_eq!(validate(&form, "me").unwrap().subject, "(no subject)");
    }

    #[test]
    fn test_send_moves_to_sent_and_compose_is_not_kept() {
        let mut section = section();
        section.tabs.set_active("compose");
        press(&mut section, KeyCode::Enter);
        type_text(&mut section, "hod@campus.edu");
        press(&mut section, KeyCode::Enter); // next field
        press(&mut section, KeyCode::Down);
        press(&mut section, KeyCode::Enter);
        type_text(&mut section, "Will attend.");
        press(&mut section, KeyCode::Esc);
        press(&mut section, KeyCode::Char('s'));
        assert_eq!(section.sent().len(), 2);
        assert_eq!(section.sent()[0].to, "hod@campus.edu");

        // A draft typed and abandoned is gone after a round trip
        press(&mut section, KeyCode::Enter);
        type_text(&mut section, "draft@campus.edu");
        press(&mut section, KeyCode::Esc);
        press(&mut section, KeyCode::Right);
        press(&mut section, KeyCode::Left);
        match section.tabs.content() {
            Some(View::Compose(form)) => assert_eq!(form.value(0), ""),
            _ => panic!("compose not mounted"),
        }
    }
}
