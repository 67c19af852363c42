// E-Office: file movement, approvals queue, drafts
//
// The Files sub-view nests a second tab panel (incoming/outgoing).

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Cell, Row, TableState},
};

use super::{Section, SectionAction, SectionContext};
use crate::ui::components::{Badge, Tone, first_row, render_tab_bar, render_table, step_selection};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};

const TABS: &[TabSpec] = &[
    TabSpec::new("files", "Files"),
    TabSpec::new("approvals", "Approvals"),
    TabSpec::new("drafts", "Drafts"),
];

const FILE_TABS: &[TabSpec] = &[
    TabSpec::new("incoming", "Incoming"),
    TabSpec::new("outgoing", "Outgoing"),
];

/// Next desk a forwarded file goes to.
const FORWARD_TO: &str = "Dean (Academics)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficeFile {
    pub number: &'static str,
    pub subject: &'static str,
    pub counterpart: String,
    pub received: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Pending,
    Approved,
    Returned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalItem {
    pub title: &'static str,
    pub from: &'static str,
    pub amount: Option<u32>,
    pub decision: Decision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draft {
    pub title: &'static str,
    pub edited: &'static str,
}

enum FileView {
    Incoming(TableState),
    Outgoing(TableState),
}

fn mount_file_view(key: &str) -> Option<FileView> {
    match key {
        "incoming" => Some(FileView::Incoming(first_row())),
        "outgoing" => Some(FileView::Outgoing(first_row())),
        _ => None,
    }
}

enum View {
    Files(TabPanel<FileView>),
    Approvals(TableState),
    Drafts(TableState),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "files" => Some(View::Files(TabPanel::new(FILE_TABS, "incoming", mount_file_view))),
        "approvals" => Some(View::Approvals(first_row())),
        "drafts" => Some(View::Drafts(first_row())),
        _ => None,
    }
}

pub struct EOfficeSection {
    tabs: TabPanel<View>,
    incoming: Vec<OfficeFile>,
    outgoing: Vec<OfficeFile>,
    approvals: Vec<ApprovalItem>,
    drafts: Vec<Draft>,
}

pub fn mount(_ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(EOfficeSection::new())
}

impl Default for EOfficeSection {
    fn default() -> Self {
        Self::new()
    }
}

impl EOfficeSection {
    pub fn new() -> Self {
        Self {
            tabs: TabPanel::new(TABS, "files", mount_view),
            incoming: sample_incoming(),
            outgoing: sample_outgoing(),
            approvals: sample_approvals(),
            drafts: sample_drafts(),
        }
    }

    pub fn incoming(&self) -> &[OfficeFile] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[OfficeFile] {
        &self.outgoing
    }

    pub fn approvals(&self) -> &[ApprovalItem] {
        &self.approvals
    }

    /// Active key of the nested Files panel, if Files is mounted.
    pub fn files_tab(&self) -> Option<&str> {
        match self.tabs.content() {
            Some(View::Files(panel)) => Some(panel.active_key()),
            _ => None,
        }
    }

    fn forward(&mut self, index: usize) {
        if index < self.incoming.len() {
            let mut file = self.incoming.remove(index);
            tracing::info!(number = file.number, to = FORWARD_TO, "file forwarded");
            file.counterpart = FORWARD_TO.to_string();
            file.received = "Today";
            self.outgoing.insert(0, file);
        }
    }
}

fn file_rows(files: &[OfficeFile]) -> Vec<Row<'static>> {
    files
        .iter()
        .map(|f| {
            Row::new(vec![
                Cell::from(f.number),
                Cell::from(f.subject),
                Cell::from(f.counterpart.clone()),
                Cell::from(f.received),
            ])
        })
        .collect()
}

const FILE_WIDTHS: &[Constraint] = &[
    Constraint::Length(16),
    Constraint::Min(24),
    Constraint::Length(20),
    Constraint::Length(8),
];

fn decision_badge(decision: Decision) -> Cell<'static> {
    match decision {
        Decision::Pending => Badge::cell("Pending", Tone::Warning),
        Decision::Approved => Badge::cell("Approved", Tone::Success),
        Decision::Returned => Badge::cell("Returned", Tone::Danger),
    }
}

impl Section for EOfficeSection {
    fn key(&self) -> &'static str {
        "e-office"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Files(_)) => &[("[i/o]", "In/Out"), ("[f]", "Forward")],
            Some(View::Approvals(_)) => &[("[a]", "Approve"), ("[r]", "Return")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        match self.tabs.content_mut() {
            Some(View::Files(panel)) => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Min(0)])
                    .split(area);
                render_tab_bar(frame, rows[0], panel);
                match panel.content_mut() {
                    Some(FileView::Incoming(state)) => render_table(
                        frame,
                        rows[1],
                        "Incoming Files",
                        &["File No.", "Subject", "From", "Received"],
                        FILE_WIDTHS,
                        file_rows(&self.incoming),
                        state,
                    ),
                    Some(FileView::Outgoing(state)) => render_table(
                        frame,
                        rows[1],
                        "Outgoing Files",
                        &["File No.", "Subject", "Sent to", "Sent"],
                        FILE_WIDTHS,
                        file_rows(&self.outgoing),
                        state,
                    ),
                    None => {}
                }
            }
            Some(View::Approvals(state)) => {
                let rows = self
                    .approvals
                    .iter()
                    .map(|a| {
                        Row::new(vec![
                            Cell::from(a.title),
                            Cell::from(a.from),
                            Cell::from(a.amount.map(|v| format!("₹{}", v)).unwrap_or_default()),
                            decision_badge(a.decision),
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    "Awaiting Approval",
                    &["Item", "From", "Amount", "Status"],
                    &[
                        Constraint::Min(24),
                        Constraint::Length(18),
                        Constraint::Length(10),
                        Constraint::Length(9),
                    ],
                    rows,
                    state,
                );
            }
            Some(View::Drafts(state)) => {
                let rows = self
                    .drafts
                    .iter()
                    .map(|d| Row::new(vec![Cell::from(d.title), Cell::from(d.edited)]))
                    .collect();
                render_table(
                    frame,
                    area,
                    "Drafts",
                    &["Title", "Last edited"],
                    &[Constraint::Min(30), Constraint::Length(12)],
                    rows,
                    state,
                );
            }
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        let incoming_len = self.incoming.len();
        let outgoing_len = self.outgoing.len();
        let approvals_len = self.approvals.len();
        let drafts_len = self.drafts.len();

        match self.tabs.content_mut() {
            Some(View::Files(panel)) => {
                match key.code {
                    KeyCode::Char('i') => panel.set_active("incoming"),
                    KeyCode::Char('o') => panel.set_active("outgoing"),
                    KeyCode::Char('f') => {
                        let selected = match panel.content() {
                            Some(FileView::Incoming(state)) => state.selected(),
                            _ => None,
                        };
                        if let Some(index) = selected {
                            self.forward(index);
                            let remaining = self.incoming.len();
                            if let Some(View::Files(panel)) = self.tabs.content_mut() {
                                if let Some(FileView::Incoming(state)) = panel.content_mut() {
                                    step_selection(state, remaining, 0);
                                }
                            }
                        }
                    }
                    KeyCode::Up | KeyCode::Down => {
                        let delta = if key.code == KeyCode::Up { -1 } else { 1 };
                        match panel.content_mut() {
                            Some(FileView::Incoming(state)) => step_selection(state, incoming_len, delta),
                            Some(FileView::Outgoing(state)) => step_selection(state, outgoing_len, delta),
                            None => {}
                        }
                    }
                    _ => return SectionAction::Ignored,
                }
                SectionAction::Consumed
            }
            Some(View::Approvals(state)) => {
                let decision = match key.code {
                    KeyCode::Up => {
                        step_selection(state, approvals_len, -1);
                        return SectionAction::Consumed;
                    }
                    KeyCode::Down => {
                        step_selection(state, approvals_len, 1);
                        return SectionAction::Consumed;
                    }
                    KeyCode::Char('a') => Decision::Approved,
                    KeyCode::Char('r') => Decision::Returned,
                    _ => return SectionAction::Ignored,
                };
                if let Some(item) = state.selected().and_then(|i| self.approvals.get_mut(i)) {
                    if item.decision == Decision::Pending {
                        item.decision = decision;
                        tracing::info!(item = item.title, ?decision, "e-office item decided");
                    }
                }
                SectionAction::Consumed
            }
            Some(View::Drafts(state)) => {
                match key.code {
                    KeyCode::Up => step_selection(state, drafts_len, -1),
                    KeyCode::Down => step_selection(state, drafts_len, 1),
                    _ => return SectionAction::Ignored,
                }
                SectionAction::Consumed
            }
            None => SectionAction::Ignored,
        }
    }

    fn handle_view_click(&mut self, mouse: MouseEvent) -> SectionAction {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return SectionAction::Ignored;
        }
        match self.tabs.content_mut() {
            Some(View::Files(panel)) => match panel.hit(mouse.column, mouse.row) {
                Some(key) => {
                    panel.set_active(key);
                    SectionAction::Consumed
                }
                None => SectionAction::Ignored,
            },
            _ => SectionAction::Ignored,
        }
    }
}

fn office_file(
    number: &'static str,
    subject: &'static str,
    counterpart: &str,
    received: &'static str,
) -> OfficeFile {
    OfficeFile {
        number,
        subject,
        counterpart: counterpart.to_string(),
        received,
    }
}

fn sample_incoming() -> Vec<OfficeFile> {
    vec![
        office_file("CSE/ACAD/2026/114", "Elective allocation, odd semester", "Registrar", "Today"),
        office_file("CSE/PUR/2026/052", "GPU workstation purchase", "Purchase Cell", "Mon"),
        office_file("CSE/HR/2026/019", "Guest faculty renewal", "HR Office", "12 Oct"),
    ]
}

fn sample_outgoing() -> Vec<OfficeFile> {
    vec![office_file(
        "CSE/ACAD/2026/101",
        "Lab timetable revision",
        "HOD, CSE",
        "09 Oct",
    )]
}

fn sample_approvals() -> Vec<ApprovalItem> {
    vec![
        ApprovalItem {
            title: "Conference travel: R. Iyer",
            from: "PhD scholar",
            amount: Some(18500),
            decision: Decision::Pending,
        },
        ApprovalItem {
            title: "Lab consumables indent",
            from: "Lab assistant",
            amount: Some(6200),
            decision: Decision::Pending,
        },
        ApprovalItem {
            title: "Project extension: Team 7",
            from: "B.Tech students",
            amount: None,
            decision: Decision::Pending,
        },
    ]
}

fn sample_drafts() -> Vec<Draft> {
    vec![
        Draft {
            title: "Proposal: AI ethics elective",
            edited: "Yesterday",
        },
        Draft {
            title: "Note on lab safety audit",
            edited: "08 Oct",
        },
    ]
}
