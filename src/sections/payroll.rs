// Payroll: monthly payslips with earnings/deductions breakdown, reimbursement claims

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Cell, Row, TableState},
};

use super::{Section, SectionAction, SectionContext};
use crate::ui::components::{Badge, Card, Tone, first_row, render_table, step_selection};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};
use crate::ui::widgets::{Form, FormEvent};

const TABS: &[TabSpec] = &[
    TabSpec::new("payslips", "Payslips"),
    TabSpec::new("reimbursements", "Reimbursements"),
];

const FIELDS: &[&str] = &["Category", "Amount", "Description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payslip {
    pub month: &'static str,
    pub earnings: &'static [(&'static str, u32)],
    pub deductions: &'static [(&'static str, u32)],
}

impl Payslip {
    pub fn gross(&self) -> u32 {
        self.earnings.iter().map(|(_, amount)| amount).sum()
    }

    pub fn total_deductions(&self) -> u32 {
        self.deductions.iter().map(|(_, amount)| amount).sum()
    }

    pub fn net(&self) -> u32 {
        self.gross().saturating_sub(self.total_deductions())
    }
}

const EARNINGS: &[(&str, u32)] = &[
    ("Basic pay", 98_000),
    ("Dearness allowance", 49_000),
    ("House rent allowance", 23_520),
    ("Transport allowance", 3_600),
];

const DEDUCTIONS: &[(&str, u32)] = &[
    ("Provident fund", 11_760),
    ("Income tax (TDS)", 18_400),
    ("Professional tax", 200),
    ("Group insurance", 120),
];

const PAYSLIPS: &[Payslip] = &[
    Payslip {
        month: "September 2026",
        earnings: EARNINGS,
        deductions: DEDUCTIONS,
    },
    Payslip {
        month: "August 2026",
        earnings: EARNINGS,
        deductions: DEDUCTIONS,
    },
    Payslip {
        month: "July 2026",
        earnings: &[
            ("Basic pay", 98_000),
            ("Dearness allowance", 45_080),
            ("House rent allowance", 23_520),
            ("Transport allowance", 3_600),
        ],
        deductions: DEDUCTIONS,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    Submitted,
    Approved,
    Paid,
}

impl ClaimStatus {
    fn badge(self) -> Cell<'static> {
        match self {
            Self::Submitted => Badge::cell("Submitted", Tone::Warning),
            Self::Approved => Badge::cell("Approved", Tone::Info),
            Self::Paid => Badge::cell("Paid", Tone::Success),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub category: String,
    pub amount: u32,
    pub description: String,
    pub status: ClaimStatus,
}

/// Category and description required; amount a positive whole number of rupees.
pub fn validate(form: &Form) -> Result<Claim, String> {
    let category = form.value(0).trim();
    if category.is_empty() {
        return Err("Category is required".to_string());
    }
    let amount = form
        .value(1)
        .trim()
        .trim_start_matches('₹')
        .replace(',', "")
        .parse::<u32>()
        .ok()
        .filter(|a| *a > 0)
        .ok_or("Amount must be a positive number")?;
    let description = form.value(2).trim();
    if description.is_empty() {
        return Err("Description is required".to_string());
    }
    Ok(Claim {
        category: category.to_string(),
        amount,
        description: description.to_string(),
        status: ClaimStatus::Submitted,
    })
}

pub fn rupees(amount: u32) -> String {
    // Indian digit grouping: last three, then pairs
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();
    format!("₹{},{}", groups.join(","), tail)
}

enum View {
    Payslips(TableState),
    Reimbursements(Form),
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "payslips" => Some(View::Payslips(first_row())),
        "reimbursements" => Some(View::Reimbursements(Form::new(FIELDS))),
        _ => None,
    }
}

pub struct PayrollSection {
    tabs: TabPanel<View>,
    claims: Vec<Claim>,
}

pub fn mount(_ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(PayrollSection::new())
}

impl Default for PayrollSection {
    fn default() -> Self {
        Self::new()
    }
}

impl PayrollSection {
    pub fn new() -> Self {
        Self {
            tabs: TabPanel::new(TABS, "payslips", mount_view),
            claims: vec![
                Claim {
                    category: "Conference travel".to_string(),
                    amount: 18_450,
                    description: "VLDB 2026 airfare".to_string(),
                    status: ClaimStatus::Approved,
                },
                Claim {
                    category: "Books".to_string(),
                    amount: 3_200,
                    description: "Reference texts for CS410".to_string(),
                    status: ClaimStatus::Paid,
                },
            ],
        }
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Payslip under the cursor on the Payslips tab.
    pub fn selected_payslip(&self) -> Option<&'static Payslip> {
        match self.tabs.content() {
            Some(View::Payslips(state)) => state.selected().and_then(|i| PAYSLIPS.get(i)),
            _ => None,
        }
    }
}

fn render_breakdown(frame: &mut Frame, area: Rect, slip: &Payslip) {
    let rows = slip
        .earnings
        .iter()
        .map(|(label, amount)| {
            Row::new(vec![
                Cell::from(*label),
                Badge::cell(format!("+{}", rupees(*amount)), Tone::Success),
            ])
        })
        .chain(slip.deductions.iter().map(|(label, amount)| {
            Row::new(vec![
                Cell::from(*label),
                Badge::cell(format!("-{}", rupees(*amount)), Tone::Danger),
            ])
        }))
        .collect();
    let title = format!("Breakdown: {}", slip.month);
    render_table(
        frame,
        area,
        &title,
        &["Component", "Amount"],
        &[Constraint::Min(20), Constraint::Length(12)],
        rows,
        &mut TableState::default(),
    );
}

impl Section for PayrollSection {
    fn key(&self) -> &'static str {
        "payroll"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn is_editing(&self) -> bool {
        matches!(self.tabs.content(), Some(View::Reimbursements(form)) if form.editing)
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Reimbursements(_)) => &[("[Enter]", "Edit"), ("[s]", "Submit claim")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        match self.tabs.content_mut() {
            Some(View::Payslips(state)) => {
                let slip = state.selected().and_then(|i| PAYSLIPS.get(i));
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(4), Constraint::Min(0)])
                    .split(area);
                let cards = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Ratio(1, 3); 3])
                    .split(chunks[0]);
                if let Some(slip) = slip {
                    frame.render_widget(Card::new("Gross", rupees(slip.gross()), slip.month), cards[0]);
                    frame.render_widget(
                        Card::new("Deductions", rupees(slip.total_deductions()), slip.month)
                            .tone(Tone::Danger),
                        cards[1],
                    );
                    frame.render_widget(
                        Card::new("Net pay", rupees(slip.net()), "credited").tone(Tone::Success),
                        cards[2],
                    );
                }

                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .split(chunks[1]);
                let rows = PAYSLIPS
                    .iter()
                    .map(|p| Row::new(vec![Cell::from(p.month), Cell::from(rupees(p.net()))]))
                    .collect();
                render_table(
                    frame,
                    cols[0],
                    "Payslips",
                    &["Month", "Net"],
                    &[Constraint::Min(15), Constraint::Length(12)],
                    rows,
                    state,
                );
                if let Some(slip) = slip {
                    render_breakdown(frame, cols[1], slip);
                }
            }
            Some(View::Reimbursements(form)) => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(9), Constraint::Min(0)])
                    .split(area);
                form.render(frame, chunks[0], "New Claim", "Submit claim");
                let rows = self
                    .claims
                    .iter()
                    .map(|c| {
                        Row::new(vec![
                            Cell::from(c.category.clone()),
                            Cell::from(c.description.clone()),
                            Cell::from(rupees(c.amount)),
                            c.status.badge(),
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    chunks[1],
                    "Claims",
                    &["Category", "Description", "Amount", "Status"],
                    &[
                        Constraint::Length(18),
                        Constraint::Min(20),
                        Constraint::Length(10),
                        Constraint::Length(11),
                    ],
                    rows,
                    &mut TableState::default(),
                );
            }
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        match self.tabs.content_mut() {
            Some(View::Payslips(state)) => {
                match key.code {
                    KeyCode::Up => step_selection(state, PAYSLIPS.len(), -1),
                    KeyCode::Down => step_selection(state, PAYSLIPS.len(), 1),
                    _ => return SectionAction::Ignored,
                }
                SectionAction::Consumed
            }
            Some(View::Reimbursements(form)) => match form.handle_key(key) {
                FormEvent::Submit => {
                    match validate(form) {
                        Ok(claim) => {
                            tracing::info!(amount = claim.amount, category = %claim.category, "reimbursement claimed");
                            form.succeed(format!("Claim for {} submitted", rupees(claim.amount)));
                            self.claims.insert(0, claim);
                        }
                        Err(error) => form.fail(error),
                    }
                    SectionAction::Consumed
                }
                FormEvent::Consumed => SectionAction::Consumed,
                FormEvent::Ignored => SectionAction::Ignored,
            },
            None => SectionAction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press, type_text};

    fn form(category: &str, amount: &str, description: &str) -> Form {
        let mut form = Form::new(FIELDS);
        form.field_mut(0).unwrap().set_value(category);
        form.field_mut(1).unwrap().set_value(amount);
        form.field_mut(2).unwrap().set_value(description);
        form
    }

    #[test]
    fn test_default_sub_tab_is_payslips() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "payslips");
    }

    #[test]
    fn test_net_pay() {
        let slip = &PAYSLIPS[0];
        assert_eq!(slip.gross(), 174_120);
        assert_eq!(slip.total_deductions(), 30_480);
        assert_eq!(slip.net(), 143_640);
    }

    #[test]
    fn test_rupee_grouping() {
        assert_eq!(rupees(950), "₹950");
        assert_eq!(rupees(3_200), "₹3,200");
        assert_eq!(rupees(143_640), "₹1,43,640");
        assert_eq!(rupees(12_345_678), "₹1,23,45,678");
    }

    #[test]
    fn test_selection_moves_breakdown() {
        let mut section = PayrollSection::new();
        assert_eq!(section.selected_payslip().map(|p| p.month), Some("September 2026"));
        press(&mut section, KeyCode::Down);
        press(&mut section, KeyCode::Down);
        assert_eq!(section.selected_payslip().map(|p| p.month), Some("July 2026"));
    }

    #[test]
    fn test_claim_validation() {
        assert_eq!(
            validate(&form("Travel", "0", "Cab")).unwrap_err(),
            "Amount must be a positive number"
        );
        assert_eq!(validate(&form("Travel", "₹1,250", "Cab")).unwrap().amount, 1_250);
        assert!(validate(&form("", "100", "Cab")).is_err());
        assert!(validate(&form("Travel", "100", " ")).is_err());
    }

    #[test]
    fn test_submit_claim() {
        let mut section = PayrollSection::new();
        press(&mut section, KeyCode::Right);
        press(&mut section, KeyCode::Enter);
        type_text(&mut section, "Internet");
        press(&mut section, KeyCode::Enter);
        press(&mut section, KeyCode::Enter);
        type_text(&mut section, "999");
        press(&mut section, KeyCode::Enter);
        press(&mut section, KeyCode::Enter);
        type_text(&mut section, "Home broadband, Sept");
        press(&mut section, KeyCode::Esc);
        press(&mut section, KeyCode::Char('s'));

        assert_eq!(section.claims().len(), 3);
        assert_eq!(section.claims()[0].status, ClaimStatus::Submitted);
        assert_eq!(section.claims()[0].amount, 999);
    }
}
