// Utilities: household bills and monthly usage

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, TableState},
};

use super::{Section, SectionAction, SectionContext};
use crate::ui::components::{Badge, Tone, first_row, render_table, step_selection};
use crate::ui::tabs::{TabBar, TabPanel, TabSpec};
use crate::ui::widgets::{EnhancedProgress, ProgressState};

const TABS: &[TabSpec] = &[TabSpec::new("bills", "Bills"), TabSpec::new("usage", "Usage")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bill {
    pub utility: &'static str,
    pub period: &'static str,
    pub amount: u32,
    pub due: &'static str,
    pub paid: bool,
}

/// Usage against the monthly allowance: name, used, allowance, unit.
const USAGE: &[(&str, u32, u32, &str)] = &[
    ("Electricity", 212, 300, "kWh"),
    ("Water", 9_400, 12_000, "L"),
    ("Piped gas", 11, 12, "SCM"),
    ("Internet", 148, 200, "GB"),
];

enum View {
    Bills(TableState),
    Usage,
}

fn mount_view(key: &str) -> Option<View> {
    match key {
        "bills" => Some(View::Bills(first_row())),
        "usage" => Some(View::Usage),
        _ => None,
    }
}

pub struct UtilitiesSection {
    tabs: TabPanel<View>,
    bills: Vec<Bill>,
}

pub fn mount(_ctx: &SectionContext) -> Box<dyn Section> {
    Box::new(UtilitiesSection::new())
}

impl Default for UtilitiesSection {
    fn default() -> Self {
        Self::new()
    }
}

impl UtilitiesSection {
    pub fn new() -> Self {
        Self {
            tabs: TabPanel::new(TABS, "bills", mount_view),
            bills: sample_bills(),
        }
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn outstanding(&self) -> u32 {
        self.bills.iter().filter(|b| !b.paid).map(|b| b.amount).sum()
    }
}

fn render_usage(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" This Month ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = USAGE
        .iter()
        .flat_map(|_| [Constraint::Length(1), Constraint::Length(1)])
        .collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, (name, used, allowance, unit)) in USAGE.iter().enumerate() {
        let percent = (used * 100 / allowance).min(100) as u16;
        // Near the allowance is the warning case here, not below it
        let state = if percent >= 90 {
            ProgressState::AtRisk
        } else {
            ProgressState::OnTrack
        };
        frame.render_widget(EnhancedProgress::new(name, percent, state), rows[i * 2]);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("{:16}{} / {} {}", "", used, allowance, unit),
                Style::default().fg(Color::DarkGray),
            ))),
            rows[i * 2 + 1],
        );
    }
}

impl Section for UtilitiesSection {
    fn key(&self) -> &'static str {
        "utilities"
    }

    fn tabs(&self) -> &dyn TabBar {
        &self.tabs
    }

    fn tabs_mut(&mut self) -> &mut dyn TabBar {
        &mut self.tabs
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.tabs.content() {
            Some(View::Bills(_)) => &[("[y]", "Pay")],
            _ => &[],
        }
    }

    fn render_view(&mut self, frame: &mut Frame, area: Rect) {
        let outstanding = self.outstanding();
        match self.tabs.content_mut() {
            Some(View::Bills(state)) => {
                let rows = self
                    .bills
                    .iter()
                    .map(|b| {
                        Row::new(vec![
                            Cell::from(b.utility),
                            Cell::from(b.period),
                            Cell::from(format!("₹{}", b.amount)),
                            Cell::from(b.due),
                            if b.paid {
                                Badge::cell("Paid", Tone::Success)
                            } else {
                                Badge::cell("Due", Tone::Danger)
                            },
                        ])
                    })
                    .collect();
                render_table(
                    frame,
                    area,
                    &format!("Bills (₹{} outstanding)", outstanding),
                    &["Utility", "Period", "Amount", "Due", "Status"],
                    &[
                        Constraint::Length(12),
                        Constraint::Length(10),
                        Constraint::Length(9),
                        Constraint::Length(8),
                        Constraint::Min(6),
                    ],
                    rows,
                    state,
                );
            }
            Some(View::Usage) => render_usage(frame, area),
            None => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> SectionAction {
        let len = self.bills.len();
        let Some(View::Bills(state)) = self.tabs.content_mut() else {
            return SectionAction::Ignored;
        };
        match key.code {
            KeyCode::Up => step_selection(state, len, -1),
            KeyCode::Down => step_selection(state, len, 1),
            KeyCode::Char('y') => {
                if let Some(bill) = state.selected().and_then(|i| self.bills.get_mut(i)) {
                    if !bill.paid {
                        bill.paid = true;
                        tracing::info!(utility = bill.utility, amount = bill.amount, "bill paid");
                    }
                }
            }
            _ => return SectionAction::Ignored,
        }
        SectionAction::Consumed
    }
}

fn sample_bills() -> Vec<Bill> {
    let bill = |utility, period, amount, due, paid| Bill {
        utility,
        period,
        amount,
        due,
        paid,
    };
    vec![
        bill("Electricity", "Sep 2026", 1_840, "25 Oct", false),
        bill("Water", "Sep 2026", 320, "25 Oct", false),
        bill("Piped gas", "Sep 2026", 610, "28 Oct", false),
        bill("Internet", "Oct 2026", 799, "05 Oct", true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::{ctx, press};

    #[test]
    fn test_default_sub_tab_is_bills() {
        assert_eq!(mount(&ctx()).active_sub_tab(), "bills");
    }

    #[test]
    fn test_pay_bill_reduces_outstanding() {
        let mut section = UtilitiesSection::new();
        assert_eq!(section.outstanding(), 2_770);
        press(&mut section, KeyCode::Char('y'));
        assert!(section.bills()[0].paid);
        assert_eq!(section.outstanding(), 930);

        // Paying twice changes nothing
        press(&mut section, KeyCode::Char('y'));
        assert_eq!(section.outstanding(), 930);
    }
}
