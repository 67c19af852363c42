// Labelled progress bar with colour by status

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    OnTrack,
    AtRisk,
    Complete,
}

impl ProgressState {
    /// Classify a percentage against a warning threshold.
    pub fn classify(percent: u16, warn_below: u16) -> Self {
        if percent >= 100 {
            Self::Complete
        } else if percent < warn_below {
            Self::AtRisk
        } else {
            Self::OnTrack
        }
    }
}

pub struct EnhancedProgress<'a> {
    label: &'a str,
    percent: u16,
    state: ProgressState,
}

impl<'a> EnhancedProgress<'a> {
    pub fn new(label: &'a str, percent: u16, state: ProgressState) -> Self {
        Self {
            label,
            percent: percent.min(100),
            state,
        }
    }
}

impl Widget for EnhancedProgress<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_width = 16u16.min(area.width);
        let suffix = format!(" {:>3}%", self.percent);
        let bar_width = area
            .width
            .saturating_sub(label_width + suffix.len() as u16);

        buf.set_line(
            area.x,
            area.y,
            &Line::from(Span::styled(
                format!("{:<16}", self.label),
                Style::default().fg(Color::Gray),
            )),
            label_width,
        );

        let fg = match self.state {
            ProgressState::OnTrack => Color::Cyan,
            ProgressState::AtRisk => Color::Red,
            ProgressState::Complete => Color::Green,
        };
        let ratio = self.percent as f64 / 100.0;
        let filled_width = (bar_width as f64 * ratio).round() as u16;
        let bar_x = area.x + label_width;

        for x in 0..bar_width {
            let (symbol, color) = if x < filled_width {
                ("█", fg)
            } else {
                ("░", Color::DarkGray)
            };
            buf.set_string(bar_x + x, area.y, symbol, Style::default().fg(color));
        }

        buf.set_string(
            bar_x + bar_width,
            area.y,
            suffix,
            Style::default().fg(Color::White),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(ProgressState::classify(100, 75), ProgressState::Complete);
        assert_eq!(ProgressState::classify(74, 75), ProgressState::AtRisk);
        assert_eq!(ProgressState::classify(75, 75), ProgressState::OnTrack);
    }
}
