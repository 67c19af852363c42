// Headless rendering for the `render` subcommand and tests

use anyhow::{Context, Result};
use chrono::NaiveDate;
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

use crate::config::Config;
use crate::ui::shell::Shell;
use crate::ui::state::AppState;
use crate::ui::viewport::Viewport;

/// Draw one frame of the shell with `tab` active and return it as text.
pub fn render_frame(
    config: &Config,
    tab: &str,
    width: u16,
    height: u16,
    today: NaiveDate,
) -> Result<String> {
    let viewport = Viewport::new(width, height, config.layout.narrow_breakpoint);
    let mut state = AppState::new(config, viewport, today);
    if !state.router.registry().contains(tab) {
        anyhow::bail!("unknown section '{}' (see `facdash sections`)", tab);
    }
    state.select(tab);
    draw(&mut state)
}

/// Draw the current state into an off-screen buffer sized to its viewport.
pub fn draw(state: &mut AppState) -> Result<String> {
    let backend = TestBackend::new(state.viewport.width, state.viewport.height);
    let mut terminal = Terminal::new(backend).context("Failed to create headless terminal")?;
    terminal
        .draw(|frame| Shell::render(frame, state))
        .context("Failed to draw frame")?;
    Ok(buffer_text(terminal.backend().buffer()))
}

pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_render_frame_shows_active_section() {
        let text = render_frame(&Config::default(), "leave", 140, 40, today()).unwrap();
        assert!(text.contains("[≡]"));
        assert!(text.contains("FACULTY PORTAL"));
        assert!(text.contains("Apply"));
    }

    #[test]
    fn test_render_frame_rejects_unknown_tab() {
        assert!(render_frame(&Config::default(), "cafeteria", 80, 24, today()).is_err());
    }
}
