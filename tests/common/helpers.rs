#![allow(dead_code)] // Not every test binary uses every helper

use chrono::NaiveDate;
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use facdash::config::Config;
use facdash::ui::shell::Shell;
use facdash::ui::{AppState, Viewport};
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, layout::Rect};

pub const WIDE: u16 = 140;
pub const NARROW: u16 = 80;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

/// Shell state at `width` x 40 with the default config.
pub fn app(width: u16) -> AppState {
    app_sized(width, 40)
}

pub fn app_sized(width: u16, height: u16) -> AppState {
    let config = Config::default();
    AppState::new(
        &config,
        Viewport::new(width, height, config.layout.narrow_breakpoint),
        today(),
    )
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn press(state: &mut AppState, code: KeyCode) {
    facdash::ui::handle_key(key(code), state);
}

pub fn click(state: &mut AppState, column: u16, row: u16) {
    let mouse = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    };
    facdash::ui::handle_mouse(mouse, state);
}

/// Draw one frame so hit areas are recorded, and return the buffer.
pub fn draw(state: &mut AppState) -> Buffer {
    let backend = TestBackend::new(state.viewport.width, state.viewport.height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| Shell::render(frame, state)).unwrap();
    terminal.backend().buffer().clone()
}

/// Position of the first cell where `needle` starts.
pub fn find_text(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
    find_text_in(buffer, needle, buffer.area)
}

/// Like `find_text`, limited to `area`.
pub fn find_text_in(buffer: &Buffer, needle: &str, area: Rect) -> Option<(u16, u16)> {
    let chars: Vec<String> = needle.chars().map(|c| c.to_string()).collect();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let fits = chars.iter().enumerate().all(|(i, c)| {
                let cx = x + i as u16;
                cx < area.right() && buffer[(cx, y)].symbol() == c
            });
            if fits {
                return Some((x, y));
            }
        }
    }
    None
}

pub fn screen(buffer: &Buffer) -> String {
    facdash::ui::headless::buffer_text(buffer)
}
