// Event handling and main UI loop

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::ui::{
    focus::Focus,
    header::HeaderAction,
    shell::Shell,
    state::AppState,
    viewport::Viewport,
};

mod header;
mod help;
mod sidebar;

// Event types sent from dedicated event thread to main loop
enum UiEvent {
    Input(Event), // Keyboard, mouse, resize
    Tick,         // Periodic update for the header clock
}

/// Spawn a dedicated thread for event polling.
fn spawn_event_thread(tx: mpsc::Sender<UiEvent>) {
    let tick_rate = Duration::from_millis(250);

    thread::spawn(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::from_secs(0));

            if event::poll(timeout).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    if tx.send(UiEvent::Input(evt)).is_err() {
                        break; // Main thread dropped the receiver
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.send(UiEvent::Tick).is_err() {
                    break;
                }
                last_tick = Instant::now();
            }
        }
    });
}

pub fn run_ui(config: &Config) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let viewport = Viewport::new(size.width, size.height, config.layout.narrow_breakpoint);
    let mut app_state = AppState::new(config, viewport, chrono::Local::now().date_naive());
    app_state.tick(chrono::Local::now().time());

    let (event_tx, event_rx) = mpsc::channel();
    spawn_event_thread(event_tx);

    let result = run_app(&mut terminal, &mut app_state, event_rx);

    // Restore terminal on every exit path of the loop
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!(section = app_state.active_key(), "dashboard closed");
    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    event_rx: Receiver<UiEvent>,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| Shell::render(frame, state))?;

        let mut pending_ticks: u64 = 0;
        let mut pending_inputs: Vec<Event> = Vec::new();

        // Block for one event, then drain the queue
        match event_rx.recv() {
            Ok(UiEvent::Tick) => pending_ticks += 1,
            Ok(UiEvent::Input(ev)) => pending_inputs.push(ev),
            Err(_) => return Ok(()),
        }
        while let Ok(evt) = event_rx.try_recv() {
            match evt {
                UiEvent::Tick => pending_ticks += 1,
                UiEvent::Input(ev) => pending_inputs.push(ev),
            }
        }

        // Inputs before ticks so keys are never stuck behind a tick backlog
        for input in pending_inputs {
            match input {
                Event::Key(key) => handle_key(key, state),
                Event::Mouse(mouse) => handle_mouse(mouse, state),
                Event::Resize(width, height) => state.resize(width, height),
                _ => {}
            }
            if state.should_quit {
                return Ok(());
            }
        }

        if pending_ticks > 0 {
            state.tick(chrono::Local::now().time());
        }
    }
}

fn should_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn handle_key(key: KeyEvent, state: &mut AppState) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if is_ctrl_c(&key) {
        state.should_quit = true;
        return;
    }

    if state.help_modal.is_some() {
        help::handle_help_key(key, state);
        return;
    }

    if state.header.any_popover_open() {
        let action = state.header.handle_popover_key(key.code);
        if action != HeaderAction::None {
            state.apply_header_action(action);
            return;
        }
    }

    // Text entry owns the keyboard; global shortcuts wait
    if state.router.current_section().is_editing() {
        let action = state.router.current_section_mut().handle_key(key);
        state.apply_section_action(action);
        return;
    }

    match key.code {
        _ if should_quit(&key) => state.should_quit = true,
        KeyCode::Char('?') => state.open_help(),
        KeyCode::Char('b') | KeyCode::Char('B') => state.toggle_sidebar(),
        KeyCode::Char('n') | KeyCode::Char('N') => header::toggle_notifications(state),
        KeyCode::Char('p') | KeyCode::Char('P') => header::toggle_profile_menu(state),
        KeyCode::Char('[') => state.step_section(-1),
        KeyCode::Char(']') => state.step_section(1),
        KeyCode::Tab | KeyCode::BackTab => state.cycle_focus(),
        KeyCode::Esc => handle_escape(key, state),
        _ => match state.focus {
            Focus::Sidebar if state.sidebar.is_open() => sidebar::handle_sidebar_key(key, state),
            _ => {
                let action = state.router.current_section_mut().handle_key(key);
                state.apply_section_action(action);
            }
        },
    }
}

/// Esc closes the innermost layer: overlay sidebar, then sidebar focus, then the section's own.
fn handle_escape(key: KeyEvent, state: &mut AppState) {
    if state.sidebar.is_open() && state.viewport.is_narrow() {
        state.on_close_request();
    } else if state.focus == Focus::Sidebar {
        state.focus = Focus::Content;
    } else {
        let action = state.router.current_section_mut().handle_key(key);
        state.apply_section_action(action);
    }
}

pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if state.help_modal.is_some() {
        return;
    }

    // Outside-click listeners see every click first
    let tripped = state.listeners.click(mouse.column, mouse.row);
    if tripped > 0 {
        tracing::debug!(tripped, "outside click");
    }

    if header::handle_header_click(mouse, state) {
        return;
    }
    if sidebar::handle_sidebar_click(mouse, state) {
        return;
    }

    state.focus = Focus::Content;
    let action = state.router.current_section_mut().handle_click(mouse);
    state.apply_section_action(action);
}
