pub mod render;

use crate::app::{app_action_from_key, App};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::cell::Cell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Duration;

pub use render::draw_app;

const UI_POLL_INTERVAL: Duration = Duration::from_millis(60);

pub fn run_tui(app: &mut App) -> Result<(), String> {
    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, app);
    teardown_terminal(&mut terminal)?;
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<(), String> {
    let needs_redraw = Rc::new(Cell::new(true));
    let flag = Rc::clone(&needs_redraw);
    let subscription = app.modals_mut().subscribe(move |_| flag.set(true));
    let mut area = Rect::default();

    let result = loop {
        if app.pump() > 0 {
            needs_redraw.set(true);
        }
        if needs_redraw.replace(false) {
            match terminal.draw(|frame| draw_app(frame, app)) {
                Ok(completed) => area = completed.area,
                Err(e) => break Err(format!("failed to render customer desk: {e}")),
            }
        }
        if app.should_quit() {
            break Ok(());
        }

        match event::poll(UI_POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => break Err(format!("failed to poll events: {e}")),
        }
        let ev = match event::read() {
            Ok(ev) => ev,
            Err(e) => break Err(format!("failed to read event: {e}")),
        };
        match ev {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(action) = app_action_from_key(app.modals().is_open(), key) {
                    app.handle_action(action);
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                app.handle_pointer(area, mouse.column, mouse.row);
            }
            Event::Resize(_, _) => {}
            _ => continue,
        }
        needs_redraw.set(true);
    };

    app.modals_mut().unsubscribe(subscription);
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, String> {
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    let terminal = enter_screen().and_then(|stdout| {
        Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| format!("failed to initialize terminal: {e}"))
    });
    restore_on_error(terminal, || {
        let _ = execute!(
            io::stdout(),
            DisableMouseCapture,
            LeaveAlternateScreen,
            cursor::Show
        );
        let _ = disable_raw_mode();
    })
}

fn enter_screen() -> Result<Stdout, String> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)
        .map_err(|e| format!("failed to enter alternate screen: {e}"))?;
    Ok(stdout)
}

/// Runs `restore` when a setup step after raw mode failed, so the shell is
/// not left in raw mode.
fn restore_on_error<T>(result: Result<T, String>, restore: impl FnOnce()) -> Result<T, String> {
    if result.is_err() {
        restore();
    }
    result
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), String> {
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen,
        cursor::Show
    )
    .map_err(|e| format!("failed to leave alternate screen: {e}"))?;
    terminal
        .show_cursor()
        .map_err(|e| format!("failed to restore cursor: {e}"))
}
