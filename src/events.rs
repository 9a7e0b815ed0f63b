use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::{info, warn};

use crate::app::{App, View};

/// File written by the `e` key.
pub const EXPORT_PATH: &str = "gaitwatch_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),

        KeyCode::Char('1') => app.set_view(View::Trace),
        KeyCode::Char('2') => app.set_view(View::Channels),
        KeyCode::Char('3') => app.set_view(View::Histogram),
        KeyCode::Char('4') => app.set_view(View::Feet),

        // Patient selection
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_patient(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_patient(),
        KeyCode::Home => app.select_patient(0),
        KeyCode::End => app.select_patient(app.patients.len().saturating_sub(1)),

        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        KeyCode::Char('r') => {
            app.refresh();
        }

        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_PATH);
            match app.export_state(&export_path) {
                Ok(count) => {
                    info!(path = %export_path.display(), patients = count, "exported");
                    app.set_status_message(format!(
                        "Exported {} patients to {}",
                        count,
                        export_path.display()
                    ));
                }
                Err(e) => {
                    warn!(error = %e, "export failed");
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
///
/// `tabs_row` is the terminal row the tab bar is drawn on.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, tabs_row: u16) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev_patient(),
        MouseEventKind::ScrollDown => app.select_next_patient(),

        MouseEventKind::Down(MouseButton::Left) if mouse.row == tabs_row => {
            if let Some(view) = tab_at_column(mouse.column) {
                app.set_view(view);
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}

/// Which tab is drawn at `column` of the tab bar.
///
/// Each tab is its title (" n:Label ") with one column of padding either
/// side, followed by a one column divider.
pub fn tab_at_column(column: u16) -> Option<View> {
    let mut start = 0usize;
    for view in View::ALL {
        let width = view.label().len() + 6;
        if (column as usize) < start + width {
            return Some(view);
        }
        start += width + 1;
    }
    None
}
