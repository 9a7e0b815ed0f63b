//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`trace`]: All six channels on one chart with anomaly markers
//! - [`channels`]: One chart per channel in a 3x2 grid
//! - [`histogram`]: Per-channel value distributions
//! - [`feet`]: Latest pressure at each sensor position
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Patient header (common::render_header)│
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (trace/channels/histogram/feet)      │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod channels;
pub mod common;
pub mod feet;
pub mod histogram;
pub mod theme;
pub mod trace;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, View};

/// Minimum terminal size for usable display.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 16;

/// Rows taken by the patient header.
pub const HEADER_HEIGHT: u16 = 2;

/// Terminal row the tab bar is drawn on.
pub const TABS_ROW: u16 = HEADER_HEIGHT;

/// Draw a complete frame for the current app state.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let top = (area.height / 2).saturating_sub(2);
        let centered = Rect::new(0, top, area.width, 5u16.min(area.height - top));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT), // Patient header
        Constraint::Length(1),             // Tabs
        Constraint::Min(8),                // Content
        Constraint::Length(1),             // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    match app.current_view {
        View::Trace => trace::render(frame, app, chunks[2]),
        View::Channels => channels::render(frame, app, chunks[2]),
        View::Histogram => histogram::render(frame, app, chunks[2]),
        View::Feet => feet::render(frame, app, chunks[2]),
    }

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Store;
    use gaitwatch_types::{Identity, PatientId, Reading, Sample, CHANNEL_COUNT};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw_rows(app: &App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        draw_rows(app, width, height).concat()
    }

    fn app() -> App {
        let store = Store::new();
        let mut anomalies = [false; CHANNEL_COUNT];
        anomalies[1] = true;
        store.ingest(
            PatientId(1),
            Ok(Reading::new(
                Identity::new("Jan", "Kowalski", "1982", true, "walking"),
                Sample::new(14_05_09_00000000, [500.0; CHANNEL_COUNT], anomalies),
            )),
        );
        let mut app =
            App::with_theme(store, vec![PatientId(1), PatientId(2)], "test", Theme::dark());
        app.refresh();
        app
    }

    #[test]
    fn test_every_view_renders() {
        let mut app = app();
        for view in View::ALL {
            app.set_view(view);
            let screen = draw(&app, 100, 30);
            assert!(screen.contains("Kowalski"));
            assert!(screen.contains("Yes"));
            assert!(screen.contains(view.label()));
        }
    }

    #[test]
    fn test_tabs_on_tabs_row() {
        let app = app();
        let rows = draw_rows(&app, 100, 30);
        let tabs = &rows[TABS_ROW as usize];
        assert!(tabs.starts_with("  1:Trace  |"), "{tabs:?}");
        assert!(tabs.contains("2:Channels"));
    }

    #[test]
    fn test_status_bar_shows_window() {
        let app = app().window(std::time::Duration::from_secs(600));
        let rows = draw_rows(&app, 100, 30);
        assert!(rows[29].contains("window 10m"), "{:?}", rows[29]);
    }

    #[test]
    fn test_waiting_for_data() {
        let mut app = app();
        app.select_patient(1);
        let screen = draw(&app, 100, 30);
        assert!(screen.contains("Waiting for data"));
    }

    #[test]
    fn test_too_small_terminal() {
        let app = app();
        let screen = draw(&app, 40, 10);
        assert!(screen.contains("Terminal too small"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = app();
        app.toggle_help();
        let screen = draw(&app, 100, 30);
        assert!(screen.contains("Keyboard Shortcuts"));
    }
}
