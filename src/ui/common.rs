//! Common UI components shared across views.
//!
//! This module contains the patient header, tab bar, status bar, and help
//! overlay.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::duration::format_duration;

/// Render the patient header: an identity table for the selected patient.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let patient = match app.selected_patient_id() {
        Some(id) => format!(" Patient {} ", id),
        None => " No patients ".to_string(),
    };

    let Some(ref snapshot) = app.snapshot else {
        let line = Line::from(vec![
            Span::styled(" GAITWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("│"),
            Span::styled(patient, Style::default().fg(app.theme.highlight)),
            Span::raw("│ Waiting for data..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let identity = &snapshot.identity;
    let header = Row::new(vec![
        "Patient",
        "First name",
        "Last name",
        "Birthdate",
        "Disabled",
        "Trace",
    ])
    .style(app.theme.header);

    let row = Row::new(vec![
        snapshot.id.to_string(),
        identity.firstname.clone(),
        identity.lastname.clone(),
        identity.birthdate.clone(),
        yes_no(identity.disabled).to_string(),
        identity.trace_name.clone(),
    ]);

    let widths = [
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Fill(1),
    ];

    let table = Table::new(vec![row], widths).header(header).column_spacing(1);
    frame.render_widget(table, area);
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!(" {}:{} ", i + 1, view.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows the data source, patient position, buffered span, and controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let position = format!(
        "{}/{} | window {}",
        app.selected_patient + 1,
        app.patients.len(),
        format_duration(app.window)
    );
    let controls = "↑↓:patient Tab:view e:export ?:help q:quit";

    let status = match app.snapshot {
        Some(ref snapshot) => {
            let span = match (&app.series.first_time, &app.series.last_time) {
                (Some(first), Some(last)) => format!("{} → {}", first, last),
                _ => "-".to_string(),
            };
            let elapsed = app.last_refresh.map(|t| t.elapsed().as_secs_f64()).unwrap_or(0.0);
            format!(
                " {} | {} | {} entries | {} | Updated {:.1}s ago | {}",
                app.source_description(),
                position,
                snapshot.len(),
                span,
                elapsed,
                controls,
            )
        }
        None => format!(
            " {} | {} | Waiting for data | {}",
            app.source_description(),
            position,
            controls
        ),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  Tab/S-Tab   Switch views"),
        Line::from("  1-4         Jump to view"),
        Line::from("  ↑/↓ j/k     Previous/next patient"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  e           Export to JSON"),
        Line::from("  ?           Toggle help"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 18u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// A bordered block in the theme's style.
pub fn themed_block<'a>(app: &App, title: impl Into<Line<'a>>) -> Block<'a> {
    let title: Line<'a> = title.into();
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

/// Render a centered placeholder inside a block.
pub fn render_placeholder(frame: &mut Frame, app: &App, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(message.to_string())
        .alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().add_modifier(Modifier::DIM))
        .block(themed_block(app, format!(" {} ", title)));
    frame.render_widget(paragraph, area);
}
