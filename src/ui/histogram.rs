//! Histogram view: value distribution per channel.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup},
    Frame,
};

use gaitwatch_types::Channel;

use crate::app::App;
use crate::ui::channels::grid_cell;
use crate::ui::common::{render_placeholder, themed_block};

/// Render one bar chart per channel, sharing a y scale.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.snapshot.is_none() || app.histogram.max_count() == 0 {
        render_placeholder(frame, app, area, "Histogram", "Waiting for data...");
        return;
    }

    let rows = Layout::vertical([Constraint::Ratio(1, 3); 3]).split(area);
    let cells: Vec<_> = rows
        .iter()
        .map(|row| Layout::horizontal([Constraint::Ratio(1, 2); 2]).split(*row))
        .collect();

    let max = app.histogram.max_count();

    for channel in Channel::ALL {
        let (row, column) = grid_cell(channel);
        let cell = cells[row][column];
        let counts = app.histogram.bins(channel);
        let style = app.theme.channel_style(channel);

        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                Bar::default()
                    .value(count)
                    .label(Line::from(format!("{:.0}", app.histogram.bin_start(i))))
                    .style(style)
                    .value_style(Style::default().fg(app.theme.border))
            })
            .collect();

        let chart = BarChart::default()
            .block(themed_block(app, format!(" {} ", channel)).border_style(style))
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width(cell.width.saturating_sub(2), counts.len()))
            .bar_gap(1)
            .max(max);

        frame.render_widget(chart, cell);
    }
}

/// Widest bar that fits `bins` bars with a one-column gap in `width`.
pub fn bar_width(width: u16, bins: usize) -> u16 {
    if bins == 0 {
        return 1;
    }
    let per_bar = width as usize / bins;
    per_bar.saturating_sub(1).clamp(1, u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(66, 11), 5);
        assert_eq!(bar_width(10, 11), 1);
        assert_eq!(bar_width(10, 0), 1);
    }
}
