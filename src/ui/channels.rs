//! Channels view: one chart per sensor in a 3x2 grid.
//!
//! Left-foot sensors fill the left column and right-foot sensors the right,
//! each with its own anomaly markers and min/mean/max in the title.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use gaitwatch_types::{Channel, Foot};

use crate::app::App;
use crate::data::series::ChannelStats;
use crate::ui::common::{render_placeholder, themed_block};
use crate::ui::trace::pressure_chart;

/// Grid position of each channel as `(row, column)`.
///
/// One column per foot, sensors in wire order down the column.
pub fn grid_cell(channel: Channel) -> (usize, usize) {
    let column = match channel.foot() {
        Foot::Left => 0,
        Foot::Right => 1,
    };
    (channel.index() % 3, column)
}

/// Render the per-channel grid.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.series.is_empty() {
        render_placeholder(frame, app, area, "Channels", "Waiting for data...");
        return;
    }

    let rows = Layout::vertical([Constraint::Ratio(1, 3); 3]).split(area);
    let cells: Vec<_> = rows
        .iter()
        .map(|row| Layout::horizontal([Constraint::Ratio(1, 2); 2]).split(*row))
        .collect();

    for channel in Channel::ALL {
        let (row, column) = grid_cell(channel);
        let title = chart_title(channel, app.series.stats(channel));
        let chart = pressure_chart(app, &[channel], app.series.anomaly_points(channel))
            .block(themed_block(app, title).border_style(app.theme.channel_style(channel)));
        frame.render_widget(chart, cells[row][column]);
    }
}

fn chart_title(channel: Channel, stats: Option<ChannelStats>) -> String {
    match stats {
        Some(stats) => format!(
            " {} min {:.0} avg {:.0} max {:.0} | {} anomalies ",
            channel, stats.min, stats.mean, stats.max, stats.anomalies
        ),
        None => format!(" {} ", channel),
    }
}
