//! Trace view: all six channels on one time chart.
//!
//! Anomalous readings are overlaid as red scatter points on top of the
//! channel lines.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType},
    Frame,
};

use gaitwatch_types::{Channel, PRESSURE_MAX};

use crate::app::App;
use crate::ui::common::{render_placeholder, themed_block};

/// Render the combined trace chart.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.series.is_empty() {
        render_placeholder(frame, app, area, "Trace", "Waiting for data...");
        return;
    }

    let anomalies = app.series.all_anomalies();
    let title = match app.series.last_time {
        Some(ref time) => format!(" Trace @ {} ", time),
        None => " Trace ".to_string(),
    };

    let chart = pressure_chart(app, &Channel::ALL, &anomalies).block(themed_block(app, title));
    frame.render_widget(chart, area);
}

/// Build a chart with one line per channel plus an anomaly overlay.
///
/// Axis bounds come from the app's series: the retention window on x and the
/// sensor range on y.
pub(crate) fn pressure_chart<'a>(
    app: &'a App,
    channels: &[Channel],
    anomalies: &'a [(f64, f64)],
) -> Chart<'a> {
    let mut datasets: Vec<Dataset<'a>> = channels
        .iter()
        .map(|&channel| {
            Dataset::default()
                .name(channel.label())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(app.theme.channel_style(channel))
                .data(app.series.line(channel))
        })
        .collect();

    if !anomalies.is_empty() {
        datasets.push(
            Dataset::default()
                .name("anomaly")
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(app.theme.anomaly_style())
                .data(anomalies),
        );
    }

    let axis_style = Style::default().fg(app.theme.border);
    let [x_min, x_max] = app.series.x_bounds;

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([x_min, x_max])
                .labels(time_labels(x_min)),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, PRESSURE_MAX])
                .labels(pressure_labels()),
        )
}

/// Labels for the left edge, middle, and right edge of the time axis.
pub(crate) fn time_labels(x_min: f64) -> Vec<Span<'static>> {
    vec![
        Span::raw(format!("{:.0}s", x_min)),
        Span::raw(format!("{:.0}s", x_min / 2.0)),
        Span::raw("now"),
    ]
}

pub(crate) fn pressure_labels() -> Vec<Span<'static>> {
    vec![
        Span::raw("0"),
        Span::raw(format!("{:.0}", PRESSURE_MAX / 2.0)),
        Span::raw(format!("{:.0}", PRESSURE_MAX)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_labels() {
        let labels: Vec<String> =
            time_labels(-600.0).into_iter().map(|s| s.content.into_owned()).collect();
        assert_eq!(labels, vec!["-600s", "-300s", "now"]);
    }

    #[test]
    fn test_pressure_labels_span_sensor_range() {
        let labels: Vec<String> =
            pressure_labels().into_iter().map(|s| s.content.into_owned()).collect();
        assert_eq!(labels, vec!["0", "550", "1100"]);
    }
}
