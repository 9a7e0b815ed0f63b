//! Feet view: the latest pressure drawn at each sensor's position.
//!
//! Each sensor gets a faint reference ring and a filled marker whose radius
//! grows with the current pressure. Sensors whose latest reading is flagged
//! are drawn in the anomaly color.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Circle},
    Frame,
};

use gaitwatch_types::{Channel, PRESSURE_MAX};

use crate::app::App;
use crate::ui::common::{render_placeholder, themed_block};

/// Radius of the reference ring, in canvas units.
const RING_RADIUS: f64 = 0.08;

/// Sensor position on a unit square, viewed from above with toes at the top.
pub fn sensor_position(channel: Channel) -> (f64, f64) {
    match channel {
        Channel::L0 => (0.35, 0.7),
        Channel::L1 => (0.15, 0.55),
        Channel::L2 => (0.28, 0.12),
        Channel::R0 => (0.65, 0.7),
        Channel::R1 => (0.85, 0.55),
        Channel::R2 => (0.72, 0.12),
    }
}

/// Marker radius for a pressure value; full scale fills the reference ring.
pub fn pressure_radius(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    RING_RADIUS * (value / PRESSURE_MAX).min(1.0)
}

/// Render the feet pressure map.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(snapshot) = app.snapshot.as_ref() else {
        render_placeholder(frame, app, area, "Feet", "Waiting for data...");
        return;
    };
    let (Some(values), Some(flags)) = (snapshot.latest_values(), snapshot.anomalies.last())
    else {
        render_placeholder(frame, app, area, "Feet", "No readings in window");
        return;
    };

    let title = match snapshot.times.last() {
        Some(time) => format!(" Feet @ {} ", time),
        None => " Feet ".to_string(),
    };
    let border = app.theme.border;

    let canvas = Canvas::default()
        .block(themed_block(app, title))
        .marker(Marker::Braille)
        .x_bounds([0.0, 1.0])
        .y_bounds([0.0, 1.0])
        .paint(|ctx| {
            for channel in Channel::ALL {
                let (x, y) = sensor_position(channel);
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: RING_RADIUS,
                    color: border,
                });
            }
            ctx.layer();

            for channel in Channel::ALL {
                let (x, y) = sensor_position(channel);
                let i = channel.index();
                let color = if flags[i] {
                    app.theme.anomaly
                } else {
                    app.theme.channel_color(channel)
                };

                // Concentric circles approximate a filled marker.
                let radius = pressure_radius(values[i]);
                let mut r = radius;
                while r > 0.0 {
                    ctx.draw(&Circle { x, y, radius: r, color });
                    r -= 0.01;
                }

                ctx.print(
                    x + RING_RADIUS + 0.02,
                    y,
                    Line::from(vec![
                        Span::styled(channel.label(), Style::default().fg(color)),
                        Span::raw(format!(" {:.0}", values[i])),
                    ]),
                );
            }
        });

    frame.render_widget(canvas, area);
}
