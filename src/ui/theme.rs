//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use gaitwatch_types::{Channel, CHANNEL_COUNT};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color of anomaly markers.
    pub anomaly: Color,
    /// Color for borders, axes and separators.
    pub border: Color,
    /// Line colors, indexed by [`Channel::index`].
    pub channels: [Color; CHANNEL_COUNT],
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

/// Left foot in blues, right foot in greens.
const DARK_CHANNELS: [Color; CHANNEL_COUNT] = [
    Color::Rgb(65, 105, 225),
    Color::Rgb(30, 144, 255),
    Color::Rgb(138, 43, 226),
    Color::Rgb(34, 139, 34),
    Color::Rgb(0, 200, 0),
    Color::Rgb(0, 255, 0),
];

const LIGHT_CHANNELS: [Color; CHANNEL_COUNT] = [
    Color::Rgb(0, 0, 139),
    Color::Rgb(0, 0, 255),
    Color::Rgb(138, 43, 226),
    Color::Rgb(0, 100, 0),
    Color::Rgb(0, 128, 0),
    Color::Rgb(50, 205, 50),
];

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            anomaly: Color::Red,
            border: Color::Gray,
            channels: DARK_CHANNELS,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            anomaly: Color::Red,
            border: Color::DarkGray,
            channels: LIGHT_CHANNELS,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Line color for a channel.
    pub fn channel_color(&self, channel: Channel) -> Color {
        self.channels[channel.index()]
    }

    pub fn channel_style(&self, channel: Channel) -> Style {
        Style::default().fg(self.channel_color(channel))
    }

    pub fn anomaly_style(&self) -> Style {
        Style::default().fg(self.anomaly).add_modifier(Modifier::BOLD)
    }
}
