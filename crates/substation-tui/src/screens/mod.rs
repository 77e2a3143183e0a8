//! Screen implementations. Each screen is a top-level Component.

pub mod control;
pub mod live;
pub mod reports;
pub mod trend;

use std::path::Path;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create screen components for the tab bar.
pub fn create_screens(report_dir: &Path) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Live, Box::new(live::LiveScreen::new())),
        (ScreenId::Trend, Box::new(trend::TrendScreen::new())),
        (ScreenId::Control, Box::new(control::ControlScreen::new())),
        (
            ScreenId::Reports,
            Box::new(reports::ReportsScreen::new(report_dir.to_path_buf())),
        ),
    ]
}

/// Render a component into an off-screen buffer and return its text, one
/// line per terminal row.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) fn render_to_text(component: &dyn Component, width: u16, height: u16) -> String {
    use ratatui::{Terminal, backend::TestBackend};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| component.render(frame, frame.area()))
        .unwrap();

    buffer_text(terminal.backend().buffer())
}

/// Flatten a rendered buffer into one line per row.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
