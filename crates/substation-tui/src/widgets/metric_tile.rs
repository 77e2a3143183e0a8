//! A single bordered metric tile: label, large value and an optional delta.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use substation_core::{Delta, Tile};

use crate::theme;

/// Style for a delta: green when rising, red when falling, dim at zero.
pub fn delta_style(delta: Delta) -> Style {
    match delta.value.signum() {
        1 => theme::delta_up(),
        -1 => theme::delta_down(),
        _ => theme::key_hint(),
    }
}

/// Delta rendered with an arrow, e.g. `↑ 3 kV` or `↓ -2 °C`.
pub fn delta_span(delta: Delta) -> Span<'static> {
    let arrow = match delta.value.signum() {
        1 => "↑",
        -1 => "↓",
        _ => "·",
    };
    Span::styled(format!("{arrow} {delta}"), delta_style(delta))
}

/// Render one tile into `area`.
pub fn render_tile(frame: &mut Frame, area: Rect, tile: &Tile) {
    let block = Block::default()
        .title(format!(" {} ", tile.label))
        .title_style(theme::label())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
        .flex(ratatui::layout::Flex::Center)
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(tile.value.as_str(), theme::metric_value()))
            .alignment(Alignment::Center),
        rows[0],
    );

    if let Some(delta) = tile.delta {
        frame.render_widget(
            Paragraph::new(Line::from(delta_span(delta))).alignment(Alignment::Center),
            rows[1],
        );
    }
}
