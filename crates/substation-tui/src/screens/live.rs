//! Live Data screen: eight metric tiles plus the current alerts.
//!
//! Layout:
//! ┌─ Live Data ───────────────────────────────── updated 14:02:07 ─┐
//! │ ✖ Transformer Temperature Critical!                             │
//! │ ⚠ Line Loss Exceeding Safe Limits!                              │
//! │ ┌ Grid Voltage ┐ ┌ Load Current ┐ ┌ Power Factor ┐              │
//! │ ┌ Transformer  ┐ ┌ Frequency    ┐ ┌ Line Loss    ┐              │
//! │ ┌ Battery      ┐ ┌ Generator    ┐                               │
//! └─────────────────────────────────────────────────────────────────┘
//!
//! Frames arrive from the live feed and replace each other wholesale.

use std::sync::Arc;

use chrono::{DateTime, Local};
use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use substation_core::{AlertLevel, LiveFrame};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::metric_tile;

const TILE_HEIGHT: u16 = 5;
const TILES_PER_ROW: u32 = 3;

pub struct LiveScreen {
    focused: bool,
    current: Option<Arc<LiveFrame>>,
    updated_at: Option<DateTime<Local>>,
}

impl LiveScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            current: None,
            updated_at: None,
        }
    }

    fn render_alerts(live: &LiveFrame, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = live
            .alerts
            .iter()
            .map(|alert| {
                let (icon, color) = match alert.level {
                    AlertLevel::Critical => ("✖", theme::ALARM_RED),
                    AlertLevel::Warning => ("⚠", theme::WARNING_YELLOW),
                };
                Line::from(vec![
                    Span::styled(format!(" {icon} "), Style::default().fg(color)),
                    Span::styled(
                        alert.message,
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_tiles(live: &LiveFrame, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Length(TILE_HEIGHT); 3]).split(area);

        for (row, tiles) in rows.iter().zip(live.rows()) {
            // Short rows keep the same tile width as full ones.
            let cols =
                Layout::horizontal([Constraint::Ratio(1, TILES_PER_ROW); 3]).split(*row);
            for (col, tile) in cols.iter().zip(tiles) {
                metric_tile::render_tile(frame, *col, tile);
            }
        }
    }
}

impl Component for LiveScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::LiveFrameUpdated(frame) = action {
            self.current = Some(Arc::clone(frame));
            self.updated_at = Some(Local::now());
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let mut block = Block::default()
            .title(" Live Data ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        if let Some(at) = self.updated_at {
            block = block.title(
                Line::from(Span::styled(
                    format!(" updated {} ", at.format("%H:%M:%S")),
                    theme::key_hint(),
                ))
                .right_aligned(),
            );
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(live) = self.current.as_deref() else {
            frame.render_widget(
                Paragraph::new("Waiting for first reading...")
                    .style(Style::default().fg(theme::BORDER_GRAY))
                    .alignment(Alignment::Center),
                inner,
            );
            return;
        };

        let alert_rows = u16::try_from(live.alerts.len()).unwrap_or(u16::MAX);
        let layout = Layout::vertical([
            Constraint::Length(alert_rows),
            Constraint::Length(TILE_HEIGHT * 3),
            Constraint::Min(0),
        ])
        .split(inner);

        Self::render_alerts(live, frame, layout[0]);
        Self::render_tiles(live, frame, layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::render_to_text;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use substation_core::Reading;

    fn hot_reading() -> Reading {
        Reading {
            grid_voltage_kv: 231,
            load_current_a: 180,
            power_factor: 0.91,
            transformer_temp_c: 79,
            frequency_hz: 50.02,
            line_loss_pct: 4.5,
            battery_status_pct: 88,
        }
    }

    #[test]
    fn waits_for_first_frame() {
        let screen = LiveScreen::new();
        let text = render_to_text(&screen, 100, 24);
        assert!(text.contains("Waiting for first reading"));
    }

    #[test]
    fn renders_tiles_and_alerts() {
        let mut screen = LiveScreen::new();
        let live = LiveFrame::from_reading(hot_reading(), &mut StdRng::seed_from_u64(1));
        screen
            .update(&Action::LiveFrameUpdated(Arc::new(live)))
            .ok();

        let text = render_to_text(&screen, 120, 24);
        assert!(text.contains("Transformer Temperature Critical!"));
        assert!(text.contains("Line Loss Exceeding Safe Limits!"));
        assert!(text.contains("231 kV"));
        assert!(text.contains("Generator Status"));
        assert!(text.contains("ON"));
        assert!(!text.contains("Waiting for first reading"));
    }

    #[test]
    fn new_frame_replaces_old_alerts() {
        let mut screen = LiveScreen::new();
        let mut rng = StdRng::seed_from_u64(2);
        let hot = LiveFrame::from_reading(hot_reading(), &mut rng);
        let calm = LiveFrame::from_reading(
            Reading {
                transformer_temp_c: 60,
                line_loss_pct: 2.5,
                ..hot_reading()
            },
            &mut rng,
        );
        screen.update(&Action::LiveFrameUpdated(Arc::new(hot))).ok();
        screen.update(&Action::LiveFrameUpdated(Arc::new(calm))).ok();

        let text = render_to_text(&screen, 120, 24);
        assert!(!text.contains("Critical!"));
        assert!(!text.contains("Safe Limits!"));
    }
}
