//! Trend Analysis screen: one synthetic ten-hour series drawn as a line
//! chart with a series per metric.
//!
//! A fresh series arrives each time the screen is entered; nothing refreshes
//! while it is displayed. `←`/`→` narrow the chart to a single metric.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph};
use strum::IntoEnumIterator;

use substation_core::{TrendMetric, TrendSeries};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::sub_tabs;

const FILTER_LABELS: [&str; 4] = ["All", "Voltage", "Current", "Temperature"];

pub struct TrendScreen {
    focused: bool,
    series: Option<Arc<TrendSeries>>,
    /// 0 = all metrics, otherwise `TrendMetric::iter().nth(filter - 1)`.
    filter: usize,
}

impl TrendScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            series: None,
            filter: 0,
        }
    }

    fn visible_metrics(&self) -> Vec<(usize, TrendMetric)> {
        TrendMetric::iter()
            .enumerate()
            .filter(|(i, _)| self.filter == 0 || self.filter == i + 1)
            .collect()
    }

    /// Y bounds padded around the union of the visible metric ranges.
    fn y_bounds(metrics: &[(usize, TrendMetric)]) -> [f64; 2] {
        let lo = metrics
            .iter()
            .map(|(_, m)| *m.range().start())
            .min()
            .unwrap_or(0);
        let hi = metrics
            .iter()
            .map(|(_, m)| *m.range().end())
            .max()
            .unwrap_or(1);
        [f64::from(lo.saturating_sub(10)), f64::from(hi + 10)]
    }

    fn render_chart(&self, series: &TrendSeries, frame: &mut Frame, area: Rect) {
        let metrics = self.visible_metrics();
        let points: Vec<(TrendMetric, usize, Vec<(f64, f64)>)> = metrics
            .iter()
            .map(|&(i, m)| (m, i, series.points(m)))
            .collect();

        let datasets: Vec<Dataset> = points
            .iter()
            .map(|(metric, i, data)| {
                Dataset::default()
                    .name(metric.to_string())
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(theme::CHART_SERIES[i % theme::CHART_SERIES.len()]))
                    .data(data)
            })
            .collect();

        let samples = series.samples();
        let x_max = samples
            .len()
            .checked_sub(1)
            .and_then(|n| u32::try_from(n).ok())
            .map_or(1.0, f64::from);
        let x_labels: Vec<Span> = [samples.first(), samples.get(samples.len() / 2), samples.last()]
            .into_iter()
            .flatten()
            .map(|s| Span::styled(s.timestamp.format("%H:%M").to_string(), theme::key_hint()))
            .collect();

        let [y_lo, y_hi] = Self::y_bounds(&metrics);
        let y_labels: Vec<Span> = [y_lo, (y_lo + y_hi) / 2.0, y_hi]
            .into_iter()
            .map(|v| Span::styled(format!("{v:.0}"), theme::key_hint()))
            .collect();

        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .title(Span::styled("Time", theme::key_hint()))
                    .style(Style::default().fg(theme::BORDER_GRAY))
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled("Value", theme::key_hint()))
                    .style(Style::default().fg(theme::BORDER_GRAY))
                    .bounds([y_lo, y_hi])
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
    }
}

impl Component for TrendScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Right | KeyCode::Char('l') => {
                self.filter = (self.filter + 1) % FILTER_LABELS.len();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.filter = (self.filter + FILTER_LABELS.len() - 1) % FILTER_LABELS.len();
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::TrendUpdated(series) = action {
            self.series = Some(Arc::clone(series));
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Trend Analysis ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // filter tabs
            Constraint::Length(1), // spacer
            Constraint::Min(5),    // chart
            Constraint::Length(1), // hints
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&FILTER_LABELS, self.filter)),
            layout[0],
        );

        match self.series.as_deref() {
            Some(series) => self.render_chart(series, frame, layout[2]),
            None => frame.render_widget(
                Paragraph::new("No trend data yet")
                    .style(Style::default().fg(theme::BORDER_GRAY))
                    .alignment(Alignment::Center),
                layout[2],
            ),
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("←/→ ", theme::key_hint_key()),
                Span::styled("series  ", theme::key_hint()),
                Span::styled("a new series is drawn on every visit", theme::key_hint()),
            ])),
            layout[3],
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::render_to_text;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn loaded() -> TrendScreen {
        let mut screen = TrendScreen::new();
        let series = TrendSeries::generate_with(&mut StdRng::seed_from_u64(6));
        screen.update(&Action::TrendUpdated(Arc::new(series))).ok();
        screen
    }

    #[test]
    fn renders_legend_and_time_axis() {
        let text = render_to_text(&loaded(), 120, 30);
        assert!(text.contains("Grid Voltage (kV)"));
        assert!(text.contains("Load Current (A)"));
        assert!(text.contains("Transformer Temp (°C)"));
        assert!(text.contains("00:00"));
        assert!(text.contains("09:00"));
    }

    #[test]
    fn filter_cycles_through_metrics() {
        let mut screen = loaded();
        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        screen.handle_key_event(right).ok();
        let only: Vec<TrendMetric> = screen.visible_metrics().into_iter().map(|(_, m)| m).collect();
        assert_eq!(only, vec![TrendMetric::GridVoltage]);

        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        screen.handle_key_event(left).ok();
        screen.handle_key_event(left).ok();
        let only: Vec<TrendMetric> = screen.visible_metrics().into_iter().map(|(_, m)| m).collect();
        assert_eq!(only, vec![TrendMetric::TransformerTemp]);
    }

    #[test]
    fn y_bounds_cover_visible_ranges() {
        let all = TrendScreen::new().visible_metrics();
        assert_eq!(TrendScreen::y_bounds(&all), [40.0, 250.0]);
        let temp = [(2, TrendMetric::TransformerTemp)];
        assert_eq!(TrendScreen::y_bounds(&temp), [40.0, 90.0]);
    }
}
