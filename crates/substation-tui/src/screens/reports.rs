//! Reports screen: pick a date, generate a one-page PDF snapshot.
//!
//! Generation runs off the UI thread; the screen only tracks whether a
//! request is in flight and what the last one produced.

use std::path::PathBuf;

use chrono::{Days, Local, NaiveDate};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use substation_core::report_file_name;

use crate::action::{Action, ReportOutcome};
use crate::component::Component;
use crate::theme;

pub struct ReportsScreen {
    focused: bool,
    date: NaiveDate,
    report_dir: PathBuf,
    generating: bool,
    last_outcome: Option<ReportOutcome>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl ReportsScreen {
    pub fn new(report_dir: PathBuf) -> Self {
        Self {
            focused: false,
            date: Local::now().date_naive(),
            report_dir,
            generating: false,
            last_outcome: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    /// Shift the selected date; out-of-range dates leave it unchanged.
    fn shift_days(&mut self, days: i64) {
        let magnitude = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.date.checked_add_days(magnitude)
        } else {
            self.date.checked_sub_days(magnitude)
        };
        if let Some(date) = shifted {
            self.date = date;
        }
    }

    fn render_date_selector(&self, frame: &mut Frame, area: Rect) {
        let arrow_style = if self.focused {
            Style::default().fg(theme::AMBER)
        } else {
            Style::default().fg(theme::BORDER_GRAY)
        };
        let line = Line::from(vec![
            Span::styled("  Report date  ", theme::label()),
            Span::styled("\u{25C2} ", arrow_style),
            Span::styled(
                self.date.format("%Y-%m-%d").to_string(),
                Style::default()
                    .fg(theme::SIGNAL_CYAN)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" \u{25B8}", arrow_style),
            Span::styled(
                format!("   {}", self.date.format("%A")),
                theme::key_hint(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if self.generating {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("  Generating report...")
                .style(Style::default().fg(theme::SIGNAL_CYAN))
                .throbber_style(Style::default().fg(theme::AMBER));
            frame.render_stateful_widget(throbber, area, &mut self.throbber_state.clone());
            return;
        }

        let line = match &self.last_outcome {
            Some(Ok(path)) => Line::from(vec![
                Span::styled("  ✓ Saved ", Style::default().fg(theme::SAFE_GREEN)),
                Span::styled(path.display().to_string(), theme::label()),
            ]),
            Some(Err(message)) => Line::from(vec![
                Span::styled("  ✗ ", Style::default().fg(theme::ALARM_RED)),
                Span::styled(message.as_str(), Style::default().fg(theme::ALARM_RED)),
            ]),
            None => Line::from(Span::styled(
                "  Press Enter to generate a report",
                theme::key_hint(),
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Component for ReportsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Right | KeyCode::Char('l') => self.shift_days(1),
            KeyCode::Left | KeyCode::Char('h') => self.shift_days(-1),
            KeyCode::Up | KeyCode::Char('k') => self.shift_days(7),
            KeyCode::Down | KeyCode::Char('j') => self.shift_days(-7),
            KeyCode::Char('t') => self.date = Local::now().date_naive(),
            KeyCode::Enter if !self.generating => {
                self.generating = true;
                return Ok(Some(Action::GenerateReport(self.date)));
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ReportFinished(outcome) => {
                self.generating = false;
                self.last_outcome = Some(outcome.clone());
            }
            Action::Tick => {
                if self.generating {
                    self.throbber_state.calc_next();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Generate Report ")
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
            Constraint::Length(1), // spacer
            Constraint::Length(1), // date
            Constraint::Length(1), // target file
            Constraint::Length(1), // spacer
            Constraint::Length(1), // button
            Constraint::Length(1), // spacer
            Constraint::Length(1), // status
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_date_selector(frame, layout[1]);

        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(
                    "  → {}",
                    self.report_dir.join(report_file_name(self.date)).display()
                ),
                theme::key_hint(),
            )),
            layout[2],
        );

        let button_style = if self.generating {
            theme::key_hint()
        } else {
            Style::default().fg(theme::AMBER).add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(Span::styled("  [ Generate Report ]", button_style)),
            layout[4],
        );

        self.render_status(frame, layout[6]);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("←/→ ", theme::key_hint_key()),
                Span::styled("±1 day  ", theme::key_hint()),
                Span::styled("↑/↓ ", theme::key_hint_key()),
                Span::styled("±1 week  ", theme::key_hint()),
                Span::styled("t ", theme::key_hint_key()),
                Span::styled("today  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("generate", theme::key_hint()),
            ]))
            .alignment(Alignment::Center),
            layout[8],
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_animating(&self) -> bool {
        self.generating
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::screens::render_to_text;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn screen_on(date: NaiveDate) -> ReportsScreen {
        let mut screen = ReportsScreen::new(PathBuf::from("out"));
        screen.date = date;
        screen
    }

    fn press(screen: &mut ReportsScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .ok()
            .flatten()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_to_today() {
        let screen = ReportsScreen::new(PathBuf::from("."));
        assert_eq!(screen.date, Local::now().date_naive());
    }

    #[test]
    fn arrow_keys_move_the_date() {
        let mut screen = screen_on(ymd(2025, 2, 28));
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.date, ymd(2025, 3, 1));
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.date, ymd(2025, 2, 22));
        press(&mut screen, KeyCode::Up);
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.date, ymd(2025, 2, 28));
    }

    #[test]
    fn enter_requests_one_report_at_a_time() {
        let mut screen = screen_on(ymd(2025, 2, 11));
        let first = press(&mut screen, KeyCode::Enter);
        assert!(matches!(first, Some(Action::GenerateReport(d)) if d == ymd(2025, 2, 11)));
        assert!(press(&mut screen, KeyCode::Enter).is_none());

        screen
            .update(&Action::ReportFinished(Ok(PathBuf::from(
                "out/Substation_Report_2025-02-11.pdf",
            ))))
            .unwrap();
        assert!(!screen.generating);
        let text = render_to_text(&screen, 100, 14);
        assert!(text.contains("Saved out/Substation_Report_2025-02-11.pdf"));
    }

    #[test]
    fn failure_is_shown_inline() {
        let mut screen = screen_on(ymd(2025, 2, 11));
        press(&mut screen, KeyCode::Enter);
        screen
            .update(&Action::ReportFinished(Err("permission denied".into())))
            .unwrap();
        assert!(render_to_text(&screen, 100, 14).contains("permission denied"));
    }

    #[test]
    fn shows_target_file_name() {
        let screen = screen_on(ymd(2025, 2, 11));
        let text = render_to_text(&screen, 100, 14);
        assert!(text.contains("Substation_Report_2025-02-11.pdf"));
        assert!(text.contains("2025-02-11"));
    }
}
