//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use substation_core::{TrendSeries, write_report};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader, UI_TICK};
use crate::live_feed::run_live_feed;
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

const NOTIFICATION_TTL: Duration = Duration::from_secs(3);
const APP_TITLE: &str = " ⚡ Smart Substation Dashboard ";

/// What woke the event loop.
enum Wake {
    Input(Option<Event>),
    Action(Action),
}

/// Runtime settings the app needs from config and CLI.
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Live Data refresh period.
    pub refresh: Duration,
    /// Where generated reports are written.
    pub report_dir: PathBuf,
}

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    options: AppOptions,
    /// Cancels the live feed; `Some` only while Live Data is on screen.
    live_feed: Option<CancellationToken>,
    /// Something visible changed since the last draw.
    dirty: bool,
    /// Action sender: background tasks dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver: main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(&options.report_dir).into_iter().collect();

        Self {
            active_screen: ScreenId::default(),
            previous_screen: None,
            screens,
            running: true,
            help_visible: false,
            notification: None,
            options,
            live_feed: None,
            dirty: true,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        self.enter_screen(self.active_screen)?;

        let mut events = EventReader::terminal(UI_TICK);

        info!(
            refresh_ms = self.options.refresh.as_millis(),
            report_dir = %self.options.report_dir.display(),
            "TUI event loop started"
        );

        while self.running {
            if self.dirty {
                tui.draw(|frame| self.render(frame))?;
                self.dirty = false;
            }

            // 1. Wait for the next terminal event or background action
            let wake = tokio::select! {
                event = events.next() => Wake::Input(event),
                Some(action) = self.action_rx.recv() => Wake::Action(action),
            };
            let event = match wake {
                Wake::Input(Some(event)) => event,
                Wake::Input(None) => break,
                Wake::Action(action) => {
                    self.process_action(&action)?;
                    continue;
                }
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;
            }
        }

        self.stop_live_feed();
        events.stop();
        tui.exit();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            // In help mode, Esc or ? closes help
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                return Ok(Some(Action::ToggleHelp));
            }

            // Screen navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c)) if c.is_ascii_digit() => {
                let screen = c
                    .to_digit(10)
                    .and_then(|n| u8::try_from(n).ok())
                    .and_then(ScreenId::from_number);
                if let Some(screen) = screen {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            // Tab / Shift+Tab for screen cycling
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

            _ => {}
        }

        // Delegate to active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action: update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        // Ticks only matter when they change the picture.
        if !matches!(action, Action::Tick) {
            self.dirty = true;
        }

        match action {
            Action::Quit => {
                self.stop_live_feed();
                self.running = false;
            }

            Action::Resize(w, h) => {
                debug!(width = w, height = h, "terminal resized");
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    self.leave_screen(self.active_screen);
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = *target;
                    self.enter_screen(*target)?;
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }

            Action::RequestTrend => {
                let series = TrendSeries::generate();
                debug!(samples = series.samples().len(), "trend series drawn");
                self.action_tx.send(Action::TrendUpdated(Arc::new(series)))?;
            }

            Action::GenerateReport(date) => {
                self.spawn_report(*date);
            }

            Action::Tick => {
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > NOTIFICATION_TTL {
                        self.notification = None;
                        self.dirty = true;
                    }
                }
                let animating = self
                    .screens
                    .get(&self.active_screen)
                    .is_some_and(|screen| screen.is_animating());
                self.dispatch_to(self.active_screen, action)?;
                self.dirty |= animating;
            }

            // Data results go to the screen that owns them, visible or not.
            Action::LiveFrameUpdated(_) => self.dispatch_to(ScreenId::Live, action)?,
            Action::TrendUpdated(_) => self.dispatch_to(ScreenId::Trend, action)?,
            Action::ReportFinished(_) => self.dispatch_to(ScreenId::Reports, action)?,
        }

        Ok(())
    }

    fn dispatch_to(&mut self, id: ScreenId, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&id) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Focus a screen and start whatever it needs while visible.
    fn enter_screen(&mut self, id: ScreenId) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&id) {
            screen.set_focused(true);
        }
        match id {
            ScreenId::Live => self.start_live_feed(),
            // Every visit gets a fresh series.
            ScreenId::Trend => self.action_tx.send(Action::RequestTrend)?,
            ScreenId::Control | ScreenId::Reports => {}
        }
        Ok(())
    }

    fn leave_screen(&mut self, id: ScreenId) {
        if let Some(screen) = self.screens.get_mut(&id) {
            screen.set_focused(false);
        }
        if id == ScreenId::Live {
            self.stop_live_feed();
        }
    }

    fn start_live_feed(&mut self) {
        if self.live_feed.is_some() {
            return;
        }
        let cancel = CancellationToken::new();
        tokio::spawn(run_live_feed(
            self.options.refresh,
            self.action_tx.clone(),
            cancel.clone(),
        ));
        self.live_feed = Some(cancel);
    }

    fn stop_live_feed(&mut self) {
        if let Some(cancel) = self.live_feed.take() {
            cancel.cancel();
        }
    }

    /// Write a report on the blocking pool. Sends a Notify and a
    /// ReportFinished action on completion.
    fn spawn_report(&self, date: NaiveDate) {
        let dir = self.options.report_dir.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let outcome = match tokio::task::spawn_blocking(move || write_report(&dir, date)).await
            {
                Ok(Ok(path)) => {
                    let _ = tx.send(Action::Notify(Notification::success(format!(
                        "Report saved to {}",
                        path.display()
                    ))));
                    Ok(path)
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "report generation failed");
                    let _ = tx.send(Action::Notify(Notification::error(e.to_string())));
                    Err(e.to_string())
                }
                Err(e) => {
                    warn!(error = %e, "report task failed");
                    let _ = tx.send(Action::Notify(Notification::error("Report task failed")));
                    Err(e.to_string())
                }
            };
            let _ = tx.send(Action::ReportFinished(outcome));
        });
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [tab bar] [screen content] [status bar]
        let [tab_area, content_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_tab_bar(frame, tab_area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }

        self.render_status_bar(frame, status_area);

        if let Some((ref notif, _)) = self.notification {
            self.render_notification(frame, area, notif);
        }

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    /// Render the title banner followed by the four view tabs.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let title = Span::styled(APP_TITLE, theme::title_style());
        let title_width = u16::try_from(title.width()).unwrap_or(u16::MAX);
        let [title_area, tabs_area] =
            Layout::horizontal([Constraint::Length(title_width), Constraint::Min(0)])
                .areas(area);

        frame.render_widget(Paragraph::new(title), title_area);

        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled("│", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, tabs_area);
    }

    /// Render the bottom status bar with feed status and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let feed_indicator = if self.live_feed.is_some() {
            Span::styled(
                format!("● live every {}s", self.options.refresh.as_secs()),
                Style::default().fg(theme::SAFE_GREEN),
            )
        } else {
            Span::styled("○ live feed paused", Style::default().fg(theme::BORDER_GRAY))
        };

        let hints = Span::styled(" │ 1-4 views  Tab next  ? help  q quit", theme::key_hint());

        let line = Line::from(vec![Span::raw(" "), feed_indicator, hints]);

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render a notification toast in the bottom-right corner.
    #[allow(clippy::unused_self)]
    fn render_notification(&self, frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
        let width = msg_len.saturating_add(6).clamp(20, area.width.max(20));
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height).intersection(area);

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::SAFE_GREEN, "✓"),
            NotificationLevel::Error => (theme::ALARM_RED, "✗"),
        };

        frame.render_widget(Clear, toast_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme::BG_DARK));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(notif.message.as_str(), Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 56u16.min(area.width.saturating_sub(4));
        let help_height = 22u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;

        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |title: &'static str| {
            [
                Line::from(Span::styled(
                    format!("  {title}"),
                    Style::default().fg(theme::SIGNAL_CYAN),
                )),
                Line::from(Span::styled(
                    format!("  {}", "─".repeat(title.chars().count())),
                    theme::key_hint(),
                )),
            ]
        };
        let entry = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let mut help_text = vec![Line::from("")];
        help_text.extend(section("Navigation"));
        help_text.extend([
            entry("1-4", "Jump to view"),
            entry("Tab", "Next view"),
            entry("Esc", "Previous view"),
        ]);
        help_text.push(Line::from(""));
        help_text.extend(section("Views"));
        help_text.extend([
            entry("←/→", "Trend series / selector ON-OFF / ±1 day"),
            entry("↑/↓", "Move selector / ±1 week"),
            entry("Space", "Toggle selector"),
            entry("t", "Report date: today"),
            entry("Enter", "Apply changes / generate report"),
        ]);
        help_text.push(Line::from(""));
        help_text.extend([entry("?", "This help"), entry("q", "Quit")]);
        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            "                   Esc or ? to close",
            theme::key_hint(),
        )));

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use substation_core::control::APPLY_ACKNOWLEDGMENT;

    fn app() -> App {
        App::new(AppOptions {
            refresh: Duration::from_secs(2),
            report_dir: std::env::temp_dir(),
        })
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn drain(app: &mut App) -> Vec<Action> {
        std::iter::from_fn(|| app.action_rx.try_recv().ok()).collect()
    }

    fn render_app(app: &App) -> String {
        use ratatui::{Terminal, backend::TestBackend};

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        crate::screens::buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn number_keys_switch_views() {
        let mut app = app();
        let action = app.handle_key_event(key(KeyCode::Char('3'))).unwrap();
        assert!(matches!(action, Some(Action::SwitchScreen(ScreenId::Control))));
        assert!(app.handle_key_event(key(KeyCode::Char('9'))).unwrap().is_none());
    }

    #[test]
    fn help_swallows_other_keys() {
        let mut app = app();
        app.process_action(&Action::ToggleHelp).unwrap();
        assert!(app.handle_key_event(key(KeyCode::Char('q'))).unwrap().is_none());
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::ToggleHelp)
        ));
    }

    #[tokio::test]
    async fn live_feed_runs_only_on_live_view() {
        let mut app = app();
        app.enter_screen(ScreenId::Live).unwrap();
        assert!(app.live_feed.is_some());

        app.process_action(&Action::SwitchScreen(ScreenId::Control))
            .unwrap();
        assert!(app.live_feed.is_none());

        app.process_action(&Action::GoBack).unwrap();
        let queued = drain(&mut app);
        assert!(matches!(queued.as_slice(), [Action::SwitchScreen(ScreenId::Live)]));
        app.process_action(&queued[0]).unwrap();
        assert!(app.live_feed.is_some());

        app.process_action(&Action::Quit).unwrap();
        assert!(app.live_feed.is_none());
        assert!(!app.running);
    }

    #[tokio::test]
    async fn entering_trend_draws_a_fresh_series() {
        let mut app = app();
        app.process_action(&Action::SwitchScreen(ScreenId::Trend))
            .unwrap();
        let queued = drain(&mut app);
        assert!(matches!(queued.as_slice(), [Action::RequestTrend]));

        app.process_action(&Action::RequestTrend).unwrap();
        let queued = drain(&mut app);
        match queued.as_slice() {
            [Action::TrendUpdated(series)] => assert_eq!(series.samples().len(), 10),
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[tokio::test]
    async fn report_request_writes_file_and_reports_back() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = App::new(AppOptions {
            refresh: Duration::from_secs(2),
            report_dir: tmp.path().to_path_buf(),
        });
        let date = NaiveDate::from_ymd_opt(2025, 2, 11).unwrap();
        app.process_action(&Action::GenerateReport(date)).unwrap();

        let mut finished = None;
        while finished.is_none() {
            match app.action_rx.recv().await.unwrap() {
                Action::ReportFinished(outcome) => finished = Some(outcome),
                Action::Notify(n) => assert_eq!(n.level, NotificationLevel::Success),
                _ => {}
            }
        }
        let path = finished.unwrap().unwrap();
        assert_eq!(path, tmp.path().join("Substation_Report_2025-02-11.pdf"));
        assert!(std::fs::read(path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn tab_row_carries_the_dashboard_title() {
        let app = app();
        let text = render_app(&app);
        let first_row = text.lines().next().unwrap();
        assert!(first_row.contains("Smart Substation Dashboard"));
        assert!(first_row.contains("Live Data"));
    }

    #[tokio::test]
    async fn control_selections_reset_after_leaving_the_view() {
        let mut app = app();
        app.process_action(&Action::SwitchScreen(ScreenId::Control))
            .unwrap();
        app.handle_key_event(key(KeyCode::Right)).unwrap(); // Grid OFF
        app.handle_key_event(key(KeyCode::Enter)).unwrap();
        let text = render_app(&app);
        assert!(text.contains("Grid Power: OFF"));
        assert!(text.contains(APPLY_ACKNOWLEDGMENT));

        app.process_action(&Action::SwitchScreen(ScreenId::Live))
            .unwrap();
        app.process_action(&Action::SwitchScreen(ScreenId::Control))
            .unwrap();

        let text = render_app(&app);
        assert!(text.contains("Grid Power: ON"));
        assert!(text.contains("Diesel Generator: ON"));
        assert!(text.contains("Transformer: ON"));
        assert!(!text.contains(APPLY_ACKNOWLEDGMENT));
    }

    #[test]
    fn idle_ticks_do_not_request_a_redraw() {
        let mut app = app();
        app.dirty = false;
        app.process_action(&Action::Tick).unwrap();
        assert!(!app.dirty);

        app.process_action(&Action::ToggleHelp).unwrap();
        assert!(app.dirty);

        app.dirty = false;
        app.notification = Some((
            Notification::success("saved"),
            Instant::now() - NOTIFICATION_TTL * 2,
        ));
        app.process_action(&Action::Tick).unwrap();
        assert!(app.notification.is_none());
        assert!(app.dirty);
    }
}
