//! Manual Control screen: three ON/OFF selectors and a "Current Settings"
//! summary. Nothing here reaches real equipment; "Apply Changes" only
//! acknowledges.
//!
//! Layout:
//! ┌─ Manual Control ──────────────────┐┌─ Current Settings ─┐
//! │ ▸ Grid Power        ● ON   ○ OFF  ││ Grid Power: ON     │
//! │   Diesel Generator  ● ON   ○ OFF  ││ Diesel: ON         │
//! │   Transformer       ● ON   ○ OFF  ││ Transformer: ON    │
//! │                                   │└────────────────────┘
//! │ [ Apply Changes ]                 │
//! └───────────────────────────────────┘

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use strum::IntoEnumIterator;

use substation_core::{ControlPanel, Equipment, SwitchState};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;

pub struct ControlScreen {
    focused: bool,
    panel: ControlPanel,
    /// Index into `Equipment::iter()` of the highlighted selector.
    cursor: usize,
    /// Shown after Apply until the next change.
    acknowledgment: Option<&'static str>,
}

impl ControlScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            panel: ControlPanel::default(),
            cursor: 0,
            acknowledgment: None,
        }
    }

    fn equipment_at(index: usize) -> Option<Equipment> {
        Equipment::iter().nth(index)
    }

    fn current(&self) -> Option<Equipment> {
        Self::equipment_at(self.cursor)
    }

    /// Move the cursor one row, wrapping and skipping locked selectors.
    fn move_cursor(&mut self, forward: bool) {
        let count = Equipment::iter().count();
        let mut next = self.cursor;
        for _ in 0..count {
            next = if forward {
                (next + 1) % count
            } else {
                (next + count - 1) % count
            };
            if Self::equipment_at(next).is_some_and(|e| self.panel.is_selectable(e)) {
                self.cursor = next;
                return;
            }
        }
    }

    fn change(&mut self, state: Option<SwitchState>) {
        let Some(equipment) = self.current() else {
            return;
        };
        let changed = match state {
            Some(state) => self.panel.set(equipment, state),
            None => self.panel.toggle(equipment),
        };
        if changed {
            self.acknowledgment = None;
        }
    }

    fn render_selector(&self, frame: &mut Frame, area: Rect, index: usize, equipment: Equipment) {
        let active = self.focused && index == self.cursor;
        let selectable = self.panel.is_selectable(equipment);
        let shown = self.panel.effective(equipment);

        let pointer = if active { "▸ " } else { "  " };
        let label_style = if active {
            theme::row_selected()
        } else if selectable {
            theme::label()
        } else {
            theme::key_hint()
        };

        let radio = |state: SwitchState| {
            let (dot, style) = if shown == state {
                let color = match state {
                    SwitchState::On => theme::SAFE_GREEN,
                    SwitchState::Off => theme::ALARM_RED,
                };
                ("●", Style::default().fg(color).add_modifier(Modifier::BOLD))
            } else {
                ("○", theme::key_hint())
            };
            Span::styled(format!("{dot} {state:<5}"), style)
        };

        let mut spans = vec![
            Span::styled(pointer, Style::default().fg(theme::AMBER)),
            Span::styled(format!("{:<18}", equipment.to_string()), label_style),
            radio(SwitchState::On),
            Span::raw(" "),
            radio(SwitchState::Off),
        ];
        if !selectable {
            spans.push(Span::styled(
                "  locked: Grid Power is OFF",
                Style::default().fg(theme::WARNING_YELLOW),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_settings(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Current Settings ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let lines: Vec<Line> = self
            .panel
            .settings()
            .iter()
            .map(|(equipment, state)| {
                let color = match state {
                    SwitchState::On => theme::SAFE_GREEN,
                    SwitchState::Off => theme::ALARM_RED,
                };
                Line::from(vec![
                    Span::styled(format!(" {equipment}: "), theme::label()),
                    Span::styled(state.to_string(), Style::default().fg(color)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Component for ControlScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
            KeyCode::Left | KeyCode::Char('h') => self.change(Some(SwitchState::On)),
            KeyCode::Right | KeyCode::Char('l') => self.change(Some(SwitchState::Off)),
            KeyCode::Char(' ') => self.change(None),
            KeyCode::Enter => {
                let message = self.panel.apply();
                self.acknowledgment = Some(message);
                return Ok(Some(Action::Notify(Notification::success(message))));
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [form_area, settings_area] =
            Layout::horizontal([Constraint::Min(40), Constraint::Length(30)]).areas(area);

        let block = Block::default()
            .title(" Manual Control ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // spacer
            Constraint::Length(1), // grid
            Constraint::Length(1), // diesel
            Constraint::Length(1), // transformer
            Constraint::Length(1), // spacer
            Constraint::Length(1), // apply
            Constraint::Length(1), // acknowledgment
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(inner);

        for (index, equipment) in Equipment::iter().enumerate() {
            self.render_selector(frame, rows[index + 1], index, equipment);
        }

        frame.render_widget(
            Paragraph::new(Span::styled(
                "  [ Apply Changes ]",
                Style::default().fg(theme::AMBER).add_modifier(Modifier::BOLD),
            )),
            rows[5],
        );

        if let Some(message) = self.acknowledgment {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("  ✓ {message}"),
                    Style::default().fg(theme::SAFE_GREEN),
                )),
                rows[6],
            );
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("  ↑/↓ ", theme::key_hint_key()),
                Span::styled("select  ", theme::key_hint()),
                Span::styled("←/→ ", theme::key_hint_key()),
                Span::styled("ON/OFF  ", theme::key_hint()),
                Span::styled("Space ", theme::key_hint_key()),
                Span::styled("toggle  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("apply", theme::key_hint()),
            ])),
            rows[8],
        );

        self.render_settings(frame, settings_area);
    }

    /// Leaving the view discards pending selections; nothing was applied.
    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.panel = ControlPanel::default();
            self.cursor = 0;
            self.acknowledgment = None;
        }
    }
}
