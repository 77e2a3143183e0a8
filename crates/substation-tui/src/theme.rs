//! Control-room palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const AMBER: Color = Color::Rgb(255, 184, 77); // #ffb84d
pub const SIGNAL_CYAN: Color = Color::Rgb(102, 217, 239); // #66d9ef
pub const SAFE_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const WARNING_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const ALARM_RED: Color = Color::Rgb(255, 85, 85); // #ff5555

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

/// Trend chart series colors, one per metric.
pub const CHART_SERIES: &[Color] = &[SIGNAL_CYAN, AMBER, ALARM_RED];

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(SIGNAL_CYAN).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(AMBER)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Tile / field label.
pub fn label() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Large metric value.
pub fn metric_value() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

/// Selected row in a list or form.
pub fn row_selected() -> Style {
    Style::default()
        .fg(AMBER)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(SIGNAL_CYAN).add_modifier(Modifier::BOLD)
}

/// Positive delta (rising value).
pub fn delta_up() -> Style {
    Style::default().fg(SAFE_GREEN)
}

/// Negative delta (falling value).
pub fn delta_down() -> Style {
    Style::default().fg(ALARM_RED)
}
