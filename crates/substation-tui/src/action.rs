//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use substation_core::{LiveFrame, TrendSeries};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }
}

/// Outcome of a report generation request, as shown on the Reports screen.
pub type ReportOutcome = Result<PathBuf, String>;

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,

    // ── Live Data ─────────────────────────────────────────────────
    LiveFrameUpdated(Arc<LiveFrame>),

    // ── Trend Analysis ────────────────────────────────────────────
    RequestTrend,
    TrendUpdated(Arc<TrendSeries>),

    // ── Reports ───────────────────────────────────────────────────
    GenerateReport(NaiveDate),
    ReportFinished(ReportOutcome),

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
}
