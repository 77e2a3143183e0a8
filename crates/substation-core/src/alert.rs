//! Threshold alerts evaluated against a single reading.
//!
//! Alerts carry no memory: each call looks only at the reading it is given,
//! so an alert re-fires on every cycle for as long as its condition holds.

use std::fmt;

use crate::model::Reading;

/// Transformer temperature above which the critical alert fires.
pub const TRANSFORMER_TEMP_CRITICAL_C: u32 = 75;
/// Line loss above which the warning alert fires.
pub const LINE_LOSS_WARNING_PCT: f64 = 4.0;

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertLevel {
    Warning,
    Critical,
}

/// A purely informational alert raised for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: &'static str,
}

impl Alert {
    pub const TRANSFORMER_TEMP: Self = Self {
        level: AlertLevel::Critical,
        message: "Transformer Temperature Critical!",
    };

    pub const LINE_LOSS: Self = Self {
        level: AlertLevel::Warning,
        message: "Line Loss Exceeding Safe Limits!",
    };
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// Evaluate both alerts independently. Critical comes first when both fire.
pub fn evaluate(reading: &Reading) -> Vec<Alert> {
    let mut alerts = Vec::with_capacity(2);
    if reading.transformer_temp_c > TRANSFORMER_TEMP_CRITICAL_C {
        alerts.push(Alert::TRANSFORMER_TEMP);
    }
    if reading.line_loss_pct > LINE_LOSS_WARNING_PCT {
        alerts.push(Alert::LINE_LOSS);
    }
    alerts
}
