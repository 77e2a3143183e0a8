//! The [`Reading`] entity and its field catalogue.
//!
//! A reading is one synthetic telemetry snapshot: seven numeric fields drawn
//! independently at creation and never mutated afterwards. [`Field`] fixes
//! the canonical order shared by the live tiles and the PDF report.

use std::fmt;

use serde::Serialize;
use strum::{EnumIter, IntoEnumIterator};

/// One synthetic telemetry snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    pub grid_voltage_kv: u32,
    pub load_current_a: u32,
    pub power_factor: f64,
    pub transformer_temp_c: u32,
    pub frequency_hz: f64,
    pub line_loss_pct: f64,
    pub battery_status_pct: u32,
}

impl Reading {
    /// Value of a single field.
    pub fn value(&self, field: Field) -> FieldValue {
        match field {
            Field::GridVoltage => FieldValue::Integer(self.grid_voltage_kv),
            Field::LoadCurrent => FieldValue::Integer(self.load_current_a),
            Field::PowerFactor => FieldValue::Real(self.power_factor),
            Field::TransformerTemp => FieldValue::Integer(self.transformer_temp_c),
            Field::Frequency => FieldValue::Real(self.frequency_hz),
            Field::LineLoss => FieldValue::Real(self.line_loss_pct),
            Field::BatteryStatus => FieldValue::Integer(self.battery_status_pct),
        }
    }

    /// All seven fields in canonical order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, FieldValue)> + '_ {
        Field::iter().map(|f| (f, self.value(f)))
    }
}

/// The seven telemetry fields, in canonical (report/tile) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, strum::Display)]
pub enum Field {
    #[strum(to_string = "Grid Voltage (kV)")]
    GridVoltage,
    #[strum(to_string = "Load Current (A)")]
    LoadCurrent,
    #[strum(to_string = "Power Factor")]
    PowerFactor,
    #[strum(to_string = "Transformer Temp (°C)")]
    TransformerTemp,
    #[strum(to_string = "Frequency (Hz)")]
    Frequency,
    #[strum(to_string = "Line Loss (%)")]
    LineLoss,
    #[strum(to_string = "Battery Status (%)")]
    BatteryStatus,
}

impl Field {
    /// Display unit, if the field has one. Power factor is dimensionless.
    pub fn unit(self) -> Option<&'static str> {
        match self {
            Self::GridVoltage => Some("kV"),
            Self::LoadCurrent => Some("A"),
            Self::PowerFactor => None,
            Self::TransformerTemp => Some("°C"),
            Self::Frequency => Some("Hz"),
            Self::LineLoss | Self::BatteryStatus => Some("%"),
        }
    }
}

/// A field value: whole-number fields stay integers, the rest carry two
/// decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Integer(u32),
    Real(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v:.2}"),
        }
    }
}
