//! Synthetic trend series for the Trend Analysis view.
//!
//! Ten hourly samples starting at a fixed epoch, three metrics per sample,
//! each value drawn independently with no smoothing between samples.

use std::ops::RangeInclusive;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;

use crate::generator::{GRID_VOLTAGE_KV, LOAD_CURRENT_A, TRANSFORMER_TEMP_C};

/// Number of samples in every trend series.
pub const TREND_SAMPLES: usize = 10;

/// First timestamp of every trend series: 2025-02-11 00:00.
pub fn trend_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 2, 11)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// The three charted metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum TrendMetric {
    #[strum(to_string = "Grid Voltage (kV)")]
    GridVoltage,
    #[strum(to_string = "Load Current (A)")]
    LoadCurrent,
    #[strum(to_string = "Transformer Temp (°C)")]
    TransformerTemp,
}

impl TrendMetric {
    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            Self::GridVoltage => GRID_VOLTAGE_KV,
            Self::LoadCurrent => LOAD_CURRENT_A,
            Self::TransformerTemp => TRANSFORMER_TEMP_C,
        }
    }
}

/// One hourly sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendSample {
    pub timestamp: NaiveDateTime,
    pub grid_voltage_kv: u32,
    pub load_current_a: u32,
    pub transformer_temp_c: u32,
}

impl TrendSample {
    pub fn value(&self, metric: TrendMetric) -> u32 {
        match metric {
            TrendMetric::GridVoltage => self.grid_voltage_kv,
            TrendMetric::LoadCurrent => self.load_current_a,
            TrendMetric::TransformerTemp => self.transformer_temp_c,
        }
    }
}

/// A complete, immutable trend series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendSeries {
    samples: Vec<TrendSample>,
}

impl TrendSeries {
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let epoch = trend_epoch();
        let samples = (0..TREND_SAMPLES)
            .map(|hour| TrendSample {
                timestamp: epoch + Duration::hours(i64::try_from(hour).unwrap_or_default()),
                grid_voltage_kv: rng.gen_range(GRID_VOLTAGE_KV),
                load_current_a: rng.gen_range(LOAD_CURRENT_A),
                transformer_temp_c: rng.gen_range(TRANSFORMER_TEMP_C),
            })
            .collect();
        Self { samples }
    }

    pub fn samples(&self) -> &[TrendSample] {
        &self.samples
    }

    /// Chart points for one metric: `(hours since epoch, value)`.
    pub fn points(&self, metric: TrendMetric) -> Vec<(f64, f64)> {
        let epoch = trend_epoch();
        self.samples
            .iter()
            .map(|s| {
                #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
                let hours = (s.timestamp - epoch).num_hours() as f64;
                (hours, f64::from(s.value(metric)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use strum::IntoEnumIterator;

    #[test]
    fn ten_hourly_samples_from_epoch() {
        let series = TrendSeries::generate_with(&mut StdRng::seed_from_u64(4));
        let samples = series.samples();
        assert_eq!(samples.len(), TREND_SAMPLES);
        assert_eq!(samples[0].timestamp.to_string(), "2025-02-11 00:00:00");
        assert_eq!(samples[9].timestamp.to_string(), "2025-02-11 09:00:00");
        for pair in samples.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
        }
    }

    #[test]
    fn values_stay_in_metric_ranges() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let series = TrendSeries::generate_with(&mut rng);
            for sample in series.samples() {
                for metric in TrendMetric::iter() {
                    assert!(metric.range().contains(&sample.value(metric)));
                }
            }
        }
    }

    #[test]
    fn points_are_keyed_by_hour_offset() {
        let series = TrendSeries::generate_with(&mut StdRng::seed_from_u64(2));
        let points = series.points(TrendMetric::LoadCurrent);
        let xs: Vec<f64> = points.iter().map(|&(x, _)| x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(points[3].1, f64::from(series.samples()[3].load_current_a));
    }
}
