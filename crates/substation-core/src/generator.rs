//! Telemetry generator: one independent [`Reading`] per call.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::model::Reading;

pub const GRID_VOLTAGE_KV: RangeInclusive<u32> = 220..=240;
pub const LOAD_CURRENT_A: RangeInclusive<u32> = 50..=200;
pub const POWER_FACTOR: RangeInclusive<f64> = 0.8..=1.0;
pub const TRANSFORMER_TEMP_C: RangeInclusive<u32> = 50..=80;
pub const FREQUENCY_HZ: RangeInclusive<f64> = 49.5..=50.5;
pub const LINE_LOSS_PCT: RangeInclusive<f64> = 2.0..=5.0;
pub const BATTERY_STATUS_PCT: RangeInclusive<u32> = 50..=100;

/// Draw a fresh reading from the thread-local RNG.
pub fn generate() -> Reading {
    generate_with(&mut rand::thread_rng())
}

/// Draw a fresh reading from a caller-supplied entropy source.
///
/// Every field is sampled uniformly from its closed interval; real fields
/// are rounded to two decimals after sampling, which keeps them in range.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Reading {
    Reading {
        grid_voltage_kv: rng.gen_range(GRID_VOLTAGE_KV),
        load_current_a: rng.gen_range(LOAD_CURRENT_A),
        power_factor: round2(rng.gen_range(POWER_FACTOR)),
        transformer_temp_c: rng.gen_range(TRANSFORMER_TEMP_C),
        frequency_hz: round2(rng.gen_range(FREQUENCY_HZ)),
        line_loss_pct: round2(rng.gen_range(LINE_LOSS_PCT)),
        battery_status_pct: rng.gen_range(BATTERY_STATUS_PCT),
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn has_two_decimals(value: f64) -> bool {
        ((value * 100.0).round() - value * 100.0).abs() < 1e-6
    }

    #[test]
    fn every_field_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let r = generate_with(&mut rng);
            assert!(GRID_VOLTAGE_KV.contains(&r.grid_voltage_kv));
            assert!(LOAD_CURRENT_A.contains(&r.load_current_a));
            assert!(POWER_FACTOR.contains(&r.power_factor));
            assert!(TRANSFORMER_TEMP_C.contains(&r.transformer_temp_c));
            assert!(FREQUENCY_HZ.contains(&r.frequency_hz));
            assert!(LINE_LOSS_PCT.contains(&r.line_loss_pct));
            assert!(BATTERY_STATUS_PCT.contains(&r.battery_status_pct));
        }
    }

    #[test]
    fn real_fields_are_rounded_to_two_decimals() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let r = generate_with(&mut rng);
            assert!(has_two_decimals(r.power_factor), "{}", r.power_factor);
            assert!(has_two_decimals(r.frequency_hz), "{}", r.frequency_hz);
            assert!(has_two_decimals(r.line_loss_pct), "{}", r.line_loss_pct);
        }
    }

    #[test]
    fn bounds_are_reachable() {
        let mut rng = StdRng::seed_from_u64(3);
        let readings: Vec<Reading> = (0..5_000).map(|_| generate_with(&mut rng)).collect();
        assert!(readings.iter().any(|r| r.grid_voltage_kv == 220));
        assert!(readings.iter().any(|r| r.grid_voltage_kv == 240));
        assert!(readings.iter().any(|r| r.battery_status_pct == 100));
    }

    #[test]
    fn successive_calls_are_independent() {
        // No hidden state: both draws are valid on their own.
        let a = generate();
        let b = generate();
        for r in [a, b] {
            assert!(GRID_VOLTAGE_KV.contains(&r.grid_voltage_kv));
            assert!(LINE_LOSS_PCT.contains(&r.line_loss_pct));
        }
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert!((round2(0.845_1) - 0.85).abs() < f64::EPSILON);
        assert!((round2(49.994) - 49.99).abs() < f64::EPSILON);
    }
}
