//! Request bodies and boundary coercion
//!
//! The engine only accepts validated integers. Numeric fields arriving here
//! may be JSON numbers or numeric strings; anything else (non-numeric text,
//! negative or non-finite numbers, missing fields) falls back to the
//! documented default for that field. Fractions are truncated.

use serde::Deserialize;
use serde_json::Value;

use crate::engine::{CountdownConfig, IntervalConfig, TimerMode};

/// Coerce a loosely typed JSON value to `u32`
pub fn coerce_u32(value: Option<&Value>, default: u32) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            })
        }
        _ => None,
    };

    parsed.and_then(|n| u32::try_from(n).ok()).unwrap_or(default)
}

/// Interval config as typed into a form
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalConfigInput {
    pub work_seconds: Option<Value>,
    pub rest_seconds: Option<Value>,
    pub cycles: Option<Value>,
    pub sets: Option<Value>,
    pub rest_between_sets_seconds: Option<Value>,
    pub name: Option<String>,
}

impl IntervalConfigInput {
    pub fn into_config(self) -> IntervalConfig {
        let config = IntervalConfig::new(
            coerce_u32(self.work_seconds.as_ref(), IntervalConfig::DEFAULT_WORK_SECONDS),
            coerce_u32(self.rest_seconds.as_ref(), IntervalConfig::DEFAULT_REST_SECONDS),
            coerce_u32(self.cycles.as_ref(), IntervalConfig::DEFAULT_CYCLES),
            coerce_u32(self.sets.as_ref(), IntervalConfig::DEFAULT_SETS),
            coerce_u32(
                self.rest_between_sets_seconds.as_ref(),
                IntervalConfig::DEFAULT_REST_BETWEEN_SETS_SECONDS,
            ),
        );

        match self.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
            Some(name) => config.named(name),
            None => config,
        }
    }
}

/// Countdown config as typed into a form
#[derive(Debug, Default, Deserialize)]
pub struct CountdownConfigInput {
    pub minutes: Option<Value>,
    pub seconds: Option<Value>,
}

impl CountdownConfigInput {
    pub fn into_config(self) -> CountdownConfig {
        CountdownConfig::new(
            coerce_u32(self.minutes.as_ref(), CountdownConfig::DEFAULT_MINUTES),
            coerce_u32(self.seconds.as_ref(), CountdownConfig::DEFAULT_SECONDS),
        )
    }
}

/// Body of `POST /mode`
#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub mode: TimerMode,
}

/// Body of `PUT /sequence/mode`
#[derive(Debug, Deserialize)]
pub struct SequenceModeRequest {
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_numbers_and_strings() {
        assert_eq!(coerce_u32(Some(&json!(45)), 0), 45);
        assert_eq!(coerce_u32(Some(&json!("30")), 0), 30);
        assert_eq!(coerce_u32(Some(&json!(" 12 ")), 0), 12);
        assert_eq!(coerce_u32(Some(&json!(7.9)), 0), 7);
        assert_eq!(coerce_u32(Some(&json!("2.5")), 0), 2);
    }

    #[test]
    fn test_coerce_falls_back_to_default() {
        assert_eq!(coerce_u32(None, 20), 20);
        assert_eq!(coerce_u32(Some(&json!("abc")), 20), 20);
        assert_eq!(coerce_u32(Some(&json!(-5)), 20), 20);
        assert_eq!(coerce_u32(Some(&json!("-5")), 20), 20);
        assert_eq!(coerce_u32(Some(&json!(null)), 20), 20);
        assert_eq!(coerce_u32(Some(&json!(true)), 20), 20);
        assert_eq!(coerce_u32(Some(&json!(u64::MAX)), 20), 20);
    }

    #[test]
    fn test_interval_input_clamps_counts() {
        let input: IntervalConfigInput = serde_json::from_value(json!({
            "workSeconds": "40",
            "restSeconds": "",
            "cycles": 0,
            "sets": "0",
            "name": "  ",
        }))
        .unwrap();
        let config = input.into_config();
        assert_eq!(config.work_seconds, 40);
        assert_eq!(config.rest_seconds, IntervalConfig::DEFAULT_REST_SECONDS);
        assert_eq!(config.cycles, 1);
        assert_eq!(config.sets, 1);
        assert_eq!(config.rest_between_sets_seconds, IntervalConfig::DEFAULT_REST_BETWEEN_SETS_SECONDS);
        assert_eq!(config.name, None);
    }

    #[test]
    fn test_countdown_input_clamps_seconds() {
        let input: CountdownConfigInput =
            serde_json::from_value(json!({ "minutes": "3", "seconds": 75 })).unwrap();
        assert_eq!(input.into_config(), CountdownConfig::new(3, 59));

        let empty = CountdownConfigInput::default().into_config();
        assert_eq!(empty, CountdownConfig::default());
    }
}
