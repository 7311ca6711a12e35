//! Configuration value objects for the timer modes

use serde::{Deserialize, Serialize};

/// Which kind of timer is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    #[default]
    Stopwatch,
    Countdown,
    Interval,
}

impl TimerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Stopwatch => "stopwatch",
            TimerMode::Countdown => "countdown",
            TimerMode::Interval => "interval",
        }
    }
}

/// One interval training block: `sets` repetitions of `cycles` work/rest pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalConfig {
    pub work_seconds: u32,
    pub rest_seconds: u32,
    pub cycles: u32,
    pub sets: u32,
    pub rest_between_sets_seconds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl IntervalConfig {
    pub const DEFAULT_WORK_SECONDS: u32 = 20;
    pub const DEFAULT_REST_SECONDS: u32 = 10;
    pub const DEFAULT_CYCLES: u32 = 8;
    pub const DEFAULT_SETS: u32 = 1;
    pub const DEFAULT_REST_BETWEEN_SETS_SECONDS: u32 = 60;

    /// Build a config, clamping `cycles` and `sets` to at least one
    pub fn new(
        work_seconds: u32,
        rest_seconds: u32,
        cycles: u32,
        sets: u32,
        rest_between_sets_seconds: u32,
    ) -> Self {
        Self {
            work_seconds,
            rest_seconds,
            cycles: cycles.max(1),
            sets: sets.max(1),
            rest_between_sets_seconds,
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn normalized(mut self) -> Self {
        self.cycles = self.cycles.max(1);
        self.sets = self.sets.max(1);
        self
    }

    /// Length of a full session with this config, set rests included
    pub fn total_seconds(&self) -> u64 {
        let cycles = u64::from(self.cycles.max(1));
        let sets = u64::from(self.sets.max(1));
        let per_cycle = u64::from(self.work_seconds) + u64::from(self.rest_seconds);
        sets * cycles * per_cycle + (sets - 1) * u64::from(self.rest_between_sets_seconds)
    }
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_WORK_SECONDS,
            Self::DEFAULT_REST_SECONDS,
            Self::DEFAULT_CYCLES,
            Self::DEFAULT_SETS,
            Self::DEFAULT_REST_BETWEEN_SETS_SECONDS,
        )
    }
}

/// Countdown duration split the way it is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownConfig {
    pub minutes: u32,
    pub seconds: u32,
}

impl CountdownConfig {
    pub const DEFAULT_MINUTES: u32 = 5;
    pub const DEFAULT_SECONDS: u32 = 0;

    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds: seconds.min(59) }
    }

    pub fn normalized(self) -> Self {
        Self::new(self.minutes, self.seconds)
    }

    pub fn total_seconds(&self) -> u32 {
        self.minutes.saturating_mul(60).saturating_add(self.seconds)
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MINUTES, Self::DEFAULT_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_new_clamps_counts() {
        let config = IntervalConfig::new(20, 10, 0, 0, 60);
        assert_eq!(config.cycles, 1);
        assert_eq!(config.sets, 1);
    }

    #[test]
    fn test_interval_total_seconds() {
        // 2 sets * 2 cycles * 30s + 1 set rest of 60s
        let config = IntervalConfig::new(20, 10, 2, 2, 60);
        assert_eq!(config.total_seconds(), 180);

        let tabata = IntervalConfig::default();
        assert_eq!(tabata.total_seconds(), 240);
    }

    #[test]
    fn test_countdown_total_and_clamp() {
        assert_eq!(CountdownConfig::new(2, 30).total_seconds(), 150);
        assert_eq!(CountdownConfig::new(1, 75).seconds, 59);
        assert_eq!(CountdownConfig { minutes: 0, seconds: 90 }.normalized().seconds, 59);
    }

    #[test]
    fn test_interval_json_keys() {
        let config = IntervalConfig::new(5, 5, 1, 1, 0).named("warmup");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["workSeconds"], 5);
        assert_eq!(json["restBetweenSetsSeconds"], 0);
        assert_eq!(json["name"], "warmup");

        let unnamed = serde_json::to_value(IntervalConfig::default()).unwrap();
        assert!(unnamed.get("name").is_none());
    }

    #[test]
    fn test_mode_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&TimerMode::Interval).unwrap(), "\"interval\"");
        assert_eq!(TimerMode::default(), TimerMode::Stopwatch);
    }
}
