//! Visualiser settings and input sanitisation
//!
//! Raw text from the bar count and speed fields is never trusted: it is
//! clamped into range, and empty or non-numeric input falls back to the
//! defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Sorting algorithms the visualiser can animate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortAlgorithm {
    #[default]
    Merge,
    Selection,
    Insertion,
    Bubble,
}

impl SortAlgorithm {
    /// Every algorithm, in button order
    pub const ALL: [SortAlgorithm; 4] = [
        SortAlgorithm::Merge,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Bubble,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortAlgorithm::Merge => "Merge Sort",
            SortAlgorithm::Selection => "Selection Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Bubble => "Bubble Sort",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "merge" | "merge sort" | "merge-sort" => Some(SortAlgorithm::Merge),
            "selection" | "selection sort" | "selection-sort" => Some(SortAlgorithm::Selection),
            "insertion" | "insertion sort" | "insertion-sort" => Some(SortAlgorithm::Insertion),
            "bubble" | "bubble sort" | "bubble-sort" => Some(SortAlgorithm::Bubble),
            _ => None,
        }
    }

    /// DOM id of the button that triggers this algorithm
    pub fn button_id(&self) -> &'static str {
        match self {
            SortAlgorithm::Merge => "merge-sort",
            SortAlgorithm::Selection => "selection-sort",
            SortAlgorithm::Insertion => "insertion-sort",
            SortAlgorithm::Bubble => "bubble-sort",
        }
    }
}

/// Parse a numeric text field leniently.
///
/// Accepts integers and decimals (decimals are truncated toward zero).
/// Returns `None` for empty or non-numeric text.
fn parse_number(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(n);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(f.trunc() as i64),
        _ => None,
    }
}

/// Sanitise the bar count field into [`BAR_COUNT_MIN`, `BAR_COUNT_MAX`]
pub fn parse_bar_count(input: &str) -> usize {
    match parse_number(input) {
        Some(n) => {
            let clamped = n.clamp(BAR_COUNT_MIN as i64, BAR_COUNT_MAX as i64) as usize;
            if clamped as i64 != n {
                log::debug!("Bar count {} clamped to {}", n, clamped);
            }
            clamped
        }
        None => {
            log::debug!(
                "Bar count input {:?} not numeric, using {}",
                input,
                BAR_COUNT_DEFAULT
            );
            BAR_COUNT_DEFAULT
        }
    }
}

/// Sanitise the speed field into [`SPEED_MIN`, `SPEED_MAX`]
pub fn parse_speed(input: &str) -> u8 {
    match parse_number(input) {
        Some(n) => {
            let clamped = n.clamp(SPEED_MIN as i64, SPEED_MAX as i64) as u8;
            if clamped as i64 != n {
                log::debug!("Speed {} clamped to {}", n, clamped);
            }
            clamped
        }
        None => {
            log::debug!(
                "Speed input {:?} not numeric, using {}",
                input,
                SPEED_DEFAULT
            );
            SPEED_DEFAULT
        }
    }
}

/// Tick interval (ms) for a speed; out-of-range speeds are clamped first
pub fn interval_for_speed(speed: u8) -> u32 {
    let speed = speed.clamp(SPEED_MIN, SPEED_MAX);
    INTERVAL_OPTIONS[(speed - SPEED_MIN) as usize]
}

/// Visualiser preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Number of bars generated by "Generate New Values"
    pub bar_count: usize,
    /// Animation speed, 1 (slow) to 10 (fast)
    pub speed: u8,
    /// Last algorithm requested
    #[serde(default)]
    pub algorithm: SortAlgorithm,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bar_count: BAR_COUNT_DEFAULT,
            speed: SPEED_DEFAULT,
            algorithm: SortAlgorithm::default(),
        }
    }
}

impl Settings {
    /// Build settings straight from the raw text fields
    pub fn from_inputs(bar_count: &str, speed: &str) -> Self {
        Self {
            bar_count: parse_bar_count(bar_count),
            speed: parse_speed(speed),
            ..Self::default()
        }
    }

    pub fn set_bar_count_input(&mut self, input: &str) {
        self.bar_count = parse_bar_count(input);
    }

    pub fn set_speed_input(&mut self, input: &str) {
        self.speed = parse_speed(input);
    }

    /// Current tick interval in milliseconds
    pub fn interval_ms(&self) -> u32 {
        interval_for_speed(self.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_count_clamps() {
        assert_eq!(parse_bar_count("0"), 1);
        assert_eq!(parse_bar_count("-7"), 1);
        assert_eq!(parse_bar_count("250"), 100);
        assert_eq!(parse_bar_count(" 42 "), 42);
        assert_eq!(parse_bar_count("12.9"), 12);
    }

    #[test]
    fn test_bar_count_defaults_on_garbage() {
        assert_eq!(parse_bar_count(""), BAR_COUNT_DEFAULT);
        assert_eq!(parse_bar_count("lots"), BAR_COUNT_DEFAULT);
        assert_eq!(parse_bar_count("NaN"), BAR_COUNT_DEFAULT);
    }

    #[test]
    fn test_speed_maps_through_table() {
        assert_eq!(interval_for_speed(1), 500);
        assert_eq!(interval_for_speed(9), 2);
        assert_eq!(interval_for_speed(10), 1);
        assert_eq!(interval_for_speed(0), 500);
        assert_eq!(interval_for_speed(200), 1);
    }

    #[test]
    fn test_speed_input_sanitised() {
        assert_eq!(parse_speed(""), SPEED_DEFAULT);
        assert_eq!(parse_speed("fast"), SPEED_DEFAULT);
        assert_eq!(parse_speed("15"), 10);
        assert_eq!(parse_speed("-3"), 1);
        assert_eq!(parse_speed("2.5"), 2);
    }

    #[test]
    fn test_default_interval_is_two_ms() {
        let settings = Settings::default();
        assert_eq!(settings.bar_count, 100);
        assert_eq!(settings.interval_ms(), 2);
    }

    #[test]
    fn test_from_inputs() {
        let settings = Settings::from_inputs("8", "1");
        assert_eq!(settings.bar_count, 8);
        assert_eq!(settings.interval_ms(), 500);
    }

    #[test]
    fn test_algorithm_names_round_trip() {
        for algorithm in SortAlgorithm::ALL {
            assert_eq!(SortAlgorithm::from_str(algorithm.as_str()), Some(algorithm));
            assert_eq!(
                SortAlgorithm::from_str(algorithm.button_id()),
                Some(algorithm)
            );
        }
        assert_eq!(SortAlgorithm::from_str("quick"), None);
    }

    #[test]
    fn test_settings_serde() {
        let json = r#"{"bar_count":12,"speed":3}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.bar_count, 12);
        assert_eq!(settings.algorithm, SortAlgorithm::Merge);
    }
}
