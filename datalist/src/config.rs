//! Widget timing and geometry configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DataListError, Result};

/// Timing and placement knobs shared by every widget behind one router.
///
/// All fields have defaults, so a partial JSON document is enough:
///
/// ```
/// # use datalist::DataListConfig;
/// let config = DataListConfig::from_json(r#"{ "filter_debounce_ms": 300 }"#).unwrap();
/// assert_eq!(config.filter_debounce_ms, 300);
/// assert_eq!(config.blur_settle_ms, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataListConfig {
    /// Quiet period after the last keystroke before the rows are filtered.
    pub filter_debounce_ms: u64,

    /// Delay between an input losing focus and the panel hiding.
    pub blur_settle_ms: u64,

    /// Window after a pointer-down on a row in which a pending blur-settle
    /// hide gets cancelled.
    pub pointer_down_grace_ms: u64,

    /// Trailing throttle window for viewport resizes.
    pub resize_throttle_ms: u64,

    /// Viewports shorter than this pin the panel full-screen.
    pub compact_viewport_height: f32,

    /// Gap kept between the panel and the viewport edges, in pixels.
    pub viewport_gap: f32,
}

impl Default for DataListConfig {
    fn default() -> Self {
        Self {
            filter_debounce_ms: 150,
            blur_settle_ms: 100,
            pointer_down_grace_ms: 20,
            resize_throttle_ms: 200,
            compact_viewport_height: 450.0,
            viewport_gap: 8.0,
        }
    }
}

impl DataListConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the placement and timer logic cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.compact_viewport_height.is_finite() || self.compact_viewport_height < 0.0 {
            return Err(DataListError::InvalidConfig(format!(
                "compact_viewport_height must be a non-negative number, got {}",
                self.compact_viewport_height
            )));
        }
        if !self.viewport_gap.is_finite() || self.viewport_gap < 0.0 {
            return Err(DataListError::InvalidConfig(format!(
                "viewport_gap must be a non-negative number, got {}",
                self.viewport_gap
            )));
        }
        if self.resize_throttle_ms == 0 {
            return Err(DataListError::InvalidConfig(
                "resize_throttle_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the keystroke debounce delay.
    pub fn filter_debounce(mut self, delay: Duration) -> Self {
        self.filter_debounce_ms = millis(delay);
        self
    }

    /// Set the blur settle delay.
    pub fn blur_settle(mut self, delay: Duration) -> Self {
        self.blur_settle_ms = millis(delay);
        self
    }

    /// Set the pointer-down grace window.
    pub fn pointer_down_grace(mut self, delay: Duration) -> Self {
        self.pointer_down_grace_ms = millis(delay);
        self
    }

    /// Set the resize throttle window.
    pub fn resize_throttle(mut self, delay: Duration) -> Self {
        self.resize_throttle_ms = millis(delay);
        self
    }

    /// Set the compact viewport threshold.
    pub fn compact_viewport_height(mut self, height: f32) -> Self {
        self.compact_viewport_height = height;
        self
    }

    /// Set the gap kept to the viewport edges.
    pub fn viewport_gap(mut self, gap: f32) -> Self {
        self.viewport_gap = gap;
        self
    }

    pub fn filter_debounce_delay(&self) -> Duration {
        Duration::from_millis(self.filter_debounce_ms)
    }

    pub fn blur_settle_delay(&self) -> Duration {
        Duration::from_millis(self.blur_settle_ms)
    }

    pub fn pointer_down_grace_delay(&self) -> Duration {
        Duration::from_millis(self.pointer_down_grace_ms)
    }

    pub fn resize_throttle_delay(&self) -> Duration {
        Duration::from_millis(self.resize_throttle_ms)
    }
}

/// Whole milliseconds in `delay`, saturating at `u64::MAX`.
fn millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DataListConfig::default();
        assert_eq!(config.filter_debounce_delay(), Duration::from_millis(150));
        assert_eq!(config.blur_settle_delay(), Duration::from_millis(100));
        assert_eq!(config.pointer_down_grace_delay(), Duration::from_millis(20));
        assert_eq!(config.resize_throttle_delay(), Duration::from_millis(200));
        assert_eq!(config.compact_viewport_height, 450.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DataListConfig::from_json(r#"{ "resize_throttle_ms": 50 }"#).unwrap();
        assert_eq!(config.resize_throttle_ms, 50);
        assert_eq!(config.filter_debounce_ms, 150);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = DataListConfig::from_json(r#"{ "viewport_gap": -1.0 }"#).unwrap_err();
        assert!(matches!(err, DataListError::InvalidConfig(_)));

        let err = DataListConfig::from_json(r#"{ "resize_throttle_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, DataListError::InvalidConfig(_)));

        let err = DataListConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, DataListError::ConfigJson(_)));
    }

    #[test]
    fn test_builder() {
        let config = DataListConfig::new()
            .filter_debounce(Duration::from_millis(10))
            .compact_viewport_height(300.0);
        assert_eq!(config.filter_debounce_ms, 10);
        assert_eq!(config.compact_viewport_height, 300.0);
    }

    #[test]
    fn test_builder_saturates_huge_delays() {
        let config = DataListConfig::new().blur_settle(Duration::MAX);
        assert_eq!(config.blur_settle_ms, u64::MAX);
    }

    #[test]
    fn test_builder_output_is_validated() {
        let config = DataListConfig::new().viewport_gap(12.0);
        assert_eq!(config.viewport_gap, 12.0);
        assert!(config.validate().is_ok());

        let config = DataListConfig::new().viewport_gap(-4.0);
        assert!(matches!(config.validate(), Err(DataListError::InvalidConfig(_))));

        let config = DataListConfig::new().compact_viewport_height(f32::NAN);
        assert!(matches!(config.validate(), Err(DataListError::InvalidConfig(_))));

        let config = DataListConfig::new().resize_throttle(Duration::ZERO);
        assert!(matches!(config.validate(), Err(DataListError::InvalidConfig(_))));
    }
}
