use section_pager_protocol::InputSource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number in range, got {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("{low_field} ({low}) must not exceed {high_field} ({high})")]
    InvertedBand {
        low_field: &'static str,
        low: f64,
        high_field: &'static str,
        high: f64,
    },
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wheel tick classification and burst coalescing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Smallest `|deltaY|` treated as an intentional tick.
    pub min_delta: f64,
    /// Largest `|deltaY|` still trusted; anything above is over-scroll.
    pub max_delta: f64,
    /// Events closer together than this belong to one burst.
    pub burst_window_ms: f64,
    /// How long the decision on a burst is deferred after its latest event.
    pub debounce_delay_ms: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            min_delta: 30.0,
            max_delta: 150.0,
            burst_window_ms: 100.0,
            debounce_delay_ms: 150.0,
        }
    }
}

/// Swipe classification. Distances in CSS pixels, velocities in px/ms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    pub min_distance: f64,
    /// Minimum distance once the gesture has been flagged as a drag.
    pub drag_min_distance: f64,
    /// Movement from the start point that flags a gesture as a drag.
    pub drag_threshold: f64,
    pub max_duration_ms: f64,
    pub min_velocity: f64,
    pub max_velocity: f64,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            min_distance: 50.0,
            drag_min_distance: 80.0,
            drag_threshold: 100.0,
            max_duration_ms: 1000.0,
            min_velocity: 0.05,
            max_velocity: 3.0,
        }
    }
}

/// Lock window after a committed transition, per input source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleConfig {
    pub wheel_ms: f64,
    pub touch_ms: f64,
    /// Indicator clicks, programmatic jumps and keyboard navigation.
    pub discrete_ms: f64,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            wheel_ms: 500.0,
            touch_ms: 700.0,
            discrete_ms: 1000.0,
        }
    }
}

impl SettleConfig {
    pub fn for_source(&self, source: InputSource) -> f64 {
        match source {
            InputSource::Wheel => self.wheel_ms,
            InputSource::Touch => self.touch_ms,
            InputSource::Indicator | InputSource::Programmatic | InputSource::Keyboard => {
                self.discrete_ms
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Delay between consecutive reveal children of the entered section.
    pub stagger_ms: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { stagger_ms: 75.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticsConfig {
    pub enabled: bool,
    pub duration_ms: u32,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: 10,
        }
    }
}

/// Every tunable of the pager. All tables are optional in serialized form;
/// missing fields take the defaults above.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    pub wheel: WheelConfig,
    pub touch: TouchConfig,
    pub settle: SettleConfig,
    pub reveal: RevealConfig,
    pub haptics: HapticsConfig,
}

impl PagerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: PagerConfig = toml::from_str(text)?;
        config.validate()?;
        log::info!("loaded pager config from toml");
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: PagerConfig = serde_json::from_str(text)?;
        config.validate()?;
        log::info!("loaded pager config from json");
        Ok(config)
    }

    /// Check every threshold is usable. Zero is allowed for the reveal
    /// stagger (all children at once) and for `min_*` lower bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.wheel;
        non_negative("wheel.min_delta", w.min_delta)?;
        positive("wheel.max_delta", w.max_delta)?;
        band("wheel.min_delta", w.min_delta, "wheel.max_delta", w.max_delta)?;
        non_negative("wheel.burst_window_ms", w.burst_window_ms)?;
        non_negative("wheel.debounce_delay_ms", w.debounce_delay_ms)?;

        let t = &self.touch;
        non_negative("touch.min_distance", t.min_distance)?;
        non_negative("touch.drag_min_distance", t.drag_min_distance)?;
        positive("touch.drag_threshold", t.drag_threshold)?;
        positive("touch.max_duration_ms", t.max_duration_ms)?;
        non_negative("touch.min_velocity", t.min_velocity)?;
        positive("touch.max_velocity", t.max_velocity)?;
        band(
            "touch.min_velocity",
            t.min_velocity,
            "touch.max_velocity",
            t.max_velocity,
        )?;

        let s = &self.settle;
        non_negative("settle.wheel_ms", s.wheel_ms)?;
        non_negative("settle.touch_ms", s.touch_ms)?;
        non_negative("settle.discrete_ms", s.discrete_ms)?;

        non_negative("reveal.stagger_ms", self.reveal.stagger_ms)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn band(
    low_field: &'static str,
    low: f64,
    high_field: &'static str,
    high: f64,
) -> Result<(), ConfigError> {
    if low <= high {
        Ok(())
    } else {
        Err(ConfigError::InvertedBand {
            low_field,
            low,
            high_field,
            high,
        })
    }
}
