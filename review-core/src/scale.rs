//! Time/frequency scale of the viewport, derived from the zoom and Y-preset selectors.

use serde::{Deserialize, Serialize};

/// Nyquist assumed when no audio context is available (44.1 kHz material).
pub const FALLBACK_NYQUIST_HZ: f64 = 22_050.0;

/// Ceiling shown when the Y preset cannot be parsed.
pub const DEFAULT_CEILING_HZ: f64 = 15_000.0;

/// Lowest ceiling the viewport will ever map against.
pub const MIN_CEILING_HZ: f64 = 100.0;

/// Columns drawn per second at speed 1.
const COLUMNS_PER_SECOND: f64 = 60.0;

/// Frequency shown at the top of the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YPreset {
    Hz(f64),
    Nyquist,
}

impl Default for YPreset {
    fn default() -> Self {
        YPreset::Hz(DEFAULT_CEILING_HZ)
    }
}

/// Options offered by the Y preset selector: (select value, label).
pub const Y_PRESET_OPTIONS: &[(&str, &str)] = &[
    ("3000", "0 - 3 kHz"),
    ("10000", "0 - 10 kHz"),
    ("15000", "0 - 15 kHz"),
    ("nyq", "0 - Nyquist"),
];

impl YPreset {
    /// Parse a `<select>` value: "nyq" or a number of Hz.
    pub fn from_select_value(value: &str) -> Self {
        let value = value.trim();
        if value == "nyq" {
            return YPreset::Nyquist;
        }
        match value.parse::<f64>() {
            Ok(hz) if hz.is_finite() => YPreset::Hz(hz),
            _ => YPreset::default(),
        }
    }

    pub fn select_value(&self) -> String {
        match self {
            YPreset::Nyquist => "nyq".to_string(),
            YPreset::Hz(hz) => format!("{hz}"),
        }
    }

    /// Requested ceiling before clamping; `Nyquist` follows the audio context.
    pub fn requested_hz(&self, nyquist_hz: Option<f64>) -> f64 {
        match self {
            YPreset::Hz(hz) => *hz,
            YPreset::Nyquist => nyquist_hz.unwrap_or(FALLBACK_NYQUIST_HZ),
        }
    }
}

/// Zoom speed options offered by the X zoom selector.
pub const X_ZOOM_OPTIONS: &[(&str, &str)] = &[
    ("1", "1x"),
    ("2", "2x"),
    ("3", "3x"),
    ("4", "4x"),
    ("5", "5x"),
];

/// Persisted selector values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleSettings {
    /// Zoom speed (≥ 1). Speed 1 draws 60 columns per second.
    pub speed: f64,
    pub y_preset: YPreset,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self { speed: 1.0, y_preset: YPreset::default() }
    }
}

/// Parse a zoom selector value; anything non-numeric or below 1 reads as 1.
pub fn speed_from_select_value(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v.max(1.0),
        _ => 1.0,
    }
}

impl ScaleSettings {
    pub fn seconds_per_pixel(&self) -> f64 {
        let speed = if self.speed.is_finite() { self.speed.max(1.0) } else { 1.0 };
        1.0 / (speed * COLUMNS_PER_SECOND)
    }

    /// Resolve against the audio context's Nyquist frequency (if any).
    pub fn resolve(&self, nyquist_hz: Option<f64>) -> TimeFreqScale {
        let nyquist = nyquist_hz.unwrap_or(FALLBACK_NYQUIST_HZ);
        let requested = self.y_preset.requested_hz(nyquist_hz);
        let ceiling_hz = if requested.is_finite() {
            requested.min(nyquist).max(MIN_CEILING_HZ)
        } else {
            nyquist.max(MIN_CEILING_HZ)
        };
        TimeFreqScale { seconds_per_pixel: self.seconds_per_pixel(), ceiling_hz }
    }
}

/// Resolved scale: both fields are always > 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeFreqScale {
    pub seconds_per_pixel: f64,
    pub ceiling_hz: f64,
}
