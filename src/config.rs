//! Deployment configuration: frame size, zoom policy, corner preset and input tuning.

use std::path::Path;

use anyhow::Context as _;

use crate::assets::decode::DecodeOptions;
use crate::foundation::core::OutputFrame;
use crate::foundation::error::{CropError, CropResult};
use crate::geometry::clip::{Corner, CornerRadii, CornerStyle};
use crate::geometry::fit::ZoomRangePolicy;

/// Default wheel-to-zoom sensitivity: `factor = exp(-delta_y * sensitivity)`.
pub const DEFAULT_WHEEL_SENSITIVITY: f64 = 0.0015;

/// Everything a deployment can tune. All fields have defaults, so a partial JSON file is valid.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Output frame size.
    pub frame: OutputFrame,
    /// Zoom range policy applied on every reset.
    pub zoom: ZoomRangePolicy,
    /// Wheel sensitivity.
    pub wheel_sensitivity: f64,
    /// Preset corner radii (clamped to the frame when a session starts).
    pub corners: CornerRadii,
    /// Corner driven by the radius input, if any.
    pub adjustable_corner: Option<Corner>,
    /// Curve construction for rounded corners.
    pub corner_style: CornerStyle,
    /// Image source input policy.
    pub decode: DecodeOptions,
    /// Suggested file name for downloads.
    pub export_file_name: String,
    /// Optional straight-alpha RGBA8 fill behind the image inside the clip.
    pub background_rgba: Option<[u8; 4]>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            frame: OutputFrame::default(),
            zoom: ZoomRangePolicy::default(),
            wheel_sensitivity: DEFAULT_WHEEL_SENSITIVITY,
            corners: CornerRadii::default(),
            adjustable_corner: Some(Corner::TopRight),
            corner_style: CornerStyle::default(),
            decode: DecodeOptions::default(),
            export_file_name: "top-right-rounded.png".to_owned(),
            background_rgba: None,
        }
    }
}

/// Named built-in configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// 1200x628 social banner with an adjustable top-right corner.
    Banner,
    /// 470x200 card with a sharp top-left corner and fixed rounding elsewhere.
    Card,
}

impl Preset {
    /// Build the configuration for this preset.
    pub fn config(self) -> EditorConfig {
        match self {
            Self::Banner => EditorConfig::banner(),
            Self::Card => EditorConfig::card(),
        }
    }
}

impl EditorConfig {
    /// 1200x628 output, top-right corner rounded at 48px and user-adjustable.
    pub fn banner() -> Self {
        Self {
            corners: CornerRadii::new(0, 48, 0, 0),
            ..Self::default()
        }
    }

    /// 470x200 output, radii `{0, 40, 12, 12}`, zoom window `[0.5x, 2x]` of cover.
    pub fn card() -> Self {
        Self {
            frame: OutputFrame {
                width: 470,
                height: 200,
            },
            zoom: ZoomRangePolicy::window(0.5, 2.0),
            corners: CornerRadii::new(0, 40, 12, 12),
            adjustable_corner: Some(Corner::TopRight),
            export_file_name: "card.png".to_owned(),
            ..Self::default()
        }
    }

    /// Read a JSON configuration file and validate it.
    pub fn from_path(path: &Path) -> CropResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| {
            CropError::validation(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check frame, zoom policy and sensitivity.
    pub fn validate(&self) -> CropResult<()> {
        self.frame.validate()?;
        self.zoom.validate()?;
        if !self.wheel_sensitivity.is_finite() || self.wheel_sensitivity <= 0.0 {
            return Err(CropError::validation(format!(
                "wheel_sensitivity must be finite and > 0, got {}",
                self.wheel_sensitivity
            )));
        }
        if self.decode.accepted_mime.is_empty() {
            return Err(CropError::validation(
                "decode.accepted_mime must list at least one type",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
