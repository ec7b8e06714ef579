use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Width below which a viewport is laid out with the narrow profile.
pub const DEFAULT_NARROW_BREAKPOINT_PX: f64 = 768.0;

/// Layout class derived from the viewport width and the narrow breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewportClass {
    Narrow,
    #[default]
    Wide,
}

/// Available space reported by the host layout, in CSS-like pixels.
///
/// Re-queried by the host on every resize and handed to the widget once;
/// nothing inside the crate reads ambient window metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportMetrics {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_narrow_breakpoint")]
    pub narrow_breakpoint_px: f64,
}

fn default_narrow_breakpoint() -> f64 {
    DEFAULT_NARROW_BREAKPOINT_PX
}

impl ViewportMetrics {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            narrow_breakpoint_px: DEFAULT_NARROW_BREAKPOINT_PX,
        }
    }

    #[must_use]
    pub fn with_narrow_breakpoint(mut self, breakpoint_px: f64) -> Self {
        self.narrow_breakpoint_px = breakpoint_px;
        self
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !self.narrow_breakpoint_px.is_finite() || self.narrow_breakpoint_px < 0.0 {
            return Err(ChartError::InvalidData(
                "narrow breakpoint must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn class(self) -> ViewportClass {
        if self.width < self.narrow_breakpoint_px {
            ViewportClass::Narrow
        } else {
            ViewportClass::Wide
        }
    }

    #[must_use]
    pub fn is_narrow(self) -> bool {
        self.class() == ViewportClass::Narrow
    }
}

/// One point in virtual canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
