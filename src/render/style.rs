use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Display name and color of one tracked series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub label: String,
    pub color: Color,
    /// Overrides the layout profile's line width when set.
    #[serde(default)]
    pub line_width_px: Option<f64>,
}

impl SeriesStyle {
    #[must_use]
    pub fn new(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
            line_width_px: None,
        }
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width_px: f64) -> Self {
        self.line_width_px = Some(line_width_px);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if let Some(width) = self.line_width_px {
            if !width.is_finite() || width <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` line width must be finite and > 0",
                    self.label
                )));
            }
        }
        self.color.validate()
    }
}

/// Colors for everything that is not a series line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPalette {
    pub grid_line: Color,
    pub axis_text: Color,
    pub average_line: Color,
    pub average_text: Color,
    pub guide_line: Color,
    pub extremum_marker: Color,
    pub extremum_text: Color,
    pub special_marker: Color,
    pub special_text: Color,
    pub marker_stroke: Color,
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            grid_line: Color::rgb8(200, 200, 200).with_alpha(0.3),
            axis_text: Color::rgb8(0x88, 0x88, 0x88),
            average_line: Color::rgb8(0x99, 0x99, 0x99),
            average_text: Color::rgb8(0x66, 0x66, 0x66),
            guide_line: Color::rgb8(0xF4, 0x43, 0x36),
            extremum_marker: Color::rgb(0.0, 0.0, 0.0),
            extremum_text: Color::rgb8(0xF4, 0x43, 0x36),
            special_marker: Color::rgb8(0x21, 0x96, 0xF3),
            special_text: Color::rgb8(0x21, 0x96, 0xF3),
            marker_stroke: Color::rgb(1.0, 1.0, 1.0),
        }
    }
}

impl ChartPalette {
    pub fn validate(self) -> ChartResult<Self> {
        for color in [
            self.grid_line,
            self.axis_text,
            self.average_line,
            self.average_text,
            self.guide_line,
            self.extremum_marker,
            self.extremum_text,
            self.special_marker,
            self.special_text,
            self.marker_stroke,
        ] {
            color.validate()?;
        }
        Ok(self)
    }
}
