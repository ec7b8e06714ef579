use serde::{Deserialize, Serialize};

use crate::core::{AxisDomain, DataPoint, PixelPoint, ViewportClass, ViewportMetrics};
use crate::error::{ChartError, ChartResult};

/// Minimum canvas width policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WidthFloor {
    Fixed(f64),
    /// Multiple of the viewport width, so sparse data still fills small screens.
    ViewportMultiple(f64),
}

impl WidthFloor {
    #[must_use]
    pub fn resolve(self, viewport_width: f64) -> f64 {
        match self {
            Self::Fixed(px) => px,
            Self::ViewportMultiple(factor) => viewport_width * factor,
        }
    }
}

/// Per-class layout numbers for the dual-pane chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutProfile {
    pub point_spacing_px: f64,
    pub left_margin_px: f64,
    pub right_margin_px: f64,
    pub top_margin_px: f64,
    pub bottom_margin_px: f64,
    pub width_floor: WidthFloor,
    /// Width of the fixed value-axis pane left of the scroll viewport.
    pub axis_pane_width_px: f64,
    pub label_font_px: f64,
    pub axis_font_px: f64,
    pub marker_radius_px: f64,
    pub active_marker_radius_px: f64,
    pub line_width_px: f64,
}

impl LayoutProfile {
    #[must_use]
    pub fn narrow() -> Self {
        Self {
            point_spacing_px: 40.0,
            left_margin_px: 0.0,
            right_margin_px: 10.0,
            top_margin_px: 30.0,
            bottom_margin_px: 50.0,
            width_floor: WidthFloor::ViewportMultiple(2.5),
            axis_pane_width_px: 45.0,
            label_font_px: 10.0,
            axis_font_px: 11.0,
            marker_radius_px: 4.0,
            active_marker_radius_px: 5.0,
            line_width_px: 1.5,
        }
    }

    #[must_use]
    pub fn wide() -> Self {
        Self {
            point_spacing_px: 20.0,
            left_margin_px: 0.0,
            right_margin_px: 30.0,
            top_margin_px: 50.0,
            bottom_margin_px: 80.0,
            width_floor: WidthFloor::Fixed(800.0),
            axis_pane_width_px: 45.0,
            label_font_px: 12.0,
            axis_font_px: 13.0,
            marker_radius_px: 5.0,
            active_marker_radius_px: 6.0,
            line_width_px: 2.0,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.point_spacing_px.is_finite() || self.point_spacing_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "point spacing must be finite and > 0".to_owned(),
            ));
        }
        for (value, name) in [
            (self.left_margin_px, "left_margin_px"),
            (self.right_margin_px, "right_margin_px"),
            (self.top_margin_px, "top_margin_px"),
            (self.bottom_margin_px, "bottom_margin_px"),
            (self.axis_pane_width_px, "axis_pane_width_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "layout `{name}` must be finite and >= 0"
                )));
            }
        }
        for (value, name) in [
            (self.label_font_px, "label_font_px"),
            (self.axis_font_px, "axis_font_px"),
            (self.marker_radius_px, "marker_radius_px"),
            (self.active_marker_radius_px, "active_marker_radius_px"),
            (self.line_width_px, "line_width_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "layout `{name}` must be finite and > 0"
                )));
            }
        }
        let floor_ok = match self.width_floor {
            WidthFloor::Fixed(px) => px.is_finite() && px >= 0.0,
            WidthFloor::ViewportMultiple(factor) => factor.is_finite() && factor >= 0.0,
        };
        if !floor_ok {
            return Err(ChartError::InvalidData(
                "width floor must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Narrow and wide layout profiles, selected by viewport class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutProfiles {
    pub narrow: LayoutProfile,
    pub wide: LayoutProfile,
}

impl Default for LayoutProfiles {
    fn default() -> Self {
        Self {
            narrow: LayoutProfile::narrow(),
            wide: LayoutProfile::wide(),
        }
    }
}

impl LayoutProfiles {
    #[must_use]
    pub fn for_class(self, class: ViewportClass) -> LayoutProfile {
        match class {
            ViewportClass::Narrow => self.narrow,
            ViewportClass::Wide => self.wide,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        Ok(Self {
            narrow: self.narrow.validate()?,
            wide: self.wide.validate()?,
        })
    }
}

/// Resolved geometry of the virtual canvas for one viewport and point count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportGeometry {
    pub class: ViewportClass,
    pub point_count: usize,
    pub canvas_width_px: f64,
    pub canvas_height_px: f64,
    pub point_spacing_px: f64,
    pub left_margin_px: f64,
    pub right_margin_px: f64,
    pub top_margin_px: f64,
    pub bottom_margin_px: f64,
    pub min_width_floor_px: f64,
}

impl ViewportGeometry {
    /// Derives canvas geometry once per resize or data change.
    ///
    /// The canvas is never narrower than the content width nor than the span
    /// needed to place every point between the horizontal margins.
    pub fn derive(
        metrics: ViewportMetrics,
        profiles: LayoutProfiles,
        point_count: usize,
    ) -> ChartResult<Self> {
        let metrics = metrics.validate()?;
        let class = metrics.class();
        let profile = profiles.for_class(class).validate()?;

        let mut geometry = Self {
            class,
            point_count,
            canvas_width_px: 0.0,
            canvas_height_px: metrics.height,
            point_spacing_px: profile.point_spacing_px,
            left_margin_px: profile.left_margin_px,
            right_margin_px: profile.right_margin_px,
            top_margin_px: profile.top_margin_px,
            bottom_margin_px: profile.bottom_margin_px,
            min_width_floor_px: profile.width_floor.resolve(metrics.width),
        };
        let placed_span = if point_count > 1 {
            geometry.point_spacing_px * (point_count - 1) as f64
                + geometry.left_margin_px
                + geometry.right_margin_px
        } else {
            0.0
        };
        geometry.canvas_width_px = content_width(point_count, &geometry).max(placed_span);
        Ok(geometry)
    }

    #[must_use]
    pub fn plot_height_px(&self) -> f64 {
        (self.canvas_height_px - self.top_margin_px - self.bottom_margin_px).max(0.0)
    }

    #[must_use]
    pub fn plot_bottom_px(&self) -> f64 {
        self.top_margin_px + self.plot_height_px()
    }
}

/// Width of the scrollable content for `point_count` samples.
#[must_use]
pub fn content_width(point_count: usize, geometry: &ViewportGeometry) -> f64 {
    (point_count as f64 * geometry.point_spacing_px).max(geometry.min_width_floor_px)
}

/// Maps a data coordinate to virtual canvas pixels.
///
/// A degenerate domain places every point on the plot bottom.
#[must_use]
pub fn to_pixel(
    index: usize,
    value: f64,
    domain: &AxisDomain,
    geometry: &ViewportGeometry,
) -> PixelPoint {
    let x = geometry.left_margin_px + index as f64 * geometry.point_spacing_px;
    let plot_height = geometry.plot_height_px();
    let span = domain.span();
    let y = if span > 0.0 {
        geometry.top_margin_px + plot_height * (1.0 - (value - domain.min) / span)
    } else {
        geometry.top_margin_px + plot_height
    };
    PixelPoint::new(x, y)
}

/// Nearest data index for a virtual canvas x, `None` when there are no points.
#[must_use]
pub fn to_index(pixel_x: f64, geometry: &ViewportGeometry) -> Option<usize> {
    if geometry.point_count == 0 {
        return None;
    }
    let last = (geometry.point_count - 1) as f64;
    let raw = ((pixel_x - geometry.left_margin_px) / geometry.point_spacing_px).round();
    let clamped = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, last) };
    Some(clamped as usize)
}

/// Geometry and domain snapshot used for every coordinate conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryMapper {
    geometry: ViewportGeometry,
    domain: AxisDomain,
}

impl GeometryMapper {
    #[must_use]
    pub fn new(geometry: ViewportGeometry, domain: AxisDomain) -> Self {
        Self { geometry, domain }
    }

    #[must_use]
    pub fn geometry(&self) -> &ViewportGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn domain(&self) -> &AxisDomain {
        &self.domain
    }

    #[must_use]
    pub fn to_pixel(&self, index: usize, value: f64) -> PixelPoint {
        to_pixel(index, value, &self.domain, &self.geometry)
    }

    #[must_use]
    pub fn to_index(&self, pixel_x: f64) -> Option<usize> {
        to_index(pixel_x, &self.geometry)
    }

    #[must_use]
    pub fn index_to_x(&self, index: usize) -> f64 {
        self.geometry.left_margin_px + index as f64 * self.geometry.point_spacing_px
    }

    #[must_use]
    pub fn value_to_y(&self, value: f64) -> f64 {
        self.to_pixel(0, value).y
    }

    #[must_use]
    pub fn content_width(&self) -> f64 {
        content_width(self.geometry.point_count, &self.geometry)
    }

    /// Projects one series to polyline vertices, skipping points without it.
    #[must_use]
    pub fn project_series(&self, points: &[DataPoint], series: &str) -> Vec<PixelPoint> {
        #[cfg(feature = "parallel-projection")]
        {
            use rayon::prelude::*;

            if points.len() >= PARALLEL_PROJECTION_THRESHOLD {
                return points
                    .par_iter()
                    .filter_map(|point| {
                        point
                            .value(series)
                            .map(|value| self.to_pixel(point.index, value))
                    })
                    .collect();
            }
        }

        points
            .iter()
            .filter_map(|point| {
                point
                    .value(series)
                    .map(|value| self.to_pixel(point.index, value))
            })
            .collect()
    }
}

#[cfg(feature = "parallel-projection")]
const PARALLEL_PROJECTION_THRESHOLD: usize = 4_096;
