use serde::{Deserialize, Serialize};

use crate::core::ViewportClass;
use crate::error::{ChartError, ChartResult};

/// Number of ticks produced by the rounded-headroom policy.
pub const ROUNDED_TICK_COUNT: usize = 5;
/// Rounding granularity for currency-scale values.
pub const DEFAULT_GRANULARITY: f64 = 100_000.0;
/// Axis ceiling used when there is no data to derive one from.
pub const DEFAULT_FALLBACK_MAX: f64 = 600_000.0;
/// Upper bound on the ticks a fixed policy may produce, `max` included.
pub const MAX_FIXED_TICKS: usize = 1_000;

/// Vertical axis bounds and ticks for one computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
    /// Vertical pixel distance between neighbouring ticks on the plot.
    pub tick_interval_px: f64,
}

impl AxisDomain {
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.span() <= 0.0
    }
}

/// How the vertical domain is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum YDomainPolicy {
    /// Round the data max up to `granularity`, add one `granularity` of
    /// headroom and split `[0, max]` into four equal steps.
    RoundedHeadroom { granularity: f64, fallback_max: f64 },
    /// Fixed scale (e.g. normalized 0..100 data) ticked every `step`.
    Fixed { min: f64, max: f64, step: f64 },
}

impl Default for YDomainPolicy {
    fn default() -> Self {
        Self::RoundedHeadroom {
            granularity: DEFAULT_GRANULARITY,
            fallback_max: DEFAULT_FALLBACK_MAX,
        }
    }
}

impl YDomainPolicy {
    #[must_use]
    pub fn normalized_percent() -> Self {
        Self::Fixed {
            min: 0.0,
            max: 100.0,
            step: 10.0,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        match self {
            Self::RoundedHeadroom {
                granularity,
                fallback_max,
            } => {
                if !granularity.is_finite() || granularity <= 0.0 {
                    return Err(ChartError::InvalidData(
                        "domain granularity must be finite and > 0".to_owned(),
                    ));
                }
                if !fallback_max.is_finite() || fallback_max <= 0.0 {
                    return Err(ChartError::InvalidData(
                        "fallback domain max must be finite and > 0".to_owned(),
                    ));
                }
            }
            Self::Fixed { min, max, step } => {
                if !min.is_finite() || !max.is_finite() || max <= min {
                    return Err(ChartError::InvalidData(
                        "fixed domain must be finite with max > min".to_owned(),
                    ));
                }
                if !step.is_finite() || step <= 0.0 {
                    return Err(ChartError::InvalidData(
                        "fixed domain step must be finite and > 0".to_owned(),
                    ));
                }
                let intervals = ((max - min) / step).ceil();
                if !intervals.is_finite() || intervals + 1.0 > MAX_FIXED_TICKS as f64 {
                    return Err(ChartError::InvalidData(format!(
                        "fixed domain step yields more than {MAX_FIXED_TICKS} ticks"
                    )));
                }
            }
        }
        Ok(self)
    }
}

/// Label thinning targets for the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XLabelDensity {
    /// Point count above which narrow viewports switch to the dense target.
    pub narrow_dense_threshold: usize,
    pub narrow_dense_target: usize,
    pub narrow_sparse_target: usize,
    pub wide_dense_threshold: usize,
    pub wide_dense_target: usize,
    pub wide_sparse_target: usize,
}

impl Default for XLabelDensity {
    fn default() -> Self {
        Self {
            narrow_dense_threshold: 20,
            narrow_dense_target: 7,
            narrow_sparse_target: 5,
            wide_dense_threshold: 30,
            wide_dense_target: 10,
            wide_sparse_target: 7,
        }
    }
}

impl XLabelDensity {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.narrow_dense_target, "narrow_dense_target"),
            (self.narrow_sparse_target, "narrow_sparse_target"),
            (self.wide_dense_target, "wide_dense_target"),
            (self.wide_sparse_target, "wide_sparse_target"),
        ] {
            if value == 0 {
                return Err(ChartError::InvalidData(format!(
                    "label density `{name}` must be > 0"
                )));
            }
        }
        Ok(self)
    }

    #[must_use]
    fn target_for(self, point_count: usize, class: ViewportClass) -> usize {
        match class {
            ViewportClass::Narrow if point_count > self.narrow_dense_threshold => {
                self.narrow_dense_target
            }
            ViewportClass::Narrow => self.narrow_sparse_target,
            ViewportClass::Wide if point_count > self.wide_dense_threshold => {
                self.wide_dense_target
            }
            ViewportClass::Wide => self.wide_sparse_target,
        }
    }
}

/// Derives the vertical domain and the x-label interval.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisDomainCalculator {
    pub policy: YDomainPolicy,
    pub density: XLabelDensity,
}

impl AxisDomainCalculator {
    pub fn new(policy: YDomainPolicy, density: XLabelDensity) -> ChartResult<Self> {
        Ok(Self {
            policy: policy.validate()?,
            density: density.validate()?,
        })
    }

    /// Computes the vertical domain for a data maximum.
    ///
    /// A non-finite or non-positive `max_value` means "no data" and yields the
    /// configured fallback domain. `plot_height_px` only feeds
    /// `tick_interval_px`.
    #[must_use]
    pub fn compute_y_domain(&self, max_value: f64, plot_height_px: f64) -> AxisDomain {
        let (min, max, ticks) = match self.policy {
            YDomainPolicy::RoundedHeadroom {
                granularity,
                fallback_max,
            } => {
                let max = if max_value.is_finite() && max_value > 0.0 {
                    (max_value / granularity).ceil() * granularity + granularity
                } else {
                    fallback_max
                };
                let step = max / (ROUNDED_TICK_COUNT - 1) as f64;
                let mut ticks: Vec<f64> = (0..ROUNDED_TICK_COUNT - 1)
                    .map(|i| step * i as f64)
                    .collect();
                ticks.push(max);
                (0.0, max, ticks)
            }
            YDomainPolicy::Fixed { min, max, step } => (min, max, fixed_ticks(min, max, step)),
        };

        let intervals = ticks.len().saturating_sub(1).max(1) as f64;
        let tick_interval_px = if plot_height_px.is_finite() && plot_height_px > 0.0 {
            plot_height_px / intervals
        } else {
            0.0
        };

        AxisDomain {
            min,
            max,
            ticks,
            tick_interval_px,
        }
    }

    /// Returns how many labels to skip between shown x labels (0 shows all).
    #[must_use]
    pub fn compute_x_label_interval(&self, point_count: usize, class: ViewportClass) -> usize {
        point_count / self.density.target_for(point_count, class)
    }
}

fn fixed_ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    let mut ticks = Vec::new();
    for i in 0..MAX_FIXED_TICKS - 1 {
        let tick = min + step * i as f64;
        // tolerate float drift so `max` is not emitted twice
        if tick >= max - step * 1e-9 {
            break;
        }
        ticks.push(tick);
    }
    ticks.push(max);
    ticks
}
