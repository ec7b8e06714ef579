use serde::{Deserialize, Serialize};

use crate::core::primitives::format_grouped;
use crate::error::{ChartError, ChartResult};

const TEN_THOUSAND: f64 = 10_000.0;

/// Rendering of value-axis tick labels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisTickFormat {
    /// Thousands separators, e.g. `120,000`.
    #[default]
    Grouped,
    /// Value divided by ten thousand with a unit suffix, e.g. `12만`.
    TenThousandUnit { suffix: String },
}

impl AxisTickFormat {
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Grouped => format_grouped(value),
            Self::TenThousandUnit { suffix } => {
                format!("{}{suffix}", format_grouped(value / TEN_THOUSAND))
            }
        }
    }
}

/// Display strings the widget places on the chart and in its summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartLabels {
    /// Caption of the average reference line.
    #[serde(default = "default_average")]
    pub average: String,
    /// Second caption line under the extremum point.
    #[serde(default = "default_extremum")]
    pub extremum: String,
    /// Summary headline while no data is available.
    #[serde(default = "default_loading")]
    pub loading: String,
    /// Appended to the lowest value in the summary headline.
    #[serde(default)]
    pub headline_suffix: String,
    /// Range shown when the data carries no timestamps.
    #[serde(default)]
    pub fallback_date_range: Option<(String, String)>,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            average: default_average(),
            extremum: default_extremum(),
            loading: default_loading(),
            headline_suffix: String::new(),
            fallback_date_range: None,
        }
    }
}

impl ChartLabels {
    pub fn validate(&self) -> ChartResult<()> {
        if self.average.is_empty() || self.extremum.is_empty() {
            return Err(ChartError::InvalidData(
                "average and extremum captions must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_average() -> String {
    "Average".to_owned()
}

fn default_extremum() -> String {
    "Lowest".to_owned()
}

fn default_loading() -> String {
    "Loading...".to_owned()
}
