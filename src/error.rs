use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Transport or decode failure at the price source boundary.
    #[error("data fetch failed: {0}")]
    DataFetch(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
