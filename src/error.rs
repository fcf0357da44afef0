use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("series index {index} out of range for {count} data sets")]
    SeriesIndexOutOfRange { index: usize, count: usize },

    #[error("animation phase `{axis}` must be finite and in [0, 1], got {value}")]
    InvalidPhase { axis: &'static str, value: f64 },
}
