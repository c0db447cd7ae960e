use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid time domain: beginning={beginning}, ending={ending}")]
    Domain { beginning: f64, ending: f64 },

    #[error("invalid data: {0}")]
    Data(String),
}
