use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Cannot recommend a pickup day: week scores are empty")]
    EmptyWeek,

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid day score: {0}")]
    InvalidDayScore(String),
}
