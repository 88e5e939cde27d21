use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PerformanceError {
    #[error("No marks have been recorded yet")]
    NoData,

    #[error("Percentage is undefined for '{0}': maximum marks add up to zero")]
    UndefinedPercentage(String),
}
