use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid color label {0:?}")]
    InvalidColor(String),

    #[error("tube holds {len} layers but capacity is {capacity}")]
    TubeOverCapacity { len: usize, capacity: usize },

    #[error("tube index {index} out of range for {count} tubes")]
    TubeOutOfRange { index: usize, count: usize },

    #[error("level {0} is not available")]
    LevelOutOfRange(u32),

    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
