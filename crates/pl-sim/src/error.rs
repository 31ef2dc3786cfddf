use pl_core::CoreError;
use pl_layout::LayoutError;
use pl_ring::RingError;
use pl_station::StationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("line configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("ring error: {0}")]
    Ring(#[from] RingError),

    #[error("station error: {0}")]
    Station(#[from] StationError),
}

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("{0}: no completed cycles")]
    EmptySamples(String),
}

pub type StatsResult<T> = Result<T, StatsError>;
