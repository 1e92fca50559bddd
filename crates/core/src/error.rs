//! Error types for Seatplan Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Seat {index} is out of range for a grid of {len} seats")]
    SeatOutOfRange { index: usize, len: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("Failed to parse config TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
