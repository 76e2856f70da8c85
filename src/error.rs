use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarouselError {
    #[error("Carousel needs at least one page")]
    EmptyPages,

    #[error("Page {index} out of range (carousel has {len} pages)")]
    PageOutOfRange { index: usize, len: usize },

    #[error("Progress dots are not clickable")]
    NotClickable,

    #[error("Interval must be greater than zero")]
    InvalidInterval,

    #[error("Dot radius must be at least 1")]
    InvalidDotRadius,

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CarouselError>;
