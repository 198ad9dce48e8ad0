use thiserror::Error;

/// Why a diagram could not be built. Checked before the sweep starts; the
/// sweep itself does not fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoronoiError {
    #[error("Site {index} is not finite: ({x}, {y})")]
    NonFiniteSite { index: usize, x: f64, y: f64 },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

pub type VoronoiResult<T> = Result<T, VoronoiError>;
