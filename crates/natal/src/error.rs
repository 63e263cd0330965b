use thiserror::Error;

/// Errors that abort a single chart computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Failed to parse {field} '{value}': {message}")]
    Parse {
        field: &'static str,
        value: String,
        message: String,
    },
    #[error("Invalid {axis} {value}: must be within [-{limit}, {limit}]")]
    InvalidCoordinate {
        axis: &'static str,
        value: f64,
        limit: f64,
    },
    #[error("Non-finite numeric input for {field}: {value}")]
    NumericInput { field: &'static str, value: f64 },
    #[error("Unknown body: {0}")]
    UnknownBody(String),
    #[error("Unknown aspect: {0}")]
    UnknownAspect(String),
    #[error("Fixture has no longitude for {body}")]
    FixtureMissing { body: String },
    #[error("Longitude {longitude} falls outside every house (ascendant {ascendant})")]
    HouseInvariant { longitude: f64, ascendant: f64 },
}
