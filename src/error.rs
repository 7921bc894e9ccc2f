use thiserror::Error;

/// Top-level error type for polyline measurement and coordinate transforms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulerError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors caused by malformed caller input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("polyline should have at least {required} points, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    #[error("empty coordinate batch")]
    EmptyBatch,

    #[error("non-finite coordinate at index {index}")]
    NonFinite { index: usize },

    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("parameter {parameter} = {value} is out of range")]
    ParameterOutOfRange { parameter: &'static str, value: f64 },
}

/// Errors related to geometric computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("polyline is collapsed under plane-xy")]
    Collapsed,

    #[error("zero-length vector")]
    ZeroVector,
}

/// Convenience type alias for results using [`RulerError`].
pub type Result<T> = std::result::Result<T, RulerError>;
