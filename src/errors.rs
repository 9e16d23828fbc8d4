//! Error types for geometry parsing, validation and engine dispatch

use crate::geometry::Coord;

/// All the structural issues a geometry can be rejected for
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (TooFewPoints) A line, ring or arc has fewer than the minimal #points
    #[error("(TooFewPoints) {kind} needs 0 or at least {min} points, found {found}")]
    TooFewPoints {
        kind: &'static str,
        min: usize,
        found: usize,
    },
    /// (RingNotClosed) The ring's first/last points differ
    #[error("(RingNotClosed) The ring's first({first}) and last({last}) points differ")]
    RingNotClosed { first: Coord, last: Coord },
    /// (EvenArcPoints) A circular string needs an odd number of points
    #[error("(EvenArcPoints) A circular string has an even number of points ({0})")]
    EvenArcPoints(usize),
    /// (DisconnectedCurve) A compound curve segment does not start where the previous one ended
    #[error("(DisconnectedCurve) A compound curve segment does not start at {0}")]
    DisconnectedCurve(Coord),
    /// (InvalidCoordinate) The coordinate has a NaN or infinite
    #[error("(InvalidCoordinate) The coordinate ({0}) has a NaN or infinite")]
    InvalidCoordinate(Coord),
    /// (MixedDimensions) Some coordinates carry a Z ordinate and some do not
    #[error("(MixedDimensions) Coordinates mix 2D and 3D ordinates")]
    MixedDimensions,
}

/// What went wrong while reading exchange-format text
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected {0}")]
    Syntax(&'static str),
    #[error("unknown geometry keyword `{0}`")]
    UnknownKeyword(String),
    #[error("unsupported dimension `{0}`, only 2D and Z coordinates are modelled")]
    UnsupportedDimension(String),
    #[error("unexpected trailing input")]
    TrailingInput,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Exchange-format text could not be turned into a [`Geometry`](crate::geometry::Geometry).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} at byte {offset}")]
pub struct ParseError {
    /// Byte offset into the input where reading stopped
    pub offset: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub const fn new(offset: usize, kind: ParseErrorKind) -> Self {
        Self { offset, kind }
    }
}

/// Failure reported by an [`Engine`](crate::engine::Engine) implementation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// The engine ran the operation and could not produce a result
    #[error("{operation}: {message}")]
    Failed {
        operation: &'static str,
        message: String,
    },
    /// The engine does not provide this operation
    #[error("{0} is not provided by this engine")]
    Unsupported(&'static str),
}

impl EngineError {
    pub fn failed(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            operation,
            message: message.into(),
        }
    }
}

/// Errors surfaced by the operation catalog
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Exchange-format text supplied by the caller could not be read
    #[error("could not parse geometry: {0}")]
    Parse(#[from] ParseError),
    /// The engine reported a failure; its message is kept verbatim
    #[error("engine failed in {operation}: {message}")]
    Engine {
        operation: &'static str,
        message: String,
    },
    /// The engine produced geometry text that could not be read back
    #[error("engine returned unreadable geometry from {operation}: {source}")]
    MalformedResult {
        operation: &'static str,
        wkt: String,
        #[source]
        source: ParseError,
    },
    /// The operation is not available from the configured engine
    #[error("operation {0} is not supported")]
    UnsupportedOperation(&'static str),
}

impl From<EngineError> for GeometryError {
    fn from(value: EngineError) -> Self {
        match value {
            EngineError::Failed { operation, message } => Self::Engine { operation, message },
            EngineError::Unsupported(operation) => Self::UnsupportedOperation(operation),
        }
    }
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, GeometryError>;
