//! Error types for grid geometry

/// Failures raised by coordinate, layout and grid construction
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("Unknown direction {0}, expected 0..6")]
    InvalidDirection(i32),

    #[error("Layout size must be positive and finite, got ({x}, {y})")]
    InvalidScale { x: f64, y: f64 },

    #[error("Invalid terrain catalog: {0}")]
    InvalidTerrain(String),

    #[error("Map radius must be within 0..={max}, got {0}", max = u16::MAX)]
    InvalidRadius(i32),

    #[error("Coordinate ({q}, {r}) is not a representable cell")]
    OutOfRange { q: f64, r: f64 },
}

pub type Result<T> = std::result::Result<T, GridError>;
