use crate::rectangle::Rectangle;

/// The three kinds of failure a tiling scheme can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid construction arguments.
    Configuration,
    /// An address, level or rectangle outside the valid bounds.
    OutOfRange,
    /// A projection produced a non-finite value.
    Numeric,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TilingError {
    #[error("invalid tiling scheme configuration: {0}")]
    Configuration(String),
    #[error("tile ({x}, {y}) is outside the tiling scheme at level {level}")]
    TileOutOfRange { x: u32, y: u32, level: u32 },
    #[error("level {level} overflows the tile count")]
    LevelOutOfRange { level: u32 },
    #[error("rectangle {0:?} is outside the geodetic domain")]
    InvalidRectangle(Rectangle),
    #[error("{0} is not an intersect value")]
    InvalidIntersect(i8),
    #[error("{operation} produced a non-finite coordinate")]
    NonFinite { operation: &'static str },
}
impl TilingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TilingError::Configuration(_) => ErrorKind::Configuration,
            TilingError::TileOutOfRange { .. }
            | TilingError::LevelOutOfRange { .. }
            | TilingError::InvalidRectangle(_)
            | TilingError::InvalidIntersect(_) => ErrorKind::OutOfRange,
            TilingError::NonFinite { .. } => ErrorKind::Numeric,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(
            TilingError::Configuration("x".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            TilingError::TileOutOfRange { x: 2, y: 0, level: 0 }.kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            TilingError::LevelOutOfRange { level: 40 }.kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            TilingError::NonFinite { operation: "project" }.kind(),
            ErrorKind::Numeric
        );
    }

    #[test]
    fn messages() {
        assert_eq!(
            TilingError::TileOutOfRange { x: 2, y: 0, level: 0 }.to_string(),
            "tile (2, 0) is outside the tiling scheme at level 0"
        );
        assert_eq!(
            TilingError::InvalidIntersect(3).to_string(),
            "3 is not an intersect value"
        );
    }
}
