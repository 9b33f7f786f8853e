//! Error types and context management for core operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all library operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Tile size, grid dimensions, or sample dimensions are out of range
    InvalidInput {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// All synthesis attempts were exhausted without reaching a solution
    GenerationFailed {
        /// Number of attempts that were made
        attempts: usize,
        /// Grid dimensions (width, height)
        grid_dimensions: (usize, usize),
        /// Number of distinct tiles in the `TileSet`
        tile_count: usize,
        /// Grid coordinates of the last contradiction observed, if any
        last_contradiction: Option<(usize, usize)>,
    },

    /// Host-supplied cancellation predicate returned true
    Cancelled {
        /// Algorithm iteration at which cancellation was observed
        iteration: usize,
    },

    /// Failed to load a sample image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput {
                parameter,
                value,
                reason,
            } => {
                write!(f, "invalid input '{parameter}' = '{value}': {reason}")
            }
            Self::GenerationFailed {
                attempts,
                grid_dimensions,
                tile_count,
                last_contradiction,
            } => {
                write!(
                    f,
                    "generation failed after {attempts} attempt(s) on a {}x{} grid with {tile_count} tile(s)",
                    grid_dimensions.0, grid_dimensions.1
                )?;
                if let Some((x, y)) = last_contradiction {
                    write!(f, "; last contradiction at ({x}, {y})")?;
                }
                Ok(())
            }
            Self::Cancelled { iteration } => {
                write!(f, "synthesis cancelled at iteration {iteration}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for library results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Additional context to enrich error messages as they propagate
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Current algorithm iteration
    pub iteration: Option<usize>,
    /// Grid coordinates where the error occurred
    pub position: Option<(usize, usize)>,
}

/// Enriches error messages with solver state information
pub trait WithContext<T> {
    /// Add error context to a Result
    fn with_context(self, context: ErrorContext) -> Result<T>;
}

impl<T> WithContext<T> for Result<T> {
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|mut error| {
            if let AlgorithmError::GenerationFailed {
                last_contradiction, ..
            } = &mut error
            {
                if last_contradiction.is_none() {
                    *last_contradiction = context.position;
                }
            }
            error
        })
    }
}

/// Build an `InvalidInput` error
pub fn invalid_input(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidInput {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used)]

    use super::*;

    #[test]
    fn invalid_input_renders_all_fields() {
        let err = invalid_input("tile_size", &0usize, &"must be >= 1");
        let message = err.to_string();
        assert!(message.contains("tile_size"));
        assert!(message.contains("must be >= 1"));
    }

    #[test]
    fn with_context_fills_unset_contradiction_position() {
        let result: Result<()> = Err(AlgorithmError::GenerationFailed {
            attempts: 3,
            grid_dimensions: (5, 5),
            tile_count: 4,
            last_contradiction: None,
        });

        let context = ErrorContext {
            iteration: Some(10),
            position: Some((2, 3)),
        };

        let err = result.with_context(context).unwrap_err();
        match err {
            AlgorithmError::GenerationFailed {
                last_contradiction, ..
            } => assert_eq!(last_contradiction, Some((2, 3))),
            other => panic!("expected GenerationFailed, got {other:?}"),
        }
    }
}
