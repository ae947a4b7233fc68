use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Fewer than two intensity levels: the merge stage interpolates between
    /// adjacent stack entries, so at least two must exist.
    BadLevels(usize),
    ChannelMismatch { expected: usize, actual: usize },
    ShapeMismatch { expected: (usize, usize), actual: (usize, usize) },
    EmptyImage,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadLevels(levels) => {
                write!(f, "at least 2 intensity levels are required, got {levels}")
            }
            Self::ChannelMismatch { expected, actual } => {
                write!(f, "channel mismatch: expected {expected}, got {actual}")
            }
            Self::ShapeMismatch { expected, actual } => write!(
                f,
                "shape mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            Self::EmptyImage => write!(f, "empty image"),
        }
    }
}

impl std::error::Error for Error {}
