// Error handling for LBY reader

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LbyError>;

#[derive(Error, Debug)]
pub enum LbyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File too short: {len} bytes, header window starts at {min}")]
    FileTooShort { len: usize, min: usize },

    #[error("No valid data offset found between {start} and {end}")]
    NoDataOffset { start: usize, end: usize },

    #[error("Invalid data offset {offset} for a {len} byte file")]
    InvalidOffset { offset: usize, len: usize },

    #[error("Invalid detector config: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LbyError {
    /// True for errors caused by the file's layout rather than by I/O.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            LbyError::FileTooShort { .. }
                | LbyError::NoDataOffset { .. }
                | LbyError::InvalidOffset { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_kind() {
        assert!(LbyError::FileTooShort { len: 50, min: 256 }.is_format_error());
        assert!(LbyError::NoDataOffset { start: 256, end: 800 }.is_format_error());
        assert!(LbyError::InvalidOffset { offset: 3, len: 10 }.is_format_error());

        let io = LbyError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!io.is_format_error());
    }

    #[test]
    fn test_messages() {
        let err = LbyError::FileTooShort { len: 50, min: 256 };
        assert_eq!(err.to_string(), "File too short: 50 bytes, header window starts at 256");
    }
}
