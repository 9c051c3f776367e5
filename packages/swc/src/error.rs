use thiserror::Error;

pub type Result<T> = std::result::Result<T, DropConsoleError>;

#[derive(Debug, Error)]
pub enum DropConsoleError {
    #[error("failed to parse {id}: {message}")]
    Parse { id: String, message: String },

    #[error("invalid file pattern: {0}")]
    InvalidPattern(#[from] globset::Error),

    #[error("invalid plugin config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("invalid edit range [{start},{end}) for source of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("failed to build source map: {0}")]
    SourceMap(#[from] sourcemap::Error),
}
