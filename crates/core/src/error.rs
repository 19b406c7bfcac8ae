#[derive(Debug, thiserror::Error)]
pub enum WardError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
    #[error("unsupported layout version {found} (expected {expected})")]
    UnsupportedLayoutVersion { found: u32, expected: u32 },
    #[error("failed to read layout file {path}: {source}", path = path.display())]
    LayoutRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("layout schema mismatch at {path}: {message}")]
    LayoutParse { path: String, message: String },
    #[error("failed to read admissions from {path}: {source}", path = path.display())]
    SourceRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("admissions schema mismatch at {path}: {message}")]
    SourceParse { path: String, message: String },
}

pub type WardResult<T> = std::result::Result<T, WardError>;
