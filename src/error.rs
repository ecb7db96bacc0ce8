use thiserror::Error;

/// Errors that can occur while loading or inspecting a VAST document
#[derive(Error, Debug)]
pub enum VastError {
    #[error("Parsing Error: {0}")]
    XmlParseError(#[from] quick_xml::Error),

    /// The document decoded but has a shape the extractor cannot walk
    #[error("Parsing Error: {0}")]
    Malformed(String),

    #[error("No Linear Creative found in VAST.")]
    NoLinearCreative,

    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("{0}")]
    FetchError(String),
}

impl VastError {
    /// True for failures that happen before any XML was obtained.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            VastError::IoError(_) | VastError::UrlError(_) | VastError::FetchError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, VastError>;
