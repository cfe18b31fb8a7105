use thiserror::Error;

/// Errors surfaced to the user in the rendered page.
///
/// The `Display` text of each variant is exactly what the page shows.
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("Files must be 5 MB or smaller.")]
    PayloadTooLarge { size: u64 },

    #[error("Only PDF or CSV files are supported.")]
    UnsupportedFileType { content_type: String },

    #[error("Something went wrong while contacting OpenAI: {0}")]
    Upstream(String),

    #[error("Could not read the uploaded file: {0}")]
    Io(#[from] std::io::Error),
}

impl CoachError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }
}

impl From<reqwest::Error> for CoachError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoachError>;
