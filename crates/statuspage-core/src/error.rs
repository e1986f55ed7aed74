use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatusPageError {
    #[error("{context}: GitHub API returned {status}: {message}")]
    Api {
        status: u16,
        context: String,
        message: String,
    },

    #[error("branch not found: {0}")]
    MissingBranch(String),

    #[error("file not found on {branch}: {path}")]
    MissingFile { path: String, branch: String },

    #[error("system name must not be empty")]
    EmptySystemName,

    #[error("unknown bundled asset: {0}")]
    UnknownAsset(String),

    #[error("invalid GitHub token")]
    InvalidToken,

    #[error("invalid API url: {0}")]
    InvalidApiUrl(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("invalid base64 file content: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("file content is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl StatusPageError {
    pub fn status(&self) -> Option<u16> {
        match self {
            StatusPageError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// GitHub answers 422 when a resource (e.g. a label) already exists.
    pub fn is_unprocessable(&self) -> bool {
        self.status() == Some(422)
    }
}

pub type Result<T> = std::result::Result<T, StatusPageError>;
