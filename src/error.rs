use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("source control error: {0}")]
    SourceControl(String),
    #[error("issue tracker error: {0}")]
    IssueTracker(String),
    #[error("notification error: {0}")]
    Notification(String),
    #[error("{service} responded with {status}: {body}")]
    Rejected {
        service: &'static str,
        status: u16,
        body: String,
    },
    #[error("http error: {0}")]
    Http(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Http(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
