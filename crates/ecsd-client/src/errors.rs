use ecsd_core::SchedulerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("http request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("scheduler rejected request ({status}): {code}: {message}")]
    Rejected {
        status: u16,
        code: String,
        message: String,
    },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<ClientError> for SchedulerError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::HttpRequest(e) if e.is_decode() => SchedulerError::Decode(e.to_string()),
            ClientError::HttpRequest(e) => SchedulerError::Transport(e.to_string()),
            ClientError::Rejected { code, message, .. } => SchedulerError::Api { code, message },
            ClientError::InvalidResponse(msg) => SchedulerError::Decode(msg),
        }
    }
}
