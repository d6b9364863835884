use thiserror::Error;

/// Failure raised by a GitHub collaborator. Failures GitHub *reports* (4xx
/// replies) are rendered into results instead; this covers what cannot be.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("GitHub returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected GitHub payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid GitHub API URL: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_displays_status() {
        let e = ClientError::Status { status: 404, message: "Not Found".into() };
        assert_eq!(e.to_string(), "GitHub returned 404: Not Found");
    }

    #[test]
    fn it_converts_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: ClientError = io.into();
        assert_eq!(e.to_string(), "gone");
    }

    #[test]
    fn it_displays_invalid_url() {
        let e = ClientError::InvalidUrl("not a url".into());
        assert_eq!(e.to_string(), "invalid GitHub API URL: not a url");
    }
}
