use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid bucket name: {0:?}")]
    InvalidBucketName(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("XML error: {0}")]
    Xml(#[from] serde_xml_rs::Error),

    #[error("Invalid permission in ACL document: {0:?}")]
    InvalidPermission(String),

    #[error("{code}: {message}")]
    Api { code: String, message: String },

    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl Error {
    /// S3-style error code, for logging and callers that match on codes.
    pub fn error_code(&self) -> &str {
        match self {
            Error::InvalidBucketName(_) => "InvalidBucketName",
            Error::InvalidEndpoint(_) => "InvalidEndpoint",
            Error::Api { code, .. } => code,
            Error::UnexpectedStatus(_) => "UnexpectedStatus",
            Error::Transport(_) => "TransportError",
            Error::Xml(_) => "MalformedXML",
            Error::InvalidPermission(_) => "MalformedACLError",
            Error::InternalError(_) => "InternalError",
        }
    }
}
