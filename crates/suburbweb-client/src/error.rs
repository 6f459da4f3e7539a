//! Error types for suburbweb-client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("could not reach the data service: {message}")]
    Transport { message: String },

    #[error("data service returned {status}")]
    Status { status: u16, body: String },

    #[error("response was not valid JSON: {message}")]
    InvalidJson { message: String },

    #[error("could not build HTTP client: {message}")]
    Build { message: String },
}
