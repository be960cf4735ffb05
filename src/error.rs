use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required key is missing from the configuration store
    #[error("could not locate `{key}` in aws config file: {path:?}")]
    Configuration { key: String, path: PathBuf },

    #[error("could not access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The session token exchange failed
    #[error("could not get session token: {0}")]
    Authentication(String),

    /// Stored expiration is not a valid timestamp
    #[error("malformed expiration timestamp `{value}`: {source}")]
    Parse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("could not read token code: {0}")]
    Input(#[source] io::Error),

    /// Profile name that cannot round-trip through a `[name]` header
    #[error("invalid profile name {0:?}")]
    InvalidProfile(String),

    #[error("session duration must be positive, got {0}")]
    InvalidDuration(i32),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
