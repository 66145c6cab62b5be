//! Error types for osrm-setup
//!
//! Covers the three failure families of the crate: locating the setup script,
//! launching it, and talking to an OSRM server.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

/// Main error type for osrm-setup operations
#[derive(Debug)]
pub enum Error {
    /// The setup script does not exist at the resolved path
    ScriptNotFound(PathBuf),

    /// The script interpreter could not be found on PATH
    InterpreterNotFound(String),

    /// The script process could not be started for any other reason
    LaunchFailed(String),

    /// File I/O error
    IoError(std::io::Error),

    /// HTTP-specific error (non-2xx status, protocol failure)
    HttpError(String),

    /// Network connectivity issues
    NetworkError(String),

    /// The OSRM server answered with a status code other than "Ok"
    ApiError {
        code: String,
        message: Option<String>,
    },

    /// The OSRM server answered with a body we could not use
    InvalidResponse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ScriptNotFound(path) => {
                let name = path
                    .file_name()
                    .map_or(Cow::Borrowed("setup script"), |n| n.to_string_lossy());
                write!(f, "{} not found at {}", name, path.display())
            }
            Error::InterpreterNotFound(interpreter) => {
                write!(f, "{} is required to run this tool", interpreter)
            }
            Error::LaunchFailed(msg) => {
                write!(f, "Failed to launch setup script: {}", msg)
            }
            Error::IoError(err) => {
                write!(f, "I/O error: {}", err)
            }
            Error::HttpError(msg) => {
                write!(f, "HTTP error: {}", msg)
            }
            Error::NetworkError(msg) => {
                write!(f, "Network error: {}", msg)
            }
            Error::ApiError { code, message } => match message {
                Some(message) => write!(f, "OSRM error: {} ({})", code, message),
                None => write!(f, "OSRM error: {}", code),
            },
            Error::InvalidResponse(msg) => {
                write!(f, "Invalid OSRM response: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Error::NetworkError(err.to_string())
        } else {
            Error::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidResponse(err.to_string())
    }
}

/// Convenience result type for osrm-setup operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_contains_code() {
        let err = Error::ApiError {
            code: "NoRoute".to_string(),
            message: None,
        };
        assert_eq!(err.to_string(), "OSRM error: NoRoute");

        let err = Error::ApiError {
            code: "InvalidQuery".to_string(),
            message: Some("Query string malformed close to position 28".to_string()),
        };
        assert!(err.to_string().starts_with("OSRM error: InvalidQuery"));
    }

    #[test]
    fn test_script_and_interpreter_messages() {
        let err = Error::ScriptNotFound(PathBuf::from("/opt/osrm/setup-osrm.sh"));
        assert_eq!(err.to_string(), "setup-osrm.sh not found at /opt/osrm/setup-osrm.sh");

        let err = Error::ScriptNotFound(PathBuf::from("/srv/scripts/prepare-maps.sh"));
        assert_eq!(err.to_string(), "prepare-maps.sh not found at /srv/scripts/prepare-maps.sh");

        let err = Error::ScriptNotFound(PathBuf::from("/"));
        assert_eq!(err.to_string(), "setup script not found at /");

        let err = Error::InterpreterNotFound("bash".to_string());
        assert_eq!(err.to_string(), "bash is required to run this tool");
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error as _;

        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(err.source().is_some());
        assert!(Error::LaunchFailed("x".into()).source().is_none());
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }
}
