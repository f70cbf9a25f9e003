//! Common error types used throughout dtsc.
//!
//! Indexing itself never fails; errors only come from the edges where bytes
//! leave or enter the process: writing to a sink, decoding a wire document,
//! and moving documents through CBOR.

/// Common error type for dtsc.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O operation on a sink or reader failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A wire document could not be decoded.
    #[error("Invalid wire document: {0}")]
    InvalidWire(String),

    /// A generic tree document had the wrong shape or could not be decoded.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A document could not be encoded.
    #[error("Encode error: {0}")]
    Encode(String),

    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new InvalidWire error.
    pub fn invalid_wire<S: Into<String>>(msg: S) -> Self {
        Self::InvalidWire(msg.into())
    }

    /// Create a new InvalidDocument error.
    pub fn invalid_document<S: Into<String>>(msg: S) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Create a new Encode error.
    pub fn encode<S: Into<String>>(msg: S) -> Self {
        Self::Encode(msg.into())
    }

    /// Create a new Config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_wire("bad magic");
        assert_eq!(err.to_string(), "Invalid wire document: bad magic");

        let err = Error::invalid_document("root is not a map");
        assert_eq!(err.to_string(), "Invalid document: root is not a map");

        let err = Error::encode("writer closed");
        assert_eq!(err.to_string(), "Encode error: writer closed");

        let err = Error::config("expected number");
        assert_eq!(err.to_string(), "Config error: expected number");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "peer gone");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_string_into() {
        let err = Error::invalid_wire(String::from("truncated"));
        assert_eq!(err.to_string(), "Invalid wire document: truncated");
    }
}
