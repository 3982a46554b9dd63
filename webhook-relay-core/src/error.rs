// webhook-relay-core/src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("publish error: {0}")]
    Publish(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_the_error_kind() {
        let err = RelayError::Decode("expected value at line 1 column 1".into());
        assert_eq!(
            err.to_string(),
            "decode error: expected value at line 1 column 1"
        );
        assert_eq!(
            RelayError::Publish("channel closed".into()).to_string(),
            "publish error: channel closed"
        );
    }
}
