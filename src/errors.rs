use std::fmt;

use thiserror::Error;

/// Failure categories reported by the label detector.
///
/// Each kind is printed verbatim at the start of an error message so a
/// diagnostic on stderr identifies what went wrong without parsing the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Auth,
    NotFound,
    UnsupportedMedia,
    Transport,
    Throttling,
    Config,
    Service,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "AuthError",
            Self::NotFound => "NotFoundError",
            Self::UnsupportedMedia => "UnsupportedMediaError",
            Self::Transport => "TransportError",
            Self::Throttling => "ThrottlingError",
            Self::Config => "ConfigError",
            Self::Service => "ServiceError",
        }
    }

    /// Classify an error code returned by the image-analysis service.
    pub fn from_service_code(code: &str) -> Self {
        match code {
            "AccessDeniedException"
            | "UnrecognizedClientException"
            | "InvalidSignatureException"
            | "ExpiredTokenException"
            | "MissingAuthenticationTokenException"
            | "InvalidClientTokenId" => Self::Auth,
            "InvalidS3ObjectException" | "NoSuchBucket" | "NoSuchKey"
            | "ResourceNotFoundException" => Self::NotFound,
            "InvalidImageFormatException" | "ImageTooLargeException" => Self::UnsupportedMedia,
            "ThrottlingException"
            | "ProvisionedThroughputExceededException"
            | "LimitExceededException" => Self::Throttling,
            "InvalidParameterException" | "ValidationException" => Self::Config,
            _ => Self::Service,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("AuthError: {message}")]
    Auth { message: String },

    #[error("NotFoundError: s3://{bucket}/{key}: {message}")]
    NotFound {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("UnsupportedMediaError: {message}")]
    UnsupportedMedia { message: String },

    #[error("TransportError: {message}")]
    Transport { message: String },

    #[error("ThrottlingError: {message}")]
    Throttling { message: String },

    #[error("ConfigError: {field} {reason}")]
    Config { field: String, reason: String },

    #[error("ServiceError: {code}: {message}")]
    Service { code: String, message: String },

    #[error("TransportError: failed to write report")]
    Output {
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DetectError>;

impl DetectError {
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth { .. } => ErrorKind::Auth,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::UnsupportedMedia { .. } => ErrorKind::UnsupportedMedia,
            Self::Transport { .. } | Self::Output { .. } => ErrorKind::Transport,
            Self::Throttling { .. } => ErrorKind::Throttling,
            Self::Config { .. } => ErrorKind::Config,
            Self::Service { .. } => ErrorKind::Service,
        }
    }

    /// Build an error from a service error code and message for the object
    /// named by `bucket`/`key`.
    pub fn from_service(code: &str, message: &str, bucket: &str, key: &str) -> Self {
        let message = message.to_string();
        match ErrorKind::from_service_code(code) {
            ErrorKind::Auth => Self::Auth { message },
            ErrorKind::NotFound => Self::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message,
            },
            ErrorKind::UnsupportedMedia => Self::UnsupportedMedia { message },
            ErrorKind::Throttling => Self::Throttling { message },
            ErrorKind::Config => Self::Config {
                field: "request".to_string(),
                reason: format!("rejected by service: {message}"),
            },
            ErrorKind::Transport | ErrorKind::Service => Self::Service {
                code: code.to_string(),
                message,
            },
        }
    }
}

/// Writer failures surface as transport errors on the output side.
impl From<std::io::Error> for DetectError {
    fn from(err: std::io::Error) -> Self {
        Self::Output { source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_codes_map_to_kinds() {
        let cases = [
            ("AccessDeniedException", ErrorKind::Auth),
            ("UnrecognizedClientException", ErrorKind::Auth),
            ("InvalidS3ObjectException", ErrorKind::NotFound),
            ("InvalidImageFormatException", ErrorKind::UnsupportedMedia),
            ("ImageTooLargeException", ErrorKind::UnsupportedMedia),
            ("ThrottlingException", ErrorKind::Throttling),
            ("ProvisionedThroughputExceededException", ErrorKind::Throttling),
            ("InvalidParameterException", ErrorKind::Config),
            ("InternalServerError", ErrorKind::Service),
            ("", ErrorKind::Service),
        ];

        for (code, expected) in cases {
            assert_eq!(ErrorKind::from_service_code(code), expected, "code: {code}");
        }
    }

    #[test]
    fn test_display_starts_with_kind() {
        let err = DetectError::from_service(
            "InvalidS3ObjectException",
            "Unable to get object metadata from S3",
            "bucket",
            "missing.jpeg",
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            "NotFoundError: s3://bucket/missing.jpeg: Unable to get object metadata from S3"
        );

        let err = DetectError::config("max_labels", "must not exceed 1000");
        assert!(err.to_string().starts_with(ErrorKind::Config.as_str()));
    }

    #[test]
    fn test_io_error_is_transport() {
        let err: DetectError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
