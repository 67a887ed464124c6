use thiserror::Error;

/// Classified authentication failures.
///
/// Every variant except `UpstreamUnavailable` is the caller's problem (401);
/// `UpstreamUnavailable` is ours (store or crypto backend failed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no authorization header found")]
    MissingCredentials,
    #[error("authorization header is malformed")]
    MalformedCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    ExpiredToken,
    #[error("user not found")]
    PrincipalNotFound,
    #[error("authentication backend unavailable")]
    UpstreamUnavailable,
}

impl AuthError {
    /// Stable machine-readable code used in the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "MISSING_CREDENTIALS",
            Self::MalformedCredentials => "MALFORMED_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::ExpiredToken => "TOKEN_EXPIRED",
            Self::PrincipalNotFound => "PRINCIPAL_NOT_FOUND",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
        }
    }
}
