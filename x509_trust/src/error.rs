// Copyright (c) 2026 The x509_trust Authors
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Error types for chain trust evaluation.
//!
//! Per-certificate failures ([`ValidationError`]) are never fatal: the
//! evaluation loop records them and keeps processing the rest of the chain.
//! Configuration problems ([`PolicyError`]) are rejected eagerly at policy
//! construction, before any evaluation occurs.

use std::fmt;

/// Result type alias for per-certificate validation
pub type Result<T> = std::result::Result<T, ValidationError>;

// ============================================================================
// Validation errors
// ============================================================================

/// A policy violation found while evaluating a certificate chain.
///
/// The first seven variants are raised against an individual certificate;
/// [`MissingTrustedIssuer`](ValidationError::MissingTrustedIssuer) and
/// [`NoEndEntityCertificate`](ValidationError::NoEndEntityCertificate) are
/// derived for the chain as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// Certificate not yet valid at the evaluation instant
    NotYetValid,

    /// Certificate expired at the evaluation instant
    Expired,

    /// Failure reported by the revocation checker, propagated verbatim
    Revocation(RevocationError),

    /// End-entity subject DN fails the configured pattern
    SubjectNotAllowed {
        /// Subject DN that failed the match
        subject: String,
        /// The configured pattern
        pattern: String,
    },

    /// digitalSignature bit absent where the policy demands it
    KeyUsageForbidden,

    /// CA certificate declares no path-length limit and policy forbids that
    UnspecifiedPathLengthNotAllowed,

    /// CA certificate's declared path length exceeds the configured maximum
    PathLengthExceeded {
        /// Declared path length
        path_len: u32,
        /// Configured maximum
        max: u32,
    },

    /// No certificate in the chain matched the trusted-issuer pattern
    MissingTrustedIssuer,

    /// No certificate in the chain was an end-entity certificate
    NoEndEntityCertificate,
}

impl ValidationError {
    /// Create a subject-not-allowed error
    pub fn subject_not_allowed<S: Into<String>, P: Into<String>>(subject: S, pattern: P) -> Self {
        ValidationError::SubjectNotAllowed {
            subject: subject.into(),
            pattern: pattern.into(),
        }
    }

    /// Create a path-length-exceeded error
    pub fn path_length_exceeded(path_len: u32, max: u32) -> Self {
        ValidationError::PathLengthExceeded { path_len, max }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotYetValid => write!(f, "Certificate not yet valid"),
            ValidationError::Expired => write!(f, "Certificate has expired"),
            ValidationError::Revocation(e) => write!(f, "Revocation check failed: {}", e),
            ValidationError::SubjectNotAllowed { subject, pattern } => {
                write!(
                    f,
                    "Certificate subject {} does not match pattern {}",
                    subject, pattern
                )
            }
            ValidationError::KeyUsageForbidden => {
                write!(
                    f,
                    "Certificate keyUsage constraint forbids client authentication"
                )
            }
            ValidationError::UnspecifiedPathLengthNotAllowed => {
                write!(
                    f,
                    "Unlimited certificate path length not allowed by configuration"
                )
            }
            ValidationError::PathLengthExceeded { path_len, max } => {
                write!(
                    f,
                    "Certificate path length {} exceeds maximum value {}",
                    path_len, max
                )
            }
            ValidationError::MissingTrustedIssuer => {
                write!(f, "No certificate in the chain matched the trusted-issuer pattern")
            }
            ValidationError::NoEndEntityCertificate => {
                write!(f, "No end-entity certificate found in the chain")
            }
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValidationError::Revocation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RevocationError> for ValidationError {
    fn from(err: RevocationError) -> Self {
        ValidationError::Revocation(err)
    }
}

// ============================================================================
// Revocation errors
// ============================================================================

/// Failure reported by a [`RevocationChecker`](crate::RevocationChecker).
///
/// Opaque to the evaluator: any variant counts as a validation failure for
/// the certificate under check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RevocationError {
    /// The certificate is revoked
    Revoked,

    /// The checker could not determine revocation status
    StatusUnknown(String),
}

impl fmt::Display for RevocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevocationError::Revoked => write!(f, "Certificate has been revoked"),
            RevocationError::StatusUnknown(msg) => {
                write!(f, "Revocation status unknown: {}", msg)
            }
        }
    }
}

impl std::error::Error for RevocationError {}

// ============================================================================
// Policy configuration errors
// ============================================================================

/// A trust-policy configuration error, raised at construction time.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum PolicyError {
    /// The required trusted-issuer pattern was not supplied
    MissingTrustedIssuerPattern,

    /// A DN pattern failed to compile
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// The underlying regex error
        source: regex::Error,
    },
}

impl PolicyError {
    /// Create an invalid-pattern error
    pub fn invalid_pattern<S: Into<String>>(pattern: S, source: regex::Error) -> Self {
        PolicyError::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::MissingTrustedIssuerPattern => {
                write!(f, "Trusted-issuer pattern is required but was not supplied")
            }
            PolicyError::InvalidPattern { pattern, source } => {
                write!(f, "Invalid DN pattern {:?}: {}", pattern, source)
            }
        }
    }
}

impl std::error::Error for PolicyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PolicyError::InvalidPattern { source, .. } => Some(source),
            PolicyError::MissingTrustedIssuerPattern => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
