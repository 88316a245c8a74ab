// Copyright (c) 2026 The x509_trust Authors
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Revocation checking capability.
//!
//! The evaluator treats revocation status as an injected capability with a
//! one-certificate contract: no batching, no chain-level context. A checker
//! may block (e.g. a CRL or OCSP backend); the evaluator invokes it
//! synchronously, once per certificate. Any timeout policy belongs to the
//! checker itself or the caller.

use std::collections::BTreeSet;

use crate::certificate::Certificate;
use crate::error::RevocationError;

/// Evaluates the revocation status of a single certificate.
pub trait RevocationChecker: Send + Sync {
    /// Check one certificate, returning the revocation-specific failure when
    /// the certificate must not be trusted
    fn check(&self, cert: &Certificate) -> Result<(), RevocationError>;
}

// ============================================================================
// No-op checker
// ============================================================================

/// A checker that treats every certificate as not revoked.
///
/// The default, for deployments where revocation is handled elsewhere or not
/// at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRevocationChecker;

impl RevocationChecker for NoOpRevocationChecker {
    fn check(&self, _cert: &Certificate) -> Result<(), RevocationError> {
        Ok(())
    }
}

// ============================================================================
// Deny-list checker
// ============================================================================

/// A checker backed by an in-memory set of revoked subject DNs.
///
/// Suitable for small static deny lists and as a stand-in for CRL-backed
/// checkers in tests.
#[derive(Debug, Clone, Default)]
pub struct DenyListRevocationChecker {
    revoked_subjects: BTreeSet<String>,
}

impl DenyListRevocationChecker {
    /// Create an empty deny list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subject DN to the deny list
    pub fn deny(mut self, subject: impl Into<String>) -> Self {
        self.revoked_subjects.insert(subject.into());
        self
    }
}

impl RevocationChecker for DenyListRevocationChecker {
    fn check(&self, cert: &Certificate) -> Result<(), RevocationError> {
        if self.revoked_subjects.contains(&cert.subject) {
            log::warn!("certificate is on the deny list: {}", cert);
            return Err(RevocationError::Revoked);
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Validity;
    use std::time::{Duration, SystemTime};

    fn cert(subject: &str) -> Certificate {
        let now = SystemTime::now();
        Certificate::end_entity(
            subject,
            "CN=IntermediateCA",
            Validity::new(now - Duration::from_secs(60), now + Duration::from_secs(3600)),
        )
    }

    #[test]
    fn test_noop_checker_accepts_everything() {
        let checker = NoOpRevocationChecker;
        assert!(checker.check(&cert("CN=alice")).is_ok());
    }

    #[test]
    fn test_deny_list_checker() {
        let checker = DenyListRevocationChecker::new().deny("CN=mallory");
        assert!(checker.check(&cert("CN=alice")).is_ok());
        assert_eq!(
            checker.check(&cert("CN=mallory")),
            Err(RevocationError::Revoked)
        );
    }
}
