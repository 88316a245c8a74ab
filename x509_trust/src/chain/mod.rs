// Copyright (c) 2026 The x509_trust Authors
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate chain types.
//!
//! This module provides the `CertificateChain` type for representing the
//! ordered sequence of certificates submitted by a client, from the
//! end-entity candidate at index 0 to the certificate closest to the trust
//! anchor at the last index. No cryptographic linkage between consecutive
//! entries is assumed beyond what upstream path validation guaranteed.

use crate::certificate::Certificate;

// ============================================================================
// Certificate Chain
// ============================================================================

/// A certificate chain, ordered from leaf (end-entity) to root (trust anchor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateChain {
    /// The certificates in the chain, from leaf to root
    pub certificates: Vec<Certificate>,
}

impl CertificateChain {
    /// Create a new certificate chain
    pub fn new(certificates: Vec<Certificate>) -> Self {
        Self { certificates }
    }

    /// Create a chain with a single certificate
    pub fn single(cert: Certificate) -> Self {
        Self {
            certificates: vec![cert],
        }
    }

    /// Add a certificate to the chain
    pub fn push(&mut self, cert: Certificate) {
        self.certificates.push(cert);
    }

    /// Get the leaf (end-entity) certificate
    pub fn leaf(&self) -> Option<&Certificate> {
        self.certificates.first()
    }

    /// Get the root (trust anchor) certificate
    pub fn root(&self) -> Option<&Certificate> {
        self.certificates.last()
    }

    /// Get the chain length
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    /// Get an iterator over the certificates
    pub fn iter(&self) -> std::slice::Iter<'_, Certificate> {
        self.certificates.iter()
    }
}
