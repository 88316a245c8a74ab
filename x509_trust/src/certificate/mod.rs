// Copyright (c) 2026 The x509_trust Authors
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate view used by policy evaluation.
//!
//! The transport layer parses and path-validates the raw certificate bytes;
//! this module models only the fields the trust policy reads: the subject and
//! issuer distinguished names, the validity window, the Basic Constraints
//! path-length indicator, the optional Key Usage bit vector, and the set of
//! extension OIDs marked critical.

use std::collections::BTreeSet;
use std::fmt;

use const_oid::ObjectIdentifier;

use crate::time::Validity;

// ============================================================================
// Extension OIDs - RFC 5280 Section 4.2
// ============================================================================

/// Key Usage - 2.5.29.15
pub const KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.15");

// ============================================================================
// Basic Constraints - RFC 5280 Section 4.2.1.9
// ============================================================================

/// Basic Constraints as reported by the upstream parser.
///
/// ```asn1
/// BasicConstraints ::= SEQUENCE {
///     cA                      BOOLEAN DEFAULT FALSE,
///     pathLenConstraint       INTEGER (0..MAX) OPTIONAL
/// }
/// ```
///
/// `ca = false` marks an end-entity certificate. `ca = true` with
/// `path_len_constraint = None` is the "no path-length limit declared" case,
/// which the policy may allow or forbid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicConstraints {
    /// Whether the subject is a CA
    pub ca: bool,

    /// Maximum number of further intermediate CAs this CA may sign
    pub path_len_constraint: Option<u32>,
}

impl BasicConstraints {
    /// Basic Constraints for an end-entity certificate
    pub fn new_end_entity() -> Self {
        Self {
            ca: false,
            path_len_constraint: None,
        }
    }

    /// Basic Constraints for a CA certificate, `None` meaning unconstrained
    pub fn new_ca(path_len: Option<u32>) -> Self {
        Self {
            ca: true,
            path_len_constraint: path_len,
        }
    }
}

// ============================================================================
// Key Usage - RFC 5280 Section 4.2.1.3
// ============================================================================

/// Key Usage bit flags.
///
/// ```asn1
/// KeyUsage ::= BIT STRING {
///     digitalSignature        (0),
///     nonRepudiation          (1),
///     keyEncipherment         (2),
///     dataEncipherment        (3),
///     keyAgreement            (4),
///     keyCertSign             (5),
///     cRLSign                 (6),
///     encipherOnly            (7),
///     decipherOnly            (8)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUsage {
    bits: u16,
}

impl KeyUsage {
    // Bit positions match DER BIT STRING encoding: bit 0 is the MSB of byte 0,
    // bit 8 is the MSB of byte 1. Stored as a big-endian u16 so the constants
    // below can be used directly with `has()`.

    /// Digital signature (bit 0)
    pub const DIGITAL_SIGNATURE: u16 = 1 << 15;
    /// Non-repudiation / content commitment (bit 1)
    pub const NON_REPUDIATION: u16 = 1 << 14;
    /// Key encipherment (bit 2)
    pub const KEY_ENCIPHERMENT: u16 = 1 << 13;
    /// Data encipherment (bit 3)
    pub const DATA_ENCIPHERMENT: u16 = 1 << 12;
    /// Key agreement (bit 4)
    pub const KEY_AGREEMENT: u16 = 1 << 11;
    /// Certificate signing (bit 5)
    pub const KEY_CERT_SIGN: u16 = 1 << 10;
    /// CRL signing (bit 6)
    pub const CRL_SIGN: u16 = 1 << 9;
    /// Encipher only (bit 7)
    pub const ENCIPHER_ONLY: u16 = 1 << 8;
    /// Decipher only (bit 8)
    pub const DECIPHER_ONLY: u16 = 1 << 7;

    /// Create a new KeyUsage from bit flags
    pub fn new(bits: u16) -> Self {
        Self { bits }
    }

    /// Create a KeyUsage from the 9-element boolean vector form, index 0
    /// being digitalSignature. Elements beyond index 8 are ignored.
    pub fn from_flags(flags: &[bool]) -> Self {
        let mut bits = 0u16;
        for (i, &set) in flags.iter().take(9).enumerate() {
            if set {
                bits |= 1 << (15 - i);
            }
        }
        Self { bits }
    }

    /// Check if a specific usage is enabled
    pub fn has(&self, usage: u16) -> bool {
        (self.bits & usage) != 0
    }
}

impl fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut usages = Vec::new();
        if self.has(Self::DIGITAL_SIGNATURE) {
            usages.push("digitalSignature");
        }
        if self.has(Self::NON_REPUDIATION) {
            usages.push("nonRepudiation");
        }
        if self.has(Self::KEY_ENCIPHERMENT) {
            usages.push("keyEncipherment");
        }
        if self.has(Self::DATA_ENCIPHERMENT) {
            usages.push("dataEncipherment");
        }
        if self.has(Self::KEY_AGREEMENT) {
            usages.push("keyAgreement");
        }
        if self.has(Self::KEY_CERT_SIGN) {
            usages.push("keyCertSign");
        }
        if self.has(Self::CRL_SIGN) {
            usages.push("cRLSign");
        }
        if self.has(Self::ENCIPHER_ONLY) {
            usages.push("encipherOnly");
        }
        if self.has(Self::DECIPHER_ONLY) {
            usages.push("decipherOnly");
        }

        write!(f, "{}", usages.join(", "))
    }
}

// ============================================================================
// Certificate
// ============================================================================

/// An already-parsed X.509 certificate, reduced to the fields the trust
/// policy evaluates. Never mutated during evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    /// Canonical string form of the subject distinguished name
    pub subject: String,

    /// Canonical string form of the issuer distinguished name
    pub issuer: String,

    /// Validity window
    pub validity: Validity,

    /// Basic Constraints carrying the path-length indicator
    pub basic_constraints: BasicConstraints,

    /// Key Usage bit vector, `None` when the extension is absent
    pub key_usage: Option<KeyUsage>,

    /// OIDs of extensions marked critical
    pub critical_extensions: BTreeSet<ObjectIdentifier>,
}

impl Certificate {
    /// Create an end-entity certificate
    pub fn end_entity(
        subject: impl Into<String>,
        issuer: impl Into<String>,
        validity: Validity,
    ) -> Self {
        Self {
            subject: subject.into(),
            issuer: issuer.into(),
            validity,
            basic_constraints: BasicConstraints::new_end_entity(),
            key_usage: None,
            critical_extensions: BTreeSet::new(),
        }
    }

    /// Create a CA certificate, `path_len = None` meaning no declared limit
    pub fn ca(
        subject: impl Into<String>,
        issuer: impl Into<String>,
        validity: Validity,
        path_len: Option<u32>,
    ) -> Self {
        Self {
            subject: subject.into(),
            issuer: issuer.into(),
            validity,
            basic_constraints: BasicConstraints::new_ca(path_len),
            key_usage: None,
            critical_extensions: BTreeSet::new(),
        }
    }

    /// Attach a Key Usage bit vector
    pub fn with_key_usage(mut self, key_usage: KeyUsage) -> Self {
        self.key_usage = Some(key_usage);
        self
    }

    /// Mark an extension OID as critical
    pub fn with_critical_extension(mut self, oid: ObjectIdentifier) -> Self {
        self.critical_extensions.insert(oid);
        self
    }

    /// Whether this is an end-entity (non-CA) certificate
    pub fn is_end_entity(&self) -> bool {
        !self.basic_constraints.ca
    }

    /// Whether the given extension OID is marked critical
    pub fn is_critical(&self, oid: &ObjectIdentifier) -> bool {
        self.critical_extensions.contains(oid)
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subject={}, issuer={}, ", self.subject, self.issuer)?;
        if self.is_end_entity() {
            write!(f, "end-entity")
        } else {
            match self.basic_constraints.path_len_constraint {
                Some(n) => write!(f, "CA pathLen={}", n),
                None => write!(f, "CA pathLen=unspecified"),
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
