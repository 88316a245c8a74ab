// Copyright (c) 2026 The x509_trust Authors
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Trust policy configuration.
//!
//! A [`TrustPolicy`] is built once, validated eagerly, and then shared
//! read-only across concurrent evaluations. DN patterns are compiled at
//! construction time into [`DnPattern`] values; they are never recompiled
//! per evaluation.

use std::fmt;

use regex::Regex;

use crate::error::PolicyError;

/// Default maximum path length for CA certificates in a supplied chain
pub const DEFAULT_MAX_PATH_LENGTH: u32 = 1;

/// Default subject DN pattern (match everything)
pub const DEFAULT_SUBJECT_PATTERN: &str = ".*";

// ============================================================================
// DN pattern
// ============================================================================

/// A precompiled matcher over the canonical string form of a distinguished
/// name.
///
/// Matching is full-string, not substring search: the supplied pattern is
/// compiled anchored, so `CN=Example.*` does not match `OU=x,CN=Example`.
/// No normalization of DN component ordering is performed; callers supply a
/// pattern matching whatever canonical form the upstream parser produces.
#[derive(Debug, Clone)]
pub struct DnPattern {
    pattern: String,
    regex: Regex,
}

impl DnPattern {
    /// Compile a DN pattern
    pub fn new(pattern: &str) -> Result<Self, PolicyError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))
            .map_err(|e| PolicyError::invalid_pattern(pattern, e))?;
        Ok(Self {
            pattern: pattern.to_owned(),
            regex,
        })
    }

    /// Whether the DN matches the pattern in its entirety
    pub fn matches(&self, dn: &str) -> bool {
        self.regex.is_match(dn)
    }

    /// The pattern as originally supplied, without the added anchors
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for DnPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

// ============================================================================
// Trust policy
// ============================================================================

/// Deployer-configured trust policy, immutable after construction.
#[derive(Debug, Clone)]
pub struct TrustPolicy {
    trusted_issuer: DnPattern,
    subject: DnPattern,
    max_path_length: u32,
    allow_unspecified_path_length: bool,
    check_key_usage: bool,
    require_key_usage: bool,
}

impl TrustPolicy {
    /// Create a policy with the given trusted-issuer pattern and all other
    /// settings at their defaults
    pub fn new(trusted_issuer_pattern: &str) -> Result<Self, PolicyError> {
        Self::builder()
            .trusted_issuer_pattern(trusted_issuer_pattern)
            .build()
    }

    /// Start building a policy
    pub fn builder() -> TrustPolicyBuilder {
        TrustPolicyBuilder::new()
    }

    /// Pattern a certificate's issuer DN must match for the chain to carry a
    /// trusted issuer
    pub fn trusted_issuer(&self) -> &DnPattern {
        &self.trusted_issuer
    }

    /// Pattern the end-entity subject DN must match
    pub fn subject(&self) -> &DnPattern {
        &self.subject
    }

    /// Maximum allowed declared path length for CA certificates
    pub fn max_path_length(&self) -> u32 {
        self.max_path_length
    }

    /// Whether a CA certificate may omit a path-length limit
    pub fn allow_unspecified_path_length(&self) -> bool {
        self.allow_unspecified_path_length
    }

    /// Whether the Key Usage extension is checked at all
    pub fn check_key_usage(&self) -> bool {
        self.check_key_usage
    }

    /// Whether the Key Usage extension is mandatory when checking
    pub fn require_key_usage(&self) -> bool {
        self.require_key_usage
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`TrustPolicy`].
///
/// The trusted-issuer pattern is required; [`build`](Self::build) fails with
/// [`PolicyError::MissingTrustedIssuerPattern`] when it was never supplied.
#[derive(Debug, Clone, Default)]
pub struct TrustPolicyBuilder {
    trusted_issuer_pattern: Option<String>,
    subject_pattern: Option<String>,
    max_path_length: Option<u32>,
    allow_unspecified_path_length: bool,
    check_key_usage: bool,
    require_key_usage: bool,
}

impl TrustPolicyBuilder {
    /// Create a builder with every setting at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the required trusted-issuer DN pattern
    pub fn trusted_issuer_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.trusted_issuer_pattern = Some(pattern.into());
        self
    }

    /// Set the end-entity subject DN pattern (default: match everything)
    pub fn subject_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.subject_pattern = Some(pattern.into());
        self
    }

    /// Set the maximum path length for CA certificates (default: 1)
    pub fn max_path_length(mut self, max: u32) -> Self {
        self.max_path_length = Some(max);
        self
    }

    /// Allow CA certificates that declare no path-length limit (default: false)
    pub fn allow_unspecified_path_length(mut self, allowed: bool) -> Self {
        self.allow_unspecified_path_length = allowed;
        self
    }

    /// Check the Key Usage extension on end-entity certificates (default: false)
    pub fn check_key_usage(mut self, check: bool) -> Self {
        self.check_key_usage = check;
        self
    }

    /// Require the Key Usage extension to be present when checking (default: false)
    pub fn require_key_usage(mut self, require: bool) -> Self {
        self.require_key_usage = require;
        self
    }

    /// Compile the patterns and produce the policy
    pub fn build(self) -> Result<TrustPolicy, PolicyError> {
        let trusted_issuer_pattern = self
            .trusted_issuer_pattern
            .ok_or(PolicyError::MissingTrustedIssuerPattern)?;
        let trusted_issuer = DnPattern::new(&trusted_issuer_pattern)?;

        let subject_pattern = self
            .subject_pattern
            .unwrap_or_else(|| DEFAULT_SUBJECT_PATTERN.to_owned());
        let subject = DnPattern::new(&subject_pattern)?;

        Ok(TrustPolicy {
            trusted_issuer,
            subject,
            max_path_length: self.max_path_length.unwrap_or(DEFAULT_MAX_PATH_LENGTH),
            allow_unspecified_path_length: self.allow_unspecified_path_length,
            check_key_usage: self.check_key_usage,
            require_key_usage: self.require_key_usage,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
