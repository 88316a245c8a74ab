// Copyright (c) 2026 The x509_trust Authors
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Chain trust evaluation.
//!
//! [`ChainTrustValidator`] owns the configured [`TrustPolicy`] and the
//! injected [`RevocationChecker`] and exposes one operation: evaluate a
//! certificate chain and report whether it authenticates, and as which
//! end-entity certificate.
//!
//! The loop is a full-chain audit: a failing certificate is recorded and
//! processing continues, so diagnostics cover every problem in the chain.
//! Each check is per-certificate and the results combine with commutative
//! AND/OR, which keeps the final decision independent of iteration order;
//! the order (last index down to 0) is observable only through logging and
//! through the leaf tie-break below.

use std::time::SystemTime;

use crate::certificate::{Certificate, KeyUsage, KEY_USAGE};
use crate::chain::CertificateChain;
use crate::error::{Result, ValidationError};
use crate::policy::TrustPolicy;
use crate::revocation::{NoOpRevocationChecker, RevocationChecker};

// ============================================================================
// Evaluation result
// ============================================================================

/// The authentication decision for one evaluated chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// The chain satisfies the policy; the referenced certificate is the
    /// authenticated end-entity
    Authenticated(&'a Certificate),

    /// The chain does not satisfy the policy
    Rejected,
}

/// A recorded per-certificate validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Index of the certificate within the submitted chain
    pub index: usize,

    /// Subject DN of the failing certificate
    pub subject: String,

    /// The violation found
    pub error: ValidationError,
}

/// Result of evaluating one chain: the binary outcome plus structured
/// failure records for diagnostics and audit logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation<'a> {
    outcome: Outcome<'a>,
    failures: Vec<Failure>,
    chain_errors: Vec<ValidationError>,
}

impl<'a> Evaluation<'a> {
    /// The authentication decision
    pub fn outcome(&self) -> Outcome<'a> {
        self.outcome
    }

    /// Whether the chain authenticated
    pub fn is_authenticated(&self) -> bool {
        matches!(self.outcome, Outcome::Authenticated(_))
    }

    /// The selected end-entity certificate, when authenticated
    pub fn leaf(&self) -> Option<&'a Certificate> {
        match self.outcome {
            Outcome::Authenticated(cert) => Some(cert),
            Outcome::Rejected => None,
        }
    }

    /// Per-certificate validation failures, in processing order
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Chain-level diagnostics derived after the loop:
    /// [`ValidationError::MissingTrustedIssuer`] and
    /// [`ValidationError::NoEndEntityCertificate`]
    pub fn chain_errors(&self) -> &[ValidationError] {
        &self.chain_errors
    }
}

// ============================================================================
// Validator
// ============================================================================

/// Evaluates certificate chains against a [`TrustPolicy`].
///
/// Stateless per evaluation: all mutable state lives inside one call, so a
/// single validator may serve concurrent evaluations without locking.
pub struct ChainTrustValidator {
    policy: TrustPolicy,
    revocation: Box<dyn RevocationChecker>,
}

impl ChainTrustValidator {
    /// Create a validator with the no-op revocation checker
    pub fn new(policy: TrustPolicy) -> Self {
        Self::with_revocation_checker(policy, Box::new(NoOpRevocationChecker))
    }

    /// Create a validator with an injected revocation checker
    pub fn with_revocation_checker(
        policy: TrustPolicy,
        revocation: Box<dyn RevocationChecker>,
    ) -> Self {
        Self { policy, revocation }
    }

    /// The configured policy
    pub fn policy(&self) -> &TrustPolicy {
        &self.policy
    }

    /// Evaluate a chain at the current system time
    pub fn evaluate<'a>(&self, chain: &'a CertificateChain) -> Evaluation<'a> {
        self.evaluate_at(chain, SystemTime::now())
    }

    /// Evaluate a chain at an explicit instant.
    ///
    /// Every certificate is processed exactly once, from the last index down
    /// to index 0; a validation failure never aborts the loop. The chain
    /// authenticates iff every certificate passed, at least one issuer DN
    /// matched the trusted-issuer pattern, and an end-entity certificate was
    /// found. When several end-entity certificates are present the one at the
    /// lowest index prevails (last encountered in iteration order).
    pub fn evaluate_at<'a>(&self, chain: &'a CertificateChain, now: SystemTime) -> Evaluation<'a> {
        struct Acc<'a> {
            all_valid: bool,
            has_trusted_issuer: bool,
            leaf: Option<&'a Certificate>,
            failures: Vec<Failure>,
        }

        let acc = chain.iter().enumerate().rev().fold(
            Acc {
                all_valid: true,
                has_trusted_issuer: false,
                leaf: None,
                failures: Vec::new(),
            },
            |mut acc, (index, cert)| {
                log::debug!("evaluating certificate {}: {}", index, cert);

                match self.validate_certificate(cert, now) {
                    Ok(()) => {
                        if !acc.has_trusted_issuer {
                            acc.has_trusted_issuer = self.issuer_matches(cert);
                        }
                        if cert.is_end_entity() {
                            log::debug!("found valid client certificate at index {}", index);
                            acc.leaf = Some(cert);
                        } else {
                            log::debug!("found valid CA certificate at index {}", index);
                        }
                    }
                    Err(error) => {
                        log::warn!("failed to validate certificate {} ({}): {}", index, cert, error);
                        acc.all_valid = false;
                        acc.failures.push(Failure {
                            index,
                            subject: cert.subject.clone(),
                            error,
                        });
                    }
                }
                acc
            },
        );

        let mut chain_errors = Vec::new();
        if !acc.has_trusted_issuer {
            chain_errors.push(ValidationError::MissingTrustedIssuer);
        }
        if acc.leaf.is_none() {
            chain_errors.push(ValidationError::NoEndEntityCertificate);
        }

        let outcome = match acc.leaf {
            Some(leaf) if acc.all_valid && acc.has_trusted_issuer => {
                log::info!("successfully authenticated {}", leaf);
                Outcome::Authenticated(leaf)
            }
            _ => {
                log::info!("failed to authenticate certificate chain");
                Outcome::Rejected
            }
        };

        Evaluation {
            outcome,
            failures: acc.failures,
            chain_errors,
        }
    }

    /// Validate one certificate against the policy.
    fn validate_certificate(&self, cert: &Certificate, now: SystemTime) -> Result<()> {
        if now < cert.validity.not_before {
            return Err(ValidationError::NotYetValid);
        }
        if now > cert.validity.not_after {
            return Err(ValidationError::Expired);
        }

        self.revocation.check(cert)?;

        if cert.is_end_entity() {
            if !self.policy.subject().matches(&cert.subject) {
                return Err(ValidationError::subject_not_allowed(
                    cert.subject.clone(),
                    self.policy.subject().as_str(),
                ));
            }
            if self.policy.check_key_usage() && !self.is_valid_key_usage(cert) {
                return Err(ValidationError::KeyUsageForbidden);
            }
        } else {
            match cert.basic_constraints.path_len_constraint {
                None => {
                    if !self.policy.allow_unspecified_path_length() {
                        return Err(ValidationError::UnspecifiedPathLengthNotAllowed);
                    }
                }
                Some(path_len) if path_len > self.policy.max_path_length() => {
                    return Err(ValidationError::path_length_exceeded(
                        path_len,
                        self.policy.max_path_length(),
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Evaluate the Key Usage extension of an end-entity certificate.
    ///
    /// Absent extension: passes only when key usage is not mandated. Present
    /// extension: the digitalSignature bit decides when the extension is
    /// marked critical or the policy requires it; otherwise the check is
    /// informational and always passes.
    fn is_valid_key_usage(&self, cert: &Certificate) -> bool {
        log::debug!("checking certificate keyUsage extension");

        let key_usage = match cert.key_usage {
            Some(ku) => ku,
            None => {
                log::warn!(
                    "policy specifies checkKeyUsage but keyUsage extension not found in certificate"
                );
                return !self.policy.require_key_usage();
            }
        };

        if cert.is_critical(&KEY_USAGE) || self.policy.require_key_usage() {
            log::debug!("keyUsage [{}] is marked critical or required by policy", key_usage);
            key_usage.has(KeyUsage::DIGITAL_SIGNATURE)
        } else {
            true
        }
    }

    fn issuer_matches(&self, cert: &Certificate) -> bool {
        let pattern = self.policy.trusted_issuer();
        let result = pattern.matches(&cert.issuer);
        log::debug!("{} matches {} == {}", pattern, cert.issuer, result);
        result
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RevocationError;
    use crate::time::Validity;
    use std::time::Duration;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn now() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    fn window() -> Validity {
        Validity::new(now() - Duration::from_secs(3600), now() + Duration::from_secs(3600))
    }

    fn expired_window() -> Validity {
        Validity::new(now() - Duration::from_secs(7200), now() - Duration::from_secs(3600))
    }

    fn future_window() -> Validity {
        Validity::new(now() + Duration::from_secs(3600), now() + Duration::from_secs(7200))
    }

    fn leaf(subject: &str, issuer: &str) -> Certificate {
        Certificate::end_entity(subject, issuer, window())
    }

    fn ca(subject: &str, issuer: &str, path_len: Option<u32>) -> Certificate {
        Certificate::ca(subject, issuer, window(), path_len)
    }

    fn policy(trusted_issuer: &str) -> TrustPolicy {
        TrustPolicy::new(trusted_issuer).expect("policy should build")
    }

    fn two_cert_chain() -> CertificateChain {
        CertificateChain::new(vec![
            leaf("CN=alice", "CN=IntermediateCA"),
            ca("CN=IntermediateCA", "CN=RootCA", Some(0)),
        ])
    }

    // ── happy path ──

    #[test]
    fn test_leaf_and_intermediate_authenticates() {
        init_logs();
        let validator = ChainTrustValidator::new(policy("CN=RootCA"));
        let chain = two_cert_chain();

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(evaluation.is_authenticated());
        assert_eq!(evaluation.leaf().unwrap().subject, "CN=alice");
        assert!(evaluation.failures().is_empty());
        assert!(evaluation.chain_errors().is_empty());
    }

    #[test]
    fn test_selected_leaf_is_the_chain_certificate() {
        let validator = ChainTrustValidator::new(policy("CN=RootCA"));
        let chain = two_cert_chain();

        let evaluation = validator.evaluate_at(&chain, now());
        // downstream consumers must get exactly the certificate the evaluator
        // selected, not merely an equal one
        assert!(std::ptr::eq(
            evaluation.leaf().unwrap(),
            &chain.certificates[0]
        ));
    }

    #[test]
    fn test_single_self_shaped_leaf_with_trusted_issuer() {
        let validator = ChainTrustValidator::new(policy("CN=RootCA"));
        let chain = CertificateChain::single(leaf("CN=alice", "CN=RootCA"));

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(evaluation.is_authenticated());
    }

    // ── validity window ──

    #[test]
    fn test_expired_certificate_rejects_chain() {
        let validator = ChainTrustValidator::new(policy("CN=RootCA"));
        let chain = CertificateChain::new(vec![
            Certificate::end_entity("CN=alice", "CN=IntermediateCA", expired_window()),
            ca("CN=IntermediateCA", "CN=RootCA", Some(0)),
        ]);

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(!evaluation.is_authenticated());
        assert_eq!(evaluation.failures().len(), 1);
        assert_eq!(evaluation.failures()[0].index, 0);
        assert_eq!(evaluation.failures()[0].error, ValidationError::Expired);
        // the rest of the chain was still processed: the issuer match and the
        // CA check both succeeded, so no chain-level diagnostics remain
        assert!(evaluation.chain_errors().is_empty());
    }

    #[test]
    fn test_not_yet_valid_certificate_rejects_chain() {
        let validator = ChainTrustValidator::new(policy("CN=RootCA"));
        let chain = CertificateChain::new(vec![
            Certificate::end_entity("CN=alice", "CN=IntermediateCA", future_window()),
            ca("CN=IntermediateCA", "CN=RootCA", Some(0)),
        ]);

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(!evaluation.is_authenticated());
        assert_eq!(evaluation.failures()[0].error, ValidationError::NotYetValid);
    }

    #[test]
    fn test_validity_bounds_are_inclusive() {
        let validator = ChainTrustValidator::new(policy("CN=RootCA"));
        let edge = Validity::new(now(), now());
        let chain = CertificateChain::single(Certificate::end_entity(
            "CN=alice",
            "CN=RootCA",
            edge,
        ));

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(evaluation.is_authenticated());
    }

    // ── path length ──

    #[test]
    fn test_path_length_exceeded_rejects_even_when_rest_passes() {
        let validator = ChainTrustValidator::new(policy("CN=RootCA"));
        let chain = CertificateChain::new(vec![
            leaf("CN=alice", "CN=IntermediateCA"),
            ca("CN=IntermediateCA", "CN=RootCA", Some(5)),
        ]);

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(!evaluation.is_authenticated());
        assert_eq!(evaluation.failures().len(), 1);
        assert_eq!(evaluation.failures()[0].index, 1);
        assert_eq!(
            evaluation.failures()[0].error,
            ValidationError::path_length_exceeded(5, 1)
        );
    }

    #[test]
    fn test_path_length_within_maximum_passes() {
        let validator = ChainTrustValidator::new(
            TrustPolicy::builder()
                .trusted_issuer_pattern("CN=RootCA")
                .max_path_length(2)
                .build()
                .unwrap(),
        );
        let chain = CertificateChain::new(vec![
            leaf("CN=alice", "CN=IntermediateCA"),
            ca("CN=IntermediateCA", "CN=RootCA", Some(2)),
        ]);

        assert!(validator.evaluate_at(&chain, now()).is_authenticated());
    }

    #[test]
    fn test_unspecified_path_length_forbidden_by_default() {
        let validator = ChainTrustValidator::new(policy("CN=RootCA"));
        let chain = CertificateChain::new(vec![
            leaf("CN=alice", "CN=IntermediateCA"),
            ca("CN=IntermediateCA", "CN=RootCA", None),
        ]);

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(!evaluation.is_authenticated());
        assert_eq!(
            evaluation.failures()[0].error,
            ValidationError::UnspecifiedPathLengthNotAllowed
        );
    }

    #[test]
    fn test_unspecified_path_length_allowed_when_configured() {
        let validator = ChainTrustValidator::new(
            TrustPolicy::builder()
                .trusted_issuer_pattern("CN=RootCA")
                .allow_unspecified_path_length(true)
                .max_path_length(0)
                .build()
                .unwrap(),
        );
        let chain = CertificateChain::new(vec![
            leaf("CN=alice", "CN=IntermediateCA"),
            // no declared limit passes regardless of max_path_length
            ca("CN=IntermediateCA", "CN=RootCA", None),
        ]);

        assert!(validator.evaluate_at(&chain, now()).is_authenticated());
    }

    // ── trusted issuer ──

    #[test]
    fn test_missing_trusted_issuer_rejects() {
        let validator = ChainTrustValidator::new(policy("CN=OtherRoot"));
        let chain = two_cert_chain();

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(!evaluation.is_authenticated());
        assert!(evaluation.failures().is_empty());
        assert_eq!(
            evaluation.chain_errors(),
            &[ValidationError::MissingTrustedIssuer]
        );
    }

    #[test]
    fn test_trusted_issuer_match_is_full_string() {
        // "RootCA" occurs inside "CN=RootCA" but is not a full match
        let validator = ChainTrustValidator::new(policy("RootCA"));
        let chain = two_cert_chain();

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(!evaluation.is_authenticated());
        assert_eq!(
            evaluation.chain_errors(),
            &[ValidationError::MissingTrustedIssuer]
        );
    }

    #[test]
    fn test_trusted_issuer_on_failing_certificate_does_not_count() {
        // only the expired CA certificate carries the trusted issuer; its
        // issuer DN must not establish trust
        let validator = ChainTrustValidator::new(policy("CN=RootCA"));
        let chain = CertificateChain::new(vec![
            leaf("CN=alice", "CN=IntermediateCA"),
            Certificate::ca("CN=IntermediateCA", "CN=RootCA", expired_window(), Some(0)),
        ]);

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(!evaluation.is_authenticated());
        assert_eq!(evaluation.failures()[0].error, ValidationError::Expired);
        assert_eq!(
            evaluation.chain_errors(),
            &[ValidationError::MissingTrustedIssuer]
        );
    }

    // ── subject pattern ──

    #[test]
    fn test_subject_pattern_restricts_end_entity() {
        let validator = ChainTrustValidator::new(
            TrustPolicy::builder()
                .trusted_issuer_pattern("CN=RootCA")
                .subject_pattern("CN=alice")
                .build()
                .unwrap(),
        );

        let good = two_cert_chain();
        assert!(validator.evaluate_at(&good, now()).is_authenticated());

        let bad = CertificateChain::new(vec![
            leaf("CN=mallory", "CN=IntermediateCA"),
            ca("CN=IntermediateCA", "CN=RootCA", Some(0)),
        ]);
        let evaluation = validator.evaluate_at(&bad, now());
        assert!(!evaluation.is_authenticated());
        assert_eq!(
            evaluation.failures()[0].error,
            ValidationError::subject_not_allowed("CN=mallory", "CN=alice")
        );
    }

    #[test]
    fn test_subject_pattern_not_applied_to_ca_certificates() {
        // the CA subject does not match the subject pattern; only the
        // end-entity certificate is held to it
        let validator = ChainTrustValidator::new(
            TrustPolicy::builder()
                .trusted_issuer_pattern("CN=RootCA")
                .subject_pattern("CN=alice")
                .build()
                .unwrap(),
        );
        assert!(validator.evaluate_at(&two_cert_chain(), now()).is_authenticated());
    }

    // ── key usage ──

    fn key_usage_policy(require: bool) -> TrustPolicy {
        TrustPolicy::builder()
            .trusted_issuer_pattern("CN=RootCA")
            .check_key_usage(true)
            .require_key_usage(require)
            .build()
            .unwrap()
    }

    fn chain_with_leaf(cert: Certificate) -> CertificateChain {
        CertificateChain::new(vec![cert, ca("CN=IntermediateCA", "CN=RootCA", Some(0))])
    }

    #[test]
    fn test_key_usage_absent_required_rejects() {
        let validator = ChainTrustValidator::new(key_usage_policy(true));
        let chain = chain_with_leaf(leaf("CN=alice", "CN=IntermediateCA"));

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(!evaluation.is_authenticated());
        assert_eq!(
            evaluation.failures()[0].error,
            ValidationError::KeyUsageForbidden
        );
    }

    #[test]
    fn test_key_usage_absent_not_required_passes() {
        let validator = ChainTrustValidator::new(key_usage_policy(false));
        let chain = chain_with_leaf(leaf("CN=alice", "CN=IntermediateCA"));
        assert!(validator.evaluate_at(&chain, now()).is_authenticated());
    }

    #[test]
    fn test_key_usage_critical_without_digital_signature_rejects() {
        // critical extension with digitalSignature = false fails even when
        // the policy does not require key usage
        let validator = ChainTrustValidator::new(key_usage_policy(false));
        let cert = leaf("CN=alice", "CN=IntermediateCA")
            .with_key_usage(KeyUsage::new(KeyUsage::KEY_ENCIPHERMENT))
            .with_critical_extension(KEY_USAGE);

        let chain = chain_with_leaf(cert);
        let evaluation = validator.evaluate_at(&chain, now());
        assert!(!evaluation.is_authenticated());
        assert_eq!(
            evaluation.failures()[0].error,
            ValidationError::KeyUsageForbidden
        );
    }

    #[test]
    fn test_key_usage_critical_with_digital_signature_passes() {
        let validator = ChainTrustValidator::new(key_usage_policy(false));
        let cert = leaf("CN=alice", "CN=IntermediateCA")
            .with_key_usage(KeyUsage::new(KeyUsage::DIGITAL_SIGNATURE))
            .with_critical_extension(KEY_USAGE);

        assert!(validator.evaluate_at(&chain_with_leaf(cert), now()).is_authenticated());
    }

    #[test]
    fn test_key_usage_noncritical_not_required_is_informational() {
        // present but neither critical nor required: passes even without the
        // digitalSignature bit
        let validator = ChainTrustValidator::new(key_usage_policy(false));
        let cert = leaf("CN=alice", "CN=IntermediateCA")
            .with_key_usage(KeyUsage::new(KeyUsage::KEY_ENCIPHERMENT));

        assert!(validator.evaluate_at(&chain_with_leaf(cert), now()).is_authenticated());
    }

    #[test]
    fn test_key_usage_required_without_digital_signature_rejects() {
        let validator = ChainTrustValidator::new(key_usage_policy(true));
        let cert = leaf("CN=alice", "CN=IntermediateCA")
            .with_key_usage(KeyUsage::new(KeyUsage::KEY_ENCIPHERMENT));

        let chain = chain_with_leaf(cert);
        let evaluation = validator.evaluate_at(&chain, now());
        assert!(!evaluation.is_authenticated());
    }

    #[test]
    fn test_key_usage_not_checked_when_disabled() {
        // check_key_usage = false ignores the extension entirely
        let validator = ChainTrustValidator::new(policy("CN=RootCA"));
        let cert = leaf("CN=alice", "CN=IntermediateCA")
            .with_key_usage(KeyUsage::new(KeyUsage::KEY_ENCIPHERMENT))
            .with_critical_extension(KEY_USAGE);

        assert!(validator.evaluate_at(&chain_with_leaf(cert), now()).is_authenticated());
    }

    // ── revocation ──

    #[test]
    fn test_revoked_certificate_rejects_chain() {
        let checker = crate::revocation::DenyListRevocationChecker::new().deny("CN=alice");
        let validator =
            ChainTrustValidator::with_revocation_checker(policy("CN=RootCA"), Box::new(checker));
        let chain = two_cert_chain();

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(!evaluation.is_authenticated());
        assert_eq!(
            evaluation.failures()[0].error,
            ValidationError::Revocation(RevocationError::Revoked)
        );
    }

    // ── leaf selection ──

    #[test]
    fn test_lowest_index_end_entity_wins() {
        // two end-entity-shaped certificates: the one processed last in the
        // fixed iteration order (index 0) prevails
        let validator = ChainTrustValidator::new(policy("CN=RootCA"));
        let chain = CertificateChain::new(vec![
            leaf("CN=alice", "CN=RootCA"),
            leaf("CN=bob", "CN=RootCA"),
        ]);

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(evaluation.is_authenticated());
        assert_eq!(evaluation.leaf().unwrap().subject, "CN=alice");
    }

    #[test]
    fn test_chain_of_only_ca_certificates_rejects() {
        let validator = ChainTrustValidator::new(policy("CN=RootCA"));
        let chain = CertificateChain::new(vec![
            ca("CN=IntermediateCA", "CN=RootCA", Some(0)),
            ca("CN=RootCA", "CN=RootCA", Some(1)),
        ]);

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(!evaluation.is_authenticated());
        assert_eq!(
            evaluation.chain_errors(),
            &[ValidationError::NoEndEntityCertificate]
        );
    }

    #[test]
    fn test_empty_chain_rejects_with_both_diagnostics() {
        let validator = ChainTrustValidator::new(policy("CN=RootCA"));
        let chain = CertificateChain::new(vec![]);

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(!evaluation.is_authenticated());
        assert_eq!(
            evaluation.chain_errors(),
            &[
                ValidationError::MissingTrustedIssuer,
                ValidationError::NoEndEntityCertificate,
            ]
        );
    }

    // ── order independence ──

    #[test]
    fn test_decision_is_order_independent_for_single_leaf() {
        let validator = ChainTrustValidator::new(
            TrustPolicy::builder()
                .trusted_issuer_pattern("CN=RootCA")
                .max_path_length(2)
                .build()
                .unwrap(),
        );

        let forward = CertificateChain::new(vec![
            leaf("CN=alice", "CN=IntermediateCA"),
            ca("CN=IntermediateCA", "CN=RootCA", Some(0)),
            ca("CN=RootCA", "CN=RootCA", Some(1)),
        ]);
        let shuffled = CertificateChain::new(vec![
            ca("CN=RootCA", "CN=RootCA", Some(1)),
            leaf("CN=alice", "CN=IntermediateCA"),
            ca("CN=IntermediateCA", "CN=RootCA", Some(0)),
        ]);

        assert!(validator.evaluate_at(&forward, now()).is_authenticated());
        assert!(validator.evaluate_at(&shuffled, now()).is_authenticated());
    }

    // ── failure accumulation ──

    #[test]
    fn test_all_failures_are_collected() {
        init_logs();
        // every certificate fails: the loop must visit them all
        let validator = ChainTrustValidator::new(policy("CN=RootCA"));
        let chain = CertificateChain::new(vec![
            Certificate::end_entity("CN=alice", "CN=IntermediateCA", expired_window()),
            ca("CN=IntermediateCA", "CN=RootCA", Some(5)),
            Certificate::ca("CN=RootCA", "CN=RootCA", future_window(), Some(1)),
        ]);

        let evaluation = validator.evaluate_at(&chain, now());
        assert!(!evaluation.is_authenticated());
        assert_eq!(evaluation.failures().len(), 3);
        // recorded in processing order, last index first
        assert_eq!(evaluation.failures()[0].index, 2);
        assert_eq!(evaluation.failures()[1].index, 1);
        assert_eq!(evaluation.failures()[2].index, 0);
    }
}
