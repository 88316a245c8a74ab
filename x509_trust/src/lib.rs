// Copyright (c) 2026 The x509_trust Authors
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Trust-policy evaluation for client X.509 certificate chains.
//!
//! This crate decides whether a client-presented certificate chain satisfies a
//! deployer-configured authentication policy and, if so, which certificate in
//! the chain is the authenticated end-entity. The chain is assumed to be
//! already parsed and cryptographically path-validated by the transport layer;
//! this crate evaluates policy predicates only:
//!
//! - validity window (not-before / not-after)
//! - revocation status via a pluggable [`RevocationChecker`]
//! - subject DN pattern for the end-entity certificate
//! - Key Usage digitalSignature bit, honoring extension criticality
//! - path-length constraints for CA certificates
//! - trusted-issuer DN pattern anywhere in the chain
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, SystemTime};
//! use x509_trust::{Certificate, CertificateChain, ChainTrustValidator, TrustPolicy, Validity};
//!
//! # fn main() -> Result<(), x509_trust::PolicyError> {
//! let policy = TrustPolicy::new("CN=RootCA")?;
//! let validator = ChainTrustValidator::new(policy);
//!
//! let now = SystemTime::now();
//! let validity = Validity::new(now - Duration::from_secs(60), now + Duration::from_secs(3600));
//! let leaf = Certificate::end_entity("CN=alice", "CN=IntermediateCA", validity);
//! let ca = Certificate::ca("CN=IntermediateCA", "CN=RootCA", validity, Some(0));
//! let chain = CertificateChain::new(vec![leaf, ca]);
//!
//! let evaluation = validator.evaluate(&chain);
//! assert!(evaluation.is_authenticated());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod certificate;
pub mod chain;
pub mod error;
pub mod policy;
pub mod revocation;
pub mod time;
pub mod validator;

pub use certificate::{BasicConstraints, Certificate, KeyUsage, KEY_USAGE};
pub use chain::CertificateChain;
pub use error::{PolicyError, Result, RevocationError, ValidationError};
pub use policy::{DnPattern, TrustPolicy, TrustPolicyBuilder};
pub use revocation::{DenyListRevocationChecker, NoOpRevocationChecker, RevocationChecker};
pub use time::Validity;
pub use validator::{ChainTrustValidator, Evaluation, Failure, Outcome};

/// Re-export of commonly used types
pub mod prelude {
    pub use crate::revocation::{NoOpRevocationChecker, RevocationChecker};
    pub use crate::{
        Certificate, CertificateChain, ChainTrustValidator, Outcome, TrustPolicy, ValidationError,
    };
}
