// Copyright (c) 2026 The x509_trust Authors
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Validity window handling.
//!
//! Certificates arrive already parsed, so the validity period is modeled
//! directly as a pair of `SystemTime` instants. The evaluator compares
//! against an explicit evaluation instant, which keeps the time source a
//! seam for tests.

use std::time::SystemTime;

/// A certificate validity window. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validity {
    /// Start of the validity period (notBefore)
    pub not_before: SystemTime,

    /// End of the validity period (notAfter)
    pub not_after: SystemTime,
}

impl Validity {
    /// Create a new validity window
    pub fn new(not_before: SystemTime, not_after: SystemTime) -> Self {
        Self {
            not_before,
            not_after,
        }
    }

    /// Whether notBefore does not come after notAfter
    pub fn is_well_formed(&self) -> bool {
        self.not_before <= self.not_after
    }

    /// Whether `at` falls inside the window, bounds included
    pub fn is_valid_at(&self, at: SystemTime) -> bool {
        self.not_before <= at && at <= self.not_after
    }
}
