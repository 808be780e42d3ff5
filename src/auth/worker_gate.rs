//! Authentication for the internal worker configuration endpoint.
//!
//! Workers share a single static secret with the control plane, injected
//! from configuration at startup. There is no per-worker identity;
//! rotating the secret means redeploying both sides.

use ring::constant_time::verify_slices_are_equal;

/// Validates the `x-worker-secret` header before a snapshot is released.
#[derive(Clone)]
pub struct WorkerAuthGate {
    shared_secret: String,
}

impl WorkerAuthGate {
    pub fn new(shared_secret: impl Into<String>) -> Self {
        Self { shared_secret: shared_secret.into() }
    }

    /// Compare the presented value against the configured secret in
    /// constant time. Callers map `false` to 401 without distinguishing
    /// a missing header from a mismatched one.
    pub fn authenticate(&self, presented: &str) -> bool {
        verify_slices_are_equal(self.shared_secret.as_bytes(), presented.as_bytes()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exact_match_only() {
        let gate = WorkerAuthGate::new("correct-horse-battery-staple");

        assert!(gate.authenticate("correct-horse-battery-staple"));
        assert!(!gate.authenticate("correct-horse-battery-stapl"));
        assert!(!gate.authenticate("correct-horse-battery-staple "));
        assert!(!gate.authenticate(""));
    }

    #[test]
    fn rejects_prefix_and_suffix_probes() {
        let gate = WorkerAuthGate::new("s3cr3t");
        assert!(!gate.authenticate("s3cr3t-extra"));
        assert!(!gate.authenticate("s3c"));
    }
}
