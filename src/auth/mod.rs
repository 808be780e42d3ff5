//! Credential hashing and worker endpoint authentication.

pub mod hashing;
pub mod worker_gate;

pub use hashing::CredentialHasher;
pub use worker_gate::WorkerAuthGate;
