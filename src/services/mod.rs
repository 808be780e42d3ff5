//! Business logic sitting between the API surface and the repositories.

mod credential;
mod project;
mod snapshot;

pub use credential::CredentialService;
pub use project::ProjectService;
pub use snapshot::SnapshotService;
