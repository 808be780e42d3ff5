//! Domain model for the control plane: typed identifiers, secret/hash
//! separation, and the project, credential, and snapshot records.

mod id;
mod model;
mod secret;

pub use id::{CredentialId, ProjectId};
pub use model::{Credential, Project, WorkerConfigEntry, WorkerConfigSnapshot};
pub use secret::{RawSecret, SecretHash};
