//! Repositories backing project and credential state.

mod credential;
mod project;

pub use credential::{CredentialRepository, SqlxCredentialRepository};
pub use project::{NewProject, ProjectRepository, SqlxProjectRepository};
