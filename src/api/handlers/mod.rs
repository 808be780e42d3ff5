//! HTTP request handlers for the administrative and internal surfaces.

pub mod credentials;
pub mod projects;
pub mod worker;

pub use credentials::{
    issue_credential_handler, list_credentials_handler, revoke_credential_handler,
};
pub use projects::{
    create_project_handler, delete_project_handler, get_project_handler, list_projects_handler,
    update_project_handler,
};
pub use worker::{worker_config_handler, WORKER_SECRET_HEADER};
