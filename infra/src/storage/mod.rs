//! Local persistence for the session credential.

mod credential_file;

pub use credential_file::FileCredentialStore;
