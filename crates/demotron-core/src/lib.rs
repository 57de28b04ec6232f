//! Core contracts shared by the demotron crates.
//!
//! Holds the request and row types, the error taxonomy, the configurable
//! defaults, and the credential provider seam.

pub mod config;
pub mod credentials;
pub mod error;
pub mod model;

pub use config::{
    AppendDefaults, DEFAULT_CREDENTIALS_ENV, DemoDefaults, RenameDefaults, load_defaults,
};
pub use credentials::{CredentialProvider, EnvCredentialProvider, Session, session_from_json};
pub use error::{DemoError, RemoteError, RemoteErrorKind, Result};
pub use model::{AppendRequest, RenameRequest, SyntheticEventRow, TableRef};
