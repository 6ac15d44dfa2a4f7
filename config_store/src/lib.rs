//! Read-only repository configuration store.
//!
//! - Model: repositories → apps → environments (account id, IAM roles,
//!   Terraform S3 backend), decoded from JSON once at startup.
//! - Lookup: exact, case-sensitive, first-match-wins path resolution.
//! - Sources: anything implementing [`PayloadSource`] (local file today).

mod decode;
pub mod errors;
pub mod model;
pub mod resolver;
pub mod source;
pub mod store;

pub use errors::{ConfigStoreError, Result};
pub use model::{
    App, Document, DocumentSummary, Environment, IamRole, Repository, S3Backend, TerraformBackend,
};
pub use resolver::{ConfigPath, Resolution, resolve};
pub use source::{FileSource, MemorySource, PayloadSource};
pub use store::ConfigStore;
