/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Kaizen task-store client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod store;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{Credential, CredentialSource, StaticCredentials};

// Re-export commonly used types from http
pub use http::{ClientConfig, KaizenClient, Result, TaskStoreError};

// Re-export the store seam
pub use store::TaskStore;

// Re-export all types
pub use types::*;
