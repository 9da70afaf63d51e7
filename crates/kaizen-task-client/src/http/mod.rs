/*
[INPUT]:  HTTP client configuration and task-store endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST communication with the task store
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod tasks;

pub use error::{Result, TaskStoreError};

pub use client::{ClientConfig, KaizenClient};
