/*
[INPUT]:  Type submodules (models, requests)
[OUTPUT]: Public type re-exports
[POS]:    Type layer - module wiring
[UPDATE]: When adding new type modules
*/

pub mod models;
pub mod requests;

pub use models::{Task, TaskId};
pub use requests::NewTaskRequest;
