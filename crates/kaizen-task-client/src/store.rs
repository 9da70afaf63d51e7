/*
[INPUT]:  Owner identity, credentials, and task mutations
[OUTPUT]: Object-safe seam over the external task store
[POS]:    Store seam - lets the app crate substitute an in-memory store in tests
[UPDATE]: When store operations change
*/

use crate::auth::Credential;
use crate::http::Result;
use crate::types::{NewTaskRequest, Task, TaskId};
use async_trait::async_trait;

/// Request/response access to the external task store.
///
/// Implementations hold no state beyond the in-flight call.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Fetch the full task set for an owner
    async fn fetch_tasks(&self, owner_email: &str, credential: &Credential) -> Result<Vec<Task>>;

    /// Create a task and return the store's view of it
    async fn create_task(&self, request: &NewTaskRequest, credential: &Credential)
    -> Result<Task>;

    /// Delete a task by id
    async fn delete_task(&self, task_id: TaskId, credential: &Credential) -> Result<()>;
}
