/*
[INPUT]:  Owner identity, bearer credentials, task mutation bodies
[OUTPUT]: Typed task-store responses
[POS]:    HTTP layer - task endpoints (all require bearer auth)
[UPDATE]: When adding new task endpoints or changing the wire format
*/

use crate::auth::Credential;
use crate::http::client::error_payload;
use crate::http::{KaizenClient, Result, TaskStoreError};
use crate::store::TaskStore;
use crate::types::{NewTaskRequest, Task, TaskId};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};

impl KaizenClient {
    /// Fetch all tasks for an owner
    ///
    /// GET /tasks/{user_email}
    pub async fn get_tasks(&self, owner_email: &str, credential: &Credential) -> Result<Vec<Task>> {
        let endpoint = format!("/tasks/{}", owner_email.to_lowercase());
        tracing::debug!(%endpoint, "fetching tasks");
        let builder = self.request_with_bearer(Method::GET, &endpoint, credential)?;
        self.send_json(builder).await
    }

    /// Create a task
    ///
    /// POST /tasks/create
    pub async fn post_task(&self, request: &NewTaskRequest, credential: &Credential) -> Result<Task> {
        tracing::debug!(title = %request.title, "creating task");
        let builder = self.request_with_bearer(Method::POST, "/tasks/create", credential)?;
        let builder = builder.json(request);
        self.send_json(builder).await
    }

    /// Delete a task by id
    ///
    /// DELETE /tasks/delete/{task_id}
    pub async fn remove_task(&self, task_id: TaskId, credential: &Credential) -> Result<()> {
        let endpoint = format!("/tasks/delete/{task_id}");
        tracing::debug!(task_id, "deleting task");
        let builder = self.request_with_bearer(Method::DELETE, &endpoint, credential)?;

        let response = builder.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TaskStoreError::NotFound { task_id });
        }
        if !status.is_success() {
            return Err(TaskStoreError::from_status(
                status,
                error_payload(response).await,
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskStore for KaizenClient {
    async fn fetch_tasks(&self, owner_email: &str, credential: &Credential) -> Result<Vec<Task>> {
        self.get_tasks(owner_email, credential).await
    }

    async fn create_task(
        &self,
        request: &NewTaskRequest,
        credential: &Credential,
    ) -> Result<Task> {
        self.post_task(request, credential).await
    }

    async fn delete_task(&self, task_id: TaskId, credential: &Credential) -> Result<()> {
        self.remove_task(task_id, credential).await
    }
}
