/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for kaizen-task-client tests

use kaizen_task_client::Credential;
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Mock bearer credential for testing
pub fn test_credential() -> Credential {
    Credential {
        token: "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test.signature".to_string(),
        owner_email: "kai.zen@gmail.com".to_string(),
    }
}

/// A task body as the store would serve it
#[allow(dead_code)]
pub fn task_json(task_id: i64, date: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "task_id": task_id,
        "user_email": "kai.zen@gmail.com",
        "title": format!("Task {task_id}"),
        "description": "A task from the mock store",
        "checked": false,
        "date": date,
        "duration": 25,
        "priority": 1,
    })
}
