/*
[INPUT]:  Form input, task-store responses, refresh timestamps
[OUTPUT]: Authoritative owner-scoped task snapshot with derived lateness
[POS]:    List model - validation and full-reload reconciliation
[UPDATE]: When validation rules or reconciliation strategy change
*/

use chrono::{DateTime, Utc};
use kaizen_task_client::{
    Credential, NewTaskRequest, Result, Task, TaskId, TaskStore, TaskStoreError,
};

const TITLE_MIN_CHARS: usize = 2;
const TITLE_MAX_CHARS: usize = 50;
const DESCRIPTION_MIN_CHARS: usize = 2;
const DEFAULT_PRIORITY: u32 = 1;

/// Raw form input for a new task. Duration arrives as the string the
/// user typed; validation turns it into a positive integer.
#[derive(Debug, Clone, Default)]
pub struct NewTaskInput {
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub duration_minutes: Option<String>,
    pub priority: Option<u32>,
}

impl NewTaskInput {
    /// Client-side validation, performed before any network call.
    ///
    /// Priority defaults to 1 when absent; duration and due date stay
    /// unset when absent.
    pub fn validate(&self, owner_email: &str) -> Result<NewTaskRequest> {
        let title = self.title.trim();
        let title_chars = title.chars().count();
        if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&title_chars) {
            return Err(TaskStoreError::Validation(format!(
                "title must be {TITLE_MIN_CHARS}-{TITLE_MAX_CHARS} characters"
            )));
        }

        let description = self.description.trim();
        if description.chars().count() < DESCRIPTION_MIN_CHARS {
            return Err(TaskStoreError::Validation(format!(
                "description must be at least {DESCRIPTION_MIN_CHARS} characters"
            )));
        }

        let duration = match self.duration_minutes.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<u32>() {
                Ok(minutes) if minutes > 0 => Some(minutes),
                _ => {
                    return Err(TaskStoreError::Validation(
                        "duration must be a positive whole number of minutes".to_string(),
                    ));
                }
            },
        };

        Ok(NewTaskRequest {
            user_email: owner_email.to_lowercase(),
            title: title.to_string(),
            description: description.to_string(),
            date: self.due_date,
            duration,
            priority: Some(self.priority.unwrap_or(DEFAULT_PRIORITY)),
        })
    }
}

/// Authoritative local snapshot of the owner's tasks.
///
/// Reconciliation is always a full re-fetch; the snapshot never diverges
/// from the store after a mutation completes. Lateness is recomputed on
/// every refresh against wall-clock now and never stored.
#[derive(Debug, Default)]
pub struct TaskListModel {
    tasks: Vec<Task>,
}

impl TaskListModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, in server order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task in the snapshot by id
    pub fn get(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Replace the snapshot with the store's full task set and
    /// recompute per-task lateness
    pub async fn refresh(&mut self, store: &dyn TaskStore, credential: &Credential) -> Result<()> {
        let tasks = store
            .fetch_tasks(&credential.owner_email, credential)
            .await?;
        self.replace_snapshot(tasks, Utc::now());
        tracing::debug!(task_count = self.tasks.len(), "task list refreshed");
        Ok(())
    }

    /// Validate and create a task, then reconcile with a full refresh
    pub async fn create(
        &mut self,
        input: &NewTaskInput,
        store: &dyn TaskStore,
        credential: &Credential,
    ) -> Result<Task> {
        let request = input.validate(&credential.owner_email)?;
        let created = store.create_task(&request, credential).await?;
        self.refresh(store, credential).await?;
        Ok(created)
    }

    /// Delete a task by id, then reconcile with a full refresh.
    /// On failure the snapshot is left untouched.
    pub async fn remove(
        &mut self,
        task_id: TaskId,
        store: &dyn TaskStore,
        credential: &Credential,
    ) -> Result<()> {
        store.delete_task(task_id, credential).await?;
        self.refresh(store, credential).await
    }

    fn replace_snapshot(&mut self, mut tasks: Vec<Task>, now: DateTime<Utc>) {
        for task in &mut tasks {
            task.mark_lateness(now);
        }
        self.tasks = tasks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    fn input(title: &str, description: &str) -> NewTaskInput {
        NewTaskInput {
            title: title.to_string(),
            description: description.to_string(),
            ..NewTaskInput::default()
        }
    }

    #[rstest]
    #[case("a", "long enough description")]
    #[case("", "long enough description")]
    #[case(&"x".repeat(51), "long enough description")]
    #[case("fine title", "d")]
    #[case("fine title", "")]
    fn test_rejected_inputs(#[case] title: &str, #[case] description: &str) {
        let err = input(title, description)
            .validate("kai.zen@gmail.com")
            .expect_err("expected validation failure");
        assert!(err.is_validation());
    }

    #[rstest]
    #[case("ok", "ok")]
    #[case(&"x".repeat(50), "a fuller description")]
    fn test_accepted_inputs(#[case] title: &str, #[case] description: &str) {
        let request = input(title, description)
            .validate("kai.zen@gmail.com")
            .expect("expected valid input");
        assert_eq!(request.priority, Some(1));
        assert_eq!(request.duration, None);
        assert_eq!(request.date, None);
    }

    #[rstest]
    #[case("25", Some(25))]
    #[case(" 90 ", Some(90))]
    #[case("", None)]
    fn test_duration_parsing(#[case] raw: &str, #[case] expected: Option<u32>) {
        let mut task_input = input("fine title", "fine description");
        task_input.duration_minutes = Some(raw.to_string());
        let request = task_input
            .validate("kai.zen@gmail.com")
            .expect("expected valid input");
        assert_eq!(request.duration, expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-5")]
    #[case("soon")]
    #[case("1.5")]
    fn test_invalid_durations(#[case] raw: &str) {
        let mut task_input = input("fine title", "fine description");
        task_input.duration_minutes = Some(raw.to_string());
        let err = task_input
            .validate("kai.zen@gmail.com")
            .expect_err("expected validation failure");
        assert!(err.is_validation());
    }

    #[test]
    fn test_explicit_priority_passes_through() {
        let mut task_input = input("fine title", "fine description");
        task_input.priority = Some(3);
        let request = task_input
            .validate("kai.zen@gmail.com")
            .expect("expected valid input");
        assert_eq!(request.priority, Some(3));
    }

    #[test]
    fn test_owner_email_lowercased() {
        let request = input("fine title", "fine description")
            .validate("Kai.Zen@Gmail.com")
            .expect("expected valid input");
        assert_eq!(request.user_email, "kai.zen@gmail.com");
    }

    fn snapshot_task(id: TaskId, due_date: Option<DateTime<Utc>>) -> Task {
        Task {
            id,
            owner_email: "kai.zen@gmail.com".to_string(),
            title: format!("Task {id}"),
            description: "snapshot fixture".to_string(),
            completed: false,
            due_date,
            duration_minutes: None,
            priority: None,
            is_late: false,
        }
    }

    #[test]
    fn test_snapshot_lateness() {
        let now = Utc::now();
        let mut model = TaskListModel::new();
        model.replace_snapshot(
            vec![
                snapshot_task(1, Some(now - Duration::days(1))),
                snapshot_task(2, Some(now + Duration::days(1))),
                snapshot_task(3, None),
            ],
            now,
        );

        assert!(model.get(1).expect("task 1").is_late);
        assert!(!model.get(2).expect("task 2").is_late);
        assert!(!model.get(3).expect("task 3").is_late);
    }

    #[test]
    fn test_snapshot_is_fully_replaced() {
        let now = Utc::now();
        let mut model = TaskListModel::new();
        model.replace_snapshot(vec![snapshot_task(1, None), snapshot_task(2, None)], now);
        model.replace_snapshot(vec![snapshot_task(3, None)], now);

        assert_eq!(model.tasks().len(), 1);
        assert!(model.get(1).is_none());
        assert!(model.get(3).is_some());
    }
}
