/*
[INPUT]:  User intents (add, delete, start/stop timer, mark complete)
[OUTPUT]: List-model and timer-engine calls plus user-facing notifications
[POS]:    Coordinator - orchestrates the list model, timer engine, and store
[UPDATE]: When adding user actions or changing notification wording
*/

use crate::list::{NewTaskInput, TaskListModel};
use crate::timer::{TimerEngine, TimerEvent, TimerState};
use kaizen_task_client::{Credential, CredentialSource, Task, TaskId, TaskStore};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Human-readable outcome surfaced to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Info(String),
    Error(String),
    /// One-time alert on the Running -> Finished transition
    TimerFinished { task_id: TaskId },
}

/// Wires user actions to the list model and timer engine.
///
/// Every store error is converted to an Error notification and swallowed
/// here; no failure is fatal and nothing is retried automatically.
/// Credentials are read fresh from the source on each action.
pub struct Coordinator {
    store: Arc<dyn TaskStore>,
    credentials: Arc<dyn CredentialSource>,
    model: TaskListModel,
    timer: TimerEngine,
    notifications: mpsc::UnboundedSender<Notification>,
}

impl Coordinator {
    pub fn new(
        store: Arc<dyn TaskStore>,
        credentials: Arc<dyn CredentialSource>,
    ) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (notifications, receiver) = mpsc::unbounded_channel();
        let (timer, mut timer_events) = TimerEngine::new();

        // Timer finished alerts ride the same notification stream as
        // action outcomes; the engine emits each one exactly once
        let forward = notifications.clone();
        tokio::spawn(async move {
            while let Some(TimerEvent::Finished { task_id }) = timer_events.recv().await {
                let _ = forward.send(Notification::TimerFinished { task_id });
            }
        });

        (
            Self {
                store,
                credentials,
                model: TaskListModel::new(),
                timer,
                notifications,
            },
            receiver,
        )
    }

    /// Current task snapshot, in server order
    pub fn tasks(&self) -> &[Task] {
        self.model.tasks()
    }

    /// Current countdown state for display
    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    /// Reload the snapshot from the store
    pub async fn refresh(&mut self) {
        let Some(credential) = self.credential() else {
            return;
        };
        if let Err(err) = self.model.refresh(self.store.as_ref(), &credential).await {
            self.notify_error(err.to_string());
        }
    }

    /// Validate and create a task, then reconcile with the store.
    ///
    /// The reconciling refresh runs even when the create call failed,
    /// so the snapshot reflects whatever the store actually holds. Only
    /// validation failures skip it: they never reached the network, so
    /// there is nothing to reconcile.
    pub async fn add_task(&mut self, input: NewTaskInput) {
        let Some(credential) = self.credential() else {
            return;
        };
        match self
            .model
            .create(&input, self.store.as_ref(), &credential)
            .await
        {
            Ok(task) => self.notify_info(format!("added \"{}\"", task.title)),
            Err(err) => {
                let reconcile = !err.is_validation();
                self.notify_error(err.to_string());
                if reconcile {
                    let _ = self.model.refresh(self.store.as_ref(), &credential).await;
                }
            }
        }
    }

    /// Delete a task; the model reconciles on success
    pub async fn delete_task(&mut self, task_id: TaskId) {
        let Some(credential) = self.credential() else {
            return;
        };
        match self
            .model
            .remove(task_id, self.store.as_ref(), &credential)
            .await
        {
            Ok(()) => self.notify_info(format!("deleted task {task_id}")),
            Err(err) => self.notify_error(err.to_string()),
        }
    }

    /// Start a countdown against a task's duration estimate
    pub fn start_timer(&mut self, task_id: TaskId) {
        let Some(task) = self.model.get(task_id) else {
            self.notify_error(format!("task {task_id} is not in the current list"));
            return;
        };
        let Some(duration_minutes) = task.duration_minutes else {
            self.notify_error(format!("task {task_id} has no duration estimate"));
            return;
        };
        self.timer.start(task_id, duration_minutes);
    }

    /// Stop and dismiss the countdown, running or finished
    pub fn stop_timer(&mut self) {
        self.timer.stop();
    }

    /// Mark the timed task complete: stop the countdown, then delete the
    /// bound task. A finished timer never completes a task on its own;
    /// this is the explicit user action.
    pub async fn complete_timed_task(&mut self) {
        let Some(task_id) = self.timer.state().task_id() else {
            self.notify_error("no timer is bound to a task".to_string());
            return;
        };
        self.timer.stop();
        self.delete_task(task_id).await;
    }

    /// Read the credential fresh; missing credential short-circuits to an
    /// unauthorized notification without any network call
    fn credential(&self) -> Option<Credential> {
        let credential = self.credentials.current();
        if credential.is_none() {
            self.notify_error("unauthorized: no credential available".to_string());
        }
        credential
    }

    fn notify_info(&self, message: String) {
        tracing::info!(%message, "action succeeded");
        let _ = self.notifications.send(Notification::Info(message));
    }

    fn notify_error(&self, message: String) {
        tracing::warn!(%message, "action failed");
        let _ = self.notifications.send(Notification::Error(message));
    }
}
