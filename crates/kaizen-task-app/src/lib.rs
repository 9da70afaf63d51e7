/*
[INPUT]:  Public API exports for kaizen-task-app crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod coordinator;
pub mod list;
pub mod timer;

// Re-export main types for convenience
pub use config::AppConfig;
pub use coordinator::{Coordinator, Notification};
pub use list::{NewTaskInput, TaskListModel};
pub use timer::{TimerEngine, TimerEvent, TimerState};
