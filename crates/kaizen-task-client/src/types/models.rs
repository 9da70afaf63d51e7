/*
[INPUT]:  Task-store JSON payloads
[OUTPUT]: Typed task model shared across the workspace
[POS]:    Type layer - wire schema for the external task store
[UPDATE]: When the store schema changes
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned task identifier
pub type TaskId = i64;

/// A single task as persisted by the external store.
///
/// Field names on the wire follow the store schema
/// (`task_id`, `user_email`, `checked`, `date`, `duration`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "task_id")]
    pub id: TaskId,
    #[serde(rename = "user_email")]
    pub owner_email: String,
    pub title: String,
    pub description: String,
    /// Client-visible completion flag; never independently persisted
    #[serde(rename = "checked")]
    pub completed: bool,
    #[serde(rename = "date")]
    pub due_date: Option<DateTime<Utc>>,
    /// Estimated duration in minutes; absent means no estimate
    #[serde(rename = "duration")]
    pub duration_minutes: Option<u32>,
    /// Absent or zero means unset (distinct from priority 1)
    pub priority: Option<u32>,
    /// Derived at refresh time, never serialized
    #[serde(skip)]
    pub is_late: bool,
}

impl Task {
    /// Recompute the derived lateness flag against the given instant
    pub fn mark_lateness(&mut self, now: DateTime<Utc>) {
        self.is_late = self.due_date.is_some_and(|due| due < now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    fn sample_task(due_date: Option<DateTime<Utc>>) -> Task {
        Task {
            id: 1,
            owner_email: "kai.zen@gmail.com".to_string(),
            title: "Write report".to_string(),
            description: "Quarterly status report".to_string(),
            completed: false,
            due_date,
            duration_minutes: Some(25),
            priority: Some(1),
            is_late: false,
        }
    }

    #[rstest]
    #[case(Some(Duration::days(-1)), true)]
    #[case(Some(Duration::seconds(-1)), true)]
    #[case(Some(Duration::days(1)), false)]
    #[case(None, false)]
    fn test_lateness(#[case] offset: Option<Duration>, #[case] expected: bool) {
        let now = Utc::now();
        let mut task = sample_task(offset.map(|delta| now + delta));
        task.mark_lateness(now);
        assert_eq!(task.is_late, expected);
    }

    #[test]
    fn test_wire_field_names() {
        let json = r#"{
            "task_id": 7,
            "user_email": "kai.zen@gmail.com",
            "title": "Water plants",
            "description": "The ones on the balcony",
            "checked": false,
            "date": null,
            "duration": 10,
            "priority": null
        }"#;

        let task: Task = serde_json::from_str(json).expect("task should deserialize");
        assert_eq!(task.id, 7);
        assert_eq!(task.duration_minutes, Some(10));
        assert_eq!(task.priority, None);
        assert!(!task.is_late);
    }
}
