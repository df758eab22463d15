//! Follow-up tasks derived from open leads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pipeline::Priority;

/// Maximum tasks returned by `GET /dashboard/upcoming_tasks`.
pub const FOLLOW_UP_TASK_LIMIT: u64 = 5;

/// A task shown in the dashboard's upcoming list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingTask {
    /// Lead ID.
    pub id: Uuid,
    /// Human readable task.
    pub task: String,
    /// Capitalized lead priority.
    pub priority: String,
    /// `Today` or `This week`.
    pub due_date: String,
    /// Always `follow_up`.
    #[serde(rename = "type")]
    pub task_type: String,
}

impl UpcomingTask {
    /// Builds the follow-up task for a lead.
    #[must_use]
    pub fn follow_up(
        lead_id: Uuid,
        company_name: &str,
        priority: Priority,
        created_at: DateTime<Utc>,
        today: NaiveDate,
    ) -> Self {
        Self {
            id: lead_id,
            task: format!("Follow up with {company_name}"),
            priority: priority.title().to_string(),
            due_date: due_label(created_at.date_naive(), today).to_string(),
            task_type: "follow_up".to_string(),
        }
    }
}

/// Due label for a lead created on `created`.
#[must_use]
pub fn due_label(created: NaiveDate, today: NaiveDate) -> &'static str {
    if created == today {
        "Today"
    } else {
        "This week"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_follow_up_created_today() {
        let created = Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap();
        let lead_id = Uuid::new_v4();

        let task = UpcomingTask::follow_up(
            lead_id,
            "Acme Robotics",
            Priority::High,
            created,
            created.date_naive(),
        );

        assert_eq!(task.id, lead_id);
        assert_eq!(task.task, "Follow up with Acme Robotics");
        assert_eq!(task.priority, "High");
        assert_eq!(task.due_date, "Today");
        assert_eq!(task.task_type, "follow_up");
    }

    #[test]
    fn test_follow_up_created_earlier() {
        let created = Utc.with_ymd_and_hms(2026, 5, 1, 9, 30, 0).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();

        let task =
            UpcomingTask::follow_up(Uuid::new_v4(), "Nimbus", Priority::Medium, created, today);

        assert_eq!(task.due_date, "This week");
        assert_eq!(task.priority, "Medium");
    }

    #[test]
    fn test_serializes_type_field() {
        let task = UpcomingTask::follow_up(
            Uuid::nil(),
            "Nimbus",
            Priority::Low,
            Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        );
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["type"], "follow_up");
        assert!(value.get("task_type").is_none());
    }
}
