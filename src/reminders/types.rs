//! Reminder types

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner stamped on reminders created without a user id
pub const DEFAULT_REMINDER_USER: &str = "current-user";

/// Reminder category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Assignment,
    Exam,
    Meeting,
    Deadline,
    #[default]
    General,
}

/// Reminder priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A dated reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reminder {
    /// Still open and due at or after `now`
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date >= now
    }

    /// Still open and past due at `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date < now
    }
}

/// Listing filter for GET /api/reminders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Upcoming,
    Overdue,
    Completed,
}

impl StatusFilter {
    pub fn matches(&self, reminder: &Reminder, now: DateTime<Utc>) -> bool {
        match self {
            StatusFilter::Upcoming => reminder.is_upcoming(now),
            StatusFilter::Overdue => reminder.is_overdue(now),
            StatusFilter::Completed => reminder.completed,
        }
    }
}

/// GET /api/reminders query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReminderQuery {
    pub status: Option<StatusFilter>,
}

/// POST /api/reminders request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default, rename = "type")]
    pub reminder_type: Option<ReminderType>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl CreateReminderRequest {
    /// Build a new open reminder, validating title and due date
    pub fn into_reminder(self, now: DateTime<Utc>) -> Result<Reminder> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Validation("Missing required fields".to_string()))?;
        let due_date = self
            .due_date
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| Error::Validation("Missing required fields".to_string()))?;

        Ok(Reminder {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: self
                .user_id
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_REMINDER_USER.to_string()),
            title,
            description: self.description.unwrap_or_default(),
            due_date: parse_due_date(&due_date)?,
            reminder_type: self.reminder_type.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            completed: false,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Reminder counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderStats {
    pub upcoming: usize,
    pub overdue: usize,
    pub completed: usize,
    pub total: usize,
}

/// Parse a due date given as RFC 3339, `YYYY-MM-DDTHH:MM` or `YYYY-MM-DD`
/// (the latter two read as UTC)
pub fn parse_due_date(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Ok(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }
    Err(Error::Validation(format!("Invalid due date: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_due_date_formats() {
        assert_eq!(parse_due_date("2024-10-10").unwrap(), ts(2024, 10, 10, 0));
        assert_eq!(parse_due_date("2024-10-10T14:00").unwrap(), ts(2024, 10, 10, 14));
        assert_eq!(
            parse_due_date("2024-10-10T16:00:00+02:00").unwrap(),
            ts(2024, 10, 10, 14)
        );
        assert!(matches!(parse_due_date("next week"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_into_reminder_defaults() {
        let req: CreateReminderRequest =
            serde_json::from_str(r#"{"title":"Read chapter 3","dueDate":"2024-11-01"}"#).unwrap();
        let now = ts(2024, 10, 20, 9);
        let reminder = req.into_reminder(now).unwrap();

        assert_eq!(reminder.reminder_type, ReminderType::General);
        assert_eq!(reminder.priority, Priority::Medium);
        assert_eq!(reminder.user_id, "current-user");
        assert_eq!(reminder.description, "");
        assert!(!reminder.completed);
        assert_eq!(reminder.created_at, now);
    }

    #[test]
    fn test_into_reminder_requires_title_and_date() {
        let req: CreateReminderRequest =
            serde_json::from_str(r#"{"dueDate":"2024-11-01"}"#).unwrap();
        assert!(matches!(req.into_reminder(Utc::now()), Err(Error::Validation(_))));

        let req: CreateReminderRequest = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert!(matches!(req.into_reminder(Utc::now()), Err(Error::Validation(_))));
    }

    #[test]
    fn test_status_predicates() {
        let now = ts(2024, 10, 10, 12);
        let mut reminder = CreateReminderRequest {
            title: Some("x".to_string()),
            due_date: Some("2024-10-10T12:00".to_string()),
            ..Default::default()
        }
        .into_reminder(now)
        .unwrap();

        // due exactly now counts as upcoming
        assert!(StatusFilter::Upcoming.matches(&reminder, now));
        assert!(StatusFilter::Overdue.matches(&reminder, ts(2024, 10, 11, 0)));

        reminder.completed = true;
        assert!(StatusFilter::Completed.matches(&reminder, now));
        assert!(!StatusFilter::Upcoming.matches(&reminder, now));
        assert!(!StatusFilter::Overdue.matches(&reminder, ts(2024, 10, 11, 0)));
    }

    #[test]
    fn test_wire_format() {
        let req: CreateReminderRequest = serde_json::from_str(
            r#"{"title":"Lab","dueDate":"2024-10-15","type":"exam","priority":"high"}"#,
        )
        .unwrap();
        let reminder = req.into_reminder(ts(2024, 10, 1, 0)).unwrap();
        let json = serde_json::to_value(&reminder).unwrap();
        assert_eq!(json["type"], "exam");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["dueDate"], "2024-10-15T00:00:00Z");
        assert_eq!(json["completed"], false);
    }
}
