//! In-memory reminder store

use super::types::*;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;

/// Reminder store, newest reminder first
pub struct ReminderStore {
    items: RwLock<Vec<Reminder>>,
}

impl ReminderStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Create a store holding the four sample reminders
    pub fn with_samples() -> Self {
        Self {
            items: RwLock::new(sample_reminders()),
        }
    }

    /// Add a reminder in front of the existing ones
    pub async fn insert(&self, reminder: Reminder) {
        self.items.write().await.insert(0, reminder);
    }

    /// List reminders matching `filter` as of `now`
    pub async fn list(&self, filter: Option<StatusFilter>, now: DateTime<Utc>) -> Vec<Reminder> {
        let items = self.items.read().await;
        items
            .iter()
            .filter(|r| filter.map_or(true, |f| f.matches(r, now)))
            .cloned()
            .collect()
    }

    /// Flip a reminder's completion flag; `None` when the id is unknown
    pub async fn toggle(&self, id: &str, now: DateTime<Utc>) -> Option<Reminder> {
        let mut items = self.items.write().await;
        let reminder = items.iter_mut().find(|r| r.id == id)?;
        reminder.completed = !reminder.completed;
        reminder.updated_at = now;
        Some(reminder.clone())
    }

    /// Counts by status as of `now`
    pub async fn stats(&self, now: DateTime<Utc>) -> ReminderStats {
        let items = self.items.read().await;
        items.iter().fold(
            ReminderStats {
                total: items.len(),
                ..Default::default()
            },
            |mut stats, r| {
                if r.completed {
                    stats.completed += 1;
                } else if r.is_overdue(now) {
                    stats.overdue += 1;
                } else {
                    stats.upcoming += 1;
                }
                stats
            },
        )
    }
}

impl Default for ReminderStore {
    fn default() -> Self {
        Self::new()
    }
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    title: &str,
    description: &str,
    due: DateTime<Utc>,
    reminder_type: ReminderType,
    priority: Priority,
    completed: bool,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
) -> Reminder {
    Reminder {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        title: title.to_string(),
        description: description.to_string(),
        due_date: due,
        reminder_type,
        priority,
        completed,
        created_at: created,
        updated_at: updated,
    }
}

fn sample_reminders() -> Vec<Reminder> {
    vec![
        sample(
            "1",
            "Physics Assignment Due",
            "Quantum mechanics problem set - Chapter 5 exercises",
            date(2024, 10, 10),
            ReminderType::Assignment,
            Priority::High,
            false,
            date(2024, 10, 1),
            date(2024, 10, 1),
        ),
        sample(
            "2",
            "Biology Lab Exam",
            "Microscopy and cell structure examination",
            date(2024, 10, 15),
            ReminderType::Exam,
            Priority::High,
            false,
            date(2024, 10, 2),
            date(2024, 10, 2),
        ),
        sample(
            "3",
            "Parent-Teacher Meeting",
            "Discussion about student progress and upcoming projects",
            date(2024, 10, 12),
            ReminderType::Meeting,
            Priority::Medium,
            false,
            date(2024, 10, 3),
            date(2024, 10, 3),
        ),
        sample(
            "4",
            "Literature Essay Submission",
            "Analysis of Shakespeare's Hamlet - 1500 words",
            date(2024, 10, 8),
            ReminderType::Deadline,
            Priority::Medium,
            true,
            date(2024, 9, 25),
            date(2024, 10, 7),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_samples_and_filters() {
        let store = ReminderStore::with_samples();
        let now = date(2024, 10, 11);

        assert_eq!(store.list(None, now).await.len(), 4);

        let upcoming: Vec<String> = store
            .list(Some(StatusFilter::Upcoming), now)
            .await
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(upcoming, vec!["2", "3"]);

        let overdue = store.list(Some(StatusFilter::Overdue), now).await;
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].title, "Physics Assignment Due");

        let completed = store.list(Some(StatusFilter::Completed), now).await;
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, "4");
    }

    #[tokio::test]
    async fn test_stats() {
        let store = ReminderStore::with_samples();
        let stats = store.stats(date(2024, 10, 11)).await;
        assert_eq!(
            stats,
            ReminderStats {
                upcoming: 2,
                overdue: 1,
                completed: 1,
                total: 4
            }
        );
    }

    #[tokio::test]
    async fn test_toggle() {
        let store = ReminderStore::with_samples();
        let now = date(2024, 10, 11);

        let toggled = store.toggle("4", now).await.unwrap();
        assert!(!toggled.completed);
        assert_eq!(toggled.updated_at, now);
        assert_eq!(store.stats(now).await.completed, 0);

        let toggled = store.toggle("4", now).await.unwrap();
        assert!(toggled.completed);

        assert!(store.toggle("missing", now).await.is_none());
    }

    #[tokio::test]
    async fn test_insert_prepends() {
        let store = ReminderStore::with_samples();
        let now = date(2024, 10, 11);
        let reminder = CreateReminderRequest {
            title: Some("New".to_string()),
            due_date: Some("2024-12-01".to_string()),
            ..Default::default()
        }
        .into_reminder(now)
        .unwrap();

        store.insert(reminder).await;
        let items = store.list(None, now).await;
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].title, "New");
    }
}
