//! In-memory lecture summary store

use super::types::LectureSummary;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;

/// Summary store, newest record first
pub struct SummaryStore {
    items: RwLock<Vec<LectureSummary>>,
}

impl SummaryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Create a store holding the sample summary
    pub fn with_samples() -> Self {
        Self {
            items: RwLock::new(sample_summaries()),
        }
    }

    /// Add a summary in front of the existing ones
    pub async fn insert(&self, summary: LectureSummary) {
        self.items.write().await.insert(0, summary);
    }

    /// List summaries, optionally restricted to one subject (case-insensitive)
    pub async fn list(&self, subject: Option<&str>) -> Vec<LectureSummary> {
        let items = self.items.read().await;
        match subject.map(str::trim).filter(|s| !s.is_empty()) {
            Some(subject) => items
                .iter()
                .filter(|s| s.subject.eq_ignore_ascii_case(subject))
                .cloned()
                .collect(),
            None => items.clone(),
        }
    }

    /// Look up a summary by id
    pub async fn get(&self, id: &str) -> Option<LectureSummary> {
        self.items.read().await.iter().find(|s| s.id == id).cloned()
    }

    /// Number of stored summaries
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

impl Default for SummaryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn sample_summaries() -> Vec<LectureSummary> {
    vec![LectureSummary {
        id: "1".to_string(),
        title: "Introduction to Quantum Mechanics".to_string(),
        original_content: "Full lecture transcript...".to_string(),
        summary: "This lecture covered the fundamental principles of quantum mechanics, \
                  including wave-particle duality, the uncertainty principle, and quantum states."
            .to_string(),
        key_points: vec![
            "Wave-particle duality explains light and matter behavior".to_string(),
            "Heisenberg uncertainty principle limits precision".to_string(),
            "Quantum states exist in superposition".to_string(),
            "Observation affects quantum systems".to_string(),
        ],
        teacher_id: "teacher-1".to_string(),
        institution_id: "inst-1".to_string(),
        subject: "Physics".to_string(),
        created_at: date(2024, 10, 1),
        updated_at: date(2024, 10, 1),
        file_attachment: None,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, subject: &str) -> LectureSummary {
        LectureSummary {
            id: id.to_string(),
            title: format!("Lecture {}", id),
            original_content: "content".to_string(),
            summary: "content.".to_string(),
            key_points: Vec::new(),
            teacher_id: "t".to_string(),
            institution_id: "i".to_string(),
            subject: subject.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            file_attachment: None,
        }
    }

    #[tokio::test]
    async fn test_samples() {
        let store = SummaryStore::with_samples();
        let items = store.list(None).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Introduction to Quantum Mechanics");
        assert_eq!(items[0].key_points.len(), 4);
        assert_eq!(items[0].created_at.to_rfc3339(), "2024-10-01T00:00:00+00:00");
    }

    #[tokio::test]
    async fn test_insert_newest_first() {
        let store = SummaryStore::new();
        assert!(store.is_empty().await);
        store.insert(summary("a", "Math")).await;
        store.insert(summary("b", "Math")).await;

        let items = store.list(None).await;
        assert_eq!(items[0].id, "b");
        assert_eq!(items[1].id, "a");
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_subject_filter() {
        let store = SummaryStore::with_samples();
        store.insert(summary("m", "Math")).await;

        let physics = store.list(Some("physics")).await;
        assert_eq!(physics.len(), 1);
        assert_eq!(physics[0].id, "1");

        assert_eq!(store.list(Some("MATH")).await.len(), 1);
        assert!(store.list(Some("History")).await.is_empty());
        assert_eq!(store.list(Some("  ")).await.len(), 2);
    }

    #[tokio::test]
    async fn test_get() {
        let store = SummaryStore::with_samples();
        assert!(store.get("1").await.is_some());
        assert!(store.get("missing").await.is_none());
    }
}
