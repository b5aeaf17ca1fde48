//! Lecture summary types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder for optional owner ids the caller did not supply
pub const UNKNOWN_OWNER: &str = "unknown";

/// Stored lecture summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureSummary {
    pub id: String,
    pub title: String,
    pub original_content: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub teacher_id: String,
    pub institution_id: String,
    pub subject: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_attachment: Option<FileAttachment>,
}

/// Metadata of a file a summary was generated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    pub id: String,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
    pub url: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

impl FileAttachment {
    /// Describe an uploaded file, stamping the stored name with `now`
    pub fn from_upload(file: &UploadedFile, uploaded_by: &str, now: DateTime<Utc>) -> Self {
        let filename = format!("{}-{}", now.timestamp_millis(), file.name);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: format!("/uploads/{}", filename),
            filename,
            original_name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            size: file.content.len() as u64,
            uploaded_by: uploaded_by.to_string(),
            uploaded_at: now,
        }
    }
}

/// Inline file sent with a summary request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
    /// Text content of the file
    #[serde(default)]
    pub content: String,
}

fn default_mime_type() -> String {
    "text/plain".to_string()
}

/// POST /api/summaries request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSummaryRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub file: Option<UploadedFile>,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub institution_id: Option<String>,
}

/// A validated summary request
#[derive(Debug, Clone)]
pub struct SummaryInput<'a> {
    pub title: &'a str,
    pub subject: &'a str,
    /// Text to summarize: inline content, else the file's text
    pub content: &'a str,
    pub file: Option<&'a UploadedFile>,
    pub teacher_id: &'a str,
    pub institution_id: &'a str,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl CreateSummaryRequest {
    /// Validate required fields; `None` when title, subject or a content
    /// source is missing
    pub fn validate(&self) -> Option<SummaryInput<'_>> {
        let title = non_empty(&self.title)?;
        let subject = non_empty(&self.subject)?;
        let file = self.file.as_ref().filter(|f| !f.name.trim().is_empty());
        let content = match non_empty(&self.content) {
            Some(content) => content,
            None => file?.content.as_str(),
        };

        Some(SummaryInput {
            title,
            subject,
            content,
            file,
            teacher_id: non_empty(&self.teacher_id).unwrap_or(UNKNOWN_OWNER),
            institution_id: non_empty(&self.institution_id).unwrap_or(UNKNOWN_OWNER),
        })
    }
}

/// GET /api/summaries query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryQuery {
    pub subject: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_inline_content() {
        let req: CreateSummaryRequest = serde_json::from_str(
            r#"{"title":"Cells","subject":"Biology","content":"Cells are small."}"#,
        )
        .unwrap();
        let input = req.validate().unwrap();
        assert_eq!(input.title, "Cells");
        assert_eq!(input.content, "Cells are small.");
        assert_eq!(input.teacher_id, "unknown");
        assert_eq!(input.institution_id, "unknown");
        assert!(input.file.is_none());
    }

    #[test]
    fn test_validate_file_content() {
        let req: CreateSummaryRequest = serde_json::from_str(
            r#"{"title":"Cells","subject":"Biology","teacherId":"t-1",
                "file":{"name":"notes.txt","content":"From a file."}}"#,
        )
        .unwrap();
        let input = req.validate().unwrap();
        assert_eq!(input.content, "From a file.");
        assert_eq!(input.teacher_id, "t-1");
        assert_eq!(input.file.unwrap().mime_type, "text/plain");
    }

    #[test]
    fn test_validate_missing_fields() {
        let missing_subject: CreateSummaryRequest =
            serde_json::from_str(r#"{"title":"Cells","content":"x"}"#).unwrap();
        assert!(missing_subject.validate().is_none());

        let missing_content: CreateSummaryRequest =
            serde_json::from_str(r#"{"title":"Cells","subject":"Biology"}"#).unwrap();
        assert!(missing_content.validate().is_none());

        let blank_title: CreateSummaryRequest =
            serde_json::from_str(r#"{"title":"  ","subject":"Biology","content":"x"}"#).unwrap();
        assert!(blank_title.validate().is_none());
    }

    #[test]
    fn test_file_attachment_naming() {
        let file = UploadedFile {
            name: "lecture.txt".to_string(),
            mime_type: "text/plain".to_string(),
            content: "abcdef".to_string(),
        };
        let now = Utc::now();
        let attachment = FileAttachment::from_upload(&file, "t-1", now);
        assert_eq!(attachment.filename, format!("{}-lecture.txt", now.timestamp_millis()));
        assert_eq!(attachment.url, format!("/uploads/{}", attachment.filename));
        assert_eq!(attachment.original_name, "lecture.txt");
        assert_eq!(attachment.size, 6);
        assert_eq!(attachment.uploaded_by, "t-1");
    }
}
