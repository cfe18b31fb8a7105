use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// One submission of the coaching form.
#[derive(Debug, Default)]
pub struct FormSubmission {
    pub user_msg: String,
    pub upload: Option<UploadedFile>,
}

/// A document attached to the form, held in memory for the duration of one request.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    /// Mime essence, lowercase, without parameters.
    pub content_type: String,
    pub declared_len: Option<u64>,
    pub body: Cursor<Vec<u8>>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: &str, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: mime_essence(content_type),
            declared_len: None,
            body: Cursor::new(data),
        }
    }

    pub fn with_declared_len(mut self, len: u64) -> Self {
        self.declared_len = Some(len);
        self
    }
}

/// `Text/CSV; charset=utf-8` -> `text/csv`
pub fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Csv,
}

impl DocumentKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "text/csv" => Some(Self::Csv),
            // browsers that don't know the pdf type send octet-stream
            "application/pdf" | "application/octet-stream" => Some(Self::Pdf),
            _ => None,
        }
    }

    fn failure_label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF extraction error",
            Self::Csv => "CSV parsing error",
        }
    }
}

/// Outcome of turning an uploaded document into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    Extracted(String),
    Failed { kind: DocumentKind, reason: String },
}

impl ExtractionResult {
    pub fn failed(kind: DocumentKind, reason: impl Into<String>) -> Self {
        Self::Failed {
            kind,
            reason: reason.into(),
        }
    }

    pub fn into_preview(self) -> DocPreview {
        match self {
            Self::Extracted(text) => DocPreview {
                text,
                failed: false,
            },
            Self::Failed { kind, reason } => DocPreview {
                text: format!("[{}]: {}", kind.failure_label(), reason),
                failed: true,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocPreview {
    pub text: String,
    pub failed: bool,
}

impl DocPreview {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Everything the page template needs for one response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub user_msg: String,
    pub reply: Option<String>,
    pub doc_preview: Option<DocPreview>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_parameters_are_stripped() {
        assert_eq!(mime_essence("Text/CSV; charset=utf-8"), "text/csv");
        assert_eq!(mime_essence(""), "");
    }

    #[test]
    fn octet_stream_is_treated_as_pdf() {
        assert_eq!(DocumentKind::from_mime("application/octet-stream"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_mime("application/pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_mime("text/csv"), Some(DocumentKind::Csv));
        assert_eq!(DocumentKind::from_mime("image/png"), None);
        assert_eq!(DocumentKind::from_mime(""), None);
    }

    #[test]
    fn failed_extraction_preview_is_labelled() {
        let preview = ExtractionResult::failed(DocumentKind::Csv, "No columns to parse from file").into_preview();
        assert_eq!(preview.text, "[CSV parsing error]: No columns to parse from file");
        assert!(preview.failed);

        let preview = ExtractionResult::Extracted("hello".to_string()).into_preview();
        assert_eq!(preview.text, "hello");
        assert!(!preview.failed);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(ChatMessage::system("x")).unwrap();
        assert_eq!(json["role"], "system");
    }
}
