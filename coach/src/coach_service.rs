use crate::document_processor::DocumentProcessor;
use crate::error::Result;
use crate::models::{DocPreview, ExtractionResult, FormSubmission, PageState, UploadedFile};
use crate::openai_service::ChatClient;
use crate::{prompt, upload};
use std::sync::Arc;

/// Runs one form submission: upload validation, extraction, and the model call.
pub struct CoachService {
    processor: DocumentProcessor,
    chat: Arc<dyn ChatClient>,
}

impl CoachService {
    pub fn new(chat: Arc<dyn ChatClient>) -> Self {
        Self {
            processor: DocumentProcessor::new(),
            chat,
        }
    }

    pub async fn handle_submission(&self, submission: FormSubmission) -> PageState {
        let mut state = PageState {
            user_msg: submission.user_msg.trim().to_string(),
            ..Default::default()
        };

        if let Some(upload) = submission.upload {
            match self.preview_upload(upload).await {
                Ok(preview) => state.doc_preview = Some(preview),
                Err(e) => state.error = Some(e.to_string()),
            }
        }

        if state.error.is_some() || state.user_msg.is_empty() {
            return state;
        }

        let request = prompt::build_request(&state.user_msg, state.doc_preview.as_ref());
        log::debug!(
            "Sending {} chars of system prompt to {}",
            request.messages[0].content.len(),
            request.model
        );

        match self.chat.complete(&request).await {
            Ok(reply) => {
                log::info!("Received coaching reply ({} chars)", reply.len());
                state.reply = Some(reply);
            }
            Err(e) => {
                log::warn!("Chat completion failed: {}", e);
                state.error = Some(e.to_string());
            }
        }

        state
    }

    async fn preview_upload(&self, mut file: UploadedFile) -> Result<DocPreview> {
        let kind = upload::validate(&mut file)?;
        let processor = self.processor;

        let result = tokio::task::spawn_blocking(move || processor.extract(kind, file.body))
            .await
            .unwrap_or_else(|e| ExtractionResult::failed(kind, e.to_string()));

        Ok(result.into_preview())
    }
}
