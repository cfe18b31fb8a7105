use crate::models::{ChatCompletionRequest, ChatMessage, DocPreview};

pub const COACH_MODEL: &str = "gpt-4o-mini";

pub const COACH_PERSONA: &str =
    "You are a supportive mental coach who helps overwhelmed people feel calmer.";

pub fn build_system_prompt(preview: Option<&DocPreview>) -> String {
    let mut prompt = COACH_PERSONA.to_string();
    if let Some(preview) = preview.filter(|p| !p.is_empty()) {
        prompt.push_str("\n\nThe user has also uploaded a document. Here is the content:\n");
        prompt.push_str(&preview.text);
    }
    prompt
}

/// The system prompt followed by the user's message, nothing else.
pub fn build_request(user_msg: &str, preview: Option<&DocPreview>) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: COACH_MODEL.to_string(),
        messages: vec![
            ChatMessage::system(build_system_prompt(preview)),
            ChatMessage::user(user_msg),
        ],
    }
}
