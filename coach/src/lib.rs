pub mod models;
pub mod error;
pub mod upload;
pub mod document_processor;
pub mod prompt;
pub mod openai_service;
pub mod page;
pub mod coach_service;

#[cfg(test)]
pub(crate) mod testing;

pub use models::*;
pub use error::CoachError;
pub use document_processor::DocumentProcessor;
pub use openai_service::{ChatClient, OpenAiService};
pub use page::PageRenderer;
pub use coach_service::CoachService;
