use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::header::CONTENT_LENGTH;
use coach_core::upload::MAX_FILE_BYTES;
use coach_core::{FormSubmission, UploadedFile};

/// Decodes the coaching form. A file part without a filename counts as no upload.
pub async fn read_submission(mut multipart: Multipart) -> Result<FormSubmission, MultipartError> {
    let mut submission = FormSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "user_msg" => submission.user_msg = field.text().await?,
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                if file_name.is_empty() {
                    continue;
                }
                submission.upload = Some(read_upload(file_name, field).await?);
            }
            _ => {}
        }
    }

    Ok(submission)
}

/// Keeps at most one byte past the size cap so oversized files are still
/// measured as too large; the rest of the part is drained.
async fn read_upload(file_name: String, mut field: Field<'_>) -> Result<UploadedFile, MultipartError> {
    let content_type = field.content_type().unwrap_or_default().to_string();
    let declared_len = field
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());

    let keep = MAX_FILE_BYTES as usize + 1;
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        let room = keep.saturating_sub(data.len());
        data.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }

    let upload = UploadedFile::new(file_name, &content_type, data);
    Ok(match declared_len {
        Some(len) => upload.with_declared_len(len),
        None => upload,
    })
}
