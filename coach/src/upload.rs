use crate::error::{CoachError, Result};
use crate::models::{DocumentKind, UploadedFile};
use std::io::{Seek, SeekFrom};

/// Uploads larger than this are rejected before any extraction happens.
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Length of a stream, leaving its position where it was.
pub fn measure_len<S: Seek>(stream: &mut S) -> std::io::Result<u64> {
    let current = stream.stream_position()?;
    let end = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(current))?;
    Ok(end)
}

/// Checks size and type of an upload and rewinds it for reading.
pub fn validate(upload: &mut UploadedFile) -> Result<DocumentKind> {
    let measured = measure_len(&mut upload.body)?;
    let size = match upload.declared_len {
        Some(declared) => declared.max(measured),
        None => measured,
    };

    if size > MAX_FILE_BYTES {
        log::warn!("Rejected upload {} ({} bytes)", upload.file_name, size);
        return Err(CoachError::PayloadTooLarge { size });
    }

    upload.body.rewind()?;

    let kind = DocumentKind::from_mime(&upload.content_type).ok_or_else(|| {
        log::warn!(
            "Rejected upload {} with content type {:?}",
            upload.file_name,
            upload.content_type
        );
        CoachError::UnsupportedFileType {
            content_type: upload.content_type.clone(),
        }
    })?;

    log::info!("Accepted upload {} as {:?} ({} bytes)", upload.file_name, kind, size);
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn upload(content_type: &str, len: usize) -> UploadedFile {
        UploadedFile::new("doc", content_type, vec![b'a'; len])
    }

    #[test]
    fn measuring_restores_position() {
        let mut stream = Cursor::new(vec![0u8; 10]);
        stream.set_position(4);
        assert_eq!(measure_len(&mut stream).unwrap(), 10);
        assert_eq!(stream.position(), 4);
    }

    #[test]
    fn rewinds_before_extraction() {
        let mut file = upload("text/csv", 8);
        file.body.set_position(5);
        assert_eq!(validate(&mut file).unwrap(), DocumentKind::Csv);

        let mut buf = Vec::new();
        file.body.read_to_end(&mut buf).unwrap();
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn exactly_five_mib_is_accepted() {
        let mut file = upload("application/pdf", MAX_FILE_BYTES as usize);
        assert_eq!(validate(&mut file).unwrap(), DocumentKind::Pdf);
    }

    #[test]
    fn oversized_body_is_rejected() {
        let mut file = upload("application/pdf", MAX_FILE_BYTES as usize + 1);
        let err = validate(&mut file).unwrap_err();
        assert!(matches!(err, CoachError::PayloadTooLarge { .. }));
        assert_eq!(err.to_string(), "Files must be 5 MB or smaller.");
    }

    #[test]
    fn declared_length_counts_when_body_is_small() {
        let mut file = upload("text/csv", 3).with_declared_len(6 * 1024 * 1024);
        assert!(matches!(
            validate(&mut file),
            Err(CoachError::PayloadTooLarge { size }) if size == 6 * 1024 * 1024
        ));
    }

    #[test]
    fn understated_declared_length_does_not_hide_body_size() {
        let mut file = upload("text/csv", MAX_FILE_BYTES as usize + 1).with_declared_len(10);
        assert!(matches!(validate(&mut file), Err(CoachError::PayloadTooLarge { .. })));
    }

    #[test]
    fn size_is_checked_before_type() {
        let mut file = upload("image/png", MAX_FILE_BYTES as usize + 1);
        assert!(matches!(validate(&mut file), Err(CoachError::PayloadTooLarge { .. })));
    }

    #[test]
    fn unknown_types_are_rejected() {
        for content_type in ["image/png", "text/plain", ""] {
            let mut file = upload(content_type, 4);
            let err = validate(&mut file).unwrap_err();
            assert_eq!(err.to_string(), "Only PDF or CSV files are supported.");
        }
    }
}
