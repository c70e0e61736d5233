use base64::{engine::general_purpose, Engine as _};

use super::dto::{Document, DocumentUpload, SelectedFile};
use crate::error::SummerizerError;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

pub fn title_from_file_name(name: &str) -> String {
    let cut = name.len().saturating_sub(4);
    match name.get(cut..) {
        Some(ext) if ext.eq_ignore_ascii_case(".pdf") => name[..cut].to_string(),
        _ => name.to_string(),
    }
}

pub fn size_label(bytes: usize) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}

impl Document {
    pub fn from_base64(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        content: &str,
    ) -> Result<Self, SummerizerError> {
        let bytes = general_purpose::STANDARD
            .decode(content.trim())
            .map_err(|e| SummerizerError::ValidationRejected(format!("invalid file content: {}", e)))?;

        Ok(Document::new(name, mime_type, bytes))
    }

    pub fn selected_file(&self) -> SelectedFile {
        SelectedFile {
            name: self.name().to_string(),
            size_label: size_label(self.size()),
        }
    }
}

impl TryFrom<DocumentUpload> for Document {
    type Error = SummerizerError;

    fn try_from(upload: DocumentUpload) -> Result<Self, Self::Error> {
        Document::from_base64(upload.file_name, upload.mime_type, &upload.content)
    }
}
