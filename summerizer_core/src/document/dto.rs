use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// An uploaded file. Only the MIME type is ever validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME_TYPE
    }
}

/// What the upload control shows once a file has been picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFile {
    pub name: String,
    pub size_label: String,
}

/// Upload body accepted by the intake route.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    pub file_name: String,
    pub mime_type: String,
    /// Base64 encoded file contents.
    pub content: String,
}
