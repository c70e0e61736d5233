use open_ai_rust_responses_by_sshift::files::FilePurpose;
use open_ai_rust_responses_by_sshift::vector_stores::CreateVectorStoreRequest;
use open_ai_rust_responses_by_sshift::Client as OAIClient;

use crate::document::dto::Document;

/// Remote resources created for a single summarization call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStore {
    pub file_id: String,
    pub vector_store_id: String,
}

fn temp_path(document: &Document) -> String {
    let safe_name: String = document
        .name()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    std::env::temp_dir()
        .join(format!("{}_{}", uuid::Uuid::new_v4(), safe_name))
        .to_string_lossy()
        .into_owned()
}

/// Uploads the PDF to the files API and wraps it in a fresh vector store for file search.
pub async fn upload_document_to_vector_store(
    client: &OAIClient,
    document: &Document,
) -> Result<DocumentStore, anyhow::Error> {
    let path = temp_path(document);
    tokio::fs::write(&path, document.bytes()).await?;

    let uploaded = client
        .files
        .upload_file(&path, FilePurpose::Assistants, None)
        .await;

    if let Err(e) = tokio::fs::remove_file(&path).await {
        log::warn!("Failed to remove temporary upload {}: {}", path, e);
    }

    let file = uploaded?;
    log::info!("Uploaded {} as file {}", document.name(), file.id);

    let vs_request = CreateVectorStoreRequest {
        name: format!("summerizer_{}", file.id),
        file_ids: vec![file.id.clone()],
    };

    let vector_store = match client.vector_stores.create(vs_request).await {
        Ok(vector_store) => vector_store,
        Err(e) => {
            if let Err(delete_error) = client.files.delete(&file.id).await {
                log::warn!("Failed to delete file {}: {}", file.id, delete_error);
            }
            return Err(e.into());
        }
    };

    Ok(DocumentStore {
        file_id: file.id,
        vector_store_id: vector_store.id,
    })
}

/// Removes the vector store and the uploaded file. Failures are only logged.
pub async fn delete_document_store(client: &OAIClient, store: &DocumentStore) {
    if let Err(e) = client.vector_stores.delete(&store.vector_store_id).await {
        log::warn!(
            "Failed to delete vector store {}: {}",
            store.vector_store_id,
            e
        );
    }

    if let Err(e) = client.files.delete(&store.file_id).await {
        log::warn!("Failed to delete file {}: {}", store.file_id, e);
    }

    log::debug!(
        "Cleaned up vector store {} and file {}",
        store.vector_store_id,
        store.file_id
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::dto::PDF_MIME_TYPE;

    fn unreachable_client() -> OAIClient {
        OAIClient::new_with_base_url("sk-test", "http://127.0.0.1:1").unwrap()
    }

    #[tokio::test]
    async fn test_cleanup_failures_are_swallowed() {
        let store = DocumentStore {
            file_id: "file-1".to_string(),
            vector_store_id: "vs-1".to_string(),
        };

        delete_document_store(&unreachable_client(), &store).await;
    }

    #[tokio::test]
    async fn test_failed_upload_leaves_no_temp_file() {
        let document = Document::new("leftover.pdf", PDF_MIME_TYPE, b"%PDF".to_vec());
        let before = std::fs::read_dir(std::env::temp_dir())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with("_leftover.pdf"))
            .count();

        let result = upload_document_to_vector_store(&unreachable_client(), &document).await;

        assert!(result.is_err());
        let after = std::fs::read_dir(std::env::temp_dir())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with("_leftover.pdf"))
            .count();
        assert_eq!(before, after);
    }
}
