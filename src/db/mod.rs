//! Row-store access: document CRUD against platform collections.

use reqwest::Method;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::platform::{query, query::Query, PlatformClient, PlatformResult};

/// Page size used when walking a whole collection.
pub const PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct DocumentList<T> {
    #[serde(default)]
    pub total: u64,
    pub documents: Vec<T>,
}

/// Just the identifier of a document the platform returned.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRef {
    #[serde(rename = "$id")]
    pub id: String,
}

/// Handle on one database; collections are passed per call.
#[derive(Clone, Copy)]
pub struct Database<'a> {
    client: &'a PlatformClient,
    database_id: &'a str,
}

impl<'a> Database<'a> {
    pub fn new(client: &'a PlatformClient, database_id: &'a str) -> Self {
        Self { client, database_id }
    }

    fn documents_path(&self, collection_id: &str) -> String {
        format!(
            "/databases/{}/collections/{}/documents",
            self.database_id, collection_id
        )
    }

    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> PlatformResult<DocumentList<T>> {
        let req = self
            .client
            .request(Method::GET, &self.documents_path(collection_id))
            .query(&query::as_params(queries)?);
        self.client.execute(req).await
    }

    /// Fetch every document of a collection.
    ///
    /// Pages through with limit/offset and stops at the first page shorter
    /// than `PAGE_SIZE`.
    pub async fn list_all_documents<T: DeserializeOwned>(
        &self,
        collection_id: &str,
    ) -> PlatformResult<Vec<T>> {
        let mut all = Vec::new();
        let mut offset: u64 = 0;

        loop {
            let page: DocumentList<T> = self
                .list_documents(collection_id, &[Query::limit(PAGE_SIZE), Query::offset(offset)])
                .await?;
            let fetched = page.documents.len();
            all.extend(page.documents);

            if fetched < PAGE_SIZE as usize {
                break;
            }
            offset += fetched as u64;
        }

        tracing::debug!("Fetched {} document(s) from {}", all.len(), collection_id);
        Ok(all)
    }

    pub async fn create_document<T, D>(
        &self,
        collection_id: &str,
        document_id: &str,
        data: &D,
        permissions: &[String],
    ) -> PlatformResult<T>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        #[derive(Serialize)]
        struct CreateRequest<'b, D: Serialize + ?Sized> {
            #[serde(rename = "documentId")]
            document_id: &'b str,
            data: &'b D,
            permissions: &'b [String],
        }

        let req = self
            .client
            .request(Method::POST, &self.documents_path(collection_id))
            .json(&CreateRequest {
                document_id,
                data,
                permissions,
            });
        self.client.execute(req).await
    }

    /// Partial update: only the keys present in `data` are changed.
    pub async fn update_document<T, D>(
        &self,
        collection_id: &str,
        document_id: &str,
        data: &D,
    ) -> PlatformResult<T>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        #[derive(Serialize)]
        struct UpdateRequest<'b, D: Serialize + ?Sized> {
            data: &'b D,
        }

        let req = self
            .client
            .request(
                Method::PATCH,
                &format!("{}/{}", self.documents_path(collection_id), document_id),
            )
            .json(&UpdateRequest { data });
        self.client.execute(req).await
    }

    pub async fn delete_document(&self, collection_id: &str, document_id: &str) -> PlatformResult<()> {
        let req = self.client.request(
            Method::DELETE,
            &format!("{}/{}", self.documents_path(collection_id), document_id),
        );
        self.client.execute_empty(req).await
    }
}

/// Fresh document identifier (32 lowercase hex chars, valid as a platform id).
pub fn unique_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_id_shape() {
        let a = unique_id();
        let b = unique_id();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
