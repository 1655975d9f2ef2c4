use super::{Document, DocumentId, DocumentStore, StoreError, CREATED_AT};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Process-local store used for dry runs and tests.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<BTreeMap<String, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        let collections = self.collections.lock().unwrap_or_else(PoisonError::into_inner);
        collections.get(collection).map(Vec::len).unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn add_document(
        &self,
        collection: &str,
        mut fields: Map<String, Value>,
    ) -> Result<DocumentId, StoreError> {
        let id = DocumentId::generate();
        fields.insert(
            CREATED_AT.to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        let mut collections = self.collections.lock().unwrap_or_else(PoisonError::into_inner);
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });

        Ok(id)
    }

    async fn list_documents(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let store = MemoryStore::new();
        let id = store
            .add_document("contacts", fields(json!({"email": "a@b.co"})))
            .await
            .unwrap();

        let docs = store.list_documents("contacts", 10).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert_eq!(docs[0].fields["email"], "a@b.co");
    }

    #[tokio::test]
    async fn test_created_at_is_assigned() {
        let store = MemoryStore::new();
        store
            .add_document("test", fields(json!({"createdAt": "client value"})))
            .await
            .unwrap();

        let docs = store.list_documents("test", 1).await.unwrap();
        let created_at = docs[0].fields[CREATED_AT].as_str().unwrap();
        assert_ne!(created_at, "client value");
        assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_submissions_create_two_documents() {
        let store = MemoryStore::new();
        let doc = fields(json!({"message": "hello"}));
        let first = store.add_document("contacts", doc.clone()).await.unwrap();
        let second = store.add_document("contacts", doc).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.count("contacts"), 2);
    }

    #[tokio::test]
    async fn test_list_respects_limit_and_unknown_collection() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .add_document("analytics", fields(json!({"n": i})))
                .await
                .unwrap();
        }

        assert_eq!(store.list_documents("analytics", 3).await.unwrap().len(), 3);
        assert!(store.list_documents("missing", 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let clone = store.clone();
        clone
            .add_document("investors", fields(json!({"name": "x"})))
            .await
            .unwrap();
        assert_eq!(store.count("investors"), 1);
    }

    #[tokio::test]
    async fn test_poisoned_lock_keeps_working() {
        let store = MemoryStore::new();
        store
            .add_document("contacts", fields(json!({"n": 1})))
            .await
            .unwrap();

        let clone = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = clone.collections.lock().unwrap();
            panic!("panicked while holding the lock");
        })
        .join();
        assert!(store.collections.is_poisoned());

        assert_eq!(store.count("contacts"), 1);
        store
            .add_document("contacts", fields(json!({"n": 2})))
            .await
            .unwrap();
        assert_eq!(store.list_documents("contacts", 10).await.unwrap().len(), 2);
    }
}
