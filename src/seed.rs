//! Developer tooling: sample data seeding and store connectivity checks.

use crate::contact::ContactRecord;
use crate::i18n::Locale;
use crate::routes::{resolve_path, PageKey};
use crate::store::{collections, DocumentId, DocumentStore};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedStatus {
    Success,
    Error,
}

/// Outcome of seeding one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedResult {
    pub collection: String,
    pub count: usize,
    pub status: SeedStatus,
    pub message: String,
}

/// Write `docs` to `collection` one by one, stopping at the first failure.
///
/// `count` is the number of documents created before the run stopped.
pub async fn seed_collection(
    store: &dyn DocumentStore,
    collection: &str,
    docs: Vec<Map<String, Value>>,
) -> SeedResult {
    let total = docs.len();
    let mut count = 0;

    for doc in docs {
        match store.add_document(collection, doc).await {
            Ok(_) => count += 1,
            Err(e) => {
                error!("Seeding '{}' failed after {} documents: {}", collection, count, e);
                return SeedResult {
                    collection: collection.to_string(),
                    count,
                    status: SeedStatus::Error,
                    message: e.to_string(),
                };
            }
        }
    }

    info!("Seeded {}/{} documents into '{}'", count, total, collection);
    SeedResult {
        collection: collection.to_string(),
        count,
        status: SeedStatus::Success,
        message: format!("{} documents created", count),
    }
}

/// Seed every sample collection.
pub async fn seed_all(store: &dyn DocumentStore) -> Vec<SeedResult> {
    vec![
        seed_collection(store, collections::CONTACTS, sample_contacts()).await,
        seed_collection(store, collections::INVESTORS, sample_investors()).await,
        seed_collection(store, collections::ANALYTICS, sample_analytics()).await,
    ]
}

/// Sample leads, built through contact validation so they match real submissions.
pub fn sample_contacts() -> Vec<Map<String, Value>> {
    let records = [
        ContactRecord {
            purpose: "partnership".to_string(),
            full_name: "Camille Martin".to_string(),
            email: "camille.martin@example.com".to_string(),
            title: Some("Partenariat".to_string()),
            message: "Bonjour, je souhaiterais discuter d'un partenariat.".to_string(),
            country: Some("France".to_string()),
            consent: true,
        },
        ContactRecord {
            purpose: "media".to_string(),
            full_name: "John Smith".to_string(),
            email: "john.smith@example.com".to_string(),
            title: Some("Interview request".to_string()),
            message: "We would like to feature your story in our magazine.".to_string(),
            country: Some("United Kingdom".to_string()),
            consent: true,
        },
        ContactRecord {
            purpose: "investment".to_string(),
            full_name: "Lena Weber".to_string(),
            email: "lena.weber@example.com".to_string(),
            title: None,
            message: "Ich interessiere mich für eine Beteiligung.".to_string(),
            country: None,
            consent: true,
        },
    ];

    records
        .iter()
        .filter_map(|record| record.validate().ok())
        .map(|valid| valid.to_fields())
        .collect()
}

pub fn sample_investors() -> Vec<Map<String, Value>> {
    [
        json!({
            "name": "Sample Ventures",
            "email": "deals@sample-ventures.example",
            "ticketSize": "100k-500k",
            "stage": "seed",
            "country": "France",
        }),
        json!({
            "name": "Example Angels",
            "email": "hello@example-angels.example",
            "ticketSize": "25k-100k",
            "stage": "pre-seed",
            "country": "Portugal",
        }),
    ]
    .into_iter()
    .filter_map(|value| value.as_object().cloned())
    .collect()
}

/// One page-view event per locale, using the real localized paths.
pub fn sample_analytics() -> Vec<Map<String, Value>> {
    Locale::all()
        .filter_map(|locale| {
            json!({
                "event": "page_view",
                "page": PageKey::Home,
                "locale": locale.code(),
                "path": resolve_path(locale, PageKey::Home, None),
            })
            .as_object()
            .cloned()
        })
        .collect()
}

/// Result of a write-then-read round trip against the `test` collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionReport {
    pub write_ok: bool,
    pub read_ok: bool,
    pub document_id: Option<DocumentId>,
    pub documents_read: usize,
    pub message: String,
}

impl ConnectionReport {
    pub fn is_ok(&self) -> bool {
        self.write_ok && self.read_ok
    }
}

/// Write one marker document to `test` and read the collection back.
pub async fn test_connection(store: &dyn DocumentStore) -> ConnectionReport {
    let mut marker = Map::new();
    marker.insert("connectionTest".to_string(), Value::Bool(true));
    marker.insert(
        "source".to_string(),
        Value::String("connection-test".to_string()),
    );

    let document_id = match store.add_document(collections::TEST, marker).await {
        Ok(id) => id,
        Err(e) => {
            error!("Connection test write failed: {}", e);
            return ConnectionReport {
                write_ok: false,
                read_ok: false,
                document_id: None,
                documents_read: 0,
                message: format!("write failed: {}", e),
            };
        }
    };

    match store.list_documents(collections::TEST, 10).await {
        Ok(docs) => {
            info!("Connection test ok: wrote {}, read {} documents", document_id, docs.len());
            ConnectionReport {
                write_ok: true,
                read_ok: true,
                documents_read: docs.len(),
                message: format!("wrote {} and read {} documents", document_id, docs.len()),
                document_id: Some(document_id),
            }
        }
        Err(e) => {
            error!("Connection test read failed: {}", e);
            ConnectionReport {
                write_ok: true,
                read_ok: false,
                document_id: Some(document_id),
                documents_read: 0,
                message: format!("read failed: {}", e),
            }
        }
    }
}
