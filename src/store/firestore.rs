//! Firestore REST v1 client.
//!
//! Writes go through `documents:commit` so the document can be created with a
//! server-side `REQUEST_TIME` transform on `createdAt`. Values are converted
//! between plain JSON and Firestore's typed value encoding.

use super::{Document, DocumentId, DocumentStore, StoreError, CREATED_AT};
use crate::config::FirestoreConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CommitResponse {
    #[serde(default, rename = "writeResults")]
    write_results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<RawDocument>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

pub struct FirestoreStore {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    api_key: String,
}

impl FirestoreStore {
    pub fn new(config: &FirestoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Resource name of the default database's document root.
    fn documents_root(&self) -> String {
        format!("projects/{}/databases/(default)/documents", self.project_id)
    }

    fn document_name(&self, collection: &str, id: &DocumentId) -> String {
        format!("{}/{}/{}", self.documents_root(), collection, id)
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn add_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<DocumentId, StoreError> {
        let id = DocumentId::generate();
        let url = format!("{}/v1/{}:commit", self.base_url, self.documents_root());

        let body = json!({
            "writes": [{
                "update": {
                    "name": self.document_name(collection, &id),
                    "fields": encode_fields(&fields),
                },
                "currentDocument": { "exists": false },
                "updateTransforms": [{
                    "fieldPath": CREATED_AT,
                    "setToServerValue": "REQUEST_TIME",
                }],
            }],
        });

        debug!("Committing document {} to collection '{}'", id, collection);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, body });
        }

        let commit: CommitResponse = response.json().await?;
        if commit.write_results.is_empty() {
            return Err(StoreError::Decode("commit returned no write results".to_string()));
        }

        Ok(id)
    }

    async fn list_documents(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}/v1/{}/{}", self.base_url, self.documents_root(), collection);
        let page_size = limit.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("pageSize", page_size.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, body });
        }

        let list: ListResponse = response.json().await?;
        list.documents
            .into_iter()
            .map(|raw| -> Result<Document, StoreError> {
                let id = raw
                    .name
                    .rsplit('/')
                    .next()
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| StoreError::Decode(format!("bad document name '{}'", raw.name)))?;
                Ok(Document {
                    id: DocumentId::new(id),
                    fields: decode_fields(&raw.fields)?,
                })
            })
            .collect()
    }
}

/// Encode a plain JSON object as a Firestore `fields` map.
pub(crate) fn encode_fields(fields: &Map<String, Value>) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(key, value)| (key.clone(), encode_value(value)))
            .collect(),
    )
}

fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // Firestore encodes int64 as a decimal string
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Decode a Firestore `fields` map into plain JSON.
pub(crate) fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, StoreError> {
    fields
        .iter()
        .map(|(key, value)| -> Result<(String, Value), StoreError> {
            Ok((key.clone(), decode_value(value)?))
        })
        .collect()
}

fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let (kind, inner) = value
        .as_object()
        .and_then(|obj| obj.iter().next())
        .ok_or_else(|| StoreError::Decode(format!("not a typed value: {}", value)))?;

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" | "doubleValue" | "stringValue" | "timestampValue"
        | "referenceValue" | "bytesValue" | "geoPointValue" => Ok(inner.clone()),
        "integerValue" => {
            let raw = inner.as_str().map(str::to_string).unwrap_or_else(|| inner.to_string());
            raw.parse::<i64>()
                .map(Value::from)
                .map_err(|_| StoreError::Decode(format!("bad integerValue '{}'", raw)))
        }
        "arrayValue" => inner
            .get("values")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(decode_value).collect::<Result<Vec<_>, _>>())
            .unwrap_or_else(|| Ok(Vec::new()))
            .map(Value::Array),
        "mapValue" => inner
            .get("fields")
            .and_then(Value::as_object)
            .map(decode_fields)
            .unwrap_or_else(|| Ok(Map::new()))
            .map(Value::Object),
        other => Err(StoreError::Decode(format!("unknown value type '{}'", other))),
    }
}
