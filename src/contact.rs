//! Contact / lead intake.
//!
//! Submissions are validated before any store call. Validation trims every
//! field, requires purpose, full name, email, message and consent, and bounds
//! field lengths. Title and country are optional. There is no idempotency
//! key: submitting the same record twice stores two documents.

use crate::store::{collections, DocumentId, DocumentStore, StoreError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{info, warn};

pub const MAX_PURPOSE_LEN: usize = 100;
pub const MAX_NAME_LEN: usize = 200;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_MESSAGE_LEN: usize = 5000;
pub const MAX_COUNTRY_LEN: usize = 100;

/// A contact form submission as sent by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default)]
    pub consent: bool,
}

/// A native HTML form post (`application/x-www-form-urlencoded`).
///
/// An unchecked checkbox is simply absent, and a checked one sends its
/// `value` (`on` by default). `locale` is the hidden field naming the page
/// the form was rendered on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub consent: Option<String>,
}

impl ContactForm {
    pub fn into_record(self) -> ContactRecord {
        let consent = matches!(
            self.consent.as_deref().map(str::trim),
            Some("on" | "true" | "1" | "yes")
        );
        ContactRecord {
            purpose: self.purpose,
            full_name: self.full_name,
            email: self.email,
            title: self.title,
            message: self.message,
            country: self.country,
            consent,
        }
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    Missing,
    TooLong,
    InvalidEmail,
    ConsentRequired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub problem: FieldProblem,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.field, self.problem)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("invalid contact submission ({})", format_fields(.0))]
    Invalid(Vec<FieldError>),

    #[error("document store is not configured")]
    NotConfigured,

    #[error("failed to store contact: {0}")]
    Store(#[from] StoreError),
}

fn format_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
    })
}

/// A record that passed validation, trimmed and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact(ContactRecord);

impl ValidContact {
    pub fn record(&self) -> &ContactRecord {
        &self.0
    }

    /// Document fields as persisted in the `contacts` collection.
    pub fn to_fields(&self) -> Map<String, Value> {
        let record = &self.0;
        let mut fields = Map::new();
        fields.insert("purpose".into(), Value::from(record.purpose.as_str()));
        fields.insert("fullName".into(), Value::from(record.full_name.as_str()));
        fields.insert("email".into(), Value::from(record.email.as_str()));
        fields.insert("title".into(), optional(&record.title));
        fields.insert("message".into(), Value::from(record.message.as_str()));
        fields.insert("country".into(), optional(&record.country));
        fields.insert("consent".into(), Value::Bool(record.consent));
        fields
    }
}

fn optional(value: &Option<String>) -> Value {
    value.as_deref().map(Value::from).unwrap_or(Value::Null)
}

impl ContactRecord {
    /// Validate and normalize the record. Every failing field is reported.
    pub fn validate(&self) -> Result<ValidContact, Vec<FieldError>> {
        let mut errors = Vec::new();

        let purpose = required("purpose", &self.purpose, MAX_PURPOSE_LEN, &mut errors);
        let full_name = required("fullName", &self.full_name, MAX_NAME_LEN, &mut errors);
        let email = required("email", &self.email, MAX_EMAIL_LEN, &mut errors);
        if !email.is_empty()
            && email.chars().count() <= MAX_EMAIL_LEN
            && !email_regex().is_match(&email)
        {
            errors.push(FieldError {
                field: "email",
                problem: FieldProblem::InvalidEmail,
            });
        }
        let title = optional_field("title", &self.title, MAX_TITLE_LEN, &mut errors);
        let message = required("message", &self.message, MAX_MESSAGE_LEN, &mut errors);
        let country = optional_field("country", &self.country, MAX_COUNTRY_LEN, &mut errors);

        if !self.consent {
            errors.push(FieldError {
                field: "consent",
                problem: FieldProblem::ConsentRequired,
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidContact(ContactRecord {
            purpose,
            full_name,
            email,
            title,
            message,
            country,
            consent: true,
        }))
    }
}

fn required(field: &'static str, value: &str, max: usize, errors: &mut Vec<FieldError>) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError {
            field,
            problem: FieldProblem::Missing,
        });
    } else if trimmed.chars().count() > max {
        errors.push(FieldError {
            field,
            problem: FieldProblem::TooLong,
        });
    }
    trimmed.to_string()
}

fn optional_field(
    field: &'static str,
    value: &Option<String>,
    max: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let trimmed = value.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
    if trimmed.chars().count() > max {
        errors.push(FieldError {
            field,
            problem: FieldProblem::TooLong,
        });
    }
    Some(trimmed.to_string())
}

/// Validate a submission and append it to the `contacts` collection.
///
/// Validation runs first, so an invalid record (including missing consent)
/// never reaches the store. Store failures are returned as-is, without retry.
pub async fn submit_contact(
    store: Option<&dyn DocumentStore>,
    record: &ContactRecord,
) -> Result<DocumentId, SubmitError> {
    let valid = record.validate().map_err(SubmitError::Invalid)?;

    let Some(store) = store else {
        warn!("Contact submission rejected: document store is not configured");
        return Err(SubmitError::NotConfigured);
    };

    let id = store
        .add_document(collections::CONTACTS, valid.to_fields())
        .await?;

    info!("Stored contact {} (purpose: {})", id, valid.record().purpose);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Document, MemoryStore};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Helper Functions ====================

    fn valid_record() -> ContactRecord {
        ContactRecord {
            purpose: "partnership".to_string(),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            title: Some("Collaboration".to_string()),
            message: "Hello, I would like to talk.".to_string(),
            country: None,
            consent: true,
        }
    }

    /// Store that counts calls and always fails.
    #[derive(Default)]
    struct FailingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn add_document(
            &self,
            _collection: &str,
            _fields: Map<String, Value>,
        ) -> Result<DocumentId, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }

        async fn list_documents(
            &self,
            _collection: &str,
            _limit: usize,
        ) -> Result<Vec<Document>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    fn problems(errors: &[FieldError]) -> Vec<(&'static str, FieldProblem)> {
        errors.iter().map(|e| (e.field, e.problem)).collect()
    }

    // ==================== Deserialization Tests ====================

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "purpose": "media",
            "fullName": "Ada",
            "email": "ada@example.com",
            "message": "Hi",
            "consent": true
        }"#;
        let record: ContactRecord = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(record.full_name, "Ada");
        assert!(record.title.is_none());
        assert!(record.country.is_none());
    }

    #[test]
    fn test_deserialize_missing_fields_default() {
        let record: ContactRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, ContactRecord::default());
        assert!(!record.consent);
    }

    #[test]
    fn test_form_checkbox_on_means_consent() {
        let form = ContactForm {
            locale: Some("en".to_string()),
            purpose: "media".to_string(),
            full_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "hi".to_string(),
            consent: Some("on".to_string()),
            ..Default::default()
        };
        let record = form.into_record();
        assert!(record.consent);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_form_unchecked_checkbox_means_no_consent() {
        for consent in [None, Some(String::new()), Some("off".to_string())] {
            let form = ContactForm {
                consent,
                ..Default::default()
            };
            assert!(!form.into_record().consent);
        }
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_valid_record_passes() {
        let valid = valid_record().validate().expect("Should be valid");
        assert_eq!(valid.record().full_name, "Ada Lovelace");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut record = valid_record();
        record.full_name = "  Ada  ".to_string();
        record.country = Some("  France ".to_string());
        let valid = record.validate().unwrap();
        assert_eq!(valid.record().full_name, "Ada");
        assert_eq!(valid.record().country.as_deref(), Some("France"));
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let mut record = valid_record();
        record.title = Some("   ".to_string());
        let valid = record.validate().unwrap();
        assert!(valid.record().title.is_none());
    }

    #[test]
    fn test_title_is_optional() {
        let mut record = valid_record();
        record.title = None;
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_consent_false_rejected() {
        let mut record = valid_record();
        record.consent = false;
        let errors = record.validate().unwrap_err();
        assert_eq!(problems(&errors), vec![("consent", FieldProblem::ConsentRequired)]);
    }

    #[test]
    fn test_all_required_fields_reported() {
        let errors = ContactRecord::default().validate().unwrap_err();
        assert_eq!(
            problems(&errors),
            vec![
                ("purpose", FieldProblem::Missing),
                ("fullName", FieldProblem::Missing),
                ("email", FieldProblem::Missing),
                ("message", FieldProblem::Missing),
                ("consent", FieldProblem::ConsentRequired),
            ]
        );
    }

    #[test]
    fn test_invalid_email() {
        for email in ["plainaddress", "a@b", "a b@c.com", "@c.com"] {
            let mut record = valid_record();
            record.email = email.to_string();
            let errors = record.validate().unwrap_err();
            assert_eq!(problems(&errors), vec![("email", FieldProblem::InvalidEmail)], "{}", email);
        }
    }

    #[test]
    fn test_multibyte_email_without_at_is_rejected() {
        // 130 chars but 260 bytes
        let mut record = valid_record();
        record.email = "é".repeat(130);
        let errors = record.validate().unwrap_err();
        assert_eq!(problems(&errors), vec![("email", FieldProblem::InvalidEmail)]);
    }

    #[test]
    fn test_too_long_email_reports_length_only() {
        let mut record = valid_record();
        record.email = format!("{}@example.com", "é".repeat(MAX_EMAIL_LEN));
        let errors = record.validate().unwrap_err();
        assert_eq!(problems(&errors), vec![("email", FieldProblem::TooLong)]);
    }

    #[test]
    fn test_too_long_message() {
        let mut record = valid_record();
        record.message = "x".repeat(MAX_MESSAGE_LEN + 1);
        let errors = record.validate().unwrap_err();
        assert_eq!(problems(&errors), vec![("message", FieldProblem::TooLong)]);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut record = valid_record();
        record.full_name = "张".repeat(MAX_NAME_LEN);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_to_fields_shape() {
        let fields = valid_record().validate().unwrap().to_fields();
        assert_eq!(fields["fullName"], "Ada Lovelace");
        assert_eq!(fields["country"], Value::Null);
        assert_eq!(fields["consent"], true);
        assert!(!fields.contains_key("createdAt"));
    }

    #[test]
    fn test_submit_error_display_lists_fields() {
        let err = SubmitError::Invalid(vec![FieldError {
            field: "email",
            problem: FieldProblem::InvalidEmail,
        }]);
        assert!(err.to_string().contains("email"));
    }

    // ==================== submit_contact Tests ====================

    #[tokio::test]
    async fn test_submit_stores_document() {
        let store = MemoryStore::new();
        let id = submit_contact(Some(&store), &valid_record())
            .await
            .expect("Should succeed");

        let docs = store.list_documents("contacts", 10).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert!(docs[0].fields.contains_key("createdAt"));
    }

    #[tokio::test]
    async fn test_consent_false_makes_no_store_call() {
        let store = FailingStore::default();
        let mut record = valid_record();
        record.consent = false;

        let err = submit_contact(Some(&store), &record).await.unwrap_err();

        assert!(matches!(err, SubmitError::Invalid(_)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_store() {
        let err = submit_contact(None, &valid_record()).await.unwrap_err();
        assert!(matches!(err, SubmitError::NotConfigured));
    }

    #[tokio::test]
    async fn test_invalid_record_reported_before_configuration() {
        let err = submit_contact(None, &ContactRecord::default()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_store_failure_is_distinct_and_not_retried() {
        let store = FailingStore::default();
        let record = valid_record();

        let err = submit_contact(Some(&store), &record).await.unwrap_err();

        assert!(matches!(err, SubmitError::Store(StoreError::Status { status: 503, .. })));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(record, valid_record());
    }

    #[tokio::test]
    async fn test_duplicate_submissions_are_not_deduplicated() {
        let store = MemoryStore::new();
        submit_contact(Some(&store), &valid_record()).await.unwrap();
        submit_contact(Some(&store), &valid_record()).await.unwrap();
        assert_eq!(store.count("contacts"), 2);
    }
}
