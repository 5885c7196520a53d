//! User feedback submissions and their review status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::FEEDBACK_KEY;
use crate::prelude::*;
use crate::storage::{KeyValueStore, StoreError, load_json, save_json};
use crate::Error;

/// A validated feedback form. All fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    name:    String,
    email:   String,
    message: String,
}

impl Feedback {
    /// # Errors
    /// Returns `Error::InvalidInput` naming the first blank field.
    pub fn new(name: &str, email: &str, message: &str) -> Result<Self, Error> {
        Ok(Self {
            name:    required("name", name)?,
            email:   required("email", email)?,
            message: required("message", message)?,
        })
    }
}

fn required(field: &str, value: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_input(format!("{field} is required")));
    }
    Ok(trimmed.to_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    #[display(fmt = "pending")]
    Pending,
    #[display(fmt = "reviewed")]
    Reviewed,
    #[display(fmt = "resolved")]
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id:         String,
    pub name:       String,
    pub email:      String,
    pub message:    String,
    pub status:     FeedbackStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Feedback list persisted under a single key, newest first.
pub struct FeedbackStore<S> {
    store: S,
}

impl<S: KeyValueStore> FeedbackStore<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn load(&self) -> Result<Vec<FeedbackRecord>, StoreError> {
        Ok(load_json(&self.store, FEEDBACK_KEY)?.unwrap_or_default())
    }

    /// Stores `feedback` as a new pending record.
    ///
    /// # Errors
    /// Returns `StoreError` when the stored list is corrupt or storage fails.
    pub fn submit(
        &mut self,
        feedback: Feedback,
        now: DateTime<Utc>,
    ) -> Result<FeedbackRecord, StoreError> {
        let mut records = self.load()?;
        let record = FeedbackRecord {
            id:         now.timestamp_millis().to_string(),
            name:       feedback.name,
            email:      feedback.email,
            message:    feedback.message,
            status:     FeedbackStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        records.insert(0, record.clone());
        save_json(&mut self.store, FEEDBACK_KEY, &records)?;
        tracing::info!(feedback_id = %record.id, "feedback submitted");
        Ok(record)
    }

    /// All records, or only those with `status`.
    ///
    /// # Errors
    /// Returns `StoreError::Decode` if the stored list is corrupt.
    pub fn list(&self, status: Option<FeedbackStatus>) -> Result<Vec<FeedbackRecord>, StoreError> {
        let mut records = self.load()?;
        if let Some(status) = status {
            records.retain(|record| record.status == status);
        }
        Ok(records)
    }

    /// # Errors
    /// Returns `StoreError::Invalid` if no record has `id`.
    pub fn update_status(
        &mut self,
        id: &str,
        status: FeedbackStatus,
        now: DateTime<Utc>,
    ) -> Result<FeedbackRecord, StoreError> {
        let mut records = self.load()?;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| Error::invalid_input(format!("no feedback with id {id:?}")))?;
        record.status = status;
        record.updated_at = now;
        let updated = record.clone();

        save_json(&mut self.store, FEEDBACK_KEY, &records)?;
        tracing::info!(feedback_id = %id, %status, "feedback status updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::storage::MemoryStore;
    use crate::test_utils::at;

    #[test]
    fn test_new_rejects_blank_fields() {
        struct TestCase {
            description: &'static str,
            fields:      (&'static str, &'static str, &'static str),
            field:       &'static str,
        }

        let cases = [
            TestCase {
                description: "empty name",
                fields:      ("", "a@b.c", "hi"),
                field:       "name",
            },
            TestCase {
                description: "whitespace email",
                fields:      ("Ann", "   ", "hi"),
                field:       "email",
            },
            TestCase {
                description: "blank message",
                fields:      ("Ann", "a@b.c", "\n\t"),
                field:       "message",
            },
        ];

        for case in cases {
            let (name, email, message) = case.fields;
            let err = Feedback::new(name, email, message).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "{}", case.description);
            assert!(err.to_string().contains(case.field), "{}", case.description);
        }
    }

    #[test]
    fn test_submit_and_list() {
        let mut store = FeedbackStore::new(MemoryStore::new());
        assert!(store.list(None).unwrap().is_empty());

        let first = store
            .submit(
                Feedback::new(" Ann ", "ann@example.com", "Love it").unwrap(),
                at("2024-01-01T10:00:00Z"),
            )
            .unwrap();
        let second = store
            .submit(
                Feedback::new("Bo", "bo@example.com", "Needs dark mode").unwrap(),
                at("2024-01-02T10:00:00Z"),
            )
            .unwrap();

        assert_eq!(first.name, "Ann");
        assert_eq!(first.status, FeedbackStatus::Pending);
        assert_eq!(first.created_at, first.updated_at);
        assert_eq!(store.list(None).unwrap(), vec![second, first]);
    }

    #[test]
    fn test_update_status_and_filter() {
        let mut store = FeedbackStore::new(MemoryStore::new());
        let record = store
            .submit(
                Feedback::new("Ann", "ann@example.com", "Love it").unwrap(),
                at("2024-01-01T10:00:00Z"),
            )
            .unwrap();
        store
            .submit(
                Feedback::new("Bo", "bo@example.com", "Bug").unwrap(),
                at("2024-01-02T10:00:00Z"),
            )
            .unwrap();

        let later = at("2024-01-03T08:00:00Z");
        let updated = store
            .update_status(&record.id, FeedbackStatus::Resolved, later)
            .unwrap();
        assert_eq!(updated.status, FeedbackStatus::Resolved);
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.created_at, record.created_at);

        let resolved = store.list(Some(FeedbackStatus::Resolved)).unwrap();
        assert_eq!(resolved, vec![updated]);
        assert_eq!(store.list(Some(FeedbackStatus::Pending)).unwrap().len(), 1);
        assert!(store.list(Some(FeedbackStatus::Reviewed)).unwrap().is_empty());
    }

    #[test]
    fn test_update_unknown_id() {
        let mut store = FeedbackStore::new(MemoryStore::new());
        let err = store
            .update_status("42", FeedbackStatus::Reviewed, at("2024-01-01T10:00:00Z"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Invalid(ref e) if e.kind() == ErrorKind::InvalidInput));
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&FeedbackStatus::Reviewed).unwrap(),
            "\"reviewed\""
        );
        assert_eq!(FeedbackStatus::Resolved.to_string(), "resolved");
    }
}
