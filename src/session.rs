//! Mock sign-in session kept in the key-value store.
//!
//! There is no credential check: signing in stores a demo profile for the
//! given email, and signing up stores the submitted profile. The birth-date
//! sign is classified with whichever [`ZodiacClassifier`] the caller supplies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::USER_KEY;
use crate::storage::{KeyValueStore, StoreError, load_json_lenient, save_json};
use crate::{CalendarDate, Error, ZodiacClassifier, ZodiacSign};

/// Birth date given to accounts created through [`SessionStore::sign_in`].
const DEMO_BIRTH_DATE: (u16, u8, u8) = (1990, 1, 1);
const DEMO_USER_ID: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id:            String,
    pub email:         String,
    pub name:          String,
    pub date_of_birth: CalendarDate,
    pub zodiac_sign:   ZodiacSign,
    pub created_at:    DateTime<Utc>,
}

/// Sign-up form contents. When `zodiac_sign` is `None` it is derived from
/// the birth date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name:          String,
    pub email:         String,
    pub date_of_birth: CalendarDate,
    pub zodiac_sign:   Option<ZodiacSign>,
}

impl Registration {
    fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_input("name is required"));
        }
        validate_email(&self.email)
    }
}

fn validate_email(email: &str) -> Result<(), Error> {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(Error::invalid_input(format!("{email:?} is not an email address"))),
    }
}

pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// The signed-in user. A stored profile that cannot be decoded is
    /// logged and treated as signed out.
    ///
    /// # Errors
    /// Returns `StoreError::Backend` when storage fails.
    pub fn current_user(&self) -> Result<Option<User>, StoreError> {
        load_json_lenient(&self.store, USER_KEY)
    }

    /// Signs in with a demo profile named after the email's local part.
    ///
    /// # Errors
    /// Returns `StoreError::Invalid` for a malformed email.
    pub fn sign_in(
        &mut self,
        email: &str,
        classifier: &ZodiacClassifier,
        now: DateTime<Utc>,
    ) -> Result<User, StoreError> {
        validate_email(email)?;
        let email = email.trim();
        let name = email.split('@').next().unwrap_or(email).to_owned();
        let date_of_birth = CalendarDate::try_from(DEMO_BIRTH_DATE).map_err(Error::from)?;

        let user = User {
            id: DEMO_USER_ID.to_owned(),
            email: email.to_owned(),
            name,
            date_of_birth,
            zodiac_sign: classifier.classify(date_of_birth),
            created_at: now,
        };
        save_json(&mut self.store, USER_KEY, &user)?;
        tracing::info!(user_id = %user.id, "signed in");
        Ok(user)
    }

    /// # Errors
    /// Returns `StoreError::Invalid` when the name is blank or the email is malformed.
    pub fn sign_up(
        &mut self,
        registration: Registration,
        classifier: &ZodiacClassifier,
        now: DateTime<Utc>,
    ) -> Result<User, StoreError> {
        registration.validate()?;

        let zodiac_sign = registration
            .zodiac_sign
            .unwrap_or_else(|| classifier.classify(registration.date_of_birth));
        let user = User {
            id: now.timestamp_millis().to_string(),
            email: registration.email.trim().to_owned(),
            name: registration.name.trim().to_owned(),
            date_of_birth: registration.date_of_birth,
            zodiac_sign,
            created_at: now,
        };
        save_json(&mut self.store, USER_KEY, &user)?;
        tracing::info!(user_id = %user.id, sign = %user.zodiac_sign, "signed up");
        Ok(user)
    }

    /// # Errors
    /// Returns `StoreError::Backend` when storage fails.
    pub fn sign_out(&mut self) -> Result<(), StoreError> {
        self.store.remove(USER_KEY)?;
        tracing::info!("signed out");
        Ok(())
    }
}
