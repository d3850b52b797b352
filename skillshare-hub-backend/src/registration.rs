//! Sign-up form payload, its validation and password hashing.

use core::fmt;

use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::Argon2;
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use skillshare_hub_database::models::{NewUser, Role};
use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;
/// Width of the `name` and `email` columns.
pub const MAX_FIELD_LENGTH: usize = 255;

/// Body of `POST /register`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    #[serde(default)]
    pub accept_terms: bool,
}

impl fmt::Debug for RegisterPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterPayload")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("accept_terms", &self.accept_terms)
            .finish_non_exhaustive()
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Name is required.")]
    MissingName,
    #[error("Name must be at most 255 characters.")]
    NameTooLong,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Email must be at most 255 characters.")]
    EmailTooLong,
    #[error("Password must be at least 8 characters.")]
    PasswordTooShort,
    #[error("Password must be at most 128 characters.")]
    PasswordTooLong,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Please accept the terms and conditions.")]
    TermsNotAccepted,
}

/// A payload that passed every check, with name and email normalized.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub role: Role,
    password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl RegisterPayload {
    /// The checks the sign-up page runs before submitting.
    pub fn check_confirmation(&self) -> Result<(), RegistrationError> {
        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }
        if !self.accept_terms {
            return Err(RegistrationError::TermsNotAccepted);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<Registration, RegistrationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RegistrationError::MissingName);
        }
        if name.chars().count() > MAX_FIELD_LENGTH {
            return Err(RegistrationError::NameTooLong);
        }
        let email = self.email.trim().to_lowercase();
        if email.chars().count() > MAX_FIELD_LENGTH {
            return Err(RegistrationError::EmailTooLong);
        }
        if !is_email(&email) {
            return Err(RegistrationError::InvalidEmail);
        }
        let password_length = self.password.chars().count();
        if password_length < MIN_PASSWORD_LENGTH {
            return Err(RegistrationError::PasswordTooShort);
        }
        if password_length > MAX_PASSWORD_LENGTH {
            return Err(RegistrationError::PasswordTooLong);
        }
        self.check_confirmation()?;
        Ok(Registration {
            name: name.to_owned(),
            email,
            role: self.role,
            password: self.password.clone(),
        })
    }
}

fn is_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
        && !email.chars().any(char::is_whitespace)
}

impl Registration {
    /// Hashes the password. The plain text is dropped with `self`.
    ///
    /// Argon2 is slow on purpose, call this off the async workers.
    pub fn into_new_user(self) -> Result<NewUser, password_hash::Error> {
        Ok(NewUser {
            password_hash: hash_password(&self.password)?,
            name: self.name,
            email: self.email,
            role: self.role,
        })
    }
}

/// Argon2id with a random salt, encoded as a PHC string (`$argon2id$v=19$...`).
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut thread_rng());
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Unparseable hashes never verify.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored).is_ok_and(|hash| {
        Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok()
    })
}
