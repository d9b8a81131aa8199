//! Sign-up and sign-in workflow.
//!
//! Validates the three user-supplied fields, checks email uniqueness through
//! the access layer, hashes the password, and writes the user record. Sign-in
//! looks the record up again and verifies the stored hash. Every failure is
//! reduced to one of a fixed set of user-facing messages.
//!
//! The uniqueness check is a query followed by an insert. With
//! `key_by_email` off, two concurrent sign-ups for the same address can both
//! pass the check. With it on, the record is keyed by the normalized email
//! and the insert itself rejects the second writer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::credentials::CredentialHasher;
use crate::error::SignupError;
use crate::manager::DatabaseManager;
use crate::storage::{DocumentBackend, Fields, FilterOp};

/// Default collection holding user records.
pub const DEFAULT_USERS_COLLECTION: &str = "users";

/// Field holding the stored password hash.
pub const PASSWORD_HASH_FIELD: &str = "passwordHash";

/// Sign-up configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignUpPolicy {
    /// Collection user records are written to
    pub collection: String,

    /// Key each user record by its normalized email
    pub key_by_email: bool,
}

impl Default for SignUpPolicy {
    fn default() -> Self {
        Self {
            collection: DEFAULT_USERS_COLLECTION.to_string(),
            key_by_email: false,
        }
    }
}

/// Result category of a sign-up attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignUpStatus {
    Registered,
    MissingFields,
    InvalidEmail,
    EmailTaken,
    LookupFailed,
    WriteFailed,
}

impl SignUpStatus {
    /// User-facing message for this status.
    pub fn message(&self) -> &'static str {
        match self {
            SignUpStatus::Registered => "Sign-up successful!",
            SignUpStatus::MissingFields => "All fields are required",
            SignUpStatus::InvalidEmail => "Invalid email address",
            SignUpStatus::EmailTaken => "Email already registered",
            SignUpStatus::LookupFailed => "Error checking email. Please try again.",
            SignUpStatus::WriteFailed => "Error signing up. Please try again.",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SignUpStatus::Registered)
    }
}

/// What the UI receives from a sign-up attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpOutcome {
    pub success: bool,
    pub message: String,
    pub status: SignUpStatus,
    /// Identifier of the new user record, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl SignUpOutcome {
    /// Failed outcome for `status`.
    pub fn rejected(status: SignUpStatus) -> Self {
        Self {
            success: false,
            message: status.message().to_string(),
            status,
            user_id: None,
        }
    }

    fn registered(user_id: String) -> Self {
        let status = SignUpStatus::Registered;
        Self {
            success: true,
            message: status.message().to_string(),
            status,
            user_id: Some(user_id),
        }
    }
}

/// Result category of a sign-in attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignInStatus {
    SignedIn,
    MissingFields,
    InvalidCredentials,
    LookupFailed,
}

impl SignInStatus {
    /// User-facing message for this status.
    pub fn message(&self) -> &'static str {
        match self {
            SignInStatus::SignedIn => "Sign-in successful!",
            SignInStatus::MissingFields => "All fields are required",
            SignInStatus::InvalidCredentials => "Invalid email or password",
            SignInStatus::LookupFailed => "Error signing in. Please try again.",
        }
    }
}

/// What the UI receives from a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInOutcome {
    pub success: bool,
    pub message: String,
    pub status: SignInStatus,
    /// Identifier of the matched user record, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl SignInOutcome {
    /// Failed outcome for `status`.
    pub fn rejected(status: SignInStatus) -> Self {
        Self {
            success: false,
            message: status.message().to_string(),
            status,
            user_id: None,
        }
    }

    fn signed_in(user_id: String) -> Self {
        let status = SignInStatus::SignedIn;
        Self {
            success: true,
            message: status.message().to_string(),
            status,
            user_id: Some(user_id),
        }
    }
}

/// Normalized form of an email: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Record identifier for an email when records are keyed by email.
///
/// The normalized email with `%` and `/` percent-encoded, so any address
/// that passes the input checks is a valid document ID.
pub fn email_key(email: &str) -> String {
    let normalized = normalize_email(email);
    let mut key = String::with_capacity(normalized.len());
    for ch in normalized.chars() {
        match ch {
            '%' => key.push_str("%25"),
            '/' => key.push_str("%2F"),
            _ => key.push(ch),
        }
    }
    key
}

/// Sign-up input checks. Touches no store, so front ends can run them
/// before opening one.
pub fn check_sign_up_input(
    username: &str,
    email: &str,
    password: &str,
) -> std::result::Result<(), SignUpStatus> {
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(SignUpStatus::MissingFields);
    }
    if !email.contains('@') {
        return Err(SignUpStatus::InvalidEmail);
    }
    Ok(())
}

/// User registration on top of the store access layer.
pub struct SignUpWorkflow<B: DocumentBackend> {
    store: DatabaseManager<B>,
    policy: SignUpPolicy,
    hasher: CredentialHasher,
}

impl<B: DocumentBackend> SignUpWorkflow<B> {
    pub fn new(store: DatabaseManager<B>, policy: SignUpPolicy, hasher: CredentialHasher) -> Self {
        Self {
            store,
            policy,
            hasher,
        }
    }

    /// The access layer this workflow writes through.
    pub fn store(&self) -> &DatabaseManager<B> {
        &self.store
    }

    pub fn policy(&self) -> &SignUpPolicy {
        &self.policy
    }

    /// Register a user.
    ///
    /// Input checks run before any store call; the store sees exactly one
    /// query and, if the email is free, exactly one write.
    pub fn sign_up(&self, username: &str, email: &str, password: &str) -> SignUpOutcome {
        if let Err(status) = check_sign_up_input(username, email, password) {
            return SignUpOutcome::rejected(status);
        }

        let collection = self.policy.collection.as_str();

        tracing::debug!(collection, "checking email existence");
        match self.store.query_collection(
            collection,
            "email",
            FilterOp::Eq,
            Value::String(email.to_string()),
        ) {
            Ok(existing) if !existing.is_empty() => {
                tracing::info!(collection, "sign-up rejected: email already registered");
                return SignUpOutcome::rejected(SignUpStatus::EmailTaken);
            }
            Ok(_) => {}
            Err(err) => {
                tracing::error!(error = %err, "error checking email existence");
                return SignUpOutcome::rejected(SignUpStatus::LookupFailed);
            }
        }

        let password_hash = match self.hasher.hash(password) {
            Ok(hash) => hash,
            Err(err) => {
                tracing::error!(error = %err, "failed to hash password");
                return SignUpOutcome::rejected(SignUpStatus::WriteFailed);
            }
        };

        let mut record = Fields::new();
        record.insert("username".to_string(), Value::String(username.to_string()));
        record.insert("email".to_string(), Value::String(email.to_string()));
        record.insert(PASSWORD_HASH_FIELD.to_string(), Value::String(password_hash));

        tracing::debug!(collection, "adding user to database");
        let written = if self.policy.key_by_email {
            let key = email_key(email);
            self.store
                .add_document_with_id(collection, &key, record)
                .map(|()| key)
        } else {
            self.store.add_document(collection, record)
        };

        match written {
            Ok(user_id) => SignUpOutcome::registered(user_id),
            Err(SignupError::AlreadyExists(_)) => {
                tracing::info!(collection, "sign-up rejected at write: email already registered");
                SignUpOutcome::rejected(SignUpStatus::EmailTaken)
            }
            Err(err) => {
                tracing::error!(error = %err, "error adding user to database");
                SignUpOutcome::rejected(SignUpStatus::WriteFailed)
            }
        }
    }

    /// Check an email and password against the stored user records.
    ///
    /// Looks up the email the same way `sign_up` stores it: by record key
    /// under `key_by_email`, otherwise by an `email ==` query. An unknown
    /// email and a wrong password give the same outcome.
    pub fn sign_in(&self, email: &str, password: &str) -> SignInOutcome {
        if email.is_empty() || password.is_empty() {
            return SignInOutcome::rejected(SignInStatus::MissingFields);
        }

        let collection = self.policy.collection.as_str();

        tracing::debug!(collection, "looking up user for sign-in");
        let found = if self.policy.key_by_email {
            let key = email_key(email);
            if key.is_empty() {
                Ok(Vec::new())
            } else {
                self.store
                    .get_document(collection, &key)
                    .map(|doc| doc.into_iter().collect::<Vec<_>>())
            }
        } else {
            self.store.query_collection(
                collection,
                "email",
                FilterOp::Eq,
                Value::String(email.to_string()),
            )
        };

        let candidates = match found {
            Ok(docs) => docs,
            Err(err) => {
                tracing::error!(error = %err, "error looking up user for sign-in");
                return SignInOutcome::rejected(SignInStatus::LookupFailed);
            }
        };

        for doc in &candidates {
            let Some(hash) = doc.get_str(PASSWORD_HASH_FIELD) else {
                continue;
            };
            match self.hasher.verify(password, hash) {
                Ok(true) => {
                    tracing::info!(collection, id = %doc.id, "user signed in");
                    return SignInOutcome::signed_in(doc.id.clone());
                }
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(collection, id = %doc.id, error = %err, "unreadable password hash");
                }
            }
        }

        tracing::info!(collection, "sign-in rejected: invalid credentials");
        SignInOutcome::rejected(SignInStatus::InvalidCredentials)
    }
}
