//! Authentication primitives: login credentials and password digests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;
use std::sync::OnceLock;

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace so the digest comparison sees exactly what was typed.
///
/// # Examples
/// ```
/// use rating_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" teacher1 ", "secret").unwrap();
/// assert_eq!(creds.username(), "teacher1");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Errors raised while producing or parsing a password digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordDigestError {
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("stored password digest is malformed: {message}")]
    Malformed { message: String },
    #[error("failed to hash password: {message}")]
    Hashing { message: String },
}

/// Salted Argon2id digest in PHC string form (`$argon2id$v=19$...`).
///
/// Verification reads the algorithm parameters from the stored string, so
/// digests produced with different cost settings remain verifiable.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash `password` with a fresh random salt and default Argon2id costs.
    pub fn hash(password: &str) -> Result<Self, PasswordDigestError> {
        Self::hash_with(&Argon2::default(), password)
    }

    /// Hash `password` with an explicitly configured hasher.
    pub fn hash_with(hasher: &Argon2<'_>, password: &str) -> Result<Self, PasswordDigestError> {
        if password.is_empty() {
            return Err(PasswordDigestError::EmptyPassword);
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = hasher
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordDigestError::Hashing {
                message: err.to_string(),
            })?;
        Ok(Self(hash.to_string()))
    }

    /// Wrap a digest loaded from storage after checking it parses.
    pub fn parse(encoded: impl Into<String>) -> Result<Self, PasswordDigestError> {
        let encoded = encoded.into();
        PasswordHash::new(&encoded).map_err(|err| PasswordDigestError::Malformed {
            message: err.to_string(),
        })?;
        Ok(Self(encoded))
    }

    /// Whether `password` matches this digest.
    pub fn verify(&self, password: &str) -> bool {
        match PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Burn the same verification cost as a real check against a digest
    /// nobody can match. Used when the username does not exist.
    pub fn verify_dummy(password: &str) {
        static DUMMY: OnceLock<Option<PasswordDigest>> = OnceLock::new();
        let dummy = DUMMY.get_or_init(|| PasswordDigest::hash("dummy password for timing").ok());
        if let Some(digest) = dummy {
            let _ = digest.verify(password);
        }
    }

    /// PHC-encoded digest suitable for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}
