//! Session configuration validation.
//!
//! Turns the loaded [`RaterSettings`] into the key and cookie policy used by
//! the session middleware. Debug builds tolerate missing or odd values with a
//! warning; release builds reject them.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

use crate::settings::RaterSettings;

pub mod fingerprint;

const SESSION_KEY_MIN_LEN: usize = 64;
// `Key::derive_from` panics below this length.
const DERIVE_MIN_LEN: usize = 32;
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings.
    Debug,
    /// Release builds require valid session material.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Inputs needed to build [`SessionSettings`].
#[derive(Debug, Clone)]
pub struct SessionInputs {
    /// Path to the signing key material.
    pub key_file: PathBuf,
    /// Permit a generated key when the file cannot be read.
    pub allow_ephemeral: bool,
    /// Whether cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// Raw `SameSite` value, if configured.
    pub same_site: Option<String>,
}

impl From<&RaterSettings> for SessionInputs {
    fn from(settings: &RaterSettings) -> Self {
        Self {
            key_file: settings.session_key_file(),
            allow_ephemeral: settings.session_allow_ephemeral,
            cookie_secure: settings.cookie_secure(),
            same_site: settings.cookie_same_site.clone(),
        }
    }
}

/// Session settings consumed by the server.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// Configured `SameSite` policy for session cookies.
    pub same_site: SameSite,
    /// Whether `key` was generated rather than read from disk.
    pub ephemeral: bool,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// `SameSite` carried an unknown value.
    #[error("invalid cookie_same_site '{value}'; expected {expected}")]
    InvalidSameSite {
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file exists but is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` requires a secure cookie setting in release builds.
    #[error("cookie_same_site=None requires cookie_secure=true")]
    InsecureSameSiteNone,
}

/// Validate session inputs for the given build mode.
///
/// # Examples
/// ```
/// use rating_backend::inbound::http::session_config::{
///     BuildMode, SessionInputs, session_settings,
/// };
///
/// let inputs = SessionInputs {
///     key_file: "/nonexistent/session_key".into(),
///     allow_ephemeral: true,
///     cookie_secure: true,
///     same_site: None,
/// };
/// let settings = session_settings(&inputs, BuildMode::Debug).expect("debug tolerates");
/// assert!(settings.ephemeral);
/// ```
pub fn session_settings(
    inputs: &SessionInputs,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let same_site = same_site(inputs, mode)?;
    let (key, ephemeral) = session_key(inputs, mode)?;
    Ok(SessionSettings {
        key,
        cookie_secure: inputs.cookie_secure,
        same_site,
        ephemeral,
    })
}

fn same_site(inputs: &SessionInputs, mode: BuildMode) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = inputs.same_site.as_deref() else {
        return Ok(default_same_site);
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if inputs.cookie_secure => Ok(SameSite::None),
        "none" if mode.is_debug() => {
            warn!("cookie_same_site=None without a secure cookie; browsers may reject it");
            Ok(SameSite::None)
        }
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ if mode.is_debug() => {
            warn!(value, "invalid cookie_same_site, using default");
            Ok(default_same_site)
        }
        _ => Err(SessionConfigError::InvalidSameSite {
            value: value.to_owned(),
            expected: SAMESITE_EXPECTED,
        }),
    }
}

fn session_key(inputs: &SessionInputs, mode: BuildMode) -> Result<(Key, bool), SessionConfigError> {
    let path = &inputs.key_file;
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path: path.clone(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            if length < DERIVE_MIN_LEN {
                bytes.zeroize();
                warn!(
                    path = %path.display(),
                    length,
                    "session key too short to derive from; using temporary key"
                );
                return Ok((Key::generate(), true));
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok((key, false))
        }
        Err(error) => {
            if mode.is_debug() || inputs.allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key; sessions will not survive a restart"
                );
                Ok((Key::generate(), true))
            } else {
                Err(SessionConfigError::KeyRead {
                    path: path.clone(),
                    source: error,
                })
            }
        }
    }
}
