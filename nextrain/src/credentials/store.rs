//! Credential file persistence.
//!
//! The credential lives in a single JSON file, `auth.json`, inside the
//! per-user configuration directory:
//! - Linux: `~/.config/backwardspy/nextrain/auth.json`
//! - macOS: `~/Library/Application Support/backwardspy/nextrain/auth.json`
//! - Windows: `%APPDATA%\backwardspy\nextrain\auth.json`
//!
//! There is no locking. Two concurrent runs may race on the file.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::CredentialError;

const VENDOR: &str = "backwardspy";
const APP_NAME: &str = "nextrain";
const AUTH_FILE: &str = "auth.json";

/// App ID and key issued by the Transport API developer portal.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "AppID", default)]
    pub app_id: String,
    #[serde(rename = "Key", default)]
    pub key: String,
}

impl Credential {
    pub fn new(app_id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            key: key.into(),
        }
    }

    /// Both fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.app_id.is_empty() && !self.key.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("app_id", &self.app_id)
            .field("key", &"***")
            .finish()
    }
}

/// Reads and writes the credential file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store inside the given configuration root, scoped by vendor and app name.
    pub fn in_config_dir(config_dir: &Path) -> Self {
        Self::at(config_dir.join(VENDOR).join(APP_NAME).join(AUTH_FILE))
    }

    /// Store in the current user's configuration directory.
    pub fn user_default() -> Result<Self, CredentialError> {
        let config_dir = dirs::config_dir().ok_or(CredentialError::NoConfigDir)?;
        Ok(Self::in_config_dir(&config_dir))
    }

    /// Get the credential file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved credential.
    ///
    /// A missing file is `NotFound`. A file that is not a JSON object with
    /// non-empty `AppID` and `Key` is `Corrupt` and is left untouched.
    pub fn load(&self) -> Result<Credential, CredentialError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                CredentialError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                CredentialError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let corrupt = |e: serde_json::Error| CredentialError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        };

        // Derived `Deserialize` also accepts a JSON array; only an object is valid.
        let object: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&contents).map_err(corrupt)?;
        let credential: Credential =
            serde_json::from_value(serde_json::Value::Object(object)).map_err(corrupt)?;

        if !credential.is_complete() {
            return Err(CredentialError::Corrupt {
                path: self.path.clone(),
                message: "AppID and Key must both be set".to_string(),
            });
        }

        debug!(path = %self.path.display(), "loaded credentials");
        Ok(credential)
    }

    /// Save the credential, creating parent directories if they don't exist.
    ///
    /// On Unix the file is written owner read/write only.
    pub fn save(&self, credential: &Credential) -> Result<(), CredentialError> {
        let write_error = |source: std::io::Error| CredentialError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }

        let json = serde_json::to_vec(credential).map_err(|e| write_error(e.into()))?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(write_error)?;
        std::io::Write::write_all(&mut file, &json).map_err(write_error)?;

        debug!(path = %self.path.display(), "saved credentials");
        Ok(())
    }
}
