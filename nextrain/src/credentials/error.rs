//! Credential store error types.

use std::path::PathBuf;

/// Errors from loading or saving the credential file.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// No credential file yet; the user must be asked for one
    #[error("no credentials saved at {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but does not hold a usable credential
    #[error("credentials file {} is invalid: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },

    /// The file exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The credential could not be written
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The platform has no per-user configuration directory
    #[error("could not determine the user configuration directory")]
    NoConfigDir,
}

impl CredentialError {
    /// Whether the caller should fall back to asking the user.
    ///
    /// True for a missing or corrupt file. A corrupt file is left on disk.
    pub fn is_bootstrap_required(&self) -> bool {
        matches!(
            self,
            CredentialError::NotFound { .. } | CredentialError::Corrupt { .. }
        )
    }

    /// The credential file this error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            CredentialError::NotFound { path }
            | CredentialError::Corrupt { path, .. }
            | CredentialError::Read { path, .. }
            | CredentialError::Write { path, .. } => Some(path),
            CredentialError::NoConfigDir => None,
        }
    }
}
