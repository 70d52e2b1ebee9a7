//! Load saved credentials, falling back to asking the user.

use std::io;

use tracing::warn;

use super::error::CredentialError;
use super::store::{Credential, CredentialStore};

/// Load the credential from `store`, or obtain one from `ask`.
///
/// - A saved credential is returned as-is and `ask` is not called.
/// - With no file, the answer from `ask` is saved. A failed save is only
///   logged: the credential is still good for this run.
/// - A corrupt or unreadable file is reported with its path and left on
///   disk untouched; the answer from `ask` is used for this run only.
/// - With no store at all, the answer is used for this run only.
pub fn load_or_bootstrap<F>(store: Option<&CredentialStore>, ask: F) -> io::Result<Credential>
where
    F: FnOnce() -> io::Result<Credential>,
{
    let Some(store) = store else {
        return ask();
    };

    match store.load() {
        Ok(credential) => Ok(credential),
        Err(CredentialError::NotFound { .. }) => {
            let credential = ask()?;
            if let Err(e) = store.save(&credential) {
                warn!(
                    error = %e,
                    "failed to persist API credentials; you will be asked again next time"
                );
            }
            Ok(credential)
        }
        Err(e) => {
            warn!(
                path = %store.path().display(),
                error = %e,
                "failed to load API credentials. Correct the issue or delete the file and try again"
            );
            ask()
        }
    }
}
