//! Transport API credentials: persistence and first-run bootstrap.
//!
//! A run first tries [`CredentialStore::load`]. A missing or corrupt file
//! means the user is asked with [`prompt_for_credentials`]; when no file
//! existed the answer is written back with [`CredentialStore::save`].
//! [`load_or_bootstrap`] ties these together.

mod bootstrap;
mod error;
mod prompt;
mod store;

pub use bootstrap::load_or_bootstrap;
pub use error::CredentialError;
pub use prompt::prompt_for_credentials;
pub use store::{Credential, CredentialStore};
