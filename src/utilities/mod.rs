//! Keychain and local-encryption utilities.
//!
//! These ride on a BitGo Express instance. Encryption endpoints are not
//! coin-scoped; keychain endpoints are.

mod create_keychain;
mod decrypt;
mod encrypt;
mod keychains;

pub use create_keychain::CreateKeychain;
pub use decrypt::Decrypt;
pub use encrypt::Encrypt;
pub use keychains::Keychains;

use crate::execution::http::ApiHandle;

/// Entry point for the utility operations of one coin client.
#[derive(Clone)]
pub struct Utilities {
    api: ApiHandle,
}

impl Utilities {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self { api }
    }

    /// Encrypt data with a password, without touching the network
    /// beyond the local Express instance.
    pub fn encrypt(&self) -> Encrypt {
        Encrypt::new(self.api.unscoped())
    }

    /// Decrypt data previously encrypted with [`Self::encrypt`].
    pub fn decrypt(&self) -> Decrypt {
        Decrypt::new(self.api.unscoped())
    }

    /// Look up keychains for this coin.
    pub fn keychains(&self) -> Keychains {
        Keychains::new(self.api.clone())
    }

    /// Generate a keychain locally on the Express instance.
    pub fn create_keychain(&self) -> CreateKeychain {
        CreateKeychain::new(self.api.clone())
    }
}
