//! Wallet creation.

use serde_json::{Map, Value, json};

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{ParameterSpec, Parameters, ensure_required, expect_bool, expect_string, mass_assign};

/// Create a wallet. The server generates the user, backup, and BitGo
/// keychains, encrypting the user key with the supplied passphrase; a
/// caller-provided `userKey` or `backupXpub` overrides generation.
///
/// `POST /wallet/generate`
pub struct GenerateWallet {
    api: ApiHandle,
    label: Option<String>,
    passphrase: Option<String>,
    user_key: Option<String>,
    backup_xpub: Option<String>,
    backup_xpub_provider: Option<String>,
    enterprise: Option<String>,
    disable_transaction_notifications: Option<bool>,
}

const SPEC: ParameterSpec = ParameterSpec {
    required: &["label", "passphrase"],
    optional: &[
        "userKey",
        "backupXpub",
        "backupXpubProvider",
        "enterprise",
        "disableTransactionNotifications",
    ],
    swaps: &[],
};

impl GenerateWallet {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self {
            api,
            label: None,
            passphrase: None,
            user_key: None,
            backup_xpub: None,
            backup_xpub_provider: None,
            enterprise: None,
            disable_transaction_notifications: None,
        }
    }

    /// Human-readable wallet name.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Passphrase that will encrypt the user keychain.
    pub fn passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    /// Bring-your-own user key (xpub), skipping server generation.
    pub fn user_key(mut self, user_key: impl Into<String>) -> Self {
        self.user_key = Some(user_key.into());
        self
    }

    pub fn backup_xpub(mut self, backup_xpub: impl Into<String>) -> Self {
        self.backup_xpub = Some(backup_xpub.into());
        self
    }

    /// Named backup-key service (e.g. a KRS provider).
    pub fn backup_xpub_provider(mut self, provider: impl Into<String>) -> Self {
        self.backup_xpub_provider = Some(provider.into());
        self
    }

    pub fn enterprise(mut self, enterprise: impl Into<String>) -> Self {
        self.enterprise = Some(enterprise.into());
        self
    }

    pub fn disable_transaction_notifications(mut self, disable: bool) -> Self {
        self.disable_transaction_notifications = Some(disable);
        self
    }

    pub fn with_params(mut self, entries: &Map<String, Value>) -> Result<Self, BitgoError> {
        mass_assign(&mut self, entries)?;
        Ok(self)
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        ensure_required(&self)?;
        self.api.post("/wallet/generate", &self).await
    }
}

impl Parameters for GenerateWallet {
    fn spec(&self) -> &'static ParameterSpec {
        &SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "label" => Ok(json!(self.label)),
            "passphrase" => Ok(json!(self.passphrase)),
            "userKey" => Ok(json!(self.user_key)),
            "backupXpub" => Ok(json!(self.backup_xpub)),
            "backupXpubProvider" => Ok(json!(self.backup_xpub_provider)),
            "enterprise" => Ok(json!(self.enterprise)),
            "disableTransactionNotifications" => {
                Ok(json!(self.disable_transaction_notifications))
            }
            _ => Err(BitgoError::unknown_parameter("GenerateWallet", name)),
        }
    }

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
        match name {
            "label" => self.label = Some(expect_string(name, value)?),
            "passphrase" => self.passphrase = Some(expect_string(name, value)?),
            "userKey" => self.user_key = Some(expect_string(name, value)?),
            "backupXpub" => self.backup_xpub = Some(expect_string(name, value)?),
            "backupXpubProvider" => self.backup_xpub_provider = Some(expect_string(name, value)?),
            "enterprise" => self.enterprise = Some(expect_string(name, value)?),
            "disableTransactionNotifications" => {
                self.disable_transaction_notifications = Some(expect_bool(name, value)?)
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}
