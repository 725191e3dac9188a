//! Transaction signing.

use serde_json::{Map, Value, json};

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{
    ParameterSpec, Parameters, SwapRule, ensure_required, expect_string, mass_assign,
};

/// Sign a prebuilt transaction.
///
/// The signing key can be supplied three ways: a raw private key
/// (`prv`), or a wallet passphrase together with an encrypted keychain
/// (`keychain`, or its `key` alias). The swap groups below encode those
/// alternatives, so any complete combination passes the requirement
/// check.
///
/// `POST /wallet/{walletId}/signtx`
pub struct SignTransaction {
    api: ApiHandle,
    prv: Option<String>,
    key: Option<Value>,
    wallet_id: Option<String>,
    keychain: Option<Value>,
    tx_prebuild: Option<Value>,
    wallet_passphrase: Option<String>,
    cold_derivation_seed: Option<String>,
}

const SPEC: ParameterSpec = ParameterSpec {
    required: &[
        "prv",
        "key",
        "walletId",
        "keychain",
        "txPrebuild",
        "walletPassphrase",
    ],
    optional: &["coldDerivationSeed"],
    swaps: &[
        SwapRule {
            name: "prv",
            alternatives: &[&["walletPassphrase", "keychain"], &["walletPassphrase", "key"]],
        },
        SwapRule {
            name: "walletPassphrase",
            alternatives: &[&["prv"]],
        },
        SwapRule {
            name: "key",
            alternatives: &[&["keychain"], &["prv"]],
        },
        SwapRule {
            name: "keychain",
            alternatives: &[&["prv"], &["key"]],
        },
    ],
};

impl SignTransaction {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self {
            api,
            prv: None,
            key: None,
            wallet_id: None,
            keychain: None,
            tx_prebuild: None,
            wallet_passphrase: None,
            cold_derivation_seed: None,
        }
    }

    pub fn wallet(mut self, wallet_id: impl Into<String>) -> Self {
        self.wallet_id = Some(wallet_id.into());
        self
    }

    /// Sign with a raw private key instead of an encrypted keychain.
    pub fn prv(mut self, prv: impl Into<String>) -> Self {
        self.prv = Some(prv.into());
        self
    }

    /// The user keychain, carrying an `encryptedPrv` property.
    pub fn keychain(mut self, keychain: Value) -> Self {
        self.keychain = Some(keychain);
        self
    }

    /// Alias for [`Self::keychain`], kept for parity with the API docs.
    pub fn key(mut self, key: Value) -> Self {
        self.key = Some(key);
        self
    }

    /// The transaction description returned by the prebuild operation.
    pub fn tx_prebuild(mut self, tx_prebuild: Value) -> Self {
        self.tx_prebuild = Some(tx_prebuild);
        self
    }

    /// Passphrase that decrypts the keychain's `encryptedPrv`.
    pub fn wallet_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.wallet_passphrase = Some(passphrase.into());
        self
    }

    /// Seed used to derive the signing key on cold wallets.
    pub fn cold_derivation_seed(mut self, seed: impl Into<String>) -> Self {
        self.cold_derivation_seed = Some(seed.into());
        self
    }

    pub fn with_params(mut self, entries: &Map<String, Value>) -> Result<Self, BitgoError> {
        mass_assign(&mut self, entries)?;
        Ok(self)
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        ensure_required(&self)?;
        self.api.post("/wallet/{walletId}/signtx", &self).await
    }
}

impl Parameters for SignTransaction {
    fn spec(&self) -> &'static ParameterSpec {
        &SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "prv" => Ok(json!(self.prv)),
            "key" => Ok(json!(self.key)),
            "walletId" => Ok(json!(self.wallet_id)),
            "keychain" => Ok(json!(self.keychain)),
            "txPrebuild" => Ok(json!(self.tx_prebuild)),
            "walletPassphrase" => Ok(json!(self.wallet_passphrase)),
            "coldDerivationSeed" => Ok(json!(self.cold_derivation_seed)),
            _ => Err(BitgoError::unknown_parameter("SignTransaction", name)),
        }
    }

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
        match name {
            "prv" => self.prv = Some(expect_string(name, value)?),
            "key" => self.key = Some(value.clone()),
            "walletId" => self.wallet_id = Some(expect_string(name, value)?),
            "keychain" => self.keychain = Some(value.clone()),
            "txPrebuild" => self.tx_prebuild = Some(value.clone()),
            "walletPassphrase" => self.wallet_passphrase = Some(expect_string(name, value)?),
            "coldDerivationSeed" => self.cold_derivation_seed = Some(expect_string(name, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
