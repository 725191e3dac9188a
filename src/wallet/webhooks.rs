//! Wallet webhook management: list, register, remove.
//!
//! Callback URLs and event types are validated at assignment time, so a
//! bad value fails the moment it is set rather than at dispatch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use url::Url;

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{
    ParameterSpec, Parameters, ensure_required, expect_bool, expect_string, expect_u64, mass_assign,
};

/// Event kinds a webhook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookType {
    Transfer,
    PendingApproval,
}

impl WebhookType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::PendingApproval => "pendingapproval",
        }
    }
}

impl fmt::Display for WebhookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookType {
    type Err = BitgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transfer" => Ok(Self::Transfer),
            "pendingapproval" => Ok(Self::PendingApproval),
            other => Err(BitgoError::InvalidRequest(format!(
                "the type field can only be 'transfer' or 'pendingapproval': {other}"
            ))),
        }
    }
}

fn parse_callback_url(raw: &str) -> Result<Url, BitgoError> {
    Url::parse(raw).map_err(|_| {
        BitgoError::InvalidRequest(format!("the url field can only accept a valid URL: {raw}"))
    })
}

/// List the webhooks registered on a wallet.
///
/// `GET /wallet/{walletId}/webhooks`
pub struct Webhooks {
    api: ApiHandle,
    wallet_id: Option<String>,
    all_tokens: Option<bool>,
}

const WEBHOOKS_SPEC: ParameterSpec = ParameterSpec {
    required: &["walletId"],
    optional: &["allTokens"],
    swaps: &[],
};

impl Webhooks {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self {
            api,
            wallet_id: None,
            all_tokens: None,
        }
    }

    pub fn wallet(mut self, wallet_id: impl Into<String>) -> Self {
        self.wallet_id = Some(wallet_id.into());
        self
    }

    /// Include token webhooks. Only meaningful for eth/teth wallets.
    pub fn all_tokens(mut self, all_tokens: bool) -> Self {
        self.all_tokens = Some(all_tokens);
        self
    }

    /// Start registering a webhook on the same wallet.
    pub fn add(&self) -> AddWebhook {
        let mut builder = AddWebhook::new(self.api.clone());
        builder.wallet_id = self.wallet_id.clone();
        builder
    }

    /// Start removing a webhook from the same wallet.
    pub fn remove(&self) -> RemoveWebhook {
        let mut builder = RemoveWebhook::new(self.api.clone());
        builder.wallet_id = self.wallet_id.clone();
        builder
    }

    pub fn with_params(mut self, entries: &Map<String, Value>) -> Result<Self, BitgoError> {
        mass_assign(&mut self, entries)?;
        Ok(self)
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        ensure_required(&self)?;
        self.api.get("/wallet/{walletId}/webhooks", &self).await
    }
}

impl Parameters for Webhooks {
    fn spec(&self) -> &'static ParameterSpec {
        &WEBHOOKS_SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "walletId" => Ok(json!(self.wallet_id)),
            "allTokens" => Ok(json!(self.all_tokens)),
            _ => Err(BitgoError::unknown_parameter("Webhooks", name)),
        }
    }

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
        match name {
            "walletId" => self.wallet_id = Some(expect_string(name, value)?),
            "allTokens" => self.all_tokens = Some(expect_bool(name, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Register a callback URL on a wallet.
///
/// `POST /wallet/{walletId}/webhooks`
#[derive(Debug)]
pub struct AddWebhook {
    api: ApiHandle,
    wallet_id: Option<String>,
    url: Option<Url>,
    webhook_type: Option<WebhookType>,
    num_confirmations: Option<u64>,
}

const ADD_WEBHOOK_SPEC: ParameterSpec = ParameterSpec {
    required: &["walletId", "url", "type"],
    optional: &["numConfirmations"],
    swaps: &[],
};

impl AddWebhook {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self {
            api,
            wallet_id: None,
            url: None,
            webhook_type: None,
            num_confirmations: None,
        }
    }

    pub fn wallet(mut self, wallet_id: impl Into<String>) -> Self {
        self.wallet_id = Some(wallet_id.into());
        self
    }

    /// Set the callback URL. Rejects anything that does not parse as a
    /// well-formed URL.
    pub fn url(mut self, url: impl AsRef<str>) -> Result<Self, BitgoError> {
        self.url = Some(parse_callback_url(url.as_ref())?);
        Ok(self)
    }

    /// Set the event type to subscribe to.
    pub fn webhook_type(mut self, webhook_type: WebhookType) -> Self {
        self.webhook_type = Some(webhook_type);
        self
    }

    /// Confirmations to wait for before firing. With 0 or unset, the
    /// callback fires when the transfer is first seen and again when it
    /// confirms.
    pub fn num_confirmations(mut self, num_confirmations: u64) -> Self {
        self.num_confirmations = Some(num_confirmations);
        self
    }

    pub fn with_params(mut self, entries: &Map<String, Value>) -> Result<Self, BitgoError> {
        mass_assign(&mut self, entries)?;
        Ok(self)
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        ensure_required(&self)?;
        self.api.post("/wallet/{walletId}/webhooks", &self).await
    }
}

impl Parameters for AddWebhook {
    fn spec(&self) -> &'static ParameterSpec {
        &ADD_WEBHOOK_SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "walletId" => Ok(json!(self.wallet_id)),
            "url" => Ok(json!(self.url.as_ref().map(Url::as_str))),
            "type" => Ok(json!(self.webhook_type)),
            "numConfirmations" => Ok(json!(self.num_confirmations)),
            _ => Err(BitgoError::unknown_parameter("AddWebhook", name)),
        }
    }

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
        match name {
            "walletId" => self.wallet_id = Some(expect_string(name, value)?),
            "url" => self.url = Some(parse_callback_url(&expect_string(name, value)?)?),
            "type" => self.webhook_type = Some(expect_string(name, value)?.parse()?),
            "numConfirmations" => self.num_confirmations = Some(expect_u64(name, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Remove a webhook registration from a wallet. Identified by the same
/// URL and event type it was registered with.
///
/// `DELETE /wallet/{walletId}/webhooks`
pub struct RemoveWebhook {
    api: ApiHandle,
    wallet_id: Option<String>,
    url: Option<Url>,
    webhook_type: Option<WebhookType>,
}

const REMOVE_WEBHOOK_SPEC: ParameterSpec = ParameterSpec {
    required: &["walletId", "url", "type"],
    optional: &[],
    swaps: &[],
};

impl RemoveWebhook {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self {
            api,
            wallet_id: None,
            url: None,
            webhook_type: None,
        }
    }

    pub fn wallet(mut self, wallet_id: impl Into<String>) -> Self {
        self.wallet_id = Some(wallet_id.into());
        self
    }

    pub fn url(mut self, url: impl AsRef<str>) -> Result<Self, BitgoError> {
        self.url = Some(parse_callback_url(url.as_ref())?);
        Ok(self)
    }

    pub fn webhook_type(mut self, webhook_type: WebhookType) -> Self {
        self.webhook_type = Some(webhook_type);
        self
    }

    pub fn with_params(mut self, entries: &Map<String, Value>) -> Result<Self, BitgoError> {
        mass_assign(&mut self, entries)?;
        Ok(self)
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        ensure_required(&self)?;
        self.api.delete("/wallet/{walletId}/webhooks", &self).await
    }
}

impl Parameters for RemoveWebhook {
    fn spec(&self) -> &'static ParameterSpec {
        &REMOVE_WEBHOOK_SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "walletId" => Ok(json!(self.wallet_id)),
            "url" => Ok(json!(self.url.as_ref().map(Url::as_str))),
            "type" => Ok(json!(self.webhook_type)),
            _ => Err(BitgoError::unknown_parameter("RemoveWebhook", name)),
        }
    }

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
        match name {
            "walletId" => self.wallet_id = Some(expect_string(name, value)?),
            "url" => self.url = Some(parse_callback_url(&expect_string(name, value)?)?),
            "type" => self.webhook_type = Some(expect_string(name, value)?.parse()?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
