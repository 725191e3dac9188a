//! Wallet listing.

use serde_json::{Map, Value, json};

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{
    ParameterSpec, Parameters, ensure_required, expect_bool, expect_string, expect_u64, mass_assign,
};

/// Page through the wallets the token can see for this coin.
///
/// `GET /wallet`
pub struct ListWallets {
    api: ApiHandle,
    limit: Option<u64>,
    prev_id: Option<String>,
    all_tokens: Option<bool>,
}

const SPEC: ParameterSpec = ParameterSpec {
    required: &[],
    optional: &["limit", "prevId", "allTokens"],
    swaps: &[],
};

impl ListWallets {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self {
            api,
            limit: None,
            prev_id: None,
            all_tokens: None,
        }
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Continuation cursor from a previous page.
    pub fn prev_id(mut self, prev_id: impl Into<String>) -> Self {
        self.prev_id = Some(prev_id.into());
        self
    }

    pub fn all_tokens(mut self, all_tokens: bool) -> Self {
        self.all_tokens = Some(all_tokens);
        self
    }

    pub fn with_params(mut self, entries: &Map<String, Value>) -> Result<Self, BitgoError> {
        mass_assign(&mut self, entries)?;
        Ok(self)
    }

    /// With an empty required list the requirement check always passes.
    pub async fn send(self) -> Result<Value, BitgoError> {
        ensure_required(&self)?;
        self.api.get("/wallet", &self).await
    }
}

impl Parameters for ListWallets {
    fn spec(&self) -> &'static ParameterSpec {
        &SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "limit" => Ok(json!(self.limit)),
            "prevId" => Ok(json!(self.prev_id)),
            "allTokens" => Ok(json!(self.all_tokens)),
            _ => Err(BitgoError::unknown_parameter("ListWallets", name)),
        }
    }

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
        match name {
            "limit" => self.limit = Some(expect_u64(name, value)?),
            "prevId" => self.prev_id = Some(expect_string(name, value)?),
            "allTokens" => self.all_tokens = Some(expect_bool(name, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
