//! Receive-address creation.

use serde_json::{Map, Value, json};

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{ParameterSpec, Parameters, ensure_required, expect_string, expect_u64, mass_assign};

/// Derive a fresh receive address on the wallet.
///
/// `POST /wallet/{walletId}/address`
pub struct CreateAddress {
    api: ApiHandle,
    wallet_id: Option<String>,
    chain: Option<u64>,
}

const SPEC: ParameterSpec = ParameterSpec {
    required: &["walletId"],
    optional: &["chain"],
    swaps: &[],
};

impl CreateAddress {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self {
            api,
            wallet_id: None,
            chain: None,
        }
    }

    pub fn wallet(mut self, wallet_id: impl Into<String>) -> Self {
        self.wallet_id = Some(wallet_id.into());
        self
    }

    /// Address chain to derive on (receive or change, legacy or segwit).
    pub fn chain(mut self, chain: u64) -> Self {
        self.chain = Some(chain);
        self
    }

    pub fn with_params(mut self, entries: &Map<String, Value>) -> Result<Self, BitgoError> {
        mass_assign(&mut self, entries)?;
        Ok(self)
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        ensure_required(&self)?;
        self.api.post("/wallet/{walletId}/address", &self).await
    }
}

impl Parameters for CreateAddress {
    fn spec(&self) -> &'static ParameterSpec {
        &SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "walletId" => Ok(json!(self.wallet_id)),
            "chain" => Ok(json!(self.chain)),
            _ => Err(BitgoError::unknown_parameter("CreateAddress", name)),
        }
    }

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
        match name {
            "walletId" => self.wallet_id = Some(expect_string(name, value)?),
            "chain" => self.chain = Some(expect_u64(name, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
