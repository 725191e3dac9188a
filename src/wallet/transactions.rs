//! Wallet transaction listing and lookup.

use serde_json::{Map, Value, json};

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{
    ParameterSpec, Parameters, ensure_required, expect_bool, expect_string, mass_assign,
};

/// Page through transactions on a wallet.
///
/// `GET /wallet/{walletId}/tx`
pub struct Transactions {
    api: ApiHandle,
    wallet_id: Option<String>,
    prev_id: Option<String>,
    all_tokens: Option<bool>,
}

const LIST_SPEC: ParameterSpec = ParameterSpec {
    required: &["walletId"],
    optional: &["prevId", "allTokens"],
    swaps: &[],
};

impl Transactions {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self {
            api,
            wallet_id: None,
            prev_id: None,
            all_tokens: None,
        }
    }

    pub fn wallet(mut self, wallet_id: impl Into<String>) -> Self {
        self.wallet_id = Some(wallet_id.into());
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

    /// Narrow to a single transaction by id.
    pub fn transaction(&self, tx_id: impl Into<String>) -> GetTransaction {
        let mut builder = GetTransaction::new(self.api.clone());
        builder.wallet_id = self.wallet_id.clone();
        builder.tx_id = Some(tx_id.into());
        builder
    }

    pub fn with_params(mut self, entries: &Map<String, Value>) -> Result<Self, BitgoError> {
        mass_assign(&mut self, entries)?;
        Ok(self)
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        ensure_required(&self)?;
        self.api.get("/wallet/{walletId}/tx", &self).await
    }
}

impl Parameters for Transactions {
    fn spec(&self) -> &'static ParameterSpec {
        &LIST_SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "walletId" => Ok(json!(self.wallet_id)),
            "prevId" => Ok(json!(self.prev_id)),
            "allTokens" => Ok(json!(self.all_tokens)),
            _ => Err(BitgoError::unknown_parameter("Transactions", name)),
        }
    }

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
        match name {
            "walletId" => self.wallet_id = Some(expect_string(name, value)?),
            "prevId" => self.prev_id = Some(expect_string(name, value)?),
            "allTokens" => self.all_tokens = Some(expect_bool(name, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Fetch one transaction by id.
///
/// `GET /wallet/{walletId}/tx/{txId}`
pub struct GetTransaction {
    api: ApiHandle,
    wallet_id: Option<String>,
    tx_id: Option<String>,
}

const GET_SPEC: ParameterSpec = ParameterSpec {
    required: &["walletId", "txId"],
    optional: &[],
    swaps: &[],
};

impl GetTransaction {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self {
            api,
            wallet_id: None,
            tx_id: None,
        }
    }

    pub fn wallet(mut self, wallet_id: impl Into<String>) -> Self {
        self.wallet_id = Some(wallet_id.into());
        self
    }

    pub fn tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.tx_id = Some(tx_id.into());
        self
    }

    pub fn with_params(mut self, entries: &Map<String, Value>) -> Result<Self, BitgoError> {
        mass_assign(&mut self, entries)?;
        Ok(self)
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        ensure_required(&self)?;
        self.api.get("/wallet/{walletId}/tx/{txId}", &self).await
    }
}

impl Parameters for GetTransaction {
    fn spec(&self) -> &'static ParameterSpec {
        &GET_SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "walletId" => Ok(json!(self.wallet_id)),
            "txId" => Ok(json!(self.tx_id)),
            _ => Err(BitgoError::unknown_parameter("GetTransaction", name)),
        }
    }

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
        match name {
            "walletId" => self.wallet_id = Some(expect_string(name, value)?),
            "txId" => self.tx_id = Some(expect_string(name, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::coin::CoinType;
    use crate::config::Config;
    use crate::execution::{ApiRequest, Transport};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NullTransport;

    #[async_trait]
    impl Transport for NullTransport {
        async fn execute(&self, _request: ApiRequest) -> Result<Value, BitgoError> {
            Ok(Value::Null)
        }
    }

    fn api() -> ApiHandle {
        ApiHandle::new(
            Config::new("token"),
            Some(CoinType::Tbtc),
            Arc::new(NullTransport),
        )
    }

    #[tokio::test]
    async fn listing_requires_the_wallet_id() {
        let err = Transactions::new(api()).send().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following parameters are required: walletId"
        );
    }

    #[tokio::test]
    async fn lookup_requires_wallet_and_transaction_ids() {
        let err = GetTransaction::new(api()).wallet("w").send().await.unwrap_err();
        assert_eq!(err.to_string(), "The following parameters are required: txId");
    }

    #[test]
    fn narrowing_carries_the_wallet_over() {
        let lookup = Transactions::new(api()).wallet("w-1").transaction("tx-9");
        assert_eq!(lookup.get("walletId").unwrap(), json!("w-1"));
        assert_eq!(lookup.get("txId").unwrap(), json!("tx-9"));
    }
}
