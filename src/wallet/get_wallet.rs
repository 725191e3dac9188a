//! Single-wallet lookup.

use serde_json::{Map, Value, json};

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{ParameterSpec, Parameters, ensure_required, expect_bool, expect_string, mass_assign};

/// Fetch one wallet by id.
///
/// `GET /wallet/{walletId}`
pub struct GetWallet {
    api: ApiHandle,
    wallet_id: Option<String>,
    all_tokens: Option<bool>,
}

const SPEC: ParameterSpec = ParameterSpec {
    required: &["walletId"],
    optional: &["allTokens"],
    swaps: &[],
};

impl GetWallet {
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

    pub fn all_tokens(mut self, all_tokens: bool) -> Self {
        self.all_tokens = Some(all_tokens);
        self
    }

    pub fn with_params(mut self, entries: &Map<String, Value>) -> Result<Self, BitgoError> {
        mass_assign(&mut self, entries)?;
        Ok(self)
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        ensure_required(&self)?;
        self.api.get("/wallet/{walletId}", &self).await
    }
}

impl Parameters for GetWallet {
    fn spec(&self) -> &'static ParameterSpec {
        &SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "walletId" => Ok(json!(self.wallet_id)),
            "allTokens" => Ok(json!(self.all_tokens)),
            _ => Err(BitgoError::unknown_parameter("GetWallet", name)),
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
    async fn wallet_id_is_required() {
        let err = GetWallet::new(api()).all_tokens(true).send().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following parameters are required: walletId"
        );
        assert!(GetWallet::new(api()).wallet("w").send().await.is_ok());
    }
}
