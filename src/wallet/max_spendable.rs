//! Maximum spendable query.

use serde_json::{Map, Value, json};

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{
    ParameterSpec, Parameters, ensure_required, expect_bool, expect_string, expect_u64, mass_assign,
};

/// Ask the server for the largest amount a single transaction could
/// spend from this wallet under the given constraints. All constraints
/// travel as query parameters.
///
/// `GET /wallet/{walletId}/maximumSpendable`
pub struct MaximumSpendable {
    api: ApiHandle,
    wallet_id: Option<String>,
    limit: Option<u64>,
    fee_rate: Option<u64>,
    min_value: Option<u64>,
    max_value: Option<u64>,
    min_height: Option<u64>,
    min_confirms: Option<u64>,
    enforce_min_confirms_for_change: Option<bool>,
}

const SPEC: ParameterSpec = ParameterSpec {
    required: &["walletId"],
    optional: &[
        "limit",
        "feeRate",
        "minValue",
        "maxValue",
        "minHeight",
        "minConfirms",
        "enforceMinConfirmsForChange",
    ],
    swaps: &[],
};

impl MaximumSpendable {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self {
            api,
            wallet_id: None,
            limit: None,
            fee_rate: None,
            min_value: None,
            max_value: None,
            min_height: None,
            min_confirms: None,
            enforce_min_confirms_for_change: None,
        }
    }

    pub fn wallet(mut self, wallet_id: impl Into<String>) -> Self {
        self.wallet_id = Some(wallet_id.into());
        self
    }

    /// Cap on the number of unspents considered.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn fee_rate(mut self, fee_rate: u64) -> Self {
        self.fee_rate = Some(fee_rate);
        self
    }

    pub fn min_value(mut self, min_value: u64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    pub fn max_value(mut self, max_value: u64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    /// Only consider unspents confirmed at or above this block height.
    pub fn min_height(mut self, min_height: u64) -> Self {
        self.min_height = Some(min_height);
        self
    }

    pub fn min_confirms(mut self, min_confirms: u64) -> Self {
        self.min_confirms = Some(min_confirms);
        self
    }

    pub fn enforce_min_confirms_for_change(mut self, enforce: bool) -> Self {
        self.enforce_min_confirms_for_change = Some(enforce);
        self
    }

    pub fn with_params(mut self, entries: &Map<String, Value>) -> Result<Self, BitgoError> {
        mass_assign(&mut self, entries)?;
        Ok(self)
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        ensure_required(&self)?;
        self.api
            .get("/wallet/{walletId}/maximumSpendable", &self)
            .await
    }
}

impl Parameters for MaximumSpendable {
    fn spec(&self) -> &'static ParameterSpec {
        &SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "walletId" => Ok(json!(self.wallet_id)),
            "limit" => Ok(json!(self.limit)),
            "feeRate" => Ok(json!(self.fee_rate)),
            "minValue" => Ok(json!(self.min_value)),
            "maxValue" => Ok(json!(self.max_value)),
            "minHeight" => Ok(json!(self.min_height)),
            "minConfirms" => Ok(json!(self.min_confirms)),
            "enforceMinConfirmsForChange" => Ok(json!(self.enforce_min_confirms_for_change)),
            _ => Err(BitgoError::unknown_parameter("MaximumSpendable", name)),
        }
    }

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
        match name {
            "walletId" => self.wallet_id = Some(expect_string(name, value)?),
            "limit" => self.limit = Some(expect_u64(name, value)?),
            "feeRate" => self.fee_rate = Some(expect_u64(name, value)?),
            "minValue" => self.min_value = Some(expect_u64(name, value)?),
            "maxValue" => self.max_value = Some(expect_u64(name, value)?),
            "minHeight" => self.min_height = Some(expect_u64(name, value)?),
            "minConfirms" => self.min_confirms = Some(expect_u64(name, value)?),
            "enforceMinConfirmsForChange" => {
                self.enforce_min_confirms_for_change = Some(expect_bool(name, value)?)
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}
