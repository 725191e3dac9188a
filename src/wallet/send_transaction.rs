//! Transaction submission.

use serde_json::{Map, Value, json};

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{
    ParameterSpec, Parameters, SwapRule, ensure_required, expect_string, mass_assign,
};

/// Submit a half-signed transaction to the network.
///
/// Either the serialized hex (`txHex`) or the `halfSigned` object from
/// the signing operation must be supplied; each substitutes for the
/// other.
///
/// `POST /wallet/{walletId}/tx/send`
pub struct SendTransaction {
    api: ApiHandle,
    tx_hex: Option<String>,
    wallet_id: Option<String>,
    half_signed: Option<Value>,
    otp: Option<String>,
    comment: Option<String>,
}

const SPEC: ParameterSpec = ParameterSpec {
    required: &["txHex", "walletId", "halfSigned"],
    optional: &["otp", "comment"],
    swaps: &[
        SwapRule {
            name: "txHex",
            alternatives: &[&["halfSigned"]],
        },
        SwapRule {
            name: "halfSigned",
            alternatives: &[&["txHex"]],
        },
    ],
};

impl SendTransaction {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self {
            api,
            tx_hex: None,
            wallet_id: None,
            half_signed: None,
            otp: None,
            comment: None,
        }
    }

    pub fn wallet(mut self, wallet_id: impl Into<String>) -> Self {
        self.wallet_id = Some(wallet_id.into());
        self
    }

    /// The half-signed, serialized transaction hex.
    pub fn tx_hex(mut self, tx_hex: impl Into<String>) -> Self {
        self.tx_hex = Some(tx_hex.into());
        self
    }

    /// The `halfSigned` object returned by the signing operation.
    pub fn half_signed(mut self, half_signed: Value) -> Self {
        self.half_signed = Some(half_signed);
        self
    }

    /// Current 2FA code, when session policy demands one.
    pub fn otp(mut self, otp: impl Into<String>) -> Self {
        self.otp = Some(otp.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_params(mut self, entries: &Map<String, Value>) -> Result<Self, BitgoError> {
        mass_assign(&mut self, entries)?;
        Ok(self)
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        ensure_required(&self)?;
        self.api.post("/wallet/{walletId}/tx/send", &self).await
    }
}

impl Parameters for SendTransaction {
    fn spec(&self) -> &'static ParameterSpec {
        &SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "txHex" => Ok(json!(self.tx_hex)),
            "walletId" => Ok(json!(self.wallet_id)),
            "halfSigned" => Ok(json!(self.half_signed)),
            "otp" => Ok(json!(self.otp)),
            "comment" => Ok(json!(self.comment)),
            _ => Err(BitgoError::unknown_parameter("SendTransaction", name)),
        }
    }

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
        match name {
            "txHex" => self.tx_hex = Some(expect_string(name, value)?),
            "walletId" => self.wallet_id = Some(expect_string(name, value)?),
            "halfSigned" => self.half_signed = Some(value.clone()),
            "otp" => self.otp = Some(expect_string(name, value)?),
            "comment" => self.comment = Some(expect_string(name, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
