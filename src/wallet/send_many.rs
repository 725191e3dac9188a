//! Build, sign, and send in a single server round trip.

use serde_json::{Map, Value, json};

use super::{Recipient, check_recipients, validate_recipient};
use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{
    ParameterSpec, Parameters, ensure_required, expect_bool, expect_string, expect_u64, mass_assign,
};

/// One-shot spend to many recipients: the server prebuilds, signs with
/// the supplied credentials, and broadcasts.
///
/// `POST /wallet/{walletId}/sendmany`
pub struct SendMany {
    api: ApiHandle,
    wallet_id: Option<String>,
    recipients: Vec<Recipient>,
    prv: Option<String>,
    wallet_passphrase: Option<String>,
    segwit: Option<bool>,
    comment: Option<String>,
    fee_rate: Option<u64>,
    unspents: Option<Vec<String>>,
    min_value: Option<u64>,
    max_value: Option<u64>,
    gas_price: Option<u64>,
    gas_limit: Option<u64>,
    num_blocks: Option<u64>,
    sequence_id: Option<String>,
    max_fee_rate: Option<u64>,
    min_confirms: Option<u64>,
    no_split_change: Option<bool>,
    change_address: Option<String>,
    last_ledger_sequence: Option<u64>,
    ledger_sequence_delta: Option<u64>,
    target_wallet_unspents: Option<u64>,
    enforce_min_confirms_for_change: Option<bool>,
}

const SPEC: ParameterSpec = ParameterSpec {
    required: &["walletId", "recipients"],
    optional: &[
        "walletPassphrase",
        "prv",
        "segwit",
        "comment",
        "feeRate",
        "unspents",
        "minValue",
        "maxValue",
        "gasPrice",
        "gasLimit",
        "numBlocks",
        "sequenceId",
        "maxFeeRate",
        "minConfirms",
        "noSplitChange",
        "changeAddress",
        "lastLedgerSequence",
        "ledgerSequenceDelta",
        "targetWalletUnspents",
        "enforceMinConfirmsForChange",
    ],
    swaps: &[],
};

impl SendMany {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self {
            api,
            wallet_id: None,
            recipients: Vec::new(),
            prv: None,
            wallet_passphrase: None,
            segwit: None,
            comment: None,
            fee_rate: None,
            unspents: None,
            min_value: None,
            max_value: None,
            gas_price: None,
            gas_limit: None,
            num_blocks: None,
            sequence_id: None,
            max_fee_rate: None,
            min_confirms: None,
            no_split_change: None,
            change_address: None,
            last_ledger_sequence: None,
            ledger_sequence_delta: None,
            target_wallet_unspents: None,
            enforce_min_confirms_for_change: None,
        }
    }

    pub fn wallet(mut self, wallet_id: impl Into<String>) -> Self {
        self.wallet_id = Some(wallet_id.into());
        self
    }

    pub fn add_recipient(
        mut self,
        address: impl Into<String>,
        amount: u64,
    ) -> Result<Self, BitgoError> {
        let recipient = Recipient::new(address, amount);
        validate_recipient(&recipient)?;
        self.recipients.push(recipient);
        Ok(self)
    }

    pub fn recipients(mut self, recipients: Vec<Recipient>) -> Result<Self, BitgoError> {
        for recipient in &recipients {
            validate_recipient(recipient)?;
        }
        self.recipients = recipients;
        Ok(self)
    }

    /// Passphrase that decrypts the wallet's user keychain server-side.
    pub fn wallet_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.wallet_passphrase = Some(passphrase.into());
        self
    }

    /// Sign with a raw private key instead of the wallet passphrase.
    pub fn prv(mut self, prv: impl Into<String>) -> Self {
        self.prv = Some(prv.into());
        self
    }

    pub fn segwit(mut self, segwit: bool) -> Self {
        self.segwit = Some(segwit);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn fee_rate(mut self, fee_rate: u64) -> Self {
        self.fee_rate = Some(fee_rate);
        self
    }

    pub fn unspents(mut self, unspents: Vec<String>) -> Self {
        self.unspents = Some(unspents);
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

    pub fn gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn num_blocks(mut self, num_blocks: u64) -> Self {
        self.num_blocks = Some(num_blocks);
        self
    }

    /// Caller-chosen idempotency id for this spend.
    pub fn sequence_id(mut self, sequence_id: impl Into<String>) -> Self {
        self.sequence_id = Some(sequence_id.into());
        self
    }

    pub fn max_fee_rate(mut self, max_fee_rate: u64) -> Self {
        self.max_fee_rate = Some(max_fee_rate);
        self
    }

    pub fn min_confirms(mut self, min_confirms: u64) -> Self {
        self.min_confirms = Some(min_confirms);
        self
    }

    pub fn no_split_change(mut self, no_split_change: bool) -> Self {
        self.no_split_change = Some(no_split_change);
        self
    }

    pub fn change_address(mut self, change_address: impl Into<String>) -> Self {
        self.change_address = Some(change_address.into());
        self
    }

    pub fn last_ledger_sequence(mut self, sequence: u64) -> Self {
        self.last_ledger_sequence = Some(sequence);
        self
    }

    pub fn ledger_sequence_delta(mut self, delta: u64) -> Self {
        self.ledger_sequence_delta = Some(delta);
        self
    }

    pub fn target_wallet_unspents(mut self, target: u64) -> Self {
        self.target_wallet_unspents = Some(target);
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
        check_recipients(&self.recipients)?;
        self.api.post("/wallet/{walletId}/sendmany", &self).await
    }
}

impl Parameters for SendMany {
    fn spec(&self) -> &'static ParameterSpec {
        &SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "walletId" => Ok(json!(self.wallet_id)),
            "recipients" => Ok(json!(self.recipients)),
            "walletPassphrase" => Ok(json!(self.wallet_passphrase)),
            "prv" => Ok(json!(self.prv)),
            "segwit" => Ok(json!(self.segwit)),
            "comment" => Ok(json!(self.comment)),
            "feeRate" => Ok(json!(self.fee_rate)),
            "unspents" => Ok(json!(self.unspents)),
            "minValue" => Ok(json!(self.min_value)),
            "maxValue" => Ok(json!(self.max_value)),
            "gasPrice" => Ok(json!(self.gas_price)),
            "gasLimit" => Ok(json!(self.gas_limit)),
            "numBlocks" => Ok(json!(self.num_blocks)),
            "sequenceId" => Ok(json!(self.sequence_id)),
            "maxFeeRate" => Ok(json!(self.max_fee_rate)),
            "minConfirms" => Ok(json!(self.min_confirms)),
            "noSplitChange" => Ok(json!(self.no_split_change)),
            "changeAddress" => Ok(json!(self.change_address)),
            "lastLedgerSequence" => Ok(json!(self.last_ledger_sequence)),
            "ledgerSequenceDelta" => Ok(json!(self.ledger_sequence_delta)),
            "targetWalletUnspents" => Ok(json!(self.target_wallet_unspents)),
            "enforceMinConfirmsForChange" => Ok(json!(self.enforce_min_confirms_for_change)),
            _ => Err(BitgoError::unknown_parameter("SendMany", name)),
        }
    }

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
        match name {
            "walletId" => self.wallet_id = Some(expect_string(name, value)?),
            "recipients" => {
                let recipients: Vec<Recipient> =
                    serde_json::from_value(value.clone()).map_err(|e| {
                        BitgoError::InvalidRequest(format!("invalid recipients value: {e}"))
                    })?;
                for recipient in &recipients {
                    validate_recipient(recipient)?;
                }
                self.recipients = recipients;
            }
            "walletPassphrase" => self.wallet_passphrase = Some(expect_string(name, value)?),
            "prv" => self.prv = Some(expect_string(name, value)?),
            "segwit" => self.segwit = Some(expect_bool(name, value)?),
            "comment" => self.comment = Some(expect_string(name, value)?),
            "feeRate" => self.fee_rate = Some(expect_u64(name, value)?),
            "unspents" => {
                self.unspents = Some(serde_json::from_value(value.clone()).map_err(|e| {
                    BitgoError::InvalidRequest(format!("invalid unspents value: {e}"))
                })?)
            }
            "minValue" => self.min_value = Some(expect_u64(name, value)?),
            "maxValue" => self.max_value = Some(expect_u64(name, value)?),
            "gasPrice" => self.gas_price = Some(expect_u64(name, value)?),
            "gasLimit" => self.gas_limit = Some(expect_u64(name, value)?),
            "numBlocks" => self.num_blocks = Some(expect_u64(name, value)?),
            "sequenceId" => self.sequence_id = Some(expect_string(name, value)?),
            "maxFeeRate" => self.max_fee_rate = Some(expect_u64(name, value)?),
            "minConfirms" => self.min_confirms = Some(expect_u64(name, value)?),
            "noSplitChange" => self.no_split_change = Some(expect_bool(name, value)?),
            "changeAddress" => self.change_address = Some(expect_string(name, value)?),
            "lastLedgerSequence" => self.last_ledger_sequence = Some(expect_u64(name, value)?),
            "ledgerSequenceDelta" => self.ledger_sequence_delta = Some(expect_u64(name, value)?),
            "targetWalletUnspents" => self.target_wallet_unspents = Some(expect_u64(name, value)?),
            "enforceMinConfirmsForChange" => {
                self.enforce_min_confirms_for_change = Some(expect_bool(name, value)?)
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}
