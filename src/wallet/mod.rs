//! Wallet-scoped operations.
//!
//! A [`WalletClient`] pins a wallet id and mints one request builder per
//! API operation. Builders are one-shot: configure fields fluently, then
//! consume with `send()`.

mod build_transaction;
mod create_address;
mod generate_wallet;
mod get_wallet;
mod list_wallets;
mod max_spendable;
mod send_many;
mod send_transaction;
mod sign_transaction;
mod transactions;
mod webhooks;

pub use build_transaction::BuildTransaction;
pub use create_address::CreateAddress;
pub use generate_wallet::GenerateWallet;
pub use get_wallet::GetWallet;
pub use list_wallets::ListWallets;
pub use max_spendable::MaximumSpendable;
pub use send_many::SendMany;
pub use send_transaction::SendTransaction;
pub use sign_transaction::SignTransaction;
pub use transactions::{GetTransaction, Transactions};
pub use webhooks::{AddWebhook, RemoveWebhook, WebhookType, Webhooks};

use serde::{Deserialize, Serialize};

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;

/// A receive address and the amount (in base units) to send to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub address: String,
    pub amount: u64,
}

impl Recipient {
    pub fn new(address: impl Into<String>, amount: u64) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// A recipient needs a non-empty address and a positive amount.
pub(crate) fn validate_recipient(recipient: &Recipient) -> Result<(), BitgoError> {
    if recipient.address.trim().is_empty() {
        return Err(BitgoError::InvalidRequest(format!(
            "recipient address cannot be empty (amount: {})",
            recipient.amount
        )));
    }
    if recipient.amount == 0 {
        return Err(BitgoError::InvalidRequest(format!(
            "recipient amount must be positive (address: '{}')",
            recipient.address
        )));
    }
    Ok(())
}

/// Transaction-building operations refuse to dispatch without at least
/// one valid recipient.
pub(crate) fn check_recipients(recipients: &[Recipient]) -> Result<(), BitgoError> {
    if recipients.is_empty() {
        return Err(BitgoError::MissingParameter(
            "Recipients cannot be left empty".into(),
        ));
    }
    for recipient in recipients {
        validate_recipient(recipient)?;
    }
    Ok(())
}

/// Entry point for every operation on one wallet.
#[derive(Clone)]
pub struct WalletClient {
    api: ApiHandle,
    wallet_id: String,
}

impl WalletClient {
    pub(crate) fn new(api: ApiHandle, wallet_id: String) -> Self {
        Self { api, wallet_id }
    }

    pub fn wallet_id(&self) -> &str {
        &self.wallet_id
    }

    /// Fetch this wallet.
    pub fn get(&self) -> GetWallet {
        GetWallet::new(self.api.clone()).wallet(&self.wallet_id)
    }

    /// Create a receive address on this wallet.
    pub fn create_address(&self) -> CreateAddress {
        CreateAddress::new(self.api.clone()).wallet(&self.wallet_id)
    }

    /// List transactions on this wallet.
    pub fn transactions(&self) -> Transactions {
        Transactions::new(self.api.clone()).wallet(&self.wallet_id)
    }

    /// Fetch a single transaction by id.
    pub fn transaction(&self, tx_id: impl Into<String>) -> GetTransaction {
        GetTransaction::new(self.api.clone())
            .wallet(&self.wallet_id)
            .tx_id(tx_id)
    }

    /// Prebuild a transaction for signing.
    pub fn build_transaction(&self) -> BuildTransaction {
        BuildTransaction::new(self.api.clone()).wallet(&self.wallet_id)
    }

    /// Sign a prebuilt transaction.
    pub fn sign_transaction(&self) -> SignTransaction {
        SignTransaction::new(self.api.clone()).wallet(&self.wallet_id)
    }

    /// Submit a half-signed transaction to the network.
    pub fn send_transaction(&self) -> SendTransaction {
        SendTransaction::new(self.api.clone()).wallet(&self.wallet_id)
    }

    /// Build, sign, and send to many recipients in one call.
    pub fn send_many(&self) -> SendMany {
        SendMany::new(self.api.clone()).wallet(&self.wallet_id)
    }

    /// Query the maximum spendable amount.
    pub fn maximum_spendable(&self) -> MaximumSpendable {
        MaximumSpendable::new(self.api.clone()).wallet(&self.wallet_id)
    }

    /// List webhooks on this wallet.
    pub fn webhooks(&self) -> Webhooks {
        Webhooks::new(self.api.clone()).wallet(&self.wallet_id)
    }

    /// Register a webhook on this wallet.
    pub fn add_webhook(&self) -> AddWebhook {
        AddWebhook::new(self.api.clone()).wallet(&self.wallet_id)
    }

    /// Remove a webhook from this wallet.
    pub fn remove_webhook(&self) -> RemoveWebhook {
        RemoveWebhook::new(self.api.clone()).wallet(&self.wallet_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_validation_rejects_empty_address_and_zero_amount() {
        assert!(validate_recipient(&Recipient::new("2N1Qc...", 5000)).is_ok());
        assert!(matches!(
            validate_recipient(&Recipient::new("", 5000)),
            Err(BitgoError::InvalidRequest(_))
        ));
        assert!(matches!(
            validate_recipient(&Recipient::new("2N1Qc...", 0)),
            Err(BitgoError::InvalidRequest(_))
        ));
    }

    #[test]
    fn empty_recipient_list_is_a_missing_parameter() {
        let err = check_recipients(&[]).unwrap_err();
        assert_eq!(err.to_string(), "Recipients cannot be left empty");
    }
}
