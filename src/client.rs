//! Client entry points.
//!
//! [`Bitgo`] holds the account configuration and mints per-coin handles;
//! a [`CoinClient`] scopes every subsequent request to one coin code and
//! fans out to the wallet, utility, and market-data surfaces.
//!
//! ```rust,no_run
//! use bitgo::{Bitgo, CoinType, Config};
//!
//! # async fn example() -> Result<(), bitgo::BitgoError> {
//! let config = Config::new("v2x...token").host("test.bitgo.com");
//! let client = Bitgo::new(config).coin(CoinType::Tbtc)?;
//!
//! let webhooks = client.wallet("58ae7eb...").webhooks().send().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::coin::CoinType;
use crate::config::Config;
use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::execution::{ReqwestTransport, Transport};
use crate::rates::Rates;
use crate::utilities::Utilities;
use crate::wallet::{GenerateWallet, ListWallets, WalletClient};

/// Root of the fluent interface.
#[derive(Clone, Debug)]
pub struct Bitgo {
    config: Config,
}

impl Bitgo {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scope a client to a coin, building the default HTTP transport.
    pub fn coin(&self, coin: CoinType) -> Result<CoinClient, BitgoError> {
        let transport = Arc::new(ReqwestTransport::new()?);
        Ok(CoinClient::with_transport(
            self.config.clone(),
            coin,
            transport,
        ))
    }

    /// Shortcut for mainnet Bitcoin.
    pub fn btc(config: Config) -> Result<CoinClient, BitgoError> {
        Self::new(config).coin(CoinType::Btc)
    }

    /// Shortcut for testnet Bitcoin.
    pub fn tbtc(config: Config) -> Result<CoinClient, BitgoError> {
        Self::new(config).coin(CoinType::Tbtc)
    }

    /// Shortcut for mainnet Ethereum.
    pub fn eth(config: Config) -> Result<CoinClient, BitgoError> {
        Self::new(config).coin(CoinType::Eth)
    }

    /// Shortcut for testnet Ethereum.
    pub fn teth(config: Config) -> Result<CoinClient, BitgoError> {
        Self::new(config).coin(CoinType::Teth)
    }

    /// Shortcut for mainnet Litecoin.
    pub fn ltc(config: Config) -> Result<CoinClient, BitgoError> {
        Self::new(config).coin(CoinType::Ltc)
    }

    /// Shortcut for mainnet Ripple.
    pub fn xrp(config: Config) -> Result<CoinClient, BitgoError> {
        Self::new(config).coin(CoinType::Xrp)
    }
}

/// A client scoped to one coin code. Cheap to clone; every request
/// builder it mints shares the same transport.
#[derive(Clone)]
pub struct CoinClient {
    api: ApiHandle,
    coin: CoinType,
}

impl CoinClient {
    /// Build a coin client over a custom [`Transport`]. The main seam
    /// for tests and embedders with their own HTTP stack.
    pub fn with_transport(config: Config, coin: CoinType, transport: Arc<dyn Transport>) -> Self {
        Self {
            api: ApiHandle::new(config, Some(coin), transport),
            coin,
        }
    }

    pub fn coin_type(&self) -> CoinType {
        self.coin
    }

    /// Operations on a single wallet.
    pub fn wallet(&self, wallet_id: impl Into<String>) -> WalletClient {
        WalletClient::new(self.api.clone(), wallet_id.into())
    }

    /// List wallets for this coin.
    pub fn wallets(&self) -> ListWallets {
        ListWallets::new(self.api.clone())
    }

    /// Create a wallet with a user, backup, and BitGo key.
    pub fn generate_wallet(&self) -> GenerateWallet {
        GenerateWallet::new(self.api.clone())
    }

    /// Keychain and local-encryption utilities.
    pub fn utilities(&self) -> Utilities {
        Utilities::new(self.api.clone())
    }

    /// Latest market data for this coin.
    pub fn rates(&self) -> Rates {
        Rates::new(self.api.clone())
    }
}
