//! # BitGo client SDK
//!
//! A fluent-interface client for the [BitGo](https://www.bitgo.com)
//! cryptocurrency wallet REST API. Request builders assemble and
//! validate JSON parameters; signing, transaction construction, and
//! ledger logic all happen server-side at BitGo.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use bitgo::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), BitgoError> {
//!     let config = Config::new("v2x...token").host("test.bitgo.com");
//!     let client = Bitgo::new(config).coin(CoinType::Tbtc)?;
//!
//!     let wallet = client.wallet("58ae7eb...");
//!
//!     let prebuild = wallet
//!         .build_transaction()
//!         .add_recipient("2N1Qc...", 150_000)?
//!         .fee_rate(2_000)
//!         .send()
//!         .await?;
//!
//!     let signed = wallet
//!         .sign_transaction()
//!         .tx_prebuild(prebuild)
//!         .wallet_passphrase("secret")
//!         .keychain(serde_json::json!({"encryptedPrv": "..."}))
//!         .send()
//!         .await?;
//!
//!     wallet
//!         .send_transaction()
//!         .half_signed(signed)
//!         .send()
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! Every API operation is a one-shot request builder composed of three
//! pieces: a static parameter declaration ([`params::ParameterSpec`]),
//! the builder's own typed fields behind the [`params::Parameters`]
//! accessor surface, and a shared dispatch handle over a pluggable
//! [`Transport`]. Submission validates requirements (including swap
//! groups, where one set of parameters substitutes for another),
//! projects the present fields into the outgoing payload, and returns
//! the server's JSON response unmodified.

pub mod client;
pub mod coin;
pub mod config;
pub mod error;
pub mod execution;
pub mod params;
pub mod rates;
pub mod utilities;
pub mod wallet;

pub use client::{Bitgo, CoinClient};
pub use coin::CoinType;
pub use config::Config;
pub use error::BitgoError;
pub use execution::{ApiRequest, Transport};
pub use wallet::{Recipient, WalletClient, WebhookType};

/// Convenient single-import surface.
pub mod prelude {
    pub use crate::client::{Bitgo, CoinClient};
    pub use crate::coin::CoinType;
    pub use crate::config::Config;
    pub use crate::error::BitgoError;
    pub use crate::wallet::{Recipient, WalletClient, WebhookType};
}
