//! Coin-type codes.
//!
//! A [`CoinType`] selects which cryptocurrency network a request targets.
//! It is threaded into request paths (`/api/v2/{coin}/...`) and is opaque
//! to the parameter validation engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BitgoError;

/// Supported coin codes, production and testnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinType {
    Btc,
    Tbtc,
    Bch,
    Tbch,
    Btg,
    Ltc,
    Tltc,
    Eth,
    Teth,
    Xrp,
    Txrp,
    Xlm,
    Txlm,
    Dash,
    Tdash,
    Zec,
    Tzec,
}

impl CoinType {
    /// The short code as it appears in request paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Btc => "btc",
            Self::Tbtc => "tbtc",
            Self::Bch => "bch",
            Self::Tbch => "tbch",
            Self::Btg => "btg",
            Self::Ltc => "ltc",
            Self::Tltc => "tltc",
            Self::Eth => "eth",
            Self::Teth => "teth",
            Self::Xrp => "xrp",
            Self::Txrp => "txrp",
            Self::Xlm => "xlm",
            Self::Txlm => "txlm",
            Self::Dash => "dash",
            Self::Tdash => "tdash",
            Self::Zec => "zec",
            Self::Tzec => "tzec",
        }
    }

    /// Whether the code targets a test network.
    pub fn is_testnet(&self) -> bool {
        self.as_str().starts_with('t') && *self != Self::Btg
    }
}

impl fmt::Display for CoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoinType {
    type Err = BitgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "btc" => Ok(Self::Btc),
            "tbtc" => Ok(Self::Tbtc),
            "bch" => Ok(Self::Bch),
            "tbch" => Ok(Self::Tbch),
            "btg" => Ok(Self::Btg),
            "ltc" => Ok(Self::Ltc),
            "tltc" => Ok(Self::Tltc),
            "eth" => Ok(Self::Eth),
            "teth" => Ok(Self::Teth),
            "xrp" => Ok(Self::Xrp),
            "txrp" => Ok(Self::Txrp),
            "xlm" => Ok(Self::Xlm),
            "txlm" => Ok(Self::Txlm),
            "dash" => Ok(Self::Dash),
            "tdash" => Ok(Self::Tdash),
            "zec" => Ok(Self::Zec),
            "tzec" => Ok(Self::Tzec),
            other => Err(BitgoError::InvalidRequest(format!(
                "unknown coin type '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_strings() {
        for coin in [CoinType::Btc, CoinType::Teth, CoinType::Txrp, CoinType::Zec] {
            assert_eq!(coin.as_str().parse::<CoinType>().unwrap(), coin);
        }
    }

    #[test]
    fn rejects_unknown_codes() {
        assert!(matches!(
            "doge".parse::<CoinType>(),
            Err(BitgoError::InvalidRequest(_))
        ));
    }

    #[test]
    fn testnet_detection() {
        assert!(CoinType::Tbtc.is_testnet());
        assert!(!CoinType::Btc.is_testnet());
        assert!(!CoinType::Btg.is_testnet());
    }
}
