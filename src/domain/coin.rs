use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// The fixed set of coins the dashboard offers.
/// The slug doubles as the CoinGecko coin id; it is never checked against the
/// upstream catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Coin {
    #[default]
    Bitcoin,
    Ethereum,
    Ripple,
    Litecoin,
    Cardano,
}

impl Coin {
    /// The id used in CoinGecko URLs.
    pub fn slug(&self) -> &'static str {
        match self {
            Coin::Bitcoin => "bitcoin",
            Coin::Ethereum => "ethereum",
            Coin::Ripple => "ripple",
            Coin::Litecoin => "litecoin",
            Coin::Cardano => "cardano",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Coin::Bitcoin => "Bitcoin",
            Coin::Ethereum => "Ethereum",
            Coin::Ripple => "Ripple",
            Coin::Litecoin => "Litecoin",
            Coin::Cardano => "Cardano",
        }
    }

    pub fn all() -> Vec<Coin> {
        Coin::iter().collect()
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown coin '{0}' (expected one of: bitcoin, ethereum, ripple, litecoin, cardano)")]
pub struct UnknownCoin(pub String);

impl FromStr for Coin {
    type Err = UnknownCoin;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Coin::iter()
            .find(|coin| coin.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCoin(s.to_string()))
    }
}

/// Quote currency for prices. Only one is supported.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum VsCurrency {
    #[default]
    Usd,
}

impl VsCurrency {
    /// The code CoinGecko expects in `vs_currency`.
    pub fn code(&self) -> &'static str {
        match self {
            VsCurrency::Usd => "usd",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            VsCurrency::Usd => "$",
        }
    }
}

impl std::fmt::Display for VsCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code().to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slugs_case_insensitively() {
        assert_eq!("bitcoin".parse::<Coin>(), Ok(Coin::Bitcoin));
        assert_eq!(" Cardano ".parse::<Coin>(), Ok(Coin::Cardano));
        assert!("dogecoin".parse::<Coin>().is_err());
    }

    #[test]
    fn allow_list_has_five_coins_in_menu_order() {
        let slugs: Vec<&str> = Coin::all().iter().map(|c| c.slug()).collect();
        assert_eq!(slugs, ["bitcoin", "ethereum", "ripple", "litecoin", "cardano"]);
    }
}
