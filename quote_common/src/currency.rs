//! Currency codes and the pair type used to address the pricing API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::QuoteError;

/// Set of supported currency codes.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Display, EnumString, Hash, Eq, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum Currency {
    USD,
    BRL,
}

/// A base/quote currency pair, e.g. USD priced in BRL.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct CurrencyPair {
    /// Currency being priced.
    pub base: Currency,
    /// Currency the price is expressed in.
    pub quote: Currency,
}

impl CurrencyPair {
    /// The pair the quote service relays.
    pub const USD_BRL: CurrencyPair = CurrencyPair::new(Currency::USD, Currency::BRL);

    /// Creates a pair from its two codes.
    pub const fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Path segment the pricing API expects, e.g. `USD-BRL`.
    pub fn path_segment(&self) -> String {
        format!("{}-{}", self.base, self.quote)
    }

    /// Key of the pair inside the upstream envelope, e.g. `USDBRL`.
    pub fn code(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = QuoteError;

    /// Parses `BASE-QUOTE`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| QuoteError::UnknownCurrency(s.to_string()))?;
        let parse = |code: &str| {
            code.parse::<Currency>()
                .map_err(|_| QuoteError::UnknownCurrency(code.to_string()))
        };
        Ok(CurrencyPair::new(parse(base)?, parse(quote)?))
    }
}
