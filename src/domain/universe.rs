//! The set of listings a market is built from.
//!
//! Listings come from the built-in default universe or from a configuration
//! string of the form `AAPL:150.0,GOOGL:2800.0`.

use super::stock::round_cents;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub ticker: String,
    pub price: f64,
}

impl Listing {
    pub fn new(ticker: impl Into<String>, price: f64) -> Self {
        Listing {
            ticker: ticker.into(),
            price,
        }
    }
}

pub const DEFAULT_LISTINGS: [(&str, f64); 15] = [
    ("AAPL", 150.0),
    ("GOOGL", 2800.0),
    ("AMZN", 3500.0),
    ("TSLA", 700.0),
    ("MSFT", 300.0),
    ("NFLX", 500.0),
    ("FB", 340.0),
    ("NVDA", 750.0),
    ("INTC", 60.0),
    ("AMD", 95.0),
    ("BABA", 210.0),
    ("UBER", 45.0),
    ("LYFT", 55.0),
    ("TWTR", 70.0),
    ("SNAP", 80.0),
];

pub fn default_universe() -> Vec<Listing> {
    DEFAULT_LISTINGS
        .iter()
        .map(|&(ticker, price)| Listing::new(ticker, price))
        .collect()
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in stock list")]
    EmptyToken,

    #[error("expected TICKER:PRICE, got {0:?}")]
    MalformedListing(String),

    #[error("invalid starting price for {ticker}: {value}")]
    InvalidPrice { ticker: String, value: String },

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

pub fn parse_listings(input: &str) -> Result<Vec<Listing>, UniverseError> {
    let mut listings = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }

        let (ticker, price) = trimmed
            .split_once(':')
            .ok_or_else(|| UniverseError::MalformedListing(trimmed.to_string()))?;
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(UniverseError::MalformedListing(trimmed.to_string()));
        }

        let price_str = price.trim();
        let price: f64 = price_str
            .parse()
            .ok()
            .filter(|p: &f64| p.is_finite() && round_cents(*p) > 0.0)
            .ok_or_else(|| UniverseError::InvalidPrice {
                ticker: ticker.clone(),
                value: price_str.to_string(),
            })?;

        if !seen.insert(ticker.clone()) {
            return Err(UniverseError::DuplicateTicker(ticker));
        }
        listings.push(Listing { ticker, price });
    }

    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_universe_has_fifteen_unique_tickers() {
        let universe = default_universe();
        assert_eq!(universe.len(), 15);
        let unique: HashSet<_> = universe.iter().map(|l| l.ticker.as_str()).collect();
        assert_eq!(unique.len(), 15);
        assert_eq!(universe[0], Listing::new("AAPL", 150.0));
        assert_eq!(universe[14], Listing::new("SNAP", 80.0));
    }

    #[test]
    fn parse_single_listing() {
        let listings = parse_listings("AAPL:150.0").unwrap();
        assert_eq!(listings, vec![Listing::new("AAPL", 150.0)]);
    }

    #[test]
    fn parse_trims_and_uppercases() {
        let listings = parse_listings(" aapl : 150 , msft:300.5 ").unwrap();
        assert_eq!(
            listings,
            vec![Listing::new("AAPL", 150.0), Listing::new("MSFT", 300.5)]
        );
    }

    #[test]
    fn parse_rejects_empty_token() {
        assert_eq!(
            parse_listings("AAPL:150,,MSFT:300"),
            Err(UniverseError::EmptyToken)
        );
        assert_eq!(parse_listings(""), Err(UniverseError::EmptyToken));
    }

    #[test]
    fn parse_rejects_missing_price() {
        assert_eq!(
            parse_listings("AAPL"),
            Err(UniverseError::MalformedListing("AAPL".into()))
        );
        assert_eq!(
            parse_listings(":150"),
            Err(UniverseError::MalformedListing(":150".into()))
        );
    }

    #[test]
    fn parse_rejects_bad_prices() {
        for input in [
            "AAPL:abc", "AAPL:0", "AAPL:-5", "AAPL:inf", "AAPL:NaN", "AAPL:0.004",
        ] {
            assert!(
                matches!(parse_listings(input), Err(UniverseError::InvalidPrice { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_duplicates() {
        assert_eq!(
            parse_listings("AAPL:150,aapl:151"),
            Err(UniverseError::DuplicateTicker("AAPL".into()))
        );
    }
}
