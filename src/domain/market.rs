//! Collection of stocks and the periodic price update.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::stock::Stock;
use super::universe::Listing;

/// Largest fractional move a stock can make in one update cycle.
pub const MAX_MOVE: f64 = 0.1;

/// Read-only view of one stock at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub name: String,
    pub price: f64,
    pub change_percent: f64,
}

#[derive(Debug, Clone)]
pub struct Market {
    // Kept in listing order so snapshots display consistently.
    stocks: Vec<Stock>,
    update_count: u64,
    last_updated: Option<DateTime<Utc>>,
}

impl Market {
    pub fn new(listings: &[Listing]) -> Self {
        Market {
            stocks: listings
                .iter()
                .map(|l| Stock::new(l.ticker.clone(), l.price))
                .collect(),
            update_count: 0,
            last_updated: None,
        }
    }

    pub fn stock(&self, name: &str) -> Option<&Stock> {
        self.stocks.iter().find(|s| s.name() == name)
    }

    pub fn price_of(&self, name: &str) -> Option<f64> {
        self.stock(name).map(Stock::price)
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.stocks.iter().map(Stock::name)
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Run one update cycle with the thread-local random source.
    pub fn update_market(&mut self) {
        self.update_market_with(&mut rand::thread_rng());
    }

    /// Run one update cycle, drawing each stock's move from `rng`.
    pub fn update_market_with<R: Rng>(&mut self, rng: &mut R) {
        for stock in &mut self.stocks {
            let change = rng.gen_range(-MAX_MOVE..=MAX_MOVE);
            stock.update_price(change);
        }
        self.update_count += 1;
        self.last_updated = Some(Utc::now());
        tracing::debug!(cycle = self.update_count, "market updated");
    }

    pub fn show_market(&self) -> Vec<Quote> {
        self.stocks
            .iter()
            .map(|s| Quote {
                name: s.name().to_string(),
                price: s.price(),
                change_percent: s.change_percent(),
            })
            .collect()
    }

    pub fn get_stock_history(&self, name: &str) -> Option<&[f64]> {
        self.stock(name).map(Stock::history)
    }

    pub fn reset_market(&mut self) {
        for stock in &mut self.stocks {
            stock.reset();
        }
        self.update_count = 0;
        self.last_updated = None;
    }
}
