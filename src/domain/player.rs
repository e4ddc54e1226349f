//! Player cash and share holdings.

use std::collections::BTreeMap;

use super::error::SimError;
use super::market::Market;

pub const DEFAULT_INITIAL_CASH: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

/// Outcome of a completed trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeReceipt {
    pub side: Side,
    pub name: String,
    pub amount: u64,
    pub price: f64,
    /// Cost paid for a buy, earnings received for a sell.
    pub total: f64,
}

impl TradeReceipt {
    pub fn message(&self) -> String {
        match self.side {
            Side::Buy => format!("Bought {} shares of {}", self.amount, self.name),
            Side::Sell => format!("Sold {} shares of {}", self.amount, self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSnapshot {
    pub cash: f64,
    pub stocks: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    cash: f64,
    initial_cash: f64,
    // Holdings are always positive; a ticker sold down to zero is removed.
    portfolio: BTreeMap<String, u64>,
}

impl Default for Player {
    fn default() -> Self {
        Player::new(DEFAULT_INITIAL_CASH)
    }
}

impl Player {
    pub fn new(initial_cash: f64) -> Self {
        Player {
            cash: initial_cash,
            initial_cash,
            portfolio: BTreeMap::new(),
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn initial_cash(&self) -> f64 {
        self.initial_cash
    }

    pub fn holding(&self, name: &str) -> u64 {
        self.portfolio.get(name).copied().unwrap_or(0)
    }

    pub fn buy_stock(
        &mut self,
        market: &Market,
        name: &str,
        amount: u64,
    ) -> Result<TradeReceipt, SimError> {
        check_amount(amount)?;
        let price = market
            .price_of(name)
            .ok_or_else(|| SimError::StockNotFound {
                name: name.to_string(),
            })?;

        let cost = price * amount as f64;
        if self.cash < cost {
            return Err(SimError::InsufficientFunds {
                required: cost,
                available: self.cash,
            });
        }

        self.cash -= cost;
        *self.portfolio.entry(name.to_string()).or_insert(0) += amount;

        Ok(TradeReceipt {
            side: Side::Buy,
            name: name.to_string(),
            amount,
            price,
            total: cost,
        })
    }

    pub fn sell_stock(
        &mut self,
        market: &Market,
        name: &str,
        amount: u64,
    ) -> Result<TradeReceipt, SimError> {
        check_amount(amount)?;
        let held = self.holding(name);
        if held < amount {
            return Err(SimError::InsufficientShares {
                name: name.to_string(),
                requested: amount,
                held,
            });
        }
        // A held ticker is always listed; markets never drop stocks.
        let price = market
            .price_of(name)
            .ok_or_else(|| SimError::StockNotFound {
                name: name.to_string(),
            })?;

        let earnings = price * amount as f64;
        self.cash += earnings;
        if held == amount {
            self.portfolio.remove(name);
        } else {
            self.portfolio.insert(name.to_string(), held - amount);
        }

        Ok(TradeReceipt {
            side: Side::Sell,
            name: name.to_string(),
            amount,
            price,
            total: earnings,
        })
    }

    pub fn show_portfolio(&self) -> PortfolioSnapshot {
        PortfolioSnapshot {
            cash: self.cash,
            stocks: self.portfolio.clone(),
        }
    }

    /// Cash plus every holding valued at the market's current price.
    pub fn total_value(&self, market: &Market) -> f64 {
        let holdings: f64 = self
            .portfolio
            .iter()
            .filter_map(|(name, &shares)| market.price_of(name).map(|p| p * shares as f64))
            .sum();
        self.cash + holdings
    }

    pub fn reset_portfolio(&mut self) {
        self.cash = self.initial_cash;
        self.portfolio.clear();
    }
}

fn check_amount(amount: u64) -> Result<(), SimError> {
    if amount == 0 {
        return Err(SimError::InvalidAmount {
            amount: amount.to_string(),
        });
    }
    Ok(())
}
