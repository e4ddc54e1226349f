//! Application context: one market, one player and the update scheduler.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use super::error::SimError;
use super::market::{Market, Quote};
use super::player::{DEFAULT_INITIAL_CASH, Player, PortfolioSnapshot, TradeReceipt};
use super::scheduler::{DEFAULT_INTERVAL, Scheduler, SchedulerState};
use super::universe::{Listing, default_universe};

pub const DEFAULT_LISTEN: &str = "127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub interval: Duration,
    pub initial_cash: f64,
    pub listings: Vec<Listing>,
    pub listen: SocketAddr,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            interval: DEFAULT_INTERVAL,
            initial_cash: DEFAULT_INITIAL_CASH,
            listings: default_universe(),
            listen: SocketAddr::from(([127, 0, 0, 1], 5000)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationStatus {
    pub running: bool,
    pub update_count: u64,
    pub interval: Duration,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Market, portfolio and status read together, as of one update cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOverview {
    pub quotes: Vec<Quote>,
    pub portfolio: PortfolioSnapshot,
    pub total_value: f64,
    pub status: SimulationStatus,
}

/// Market and player each sit behind their own lock. Trades take the market
/// lock first, then the player lock.
pub struct Simulation {
    market: Arc<Mutex<Market>>,
    player: Mutex<Player>,
    scheduler: Scheduler,
}

impl Simulation {
    pub fn new(config: &SimulationConfig) -> Self {
        let market = Arc::new(Mutex::new(Market::new(&config.listings)));
        let ticking = Arc::clone(&market);
        let scheduler = Scheduler::new(config.interval, move || ticking.lock().update_market());

        Simulation {
            market,
            player: Mutex::new(Player::new(config.initial_cash)),
            scheduler,
        }
    }

    pub fn show_market(&self) -> Vec<Quote> {
        self.market.lock().show_market()
    }

    pub fn stock_history(&self, name: &str) -> Result<Vec<f64>, SimError> {
        self.market
            .lock()
            .get_stock_history(name)
            .map(<[f64]>::to_vec)
            .ok_or_else(|| SimError::StockNotFound {
                name: name.to_string(),
            })
    }

    /// Run one update cycle immediately, outside the timer.
    pub fn update_market(&self) {
        self.market.lock().update_market();
    }

    pub fn buy(&self, name: &str, amount: u64) -> Result<TradeReceipt, SimError> {
        let market = self.market.lock();
        let mut player = self.player.lock();
        let result = player.buy_stock(&market, name, amount);
        log_trade(&result, name, amount);
        result
    }

    pub fn sell(&self, name: &str, amount: u64) -> Result<TradeReceipt, SimError> {
        let market = self.market.lock();
        let mut player = self.player.lock();
        let result = player.sell_stock(&market, name, amount);
        log_trade(&result, name, amount);
        result
    }

    pub fn portfolio(&self) -> PortfolioSnapshot {
        self.player.lock().show_portfolio()
    }

    pub fn start(&self) -> bool {
        self.scheduler.start()
    }

    pub fn stop(&self) -> bool {
        self.scheduler.stop()
    }

    pub fn toggle(&self) -> SchedulerState {
        self.scheduler.toggle()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Stop the timer, then restore the market and the player to their
    /// starting values.
    pub fn reset(&self) {
        self.scheduler.stop();
        self.market.lock().reset_market();
        self.player.lock().reset_portfolio();
        tracing::info!("simulation and portfolio reset");
    }

    pub fn status(&self) -> SimulationStatus {
        let running = self.scheduler.is_running();
        let market = self.market.lock();
        SimulationStatus {
            running,
            update_count: market.update_count(),
            interval: self.scheduler.interval(),
            last_updated: market.last_updated(),
        }
    }

    /// Snapshot everything a dashboard shows under one market-then-player lock.
    pub fn overview(&self) -> SimulationOverview {
        let running = self.scheduler.is_running();
        let market = self.market.lock();
        let player = self.player.lock();
        SimulationOverview {
            quotes: market.show_market(),
            portfolio: player.show_portfolio(),
            total_value: player.total_value(&market),
            status: SimulationStatus {
                running,
                update_count: market.update_count(),
                interval: self.scheduler.interval(),
                last_updated: market.last_updated(),
            },
        }
    }
}

fn log_trade(result: &Result<TradeReceipt, SimError>, name: &str, amount: u64) {
    match result {
        Ok(receipt) => tracing::info!(
            stock = %receipt.name,
            amount = receipt.amount,
            price = receipt.price,
            total = receipt.total,
            "{}",
            receipt.message()
        ),
        Err(err) => tracing::warn!(stock = %name, amount, "trade rejected: {err}"),
    }
}
