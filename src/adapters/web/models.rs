//! Request and response bodies for the JSON API.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::error::SimError;
use crate::domain::market::Quote;
use crate::domain::player::PortfolioSnapshot;
use crate::domain::simulation::SimulationStatus;

// Largest integer an f64 represents exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Deserialize)]
pub struct TradeRequest {
    #[serde(default)]
    pub stock_name: String,
    #[serde(default)]
    pub amount: Option<Value>,
}

impl TradeRequest {
    /// Accepts a positive integer, an integral float or a string of digits.
    pub fn amount(&self) -> Result<u64, SimError> {
        let invalid = || SimError::InvalidAmount {
            amount: self
                .amount
                .as_ref()
                .map_or_else(|| "nothing".to_string(), Value::to_string),
        };

        let amount = match &self.amount {
            Some(Value::Number(n)) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= MAX_EXACT_INTEGER)
                    .map(|f| f as u64)
            }),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            _ => None,
        };

        amount.filter(|&n| n > 0).ok_or_else(invalid)
    }
}

#[derive(Debug, Serialize)]
pub struct QuoteBody {
    pub price: f64,
    pub change_percent: f64,
}

/// Ticker to quote, serialized in market order.
#[derive(Debug)]
pub struct MarketResponse(pub Vec<Quote>);

impl Serialize for MarketResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for quote in &self.0 {
            map.serialize_entry(
                &quote.name,
                &QuoteBody {
                    price: quote.price,
                    change_percent: round2(quote.change_percent),
                },
            )?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub dates: Vec<usize>,
    pub prices: Vec<f64>,
}

impl HistoryResponse {
    pub fn new(prices: Vec<f64>) -> Self {
        Self {
            dates: (0..prices.len()).collect(),
            prices,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PortfolioBody {
    pub cash: f64,
    pub stocks: BTreeMap<String, u64>,
}

impl From<PortfolioSnapshot> for PortfolioBody {
    fn from(snapshot: PortfolioSnapshot) -> Self {
        Self {
            cash: round2(snapshot.cash),
            stocks: snapshot.stocks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    #[serde(flatten)]
    pub portfolio: PortfolioBody,
    pub total_value: f64,
}

#[derive(Debug, Serialize)]
pub struct BuyResponse {
    pub message: String,
    pub total_cost: f64,
    pub portfolio: PortfolioBody,
}

#[derive(Debug, Serialize)]
pub struct SellResponse {
    pub message: String,
    pub total_earnings: f64,
    pub portfolio: PortfolioBody,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub running: bool,
    pub update_count: u64,
    pub interval_secs: f64,
    pub last_updated: Option<String>,
}

impl From<SimulationStatus> for StatusResponse {
    fn from(status: SimulationStatus) -> Self {
        Self {
            running: status.running,
            update_count: status.update_count,
            interval_secs: status.interval.as_secs_f64(),
            last_updated: status.last_updated.map(|t| t.to_rfc3339()),
        }
    }
}

pub fn round2(value: f64) -> f64 {
    crate::domain::stock::round_cents(value)
}
