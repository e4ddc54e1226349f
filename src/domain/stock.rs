//! Single ticker price state and history.

/// Round to two fractional digits, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    name: String,
    price: f64,
    history: Vec<f64>,
    change_percent: f64,
}

impl Stock {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        let price = round_cents(price);
        Stock {
            name: name.into(),
            price,
            history: vec![price],
            change_percent: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Signed percentage move from the previous price.
    pub fn change_percent(&self) -> f64 {
        self.change_percent
    }

    /// Every price the stock has had, oldest first.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn initial_price(&self) -> f64 {
        self.history[0]
    }

    pub fn update_count(&self) -> usize {
        self.history.len() - 1
    }

    /// Apply a fractional move (`0.05` is +5%) and record the new price.
    ///
    /// A stock whose price has reached zero stays at zero and reports no change.
    pub fn update_price(&mut self, change: f64) {
        let old_price = self.price;
        let new_price = round_cents(old_price + old_price * change).max(0.0);

        self.change_percent = if old_price > 0.0 {
            (new_price - old_price) / old_price * 100.0
        } else {
            0.0
        };
        self.history.push(new_price);
        self.price = new_price;
    }

    pub fn reset(&mut self) {
        self.history.truncate(1);
        self.price = self.history[0];
        self.change_percent = 0.0;
    }
}
