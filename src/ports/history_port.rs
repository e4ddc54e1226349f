//! Price history export port trait.

use std::path::Path;

use crate::domain::error::SimError;
use crate::domain::market::Market;

/// Port for writing a market's price history somewhere durable.
pub trait HistoryPort {
    /// Write every stock's history. `None` writes to standard output.
    fn write(&self, market: &Market, output_path: Option<&Path>) -> Result<(), SimError>;
}
