//! CSV price history adapter.
//!
//! One row per update cycle, one column per ticker in market order:
//!
//! ```text
//! cycle,AAPL,GOOGL
//! 0,150.00,2800.00
//! 1,148.21,2861.94
//! ```

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::domain::error::SimError;
use crate::domain::market::Market;
use crate::ports::history_port::HistoryPort;

#[derive(Debug, Default)]
pub struct CsvHistoryAdapter;

impl CsvHistoryAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_to<W: Write>(&self, market: &Market, writer: W) -> Result<(), SimError> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec!["cycle".to_string()];
        header.extend(market.tickers().map(str::to_string));
        wtr.write_record(&header).map_err(export_error)?;

        let rows = market
            .stocks()
            .iter()
            .map(|s| s.history().len())
            .max()
            .unwrap_or(0);
        for cycle in 0..rows {
            let mut record = vec![cycle.to_string()];
            record.extend(market.stocks().iter().map(|s| {
                s.history()
                    .get(cycle)
                    .map(|p| format!("{p:.2}"))
                    .unwrap_or_default()
            }));
            wtr.write_record(&record).map_err(export_error)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

impl HistoryPort for CsvHistoryAdapter {
    fn write(&self, market: &Market, output_path: Option<&Path>) -> Result<(), SimError> {
        match output_path {
            Some(path) => {
                let file = File::create(path).map_err(|e| SimError::Export {
                    reason: format!("failed to create {}: {}", path.display(), e),
                })?;
                self.write_to(market, file)
            }
            None => self.write_to(market, io::stdout().lock()),
        }
    }
}

fn export_error(err: csv::Error) -> SimError {
    SimError::Export {
        reason: format!("CSV write error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::universe::Listing;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_market() -> Market {
        Market::new(&[Listing::new("AAPL", 150.0), Listing::new("INTC", 60.0)])
    }

    fn render(market: &Market) -> String {
        let mut buf = Vec::new();
        CsvHistoryAdapter::new().write_to(market, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn fresh_market_has_header_and_starting_row() {
        let csv = render(&sample_market());
        assert_eq!(csv, "cycle,AAPL,INTC\n0,150.00,60.00\n");
    }

    #[test]
    fn one_row_per_cycle() {
        let mut market = sample_market();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..4 {
            market.update_market_with(&mut rng);
        }
        let csv = render(&market);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[5].starts_with("4,"));

        let last = market.price_of("INTC").unwrap();
        assert!(lines[5].ends_with(&format!("{last:.2}")));
    }

    #[test]
    fn write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        CsvHistoryAdapter::new()
            .write(&sample_market(), Some(&path))
            .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("cycle,AAPL,INTC"));
    }

    #[test]
    fn unwritable_path_is_an_export_error() {
        let err = CsvHistoryAdapter::new()
            .write(&sample_market(), Some(Path::new("/nonexistent/dir/out.csv")))
            .unwrap_err();
        assert!(matches!(err, SimError::Export { .. }));
    }
}
