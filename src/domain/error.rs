//! Domain error types.

use super::universe::UniverseError;

/// Top-level error type for stocksim.
///
/// The trade variants display as the short messages the API reports back to the
/// player; the details stay available on the variant fields.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Stock not found")]
    StockNotFound { name: String },

    #[error("Insufficient funds")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("Insufficient shares")]
    InsufficientShares {
        name: String,
        requested: u64,
        held: u64,
    },

    #[error("amount must be a positive integer, got {amount}")]
    InvalidAmount { amount: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error("history export failed: {reason}")]
    Export { reason: String },

    #[error("server error: {reason}")]
    Server { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SimError {
    /// True for rejections caused by the player's request rather than by the process.
    pub fn is_trade_rejection(&self) -> bool {
        matches!(
            self,
            SimError::StockNotFound { .. }
                | SimError::InsufficientFunds { .. }
                | SimError::InsufficientShares { .. }
        )
    }
}

impl From<&SimError> for std::process::ExitCode {
    fn from(err: &SimError) -> Self {
        let code: u8 = match err {
            SimError::Io(_) | SimError::Export { .. } => 1,
            SimError::ConfigParse { .. }
            | SimError::ConfigInvalid { .. }
            | SimError::Universe(_) => 2,
            SimError::Server { .. } => 3,
            SimError::StockNotFound { .. }
            | SimError::InsufficientFunds { .. }
            | SimError::InsufficientShares { .. }
            | SimError::InvalidAmount { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
