//! Unified error types for the allocation session and its collaborators.
//!
//! Every failure the client can produce, from parse failures while sanitizing
//! rows through range violations, aggregate overflows, and backend
//! rejections, is a variant here. All are recoverable: the persister boundary converts
//! them into a user-visible message and the next edit cycle is the retry path.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Add rejected: the investor is already allocated on this lead.
    #[error("investor {investor_id} is already allocated on this lead")]
    DuplicateInvestor { investor_id: String },

    /// Add rejected: the investor is not in the directory.
    #[error("investor {investor_id} is not in the investor directory")]
    UnknownInvestor { investor_id: String },

    #[error("invalid percentage {raw:?}: must be a positive number")]
    InvalidPercentage { raw: String },

    #[error("invalid amount {raw:?}: must be a positive number")]
    InvalidAmount { raw: String },

    /// Percentage outside the investor's configured band.
    #[error(
        "percentage {percentage} for investor {investor_id} is outside the allowed range {min}-{max}"
    )]
    OutOfRange {
        investor_id: String,
        percentage: f64,
        min: f64,
        max: f64,
    },

    #[error("amount {amount:.2} exceeds the purchase price {price:.2}")]
    AmountExceedsPrice { amount: f64, price: f64 },

    #[error("allocated percentages total {total}%, which exceeds 100%")]
    PercentageOverflow { total: f64 },

    #[error("allocated amounts total {total:.2}, which exceeds the purchase price {price:.2}")]
    AmountOverflow { total: f64, price: f64 },

    #[error("allocation row {index} does not exist")]
    RowOutOfBounds { index: usize },

    /// The backend rejected the request; carries the server's `message` verbatim.
    #[error("request failed: {message}")]
    Network { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
