//! Error taxonomy for the POS domain.
//!
//! Every failure a store or the order workflow can produce maps onto one of
//! these variants; the web layer translates them into HTTP statuses. Nothing
//! is retried automatically — stock races are prevented by atomicity, not
//! retry.

use thiserror::Error;

/// Result type alias using the domain [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Domain error taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing input (surfaced as a 422 with detail).
    #[error("{0}")]
    Validation(String),

    /// A referenced product, category, or transaction does not exist.
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// Resource kind (for the error message and response code)
        resource: &'static str,
        /// Identifier that failed to resolve
        id: String,
    },

    /// An order line asked for more units than the catalog holds.
    ///
    /// Carries the offending product name so the till can show which item
    /// ran out.
    #[error("Insufficient stock for {name}")]
    InsufficientStock {
        /// Name of the product that ran out
        name: String,
    },

    /// The caller does not own the requested resource.
    #[error("{0}")]
    Forbidden(&'static str),

    /// Storage backend failure (connection, query, serialization).
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl Error {
    /// Shorthand for a [`Error::NotFound`] with a displayable id.
    #[must_use]
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Shorthand for a [`Error::Validation`].
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
