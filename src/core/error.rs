use thiserror::Error;

use crate::backend::BackendError;
use crate::core::Amount;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Occurs when a mutating operation is given a zero or negative
    /// amount; rejected before any state change.
    #[error("invalid amount {0}: must be positive")]
    InvalidAmount(Amount),
    /// Occurs when the backing store fails to load or save. After a
    /// failed save the in-memory ledger is ahead of the stored one;
    /// the caller decides whether to retry the save or abort.
    #[error(transparent)]
    Backend(#[from] BackendError)
}

pub type LedgerResult<T> = Result<T, LedgerError>;
