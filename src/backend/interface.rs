use thiserror::Error;

use crate::core::Ledger;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Occurs when the backing medium exists but its content does not
    /// parse as a ledger document. Not recovered automatically.
    #[error("corrupt ledger store: {0}")]
    CorruptStore(#[source] serde_json::Error),
    /// Any I/O failure while reading or writing the backing medium.
    #[error(transparent)]
    Io(#[from] std::io::Error)
}

pub type Result<T> = std::result::Result<T, BackendError>;

pub trait LedgerStore {
    fn load(&self) -> Result<Ledger>;
    fn save(&self, ledger: &Ledger) -> Result<()>;
}
