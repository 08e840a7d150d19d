pub mod core;
pub mod backend;
pub mod service;

pub use crate::core::{AccountName, Amount, Entry, EntryKind, Ledger, LedgerError};
pub use crate::core::{entry, ledger};
pub use crate::backend::{BackendError, JsonStore, LedgerStore};
pub use crate::service::{LedgerService, TransferOutcome};
