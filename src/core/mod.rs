pub mod entry;
pub mod ledger;
pub mod error;

pub use entry::{AccountName, Amount, Entry, EntryKind};
pub use ledger::{BalanceMap, Ledger};
pub use error::{LedgerError, LedgerResult};
