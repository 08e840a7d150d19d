use log::{debug, info, warn};

use crate::backend::LedgerStore;
use crate::core::{AccountName, Amount, Entry, Ledger, LedgerError, LedgerResult};

/// Outcome of a transfer. Insufficient funds is a routine result, not
/// an error, so callers are forced to handle it explicitly.
#[derive(Clone, Debug, PartialEq)]
pub enum TransferOutcome {
    Accepted(Entry),
    Rejected {
        available: Amount,
        requested: Amount
    }
}

impl TransferOutcome {
    pub fn is_accepted(&self) -> bool {
        return matches!(self, TransferOutcome::Accepted(..));
    }
}

/// The four ledger operations over an owned `Ledger` and a store
/// handle. Mutating operations validate, append, update balances and
/// write the whole ledger through to the store; reads never touch it.
///
/// Mutations take `&mut self`, so one service instance has exactly one
/// writer at a time; callers that share a service across threads wrap
/// it in a `Mutex` to keep the check-update-save sequence atomic.
pub struct LedgerService<S: LedgerStore> {
    store: S,
    ledger: Ledger
}

impl<S: LedgerStore> LedgerService<S> {
    /// Loads existing state from the store, or starts empty if the
    /// store has none.
    pub fn load(store: S) -> LedgerResult<LedgerService<S>> {
        let ledger = store.load()?;
        debug!("ledger service ready with {} entries", ledger.len());
        return Ok(LedgerService { store, ledger });
    }

    /// Credits `reward` to `account` and records a Mined entry.
    ///
    /// After a save failure the entry is already applied in memory;
    /// the returned error tells the caller that memory and disk have
    /// diverged.
    pub fn mine(&mut self, account: &str, reward: Amount) -> LedgerResult<Entry> {
        if reward <= 0 {
            return Err(LedgerError::InvalidAmount(reward));
        }

        let entry = Entry::mined(account, reward);
        self.ledger.append(entry.clone());
        self.store.save(&self.ledger)?;

        info!("mined {} for {}", reward, account);
        return Ok(entry);
    }

    /// Moves `amount` from `sender` to `receiver` and records a
    /// Transferred entry. Self-transfers are legal entries with no net
    /// balance effect; they still pass through the funds check.
    pub fn transfer(&mut self, sender: &str, receiver: &str, amount: Amount) -> LedgerResult<TransferOutcome> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let available = self.ledger.balance(sender);
        if available < amount {
            warn!("transfer of {} rejected: {} holds {}", amount, sender, available);
            return Ok(TransferOutcome::Rejected { available, requested: amount });
        }

        let entry = Entry::transferred(sender, receiver, amount);
        self.ledger.append(entry.clone());
        self.store.save(&self.ledger)?;

        info!("transferred {} from {} to {}", amount, sender, receiver);
        return Ok(TransferOutcome::Accepted(entry));
    }

    /// Current balance; 0 for an account that never appeared.
    pub fn balance(&self, account: &str) -> Amount {
        return self.ledger.balance(account);
    }

    /// All known accounts, highest balance first. Equal balances are
    /// ordered by account name ascending so the output is stable.
    pub fn leaderboard(&self) -> Vec<(AccountName, Amount)> {
        let mut ranking: Vec<(AccountName, Amount)> = self.ledger.balances()
            .iter()
            .map(|(account, balance)| (account.clone(), *balance))
            .collect();
        ranking.sort_by(|left, right| {
            right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0))
        });
        return ranking;
    }

    pub fn entries(&self) -> &[Entry] {
        return self.ledger.entries();
    }

    pub fn ledger(&self) -> &Ledger {
        return &self.ledger;
    }
}
