use std::collections::HashMap;

use serde::{Serialize, Deserialize};

use crate::core::entry::{AccountName, Amount, Entry, EntryKind};

pub type BalanceMap = HashMap<AccountName, Amount>;

/// The persisted unit: the append-only entry sequence plus the balance
/// index derived from it. The index is a cache; replaying `chain` from
/// the start must always reproduce `balances` exactly.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    chain: Vec<Entry>,
    #[serde(default)]
    balances: BalanceMap
}

impl Ledger {
    pub fn new() -> Ledger {
        return Ledger { chain: Vec::new(), balances: HashMap::new() };
    }

    pub fn entries(&self) -> &[Entry] {
        return &self.chain;
    }

    pub fn balances(&self) -> &BalanceMap {
        return &self.balances;
    }

    /// An account absent from the index has balance 0.
    pub fn balance(&self, account: &str) -> Amount {
        return self.balances.get(account).copied().unwrap_or(0);
    }

    pub fn len(&self) -> usize {
        return self.chain.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.chain.is_empty();
    }

    pub(crate) fn append(&mut self, entry: Entry) {
        Ledger::apply_entry(&mut self.balances, &entry);
        self.chain.push(entry);
    }

    fn apply_entry(balances: &mut BalanceMap, entry: &Entry) {
        match entry.kind() {
            EntryKind::Mined { account, reward } => {
                *balances.entry(account.clone()).or_insert(0) += reward;
            },
            EntryKind::Transferred { sender, receiver, amount } => {
                *balances.entry(sender.clone()).or_insert(0) -= amount;
                *balances.entry(receiver.clone()).or_insert(0) += amount;
            }
        }
    }

    /// Rebuild the balance index from the entry sequence alone.
    pub fn replay_balances(&self) -> BalanceMap {
        let mut balances = BalanceMap::new();
        for entry in &self.chain {
            Ledger::apply_entry(&mut balances, entry);
        }
        return balances;
    }

    pub fn is_consistent(&self) -> bool {
        return self.balances == self.replay_balances();
    }
}
