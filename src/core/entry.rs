use std::collections::BTreeMap;

use chrono::Utc;
use colored::Colorize;
use serde::{Serialize, Deserialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

pub type Amount = i64;
pub type AccountName = String;

/// One ledger event. The two variants serialize flat into the entry
/// object under a `kind` tag, so a mined entry on disk reads
/// `{"id": ..., "timestamp": ..., "kind": "Mined", "account": ..., ...}`.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EntryKind {
    Mined {
        account: AccountName,
        reward: Amount
    },
    Transferred {
        sender: AccountName,
        receiver: AccountName,
        amount: Amount
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Entry {
    id: Uuid,
    timestamp: i64,
    #[serde(flatten)]
    kind: EntryKind,
    fingerprint: String
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            EntryKind::Mined { account, reward } => {
                write!(f, "{}: {} to {}", "Mined".bold(), reward, account)?;
            },
            EntryKind::Transferred { sender, receiver, amount } => {
                write!(f, "{}: {} from {} to {}", "Transferred".bold(), amount, sender, receiver)?;
            }
        }
        // a loaded fingerprint is not guaranteed to be 64 chars
        let short = self.fingerprint.get(..8).unwrap_or(&self.fingerprint);
        return write!(f, " [{}]", short);
    }
}

impl Entry {
    pub fn mined(account: &str, reward: Amount) -> Entry {
        let kind = EntryKind::Mined { account: account.to_owned(), reward };
        return Entry::build(kind);
    }

    pub fn transferred(sender: &str, receiver: &str, amount: Amount) -> Entry {
        let kind = EntryKind::Transferred {
            sender: sender.to_owned(),
            receiver: receiver.to_owned(),
            amount
        };
        return Entry::build(kind);
    }

    fn build(kind: EntryKind) -> Entry {
        let id = Uuid::new_v4();
        let timestamp = Utc::now().timestamp();
        let fingerprint = Entry::compute_fingerprint(&id, timestamp, &kind);
        return Entry { id, timestamp, kind, fingerprint };
    }

    pub fn id(&self) -> &Uuid {
        return &self.id;
    }

    pub fn timestamp(&self) -> i64 {
        return self.timestamp;
    }

    pub fn kind(&self) -> &EntryKind {
        return &self.kind;
    }

    pub fn fingerprint(&self) -> &str {
        return &self.fingerprint;
    }

    /// Canonical serialization of the entry's fields, fingerprint
    /// excluded: field names sorted lexicographically, compact JSON.
    /// Two entries with the same field set produce the same canonical
    /// form regardless of declaration or insertion order.
    pub fn canonical_json(&self) -> String {
        let mut fields: BTreeMap<&str, Value> = BTreeMap::new();
        fields.insert("id", Value::from(self.id.to_string()));
        fields.insert("timestamp", Value::from(self.timestamp));

        match &self.kind {
            EntryKind::Mined { account, reward } => {
                fields.insert("kind", Value::from("Mined"));
                fields.insert("account", Value::from(account.as_str()));
                fields.insert("reward", Value::from(*reward));
            },
            EntryKind::Transferred { sender, receiver, amount } => {
                fields.insert("kind", Value::from("Transferred"));
                fields.insert("sender", Value::from(sender.as_str()));
                fields.insert("receiver", Value::from(receiver.as_str()));
                fields.insert("amount", Value::from(*amount));
            }
        }

        return serde_json::to_string(&fields)
            .expect("canonical field map serializes to json");
    }

    fn compute_fingerprint(id: &Uuid, timestamp: i64, kind: &EntryKind) -> String {
        let probe = Entry {
            id: *id,
            timestamp,
            kind: kind.clone(),
            fingerprint: String::new()
        };
        return probe.recompute_fingerprint();
    }

    /// Hash the canonical form with SHA-256, ignoring the stored
    /// fingerprint. Equal to `fingerprint()` iff the entry is intact.
    pub fn recompute_fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_json().as_bytes());
        return hex::encode(hasher.finalize());
    }

    pub fn verify(&self) -> bool {
        return self.fingerprint == self.recompute_fingerprint();
    }
}
