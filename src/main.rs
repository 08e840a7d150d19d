use educoin::{JsonStore, LedgerService, TransferOutcome};

use colored::Colorize;

/// Demonstration run against the default store file, mirroring the
/// CLI's `mine`/`transfer` flow on a fixed scenario.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let store = JsonStore::new("educoin_chain.json");
    let mut service = LedgerService::load(store)?;

    service.mine("Alice", 1)?;
    service.mine("Bob", 1)?;
    service.mine("Alice", 1)?;

    match service.transfer("Alice", "Bob", 1)? {
        TransferOutcome::Accepted(entry) => {
            println!("{}: {}", "Transfer successful".green(), entry);
        },
        TransferOutcome::Rejected { available, requested } => {
            println!("{} ({} available, {} requested)",
                "Transfer failed - insufficient funds".red(), available, requested);
        }
    }

    println!("\nBalances:");
    let mut accounts: Vec<_> = service.ledger().balances().iter().collect();
    accounts.sort_by(|left, right| left.0.cmp(right.0));
    for (account, balance) in accounts {
        println!("{}: {} EduCoin", account, balance);
    }

    println!("\nLeaderboard:");
    for (rank, (account, balance)) in service.leaderboard().iter().enumerate() {
        println!("{}. {}: {} EduCoin", rank + 1, account, balance);
    }

    return Ok(());
}
