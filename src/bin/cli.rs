use educoin::{Amount, JsonStore, LedgerService, TransferOutcome};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;

const DEFAULT_LEDGER: &str = "educoin_chain.json";

#[derive(Parser, Debug)]
#[clap(version, about, propagate_version = true)]
struct Cli {
   /// Path to ledger file to operate on
   #[clap(short, long, value_parser)]
    path: Option<PathBuf>,

   /// TOML config file naming the ledger path; --path wins over it
   #[clap(short, long, value_parser)]
   config: Option<PathBuf>,

   /// Action to perform
   #[clap(subcommand)]
   action: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Credit a reward to an account
    Mine(Mine),
    /// Move value from one account to another
    Transfer(Transfer),
    /// Read and display one account's balance
    Balance(Balance),
    /// Display all accounts ranked by balance
    Leaderboard,
    /// List all recorded entries
    List
}

#[derive(Debug, Deserialize)]
struct CliConfig {
    ledger: PathBuf
}

impl CliConfig {
    fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_content = fs::read_to_string(filepath)
            .with_context(|| "failed to read config file")?;
        let config = toml::from_str(&file_content)
            .with_context(|| "failed to parse config file")?;
        return Ok(config);
    }
}

fn ledger_path(args: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(path) = &args.path {
        return Ok(path.clone());
    }
    if let Some(config) = &args.config {
        return Ok(CliConfig::read(config)?.ledger);
    }
    return Ok(PathBuf::from(DEFAULT_LEDGER));
}

fn format_balance(balance: Amount) -> colored::ColoredString {
    let color = if balance < 0 {
        colored::ColoredString::bright_red
    } else if balance > 0 {
        colored::ColoredString::green
    } else {
        colored::ColoredString::normal
    };
    return color(format!("{}", balance).white());
}

#[derive(Args, Debug)]
struct Mine {
    /// Name of the account receiving the reward
    #[clap(value_parser)]
    account: String,

    #[clap(short='r', long, value_parser, default_value_t = 1)]
    reward: Amount
}

#[derive(Args, Debug)]
struct Transfer {
    /// Name of the account that pays
    #[clap(short='f', long, value_parser)]
    from: String,

    /// Name of the account that gets paid
    #[clap(short='t', long, value_parser)]
    to: String,

    #[clap(short='a', long, value_parser)]
    amount: Amount
}

#[derive(Args, Debug)]
struct Balance {
    /// Name of the account to look up
    #[clap(value_parser)]
    account: String
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let path = ledger_path(&args)?;
    let store = JsonStore::new(&path);
    let mut service = LedgerService::load(store)
        .with_context(|| format!("failed to open ledger at {}", path.display()))?;

    match args.action {
        Subcommands::Mine(mine) => {
            let entry = service.mine(&mine.account, mine.reward)?;
            println!("{}", entry);
        },
        Subcommands::Transfer(transfer) => {
            match service.transfer(&transfer.from, &transfer.to, transfer.amount)? {
                TransferOutcome::Accepted(entry) => {
                    println!("{}", entry);
                },
                TransferOutcome::Rejected { available, requested } => {
                    println!("{}: {} holds {}, {} requested",
                        "rejected".bright_red(), transfer.from, available, requested);
                }
            }
        },
        Subcommands::Balance(balance) => {
            println!("{}: {}", balance.account, format_balance(service.balance(&balance.account)));
        },
        Subcommands::Leaderboard => {
            for (rank, (account, balance)) in service.leaderboard().iter().enumerate() {
                println!("{}. {}: {}", rank + 1, account, format_balance(*balance));
            }
        },
        Subcommands::List => {
            for entry in service.entries() {
                println!("{}", entry);
            }
        }
    }

    return Ok(());
}
