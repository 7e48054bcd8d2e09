//! # pos-inventory
//!
//! Command-line till. Each subcommand runs one operation against the store and
//! prints the result; `shell` (the default) reads commands from stdin until `quit`.
//!
//! ```bash
//! pos-inventory add "Blue Widget" 9.99
//! pos-inventory restock "Blue Widget"
//! pos-inventory sell "Blue Widget"
//! POS_STORE=/tmp/till.json pos-inventory shell
//! ```

use clap::{Parser, Subcommand};
use pos_inventory::config::{StorageConfig, TillConfig, DEFAULT_MAILBOX_CAPACITY};
use pos_inventory::console::{Command, Console, ParseError, HELP};
use pos_inventory::lifecycle::{setup_tracing, TillSystem};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "pos-inventory", version, about = "Single-user point-of-sale inventory tracker")]
struct Cli {
    /// JSON file holding the till's state.
    #[arg(long, global = true, env = "POS_STORE", default_value = "pos-inventory.json")]
    store: PathBuf,

    /// Keep everything in memory; nothing is saved.
    #[arg(long, global = true)]
    memory: bool,

    /// Capacity of the till's request mailbox.
    #[arg(long, global = true, env = "POS_MAILBOX", default_value_t = DEFAULT_MAILBOX_CAPACITY)]
    mailbox: usize,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Show every product and the stats bar.
    List,
    /// Add a product with empty stock.
    Add { name: String, price: String },
    /// Remove a product.
    Delete { name: String },
    /// Sell one unit.
    Sell { name: String },
    /// Add one unit of stock.
    Restock { name: String },
    /// Show the stats bar.
    Stats,
    /// Zero units sold and total revenue.
    ResetStats {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Zero the cart total.
    ResetCart,
    /// Read commands from stdin.
    Shell,
}

impl Cli {
    fn config(&self) -> TillConfig {
        let storage = if self.memory {
            StorageConfig::Memory
        } else {
            StorageConfig::File(self.store.clone())
        };
        TillConfig {
            storage,
            mailbox_capacity: self.mailbox.max(1),
        }
    }
}

impl Cmd {
    fn into_command(self) -> Option<Command> {
        let command = match self {
            Cmd::List => Command::List,
            Cmd::Add { name, price } => Command::Add { name, price },
            Cmd::Delete { name } => Command::Delete { name },
            Cmd::Sell { name } => Command::Sell { name },
            Cmd::Restock { name } => Command::Restock { name },
            Cmd::Stats => Command::Stats,
            Cmd::ResetStats { yes } => Command::ResetStats { confirmed: yes },
            Cmd::ResetCart => Command::ResetCart,
            Cmd::Shell => return None,
        };
        Some(command)
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let cli = Cli::parse();
    let config = cli.config();
    let system = TillSystem::from_config(&config).map_err(|e| e.to_string())?;
    let console = Console::new(system.client.clone());

    let result = match cli.command.and_then(Cmd::into_command) {
        Some(command) => match console.execute(command).await {
            Ok(out) => {
                println!("{}", out);
                Ok(())
            }
            Err(e) => Err(e.to_string()),
        },
        None => run_shell(&console).await.map_err(|e| e.to_string()),
    };

    drop(console);
    system.shutdown().await?;
    result
}

async fn run_shell<P>(console: &Console<P>) -> std::io::Result<()>
where
    P: pos_inventory::clients::PointOfSale,
{
    info!("Shell started");
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(b"Type `help` for commands.\n> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let reply = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => HELP.to_string(),
            Ok(command) => match console.execute(command).await {
                Ok(out) => out,
                Err(e) => {
                    error!(error = %e, "Command failed");
                    format!("Error: {}", e)
                }
            },
            Err(ParseError::Empty) => String::new(),
            Err(e) => e.to_string(),
        };
        if !reply.is_empty() {
            stdout.write_all(reply.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    info!("Shell closed");
    Ok(())
}
